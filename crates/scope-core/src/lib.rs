pub mod color;
pub mod constants;
pub mod palette;
pub mod params;
pub mod presets;
pub mod signal;
pub mod sparkles;
pub mod surface;
pub mod timing;
pub mod visualizer;
pub mod waveform;

pub use color::*;
pub use constants::*;
pub use palette::*;
pub use params::*;
pub use presets::*;
pub use signal::*;
pub use sparkles::*;
pub use surface::*;
pub use timing::*;
pub use visualizer::*;
pub use waveform::*;

// Capsule/circle shader used by the native renderer
pub static SCOPE_WGSL: &str = include_str!("../shaders/scope.wgsl");
