// Shared simulation/render tuning constants used by both web and native frontends.

// Time-domain window length (an fftSize of 2048 yields 1024 time-domain samples)
pub const WINDOW_LEN: usize = 1024;
pub const ANALYSER_FFT_SIZE: u32 = 2048;

// Sparkle spawn: probability = min(1, rms * reactiveness * SPAWN_RMS_SCALE)
pub const SPAWN_RMS_SCALE: f32 = 10.0;
// Initial opacity = min(1, spawn_chance * SPAWN_OPACITY_SCALE)
pub const SPAWN_OPACITY_SCALE: f32 = 2.0;
// Initial vertical speed is velocity * uniform(SPAWN_SPEED_MIN_FRAC, 1.0)
pub const SPAWN_SPEED_MIN_FRAC: f32 = 0.5;

// Per-tick vertical drag
pub const SPARKLE_VY_DRAG: f32 = 0.99;
// Opacity lost per tick at the canvas edge (scaled by normalized distance from midline)
pub const SPARKLE_FADE_RATE: f32 = 0.03;
// Lower bound on per-tick fade so a motionless sparkle still expires
pub const SPARKLE_MIN_FADE_PER_TICK: f32 = 0.001;
// Sparkles at or below this opacity are culled
pub const SPARKLE_CULL_OPACITY: f32 = 0.01;

// Background cleared every drawn frame
pub const BACKGROUND_RGB: [u8; 3] = [0x00, 0x00, 0x00];
