use crate::color::Color;
use crate::params::EffectParameters;

pub const PRESET_NAMES: &[&str] = &["default", "home"];

/// Look up a named preset (case-insensitive).
pub fn preset(name: &str) -> Option<EffectParameters> {
    match name.trim().to_ascii_lowercase().as_str() {
        "default" => Some(EffectParameters::default()),
        "home" => Some(home()),
        _ => None,
    }
}

// Slow-decay landing page look: thick line, fast magenta sparkles
fn home() -> EffectParameters {
    EffectParameters {
        decay: 0.01,
        line_thickness: 5.0,
        sparkle_reactiveness: 0.8,
        sparkle_velocity: 10.0,
        sparkle_color: Color::rgb8(0xFF, 0x00, 0xFF),
        sparkle_size: 2.0,
        ..EffectParameters::default()
    }
}
