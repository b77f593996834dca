//! Effect parameters shared by the web and native front ends.
//!
//! Parameters are immutable for the lifetime of a mounted visualizer. Hosts
//! start from a preset (see [`crate::presets`]) and layer sparse
//! [`ParamOverrides`] on top: JS option objects on the web, CLI flags natively.

use crate::color::Color;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("color palette must contain at least one color")]
    EmptyPalette,
    #[error("`{field}` must be a finite number")]
    NotFinite { field: &'static str },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectParameters {
    /// Stroke width of the waveform (px).
    pub line_thickness: f32,
    /// Vertical amplitude multiplier.
    pub gain: f32,
    /// Blend factor used when the signal rises.
    pub attack: f32,
    /// Blend factor used when the signal falls.
    pub decay: f32,
    pub colors: Vec<Color>,
    /// Palette rotation period in milliseconds; 0 disables rotation.
    pub color_change_interval: u32,
    /// Sparkle radius (px).
    pub sparkle_size: f32,
    pub sparkle_color: Color,
    /// RMS to spawn-probability scale.
    pub sparkle_reactiveness: f32,
    /// Base sparkle speed (px per tick).
    pub sparkle_velocity: f32,
    /// Horizontal spawn jitter range (px).
    pub sparkle_spread: f32,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            line_thickness: 2.0,
            gain: 2.5,
            attack: 0.15,
            decay: 0.25,
            colors: vec![
                Color::rgb8(0x00, 0xFF, 0x00),
                Color::rgb8(0x00, 0xFF, 0xFF),
                Color::rgb8(0xFF, 0x00, 0xFF),
                Color::rgb8(0xFF, 0xFF, 0x00),
            ],
            color_change_interval: 30 * 1000,
            sparkle_size: 2.0,
            sparkle_color: Color::WHITE,
            sparkle_reactiveness: 0.8,
            sparkle_velocity: 5.0,
            sparkle_spread: 20.0,
        }
    }
}

impl EffectParameters {
    /// Checks the invariants the renderer relies on.
    ///
    /// `attack`/`decay` are deliberately left unclamped: values outside
    /// [0, 1] overshoot or undershoot but remain well defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let finite = [
            ("lineThickness", self.line_thickness),
            ("gain", self.gain),
            ("attack", self.attack),
            ("decay", self.decay),
            ("sparkleSize", self.sparkle_size),
            ("sparkleReactiveness", self.sparkle_reactiveness),
            ("sparkleVelocity", self.sparkle_velocity),
            ("sparkleSpread", self.sparkle_spread),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        for (field, value) in [
            ("lineThickness", self.line_thickness),
            ("sparkleSize", self.sparkle_size),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Palette rotation period, or `None` when rotation is disabled.
    #[inline]
    pub fn color_change_period(&self) -> Option<Duration> {
        (self.color_change_interval > 0)
            .then(|| Duration::from_millis(self.color_change_interval as u64))
    }
}

/// Sparse set of parameter overrides layered on top of a preset.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParamOverrides {
    pub line_thickness: Option<f32>,
    pub gain: Option<f32>,
    pub attack: Option<f32>,
    pub decay: Option<f32>,
    pub colors: Option<Vec<Color>>,
    pub color_change_interval: Option<u32>,
    pub sparkle_size: Option<f32>,
    pub sparkle_color: Option<Color>,
    pub sparkle_reactiveness: Option<f32>,
    pub sparkle_velocity: Option<f32>,
    pub sparkle_spread: Option<f32>,
}

impl ParamOverrides {
    pub fn apply(self, base: EffectParameters) -> EffectParameters {
        EffectParameters {
            line_thickness: self.line_thickness.unwrap_or(base.line_thickness),
            gain: self.gain.unwrap_or(base.gain),
            attack: self.attack.unwrap_or(base.attack),
            decay: self.decay.unwrap_or(base.decay),
            colors: self.colors.unwrap_or(base.colors),
            color_change_interval: self
                .color_change_interval
                .unwrap_or(base.color_change_interval),
            sparkle_size: self.sparkle_size.unwrap_or(base.sparkle_size),
            sparkle_color: self.sparkle_color.unwrap_or(base.sparkle_color),
            sparkle_reactiveness: self
                .sparkle_reactiveness
                .unwrap_or(base.sparkle_reactiveness),
            sparkle_velocity: self.sparkle_velocity.unwrap_or(base.sparkle_velocity),
            sparkle_spread: self.sparkle_spread.unwrap_or(base.sparkle_spread),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_table() {
        let p = EffectParameters::default();
        assert_eq!(p.line_thickness, 2.0);
        assert_eq!(p.gain, 2.5);
        assert_eq!(p.attack, 0.15);
        assert_eq!(p.decay, 0.25);
        assert_eq!(p.colors.len(), 4);
        assert_eq!(p.color_change_interval, 30_000);
        assert_eq!(p.sparkle_size, 2.0);
        assert_eq!(p.sparkle_color, Color::WHITE);
        assert_eq!(p.sparkle_reactiveness, 0.8);
        assert_eq!(p.sparkle_velocity, 5.0);
        assert_eq!(p.sparkle_spread, 20.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_palette_and_bad_numbers() {
        let mut p = EffectParameters::default();
        p.colors.clear();
        assert_eq!(p.validate(), Err(ConfigError::EmptyPalette));

        let mut p = EffectParameters::default();
        p.gain = f32::INFINITY;
        assert_eq!(p.validate(), Err(ConfigError::NotFinite { field: "gain" }));

        let mut p = EffectParameters::default();
        p.sparkle_size = -1.0;
        assert!(matches!(
            p.validate(),
            Err(ConfigError::Negative { field: "sparkleSize", .. })
        ));
    }

    #[test]
    fn out_of_range_attack_is_permitted() {
        let mut p = EffectParameters::default();
        p.attack = 1.6;
        p.decay = -0.2;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn zero_interval_disables_rotation() {
        let mut p = EffectParameters::default();
        assert_eq!(p.color_change_period(), Some(Duration::from_secs(30)));
        p.color_change_interval = 0;
        assert_eq!(p.color_change_period(), None);
    }
}
