//! Command-line argument parsing.

use clap::Parser;
use scope_core::{preset, Color, EffectParameters, ParamOverrides, PRESET_NAMES};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "scope")]
#[command(about = "Microphone-driven oscilloscope with audio-reactive sparkles", long_about = None)]
pub struct Args {
    /// Parameter preset: default, home
    #[arg(long, value_name = "NAME", default_value = "default")]
    pub preset: String,

    /// Stay windowed instead of going borderless fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Seed for the sparkle RNG (time-based when omitted)
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Waveform stroke width
    #[arg(long, value_name = "PX")]
    pub line_thickness: Option<f32>,

    /// Vertical amplitude multiplier
    #[arg(long)]
    pub gain: Option<f32>,

    /// Blend factor while the signal rises
    #[arg(long, allow_negative_numbers = true)]
    pub attack: Option<f32>,

    /// Blend factor while the signal falls
    #[arg(long, allow_negative_numbers = true)]
    pub decay: Option<f32>,

    /// Comma-separated line palette, e.g. "#00FF00,#00FFFF"
    #[arg(long, value_name = "COLORS", value_delimiter = ',')]
    pub colors: Option<Vec<Color>>,

    /// Palette rotation period (0 disables rotation)
    #[arg(long, value_name = "MS")]
    pub color_change_interval_ms: Option<u32>,

    /// Sparkle radius
    #[arg(long, value_name = "PX")]
    pub sparkle_size: Option<f32>,

    /// Sparkle fill color
    #[arg(long, value_name = "COLOR")]
    pub sparkle_color: Option<Color>,

    /// RMS to spawn-probability scale
    #[arg(long)]
    pub sparkle_reactiveness: Option<f32>,

    /// Base sparkle speed (px per frame)
    #[arg(long)]
    pub sparkle_velocity: Option<f32>,

    /// Horizontal spawn jitter range
    #[arg(long, value_name = "PX")]
    pub sparkle_spread: Option<f32>,
}

impl Args {
    pub fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            line_thickness: self.line_thickness,
            gain: self.gain,
            attack: self.attack,
            decay: self.decay,
            colors: self.colors.clone(),
            color_change_interval: self.color_change_interval_ms,
            sparkle_size: self.sparkle_size,
            sparkle_color: self.sparkle_color,
            sparkle_reactiveness: self.sparkle_reactiveness,
            sparkle_velocity: self.sparkle_velocity,
            sparkle_spread: self.sparkle_spread,
        }
    }

    /// Resolve the preset and layer flag overrides on top.
    pub fn effect_parameters(&self) -> anyhow::Result<EffectParameters> {
        let base = preset(&self.preset).ok_or_else(|| {
            anyhow::anyhow!(
                "unknown preset '{}' (expected one of: {})",
                self.preset,
                PRESET_NAMES.join(", ")
            )
        })?;
        let params = self.overrides().apply(base);
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_default_preset() {
        let args = Args::try_parse_from(["scope"]).unwrap();
        assert!(!args.windowed);
        assert!(args.overrides().is_empty());
        assert_eq!(args.effect_parameters().unwrap(), EffectParameters::default());
    }

    #[test]
    fn preset_with_overrides() {
        let args = Args::try_parse_from([
            "scope",
            "--preset",
            "home",
            "--gain",
            "3",
            "--colors",
            "#FF0000,lime",
            "--sparkle-color",
            "#0ff",
        ])
        .unwrap();
        let p = args.effect_parameters().unwrap();
        assert_eq!(p.gain, 3.0);
        assert_eq!(p.decay, 0.01);
        assert_eq!(p.line_thickness, 5.0);
        assert_eq!(
            p.colors,
            vec![Color::rgb8(0xFF, 0, 0), Color::rgb8(0, 0xFF, 0)]
        );
        assert_eq!(p.sparkle_color, Color::rgb8(0, 0xFF, 0xFF));
    }

    #[test]
    fn unknown_preset_and_bad_color_are_rejected() {
        let args = Args::try_parse_from(["scope", "--preset", "disco"]).unwrap();
        assert!(args.effect_parameters().is_err());
        assert!(Args::try_parse_from(["scope", "--sparkle-color", "#12"]).is_err());
    }
}
