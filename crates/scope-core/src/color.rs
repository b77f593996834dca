//! RGBA colors parsed from the hex/CSS strings used in effect presets.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,
    #[error("unknown color name `{0}`")]
    UnknownName(String),
    #[error("malformed hex color `{0}` (expected #RGB, #RGBA, #RRGGBB or #RRGGBBAA)")]
    MalformedHex(String),
}

impl Color {
    pub const BLACK: Color = Color::rgb8(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb8(0xFF, 0xFF, 0xFF);

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        match s.strip_prefix('#') {
            Some(hex) => parse_hex(hex).ok_or_else(|| ColorParseError::MalformedHex(s.to_string())),
            None => named(s).ok_or_else(|| ColorParseError::UnknownName(s.to_string())),
        }
    }

    /// Same color with alpha replaced (clamped to [0, 1]).
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) },
            ..self
        }
    }

    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b),
            channel_byte(self.a),
        ]
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS `rgba()` string accepted by Canvas 2D fill/stroke styles.
    pub fn to_css(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        let a = (self.a.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
        format!("rgba({r}, {g}, {b}, {a})")
    }
}

/// Quantizes an opacity in [0, 1] to the 0..=255 alpha byte used for sparkles.
#[inline]
pub fn alpha_byte(opacity: f32) -> u8 {
    if opacity.is_nan() {
        return 0;
    }
    (opacity.clamp(0.0, 1.0) * 255.0).floor() as u8
}

#[inline]
fn channel_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 0xFF),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 0xFF),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(Color::rgb8(r, g, b).with_alpha(a as f32 / 255.0))
}

fn named(name: &str) -> Option<Color> {
    let c = match name.to_ascii_lowercase().as_str() {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::rgb8(0xFF, 0x00, 0x00),
        "lime" => Color::rgb8(0x00, 0xFF, 0x00),
        "green" => Color::rgb8(0x00, 0x80, 0x00),
        "blue" => Color::rgb8(0x00, 0x00, 0xFF),
        "cyan" | "aqua" => Color::rgb8(0x00, 0xFF, 0xFF),
        "magenta" | "fuchsia" => Color::rgb8(0xFF, 0x00, 0xFF),
        "yellow" => Color::rgb8(0xFF, 0xFF, 0x00),
        _ => return None,
    };
    Some(c)
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 0xFF {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Color::parse("#0f0").unwrap(), Color::rgb8(0, 255, 0));
        assert_eq!(Color::parse("#00FF00").unwrap(), Color::rgb8(0, 255, 0));
        assert_eq!(Color::parse("#ff00ff").unwrap(), Color::rgb8(255, 0, 255));
        let c = Color::parse("#FFFFFF80").unwrap();
        assert_eq!(c.to_rgba8(), [255, 255, 255, 128]);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Color::parse("  "), Err(ColorParseError::Empty));
        assert!(matches!(Color::parse("#12345"), Err(ColorParseError::MalformedHex(_))));
        assert!(matches!(Color::parse("#GG0000"), Err(ColorParseError::MalformedHex(_))));
        assert!(matches!(Color::parse("chartreuse"), Err(ColorParseError::UnknownName(_))));
    }

    #[test]
    fn css_output_uses_byte_channels() {
        let c = Color::parse("#FF00FF").unwrap().with_alpha(0.5);
        assert_eq!(c.to_css(), "rgba(255, 0, 255, 0.5)");
        assert_eq!(Color::BLACK.to_css(), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn alpha_byte_floors_and_clamps() {
        assert_eq!(alpha_byte(1.0), 255);
        assert_eq!(alpha_byte(0.5), 127);
        assert_eq!(alpha_byte(2.0), 255);
        assert_eq!(alpha_byte(-1.0), 0);
        assert_eq!(alpha_byte(f32::NAN), 0);
    }

    #[test]
    fn display_round_trips_through_parse() {
        let c = Color::parse("cyan").unwrap();
        assert_eq!(c.to_string(), "#00FFFF");
        assert_eq!(Color::parse(&c.to_string()).unwrap(), c);
    }
}
