//! Oscilloscope line: maps the sample window to a smoothed polyline.
//!
//! Each sample `i` lands at `x = i * width / N`, `y = center - s * gain * height / 2`,
//! then passes through an asymmetric one-pole filter: rising values blend
//! with `attack`, falling ones with `decay`. The filter state carries across
//! ticks as an absolute pixel value, so a canvas resize shows a one-frame jump.

use crate::color::Color;
use crate::params::EffectParameters;
use crate::surface::{StrokeStyle, Surface};
use glam::Vec2;

#[inline]
pub fn smooth_toward(prev: f32, target: f32, attack: f32, decay: f32) -> f32 {
    let alpha = if target > prev { attack } else { decay };
    prev + (target - prev) * alpha
}

/// Filter state carried between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothingState {
    pub last_y: Option<f32>,
}

#[derive(Clone, Debug, Default)]
pub struct WaveformRenderer {
    smoothing: SmoothingState,
    points: Vec<Vec2>,
}

impl WaveformRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn smoothing(&self) -> SmoothingState {
        self.smoothing
    }

    /// Forget the carried filter value; the next trace seeds from the center.
    pub fn reset(&mut self) {
        self.smoothing = SmoothingState::default();
    }

    /// Build the smoothed polyline for one tick. Empty windows yield no points
    /// and leave the filter state untouched.
    pub fn trace(
        &mut self,
        window: &[f32],
        width: f32,
        height: f32,
        gain: f32,
        attack: f32,
        decay: f32,
    ) -> &[Vec2] {
        self.points.clear();
        if window.is_empty() {
            return &self.points;
        }
        let center_y = height / 2.0;
        let slice_width = width / window.len() as f32;
        let mut last_y = match self.smoothing.last_y {
            Some(y) if y.is_finite() => y,
            _ => center_y,
        };
        self.points.reserve(window.len());
        for (i, &sample) in window.iter().enumerate() {
            let sample = if sample.is_finite() { sample } else { 0.0 };
            let y = center_y - sample * gain * (height / 2.0);
            last_y = smooth_toward(last_y, y, attack, decay);
            self.points.push(Vec2::new(i as f32 * slice_width, last_y));
        }
        self.smoothing.last_y = Some(last_y);
        &self.points
    }

    pub fn draw<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        window: &[f32],
        params: &EffectParameters,
        color: Color,
    ) {
        let (width, height) = surface.size();
        let points = self.trace(
            window,
            width,
            height,
            params.gain,
            params.attack,
            params.decay,
        );
        if points.is_empty() {
            return;
        }
        let style = StrokeStyle {
            width: params.line_thickness,
            color,
        };
        surface.stroke_polyline(points, &style);
    }
}
