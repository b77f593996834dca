//! One visualizer instance: palette, waveform filter state and sparkles,
//! advanced together once per display frame.

use crate::color::Color;
use crate::constants::BACKGROUND_RGB;
use crate::palette::Palette;
use crate::params::{ConfigError, EffectParameters};
use crate::signal::rms;
use crate::sparkles::{spawn_chance, SparkleField};
use crate::surface::Surface;
use crate::waveform::WaveformRenderer;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub rms: f32,
    pub spawn_chance: f32,
    pub spawned: bool,
    pub live_sparkles: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// No sample window this tick; nothing was drawn.
    Idle,
    Drawn(FrameStats),
}

pub struct Visualizer {
    params: EffectParameters,
    palette: Palette,
    waveform: WaveformRenderer,
    sparkles: SparkleField,
}

impl Visualizer {
    pub fn new(params: EffectParameters, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        let palette = Palette::new(params.colors.clone())?;
        Ok(Self {
            params,
            palette,
            waveform: WaveformRenderer::new(),
            sparkles: SparkleField::new(seed),
        })
    }

    #[inline]
    pub fn params(&self) -> &EffectParameters {
        &self.params
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn sparkles(&self) -> &SparkleField {
        &self.sparkles
    }

    #[inline]
    pub fn waveform(&self) -> &WaveformRenderer {
        &self.waveform
    }

    /// Palette timer callback. Returns the new active index.
    pub fn rotate_palette(&mut self) -> usize {
        self.palette.advance()
    }

    pub fn rotate_palette_by(&mut self, steps: u64) -> usize {
        self.palette.advance_by(steps)
    }

    /// Run one frame: loudness, sparkle update, clear, sparkles, then the line.
    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        window: Option<&[f32]>,
        surface: &mut S,
    ) -> FrameOutcome {
        let Some(window) = window else {
            return FrameOutcome::Idle;
        };
        let (width, height) = surface.size();

        let level = rms(window);
        let chance = spawn_chance(level, self.params.sparkle_reactiveness);
        self.sparkles.cull(height);
        let spawned = self
            .sparkles
            .maybe_spawn(window.len(), chance, &self.params, width, height);

        let [r, g, b] = BACKGROUND_RGB;
        surface.clear(Color::rgb8(r, g, b));

        self.sparkles.advance(height);
        self.sparkles.draw(surface, &self.params);

        let line_color = self.palette.active_color();
        self.waveform.draw(surface, window, &self.params, line_color);

        FrameOutcome::Drawn(FrameStats {
            rms: level,
            spawn_chance: chance,
            spawned,
            live_sparkles: self.sparkles.len(),
        })
    }

    /// Drop transient state (sparkles, carried filter value).
    pub fn reset(&mut self) {
        self.sparkles.clear();
        self.waveform.reset();
    }
}
