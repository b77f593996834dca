//! Loudness-driven sparkle particles.
//!
//! At most one sparkle spawns per tick, with probability
//! `min(1, rms * reactiveness * 10)`. Sparkles start on the vertical midline,
//! drift away from it, and fade faster the further they get. The per-tick
//! fade never drops below [`SPARKLE_MIN_FADE_PER_TICK`], which bounds every
//! sparkle's lifetime and therefore the size of the live set.

use crate::color::alpha_byte;
use crate::constants::*;
use crate::params::EffectParameters;
use crate::surface::Surface;
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub opacity: f32,
}

impl Particle {
    /// Integrate one tick: move, apply vertical drag, fade by distance from the midline.
    #[inline]
    pub fn step(&mut self, height: f32) {
        self.pos += self.vel;
        self.vel.y *= SPARKLE_VY_DRAG;
        let half = height / 2.0;
        let edge = if half > 0.0 {
            (self.pos.y - half).abs() / half
        } else {
            1.0
        };
        let fade = (edge * SPARKLE_FADE_RATE).max(SPARKLE_MIN_FADE_PER_TICK);
        self.opacity = (self.opacity - fade).max(0.0);
    }

    #[inline]
    pub fn is_alive(&self, height: f32) -> bool {
        self.opacity > SPARKLE_CULL_OPACITY && self.pos.y > 0.0 && self.pos.y < height
    }
}

/// Spawn probability for one tick, always within [0, 1].
#[inline]
pub fn spawn_chance(rms: f32, reactiveness: f32) -> f32 {
    let chance = rms * reactiveness * SPAWN_RMS_SCALE;
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

/// Upper bound on the number of ticks a sparkle can stay in the live set.
///
/// Opacity starts at most 1 and drops by at least the minimum fade each
/// tick; one extra tick absorbs float rounding and one more covers culling
/// happening at the start of the following tick.
pub fn max_ticks_to_removal() -> u32 {
    let fading =
        ((1.0 - SPARKLE_CULL_OPACITY as f64) / SPARKLE_MIN_FADE_PER_TICK as f64).ceil() as u32;
    fading + 2
}

pub struct SparkleField {
    particles: Vec<Particle>,
    rng: StdRng,
}

impl SparkleField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Remove faded or off-screen sparkles. Order of the live set is not preserved.
    pub fn cull(&mut self, height: f32) {
        let mut i = 0usize;
        while i < self.particles.len() {
            if self.particles[i].is_alive(height) {
                i += 1;
            } else {
                self.particles.swap_remove(i);
            }
        }
    }

    /// Roll against `chance` and spawn at most one sparkle. Returns whether one spawned.
    pub fn maybe_spawn(
        &mut self,
        window_len: usize,
        chance: f32,
        params: &EffectParameters,
        width: f32,
        height: f32,
    ) -> bool {
        if window_len == 0 || width <= 0.0 || height <= 0.0 {
            return false;
        }
        if self.rng.gen::<f32>() >= chance {
            return false;
        }
        let index = self.rng.gen_range(0..window_len);
        // x follows the sampled index; y is always the midline
        let x = (index as f32 / window_len as f32) * width;
        let y = height / 2.0;
        let direction = if self.rng.gen::<f32>() < 0.5 { -1.0 } else { 1.0 };
        let jitter = (self.rng.gen::<f32>() - 0.5) * params.sparkle_spread;
        let vy = direction
            * params.sparkle_velocity
            * (SPAWN_SPEED_MIN_FRAC + self.rng.gen::<f32>() * (1.0 - SPAWN_SPEED_MIN_FRAC));
        let vx = self.rng.gen::<f32>() * 2.0 - 1.0;
        self.particles.push(Particle {
            pos: Vec2::new(x + jitter, y),
            vel: Vec2::new(vx, vy),
            opacity: (chance * SPAWN_OPACITY_SCALE).clamp(0.0, 1.0),
        });
        true
    }

    pub fn advance(&mut self, height: f32) {
        for p in &mut self.particles {
            p.step(height);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, params: &EffectParameters) {
        for p in &self.particles {
            let alpha = alpha_byte(p.opacity) as f32 / 255.0;
            surface.fill_circle(p.pos, params.sparkle_size, params.sparkle_color.with_alpha(alpha));
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_chance_is_clamped() {
        assert_eq!(spawn_chance(0.0, 0.8), 0.0);
        assert_eq!(spawn_chance(1.0, 100.0), 1.0);
        assert_eq!(spawn_chance(0.5, -3.0), 0.0);
        assert_eq!(spawn_chance(f32::NAN, 1.0), 0.0);
        assert!((spawn_chance(0.05, 0.8) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn step_applies_drag_and_edge_fade() {
        let mut p = Particle {
            pos: Vec2::new(10.0, 50.0),
            vel: Vec2::new(1.0, -25.0),
            opacity: 1.0,
        };
        p.step(100.0);
        assert_eq!(p.pos, Vec2::new(11.0, 25.0));
        assert!((p.vel.y - (-24.75)).abs() < 1e-5);
        // halfway to the top edge: fade 0.5 * 0.03
        assert!((p.opacity - 0.985).abs() < 1e-6);
    }

    #[test]
    fn motionless_particle_still_fades() {
        let mut p = Particle {
            pos: Vec2::new(0.0, 50.0),
            vel: Vec2::ZERO,
            opacity: 0.5,
        };
        p.step(100.0);
        assert!((p.opacity - (0.5 - SPARKLE_MIN_FADE_PER_TICK)).abs() < 1e-7);
    }

    #[test]
    fn cull_drops_dead_and_offscreen() {
        let mut field = SparkleField::new(1);
        field.particles = vec![
            Particle { pos: Vec2::new(0.0, 50.0), vel: Vec2::ZERO, opacity: 0.5 },
            Particle { pos: Vec2::new(0.0, 50.0), vel: Vec2::ZERO, opacity: 0.01 },
            Particle { pos: Vec2::new(0.0, -1.0), vel: Vec2::ZERO, opacity: 0.9 },
            Particle { pos: Vec2::new(0.0, 100.0), vel: Vec2::ZERO, opacity: 0.9 },
        ];
        field.cull(100.0);
        assert_eq!(field.len(), 1);
        assert_eq!(field.particles()[0].opacity, 0.5);
    }

    #[test]
    fn removal_bound_is_consistent_with_constants() {
        assert_eq!(max_ticks_to_removal(), 992);
    }
}
