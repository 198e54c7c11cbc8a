//! Short-lived visual sparks. Nothing here feeds back into the simulation.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

pub const BURST_COLOR: (u8, u8, u8) = (255, 190, 60);

/// Launch speed range, pixels per second
const SPEED_MIN: f32 = 60.0;
const SPEED_MAX: f32 = 240.0;
/// Lifetime range, milliseconds
pub const LIFE_MIN: f32 = 300.0;
pub const LIFE_MAX: f32 = 800.0;
const RADIUS_MIN: u32 = 2;
const RADIUS_MAX: u32 = 6;

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Remaining milliseconds
    pub life: f32,
    /// Fade reference, sampled independently of `life`
    pub max_life: f32,
    pub radius: u32,
    pub color: (u8, u8, u8),
}

impl Particle {
    /// Opacity from the remaining-life fraction, clamped to a byte.
    pub fn alpha(&self) -> u8 {
        if self.max_life <= 0.0 {
            return 0;
        }
        (255.0 * self.life / self.max_life).clamp(0.0, 255.0) as u8
    }
}

#[derive(Debug, Default)]
pub struct Particles {
    items: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Scatter `count` sparks from `origin` in random directions.
    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, origin: Vec2, count: usize, rng: &mut R) {
        self.items.reserve(count);
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(SPEED_MIN..=SPEED_MAX);
            self.items.push(Particle {
                pos: origin,
                vel: Vec2::from_angle(angle) * speed,
                life: rng.gen_range(LIFE_MIN..=LIFE_MAX),
                max_life: rng.gen_range(LIFE_MIN..=LIFE_MAX),
                radius: rng.gen_range(RADIUS_MIN..=RADIUS_MAX),
                color: BURST_COLOR,
            });
        }
    }

    /// Age every particle by `elapsed_ms`, dropping the expired ones and
    /// moving the rest along their velocity.
    pub fn advance(&mut self, elapsed_ms: f32) {
        let dt = elapsed_ms / 1000.0;
        self.items.retain_mut(|p| {
            p.life -= elapsed_ms;
            if p.life <= 0.0 {
                return false;
            }
            p.pos += p.vel * dt;
            true
        });
    }
}
