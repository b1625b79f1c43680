//! Parallax nebula field behind the playfield
//!
//! Nebulae are never destroyed: one that drifts off the left edge is moved
//! back to the right with a fresh look.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::color::{Hsla, NEBULA_PALETTE};
use crate::consts::NEBULA_COUNT;
use crate::per_frame;
use crate::tuning::Playfield;

#[derive(Debug, Clone)]
pub struct Nebula {
    pub pos: Vec2,
    /// Radius of the radial glow
    pub size: f32,
    pub color: Hsla,
    pub opacity: f32,
    /// Scroll multiplier (smaller = farther away)
    pub parallax: f32,
}

#[derive(Debug, Clone)]
pub struct Background {
    pub nebulae: Vec<Nebula>,
}

fn random_color(rng: &mut Pcg32) -> Hsla {
    NEBULA_PALETTE[rng.random_range(0..NEBULA_PALETTE.len())]
}

fn random_opacity(rng: &mut Pcg32) -> f32 {
    rng.random::<f32>() * 0.3 + 0.1
}

impl Background {
    /// Scatter the nebulae across (and slightly beyond) the playfield
    pub fn new(rng: &mut Pcg32, field: &Playfield) -> Self {
        let nebulae = (0..NEBULA_COUNT)
            .map(|_| Nebula {
                pos: Vec2::new(
                    rng.random::<f32>() * (field.width + 400.0) - 200.0,
                    rng.random::<f32>() * field.height,
                ),
                size: rng.random::<f32>() * 200.0 + 150.0,
                color: random_color(rng),
                opacity: random_opacity(rng),
                parallax: 0.5 + rng.random::<f32>() * 0.2,
            })
            .collect();
        Self { nebulae }
    }

    /// Drift left. `speed` is in px per reference frame before parallax.
    pub fn advance(&mut self, rng: &mut Pcg32, speed: f32, dt: f32, field: &Playfield) {
        for nebula in &mut self.nebulae {
            nebula.pos.x -= per_frame(speed * nebula.parallax, dt);
            if nebula.pos.x < -nebula.size {
                nebula.pos.x = field.width + nebula.size;
                nebula.pos.y = rng.random::<f32>() * field.height;
                nebula.color = random_color(rng);
                nebula.opacity = random_opacity(rng);
            }
        }
    }
}
