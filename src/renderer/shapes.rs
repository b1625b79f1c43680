//! Shape geometry for 2D primitives
//!
//! Pure functions from simulation entities to the points a backend draws.
//! Nothing here touches a canvas, so the geometry is testable natively.

use glam::Vec2;

use crate::sim::{Character, Comet, FlameTile, Rocket, ThrustParticle};
use crate::tuning::{Playfield, Tuning};

/// Number of flame tips per flame tile
pub const FLAME_TIPS: usize = 3;

/// One quadratic curve of a flame tile's outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlameTip {
    pub control: Vec2,
    pub end: Vec2,
}

/// Flame outline: starts at `(tile.x, field.height)`, one curve per tip
pub fn flame_tips(tile: &FlameTile, field: &Playfield) -> [FlameTip; FLAME_TIPS] {
    let base = field.height;
    let step = tile.width / FLAME_TIPS as f32;
    std::array::from_fn(|i| {
        let i = i + 1;
        let x = tile.x + step * i as f32;
        let wave = ((tile.frame + i as f32 * 30.0) * 0.3).sin() * 8.0;
        let variation = ((tile.frame + i as f32 * 20.0) * 0.2).sin() * 10.0;
        FlameTip {
            control: Vec2::new(x - step / 2.0, base - (tile.height + variation) + wave),
            end: Vec2::new(x, base),
        }
    })
}

/// Position of the middle color stop of a flame gradient
#[inline]
pub fn flame_gradient_mid(tile: &FlameTile) -> f32 {
    0.4 + (tile.frame * 0.1).sin() * 0.1
}

/// Sprite placement for one rocket of a pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketSprite {
    /// Top-left corner in screen space
    pub origin: Vec2,
    pub size: Vec2,
    /// Drawn upside down (nose pointing into the gap from above)
    pub flipped: bool,
}

/// Upper and lower rocket sprites, covering the full segments outside the gap
pub fn rocket_sprites(rocket: &Rocket, tuning: &Tuning, field: &Playfield) -> [RocketSprite; 2] {
    let lower_top = rocket.gap_top + tuning.gap_height;
    [
        RocketSprite {
            origin: Vec2::new(rocket.x, 0.0),
            size: Vec2::new(tuning.obstacle_width, rocket.gap_top),
            flipped: true,
        },
        RocketSprite {
            origin: Vec2::new(rocket.x, lower_top),
            size: Vec2::new(tuning.obstacle_width, field.height - lower_top),
            flipped: false,
        },
    ]
}

/// Character sprite center and tilt (radians)
pub fn character_transform(character: &Character) -> (Vec2, f32) {
    (character.center(), character.rotation.to_radians())
}

/// Comet tail triangle in the comet's rotated frame: upper base, tip, lower base
pub fn comet_tail(comet: &Comet) -> [Vec2; 3] {
    let half = comet.size / 2.0;
    [
        Vec2::new(comet.pos.x, comet.pos.y - half),
        Vec2::new(comet.pos.x + comet.tail_length, comet.pos.y),
        Vec2::new(comet.pos.x, comet.pos.y + half),
    ]
}

/// Far end of a comet tail in screen space (for the tail gradient)
pub fn comet_tail_end(comet: &Comet) -> Vec2 {
    let (sin, cos) = comet.angle.to_radians().sin_cos();
    Vec2::new(
        comet.pos.x + comet.tail_length * cos,
        comet.pos.y - comet.tail_length * sin,
    )
}

/// Nozzle flames swell as they fade
#[inline]
pub fn thrust_flame_radius(particle: &ThrustParticle) -> f32 {
    particle.size * (1.0 + (1.0 - particle.alpha()) * 0.5)
}

/// Stream particles are drawn as ellipses that elongate as they fade
#[inline]
pub fn thrust_stream_radii(particle: &ThrustParticle) -> Vec2 {
    Vec2::new(
        particle.size * 0.5,
        particle.size * (1.0 + (1.0 - particle.alpha())),
    )
}
