//! Player character: a single body under gravity with a jump impulse

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::{Playfield, Tuning};

/// Selectable characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CharacterKind {
    #[default]
    Seal,
    Raccoon,
}

impl CharacterKind {
    pub const ALL: [CharacterKind; 2] = [CharacterKind::Seal, CharacterKind::Raccoon];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterKind::Seal => "seal",
            CharacterKind::Raccoon => "raccoon",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "seal" => Some(CharacterKind::Seal),
            "raccoon" => Some(CharacterKind::Raccoon),
            _ => None,
        }
    }
}

/// Maximum display tilt (degrees)
const MAX_TILT: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct Character {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Vertical velocity (px/s, positive is down)
    pub velocity: f32,
    /// Display tilt in degrees. Never feeds back into physics.
    pub rotation: f32,
    pub size: f32,
    pub hitbox_scale: f32,
}

impl Character {
    /// Character parked at the vertical center of the playfield
    pub fn new(tuning: &Tuning, field: &Playfield) -> Self {
        Self {
            pos: Vec2::new(tuning.character_x, field.height / 2.0),
            velocity: 0.0,
            rotation: 0.0,
            size: tuning.character_size,
            hitbox_scale: tuning.hitbox_scale,
        }
    }

    /// Set (not add) the upward impulse
    #[inline]
    pub fn jump(&mut self, jump_velocity: f32) {
        self.velocity = jump_velocity;
    }

    /// Semi-implicit Euler step
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.velocity += gravity * dt;
        self.pos.y += self.velocity * dt;
        self.rotation = (self.velocity * 0.1).clamp(-MAX_TILT, MAX_TILT);
    }

    /// Idle bobbing while waiting for the first jump.
    /// `time` is the simulation clock in seconds.
    pub fn float_idle(&mut self, field: &Playfield, amplitude: f32, time: f64) {
        self.pos.y = field.height / 2.0 + (time * 2.0).sin() as f32 * amplitude;
        self.rotation = time.sin() as f32 * 5.0;
    }

    /// Center of the sprite
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Collision box: the sprite shrunk by `hitbox_scale`, centered
    pub fn hitbox(&self) -> Rect {
        let side = self.size * self.hitbox_scale;
        let margin = (self.size - side) / 2.0;
        Rect::new(self.pos.x + margin, self.pos.y + margin, side, side)
    }

    /// True when any part of the sprite leaves the playfield vertically
    pub fn out_of_bounds(&self, field: &Playfield) -> bool {
        self.pos.y < 0.0 || self.pos.y + self.size > field.height
    }
}
