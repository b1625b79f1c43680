//! Data-driven game balance
//!
//! Every gameplay number lives in [`Tuning`]. Defaults reproduce the shipped
//! game; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Simulated area, matching the canvas size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidPlayfield {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Character ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Vertical velocity set on jump (px/s, negative is up)
    pub jump_velocity: f32,
    /// Side of the square character sprite
    pub character_size: f32,
    /// Fixed horizontal position of the character's left edge
    pub character_x: f32,
    /// Hitbox side as a fraction of the sprite, centered
    pub hitbox_scale: f32,
    /// Amplitude of the idle float while paused (px)
    pub idle_float_amplitude: f32,

    // === Obstacles ===
    /// Vertical opening between the two rockets
    pub gap_height: f32,
    pub obstacle_width: f32,
    /// Horizontal forgiveness on each side of a rocket
    pub collision_inset: f32,
    pub gap_margin_top: f32,
    pub gap_margin_bottom: f32,
    /// Base scroll speed (px/s) before the speed multiplier
    pub base_speed: f32,
    pub game_speed: f32,
    /// Distance the newest obstacle travels before the next spawns
    pub spawn_interval: f32,

    // === Effects ===
    /// Length of the thrust burst after a score (s)
    pub thrust_duration: f32,
    /// Chance per obstacle per frame of re-emitting thrust during a burst
    pub thrust_chance: f32,
    /// Particles per emitted burst
    pub thrust_burst_size: usize,
    /// Bubble spawn rate (per second)
    pub bubble_rate: f32,
    /// Comet spawn chance per reference frame
    pub comet_chance: f32,
    pub flame_width: f32,
    pub flame_height: f32,
    /// Horizontal step between flame tiles as a fraction of their width
    pub flame_stride: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 700.0,
            jump_velocity: -350.0,
            character_size: 50.0,
            character_x: 50.0,
            hitbox_scale: 0.75,
            idle_float_amplitude: 20.0,

            gap_height: 180.0,
            obstacle_width: 50.0,
            collision_inset: 5.0,
            gap_margin_top: 50.0,
            gap_margin_bottom: 50.0,
            base_speed: 60.0,
            game_speed: 2.2,
            spawn_interval: 200.0,

            thrust_duration: 0.5,
            thrust_chance: 0.4,
            thrust_burst_size: 5,
            bubble_rate: 0.5,
            comet_chance: 0.02,
            flame_width: 100.0,
            flame_height: 60.0,
            flame_stride: 0.7,
        }
    }
}

impl Tuning {
    /// Parse a JSON override document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Obstacle scroll speed (px/s)
    #[inline]
    pub fn scroll_speed(&self) -> f32 {
        self.base_speed * self.game_speed
    }

    /// Allowed range for an obstacle's gap top
    #[inline]
    pub fn gap_top_range(&self, field: &Playfield) -> (f32, f32) {
        (
            self.gap_margin_top,
            field.height - self.gap_margin_bottom - self.gap_height,
        )
    }

    /// Check the tuning against a playfield before any entity is spawned
    pub fn validate(&self, field: &Playfield) -> Result<(), ConfigError> {
        field.validate()?;

        for (name, value) in [
            ("gap_height", self.gap_height),
            ("obstacle_width", self.obstacle_width),
            ("character_size", self.character_size),
            ("base_speed", self.base_speed),
            ("game_speed", self.game_speed),
            ("spawn_interval", self.spawn_interval),
            ("flame_width", self.flame_width),
            ("flame_height", self.flame_height),
            ("flame_stride", self.flame_stride),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        // Zero gravity or zero bubble rate is a legal (if odd) game
        for (name, value) in [
            ("gravity", self.gravity),
            ("idle_float_amplitude", self.idle_float_amplitude),
            ("thrust_duration", self.thrust_duration),
            ("bubble_rate", self.bubble_rate),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { name, value });
            }
        }

        for (name, value) in [
            ("jump_velocity", self.jump_velocity),
            ("character_x", self.character_x),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        for (name, value) in [
            ("thrust_chance", self.thrust_chance),
            ("comet_chance", self.comet_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }

        if !(self.gap_margin_top >= 0.0 && self.gap_margin_bottom >= 0.0) {
            return Err(ConfigError::GapDoesNotFit {
                gap: self.gap_height,
                margin_top: self.gap_margin_top,
                margin_bottom: self.gap_margin_bottom,
                height: field.height,
            });
        }
        let (min, max) = self.gap_top_range(field);
        if max < min {
            return Err(ConfigError::GapDoesNotFit {
                gap: self.gap_height,
                margin_top: self.gap_margin_top,
                margin_bottom: self.gap_margin_bottom,
                height: field.height,
            });
        }

        if !(self.hitbox_scale > 0.0 && self.hitbox_scale <= 1.0) {
            return Err(ConfigError::InvalidHitboxScale(self.hitbox_scale));
        }

        if !(self.collision_inset >= 0.0 && self.collision_inset * 2.0 < self.obstacle_width) {
            return Err(ConfigError::InsetTooWide {
                width: self.obstacle_width,
                inset: self.collision_inset,
            });
        }

        if self.character_size >= field.height {
            return Err(ConfigError::CharacterTooLarge {
                size: self.character_size,
                height: field.height,
            });
        }

        Ok(())
    }
}
