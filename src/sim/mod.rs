//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time comes in through `tick`, never from the wall clock
//! - No rendering, audio or platform dependencies

pub mod background;
pub mod character;
pub mod collision;
pub mod obstacle;
pub mod particles;
pub mod state;
pub mod tick;

pub use background::{Background, Nebula};
pub use character::{Character, CharacterKind};
pub use collision::{Rect, detect_collision, rocket_segments};
pub use obstacle::{ObstacleStream, Rocket};
pub use particles::{
    Bubble, Comet, Effect, Effects, FlameTile, Pool, Ripple, ScorePopup, ThrustParticle,
};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
