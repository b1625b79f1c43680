//! Flappy Memes - a side-scrolling space arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, particles, game state)
//! - `game`: Simulation wired to its renderer, audio and score collaborators
//! - `platform`: Frame clock and input mapping
//! - `renderer`: Frame drawing (Canvas 2D on the web)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod color;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, SetupError};
pub use game::Game;
pub use settings::Settings;
pub use tuning::{Playfield, Tuning};

/// Game configuration constants
pub mod consts {
    /// Frame rate that per-frame tuning values assume
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Largest frame delta fed to the simulation (seconds).
    /// Anything longer (tab in background, debugger) is clamped.
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Pool capacities
    pub const MAX_BUBBLES: usize = 20;
    pub const MAX_RIPPLES: usize = 3;
    pub const MAX_COMETS: usize = 5;
    pub const MAX_SCORE_POPUPS: usize = 8;
    pub const MAX_THRUST_FLAMES: usize = 256;
    pub const MAX_THRUST_STREAMS: usize = 512;

    /// Number of parallax nebulae in the background
    pub const NEBULA_COUNT: usize = 8;
}

/// Scale a per-reference-frame quantity to an elapsed time in seconds
#[inline]
pub fn per_frame(amount: f32, dt: f32) -> f32 {
    amount * dt * consts::REFERENCE_FPS
}
