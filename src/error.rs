//! Error types
//!
//! Configuration errors surface at construction/reset time. Nothing inside
//! the per-frame tick can fail.

use thiserror::Error;

/// Rejected playfield or tuning values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("playfield must be positive and finite, got {width}x{height}")]
    InvalidPlayfield { width: f32, height: f32 },

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error(
        "gap of {gap} plus margins {margin_top}/{margin_bottom} does not fit a playfield {height} high"
    )]
    GapDoesNotFit {
        gap: f32,
        margin_top: f32,
        margin_bottom: f32,
        height: f32,
    },

    #[error("hitbox scale must be in (0, 1], got {0}")]
    InvalidHitboxScale(f32),

    #[error("obstacle width {width} leaves nothing after a collision inset of {inset} per side")]
    InsetTooWide { width: f32, inset: f32 },

    #[error("character size {size} does not fit a playfield {height} high")]
    CharacterTooLarge { size: f32, height: f32 },

    #[error("probability {name} must be in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f32 },

    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while wiring the game to its host environment. Fatal.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no global window")]
    NoWindow,

    #[error("no document on window")]
    NoDocument,

    #[error("element #{0} not found")]
    MissingElement(String),

    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("2D rendering context unavailable")]
    NoContext,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
