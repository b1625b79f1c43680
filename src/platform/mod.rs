//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (display-refresh driven loop)
//! - Input events

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::InputAction;
