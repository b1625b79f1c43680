//! Sound effects and music
//!
//! The simulation never talks to audio directly; [`crate::Game`] maps
//! simulation events onto an [`AudioEmitter`]. Emitters are fire-and-forget:
//! a failing or missing audio backend must never disturb the game.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

use crate::sim::CharacterKind;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Character jumped
    Jump,
    /// Run ended
    GameOver,
    /// Rocket pair cleared
    ScoreTick,
}

/// Audio sink driven by game events
pub trait AudioEmitter {
    /// Play a one-shot effect
    fn play(&mut self, effect: SoundEffect);

    /// Mute/unmute sound effects
    fn set_muted(&mut self, muted: bool);

    /// Master and effects volume (0.0 - 1.0 each)
    fn set_volume(&mut self, _master: f32, _sfx: f32) {}

    /// Start the character's background track
    fn start_music(&mut self, _character: CharacterKind) {}

    fn stop_music(&mut self) {}

    /// Mute/unmute background music
    fn set_music_muted(&mut self, _muted: bool) {}
}

/// Silent emitter for headless runs and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioEmitter for NullAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("(silent) {:?}", effect);
    }

    fn set_muted(&mut self, _muted: bool) {}
}
