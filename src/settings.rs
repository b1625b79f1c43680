//! Player preferences
//!
//! Persisted in LocalStorage, separate from the run itself so they survive
//! restarts and reloads.

use serde::{Deserialize, Serialize};

use crate::sim::CharacterKind;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects muted
    pub sfx_muted: bool,
    /// Background music muted
    pub music_muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    /// Character picked last time, preselected on load
    pub character: CharacterKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sfx_muted: false,
            music_muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            character: CharacterKind::Seal,
        }
    }
}

impl Settings {
    /// Flip the effects mute flag, returning the new value
    pub fn toggle_sfx(&mut self) -> bool {
        self.sfx_muted = !self.sfx_muted;
        self.sfx_muted
    }

    /// Flip the music mute flag, returning the new value
    pub fn toggle_music(&mut self) -> bool {
        self.music_muted = !self.music_muted;
        self.music_muted
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "flappy_memes_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::debug!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
