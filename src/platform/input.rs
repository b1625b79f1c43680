//! Keyboard and button mapping
//!
//! Browser event handlers translate raw keys and element ids into
//! `InputAction`s so the mapping stays testable off the web.

use crate::sim::CharacterKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Start from the title screen
    Start,
    Jump,
    Restart,
    SelectCharacter(CharacterKind),
    ToggleSound,
    ToggleMusic,
}

impl InputAction {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "ArrowUp" | "w" | "W" => Some(InputAction::Jump),
            "Enter" => Some(InputAction::Start),
            "r" | "R" => Some(InputAction::Restart),
            "m" | "M" => Some(InputAction::ToggleSound),
            "b" | "B" => Some(InputAction::ToggleMusic),
            "1" => Some(InputAction::SelectCharacter(CharacterKind::Seal)),
            "2" => Some(InputAction::SelectCharacter(CharacterKind::Raccoon)),
            _ => None,
        }
    }

    /// Map a clicked button's element id
    pub fn from_button(id: &str) -> Option<Self> {
        match id {
            "start-btn" => Some(InputAction::Start),
            "restart-btn" => Some(InputAction::Restart),
            "sound-btn" => Some(InputAction::ToggleSound),
            "music-btn" => Some(InputAction::ToggleMusic),
            _ => id
                .strip_prefix("character-")
                .and_then(CharacterKind::from_str)
                .map(InputAction::SelectCharacter),
        }
    }

    /// Keys whose browser default (page scroll) must be suppressed
    pub fn captures_key(key: &str) -> bool {
        matches!(key, " " | "ArrowUp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_jumps() {
        assert_eq!(InputAction::from_key(" "), Some(InputAction::Jump));
        assert_eq!(InputAction::from_key("ArrowUp"), Some(InputAction::Jump));
        assert!(InputAction::captures_key(" "));
        assert!(!InputAction::captures_key("r"));
    }

    #[test]
    fn test_unknown_key_ignored() {
        assert_eq!(InputAction::from_key("Escape"), None);
        assert_eq!(InputAction::from_key("x"), None);
    }

    #[test]
    fn test_buttons() {
        assert_eq!(InputAction::from_button("restart-btn"), Some(InputAction::Restart));
        assert_eq!(
            InputAction::from_button("character-raccoon"),
            Some(InputAction::SelectCharacter(CharacterKind::Raccoon))
        );
        assert_eq!(InputAction::from_button("character-dog"), None);
        assert_eq!(InputAction::from_button("hud"), None);
    }
}
