//! Keyboard state to frame intents
//!
//! Tracks which keys are held (by DOM `KeyboardEvent.key` name) and maps them
//! to intents: arrows or A/D to move, space, W or up arrow for the bonus.

use super::driver::InputSource;
use crate::sim::FrameInput;

/// Intent a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Left,
    Right,
    Bonus,
}

impl Intent {
    /// Map a key name to an intent, if bound
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" => Some(Intent::Left),
            "ArrowRight" | "d" => Some(Intent::Right),
            " " | "w" | "ArrowUp" => Some(Intent::Bonus),
            _ => None,
        }
    }
}

/// Held-key state, updated from press/release events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    left: bool,
    right: bool,
    bonus: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key is bound.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Record a key release. Returns true if the key is bound.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn intents(&self) -> FrameInput {
        FrameInput {
            move_left: self.left,
            move_right: self.right,
            bonus: self.bonus,
        }
    }

    fn set(&mut self, key: &str, held: bool) -> bool {
        match Intent::from_key(key) {
            Some(Intent::Left) => self.left = held,
            Some(Intent::Right) => self.right = held,
            Some(Intent::Bonus) => self.bonus = held,
            None => return false,
        }
        true
    }
}

impl InputSource for KeyState {
    fn poll(&mut self) -> FrameInput {
        self.intents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(Intent::from_key("ArrowLeft"), Some(Intent::Left));
        assert_eq!(Intent::from_key("a"), Some(Intent::Left));
        assert_eq!(Intent::from_key("d"), Some(Intent::Right));
        assert_eq!(Intent::from_key(" "), Some(Intent::Bonus));
        assert_eq!(Intent::from_key("ArrowUp"), Some(Intent::Bonus));
        assert_eq!(Intent::from_key("w"), Some(Intent::Bonus));
        assert_eq!(Intent::from_key("ArrowDown"), None);
        // Bindings are case-sensitive, as the browser reports them
        assert_eq!(Intent::from_key("A"), None);
    }

    #[test]
    fn test_held_while_pressed() {
        let mut keys = KeyState::new();
        assert!(keys.key_down("a"));
        assert!(keys.key_down(" "));
        assert_eq!(
            keys.poll(),
            FrameInput {
                move_left: true,
                move_right: false,
                bonus: true
            }
        );

        // Held keys stay active across polls
        assert!(keys.poll().move_left);

        assert!(keys.key_up("a"));
        assert!(!keys.poll().move_left);
        assert!(keys.poll().bonus);
    }

    #[test]
    fn test_aliases_share_state() {
        let mut keys = KeyState::new();
        keys.key_down("ArrowRight");
        keys.key_up("d");
        assert!(!keys.intents().move_right);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut keys = KeyState::new();
        assert!(!keys.key_down("Escape"));
        assert_eq!(keys.intents(), FrameInput::default());
    }

    #[test]
    fn test_clear_releases_all() {
        let mut keys = KeyState::new();
        keys.key_down("a");
        keys.key_down("d");
        keys.key_down("w");
        keys.clear();
        assert_eq!(keys.intents(), FrameInput::default());
    }
}
