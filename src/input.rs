//! Keyboard state carried between frames.
//!
//! Terminals without key-release events report a held key as a stream of
//! `Press` events at the OS repeat rate.  A key therefore counts as held
//! while its last press or repeat is recent enough, and is dropped at once
//! when a release does arrive.

use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::entities::TickInput;

/// Frames a movement key stays held after its last press or repeat.  The
/// OS repeat rate is at least 15 Hz, so 8 frames (≈133 ms) is always
/// refreshed before it runs out.
pub const HOLD_WINDOW: u64 = 8;

/// Frames within which another fire `Press` is taken as a repeat of the
/// same press rather than a new one.  Kept short so quick deliberate taps
/// still register as separate shots; the fire gate limits the rate anyway.
pub const FIRE_HOLD_WINDOW: u64 = 3;

pub const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
pub const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
pub const FIRE_KEY: KeyCode = KeyCode::Char(' ');

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Frame each key was last seen pressed or repeating.
    key_frame: HashMap<KeyCode, u64>,
    fire_pressed: bool,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn seen_within(&self, key: &KeyCode, frame: u64, window: u64) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= window)
            .unwrap_or(false)
    }

    pub fn is_held(&self, key: &KeyCode, frame: u64) -> bool {
        self.seen_within(key, frame, HOLD_WINDOW)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|k| self.is_held(k, frame))
    }

    /// Record a `Press`.  Returns `true` when it is a fresh fire press.
    pub fn press(&mut self, code: KeyCode, frame: u64) -> bool {
        let fresh_fire = code == FIRE_KEY && !self.seen_within(&FIRE_KEY, frame, FIRE_HOLD_WINDOW);
        if fresh_fire {
            self.fire_pressed = true;
        }
        self.key_frame.insert(code, frame);
        fresh_fire
    }

    pub fn repeat(&mut self, code: KeyCode, frame: u64) {
        self.key_frame.insert(code, frame);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.key_frame.remove(&code);
    }

    /// Forget every key, e.g. when the round changes under the player.
    pub fn clear(&mut self) {
        self.key_frame.clear();
        self.fire_pressed = false;
    }

    /// Freeze the keyboard into this frame's input.  The fire press is
    /// consumed so it reaches exactly one tick.
    pub fn take_input(&mut self, frame: u64) -> TickInput {
        TickInput {
            left: self.any_held(&LEFT_KEYS, frame),
            right: self.any_held(&RIGHT_KEYS, frame),
            fire: std::mem::take(&mut self.fire_pressed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_fire_press_is_an_edge() {
        let mut keys = KeyTracker::new();
        assert!(keys.press(FIRE_KEY, 1));
        assert!(keys.take_input(1).fire);
        // Consumed
        assert!(!keys.take_input(2).fire);
    }

    #[test]
    fn os_repeat_press_is_not_an_edge() {
        let mut keys = KeyTracker::new();
        keys.press(FIRE_KEY, 10);
        keys.take_input(10);
        // Auto-repeat arrives every couple of frames while Space is held
        assert!(!keys.press(FIRE_KEY, 12));
        assert!(!keys.press(FIRE_KEY, 14));
        assert!(!keys.take_input(14).fire);
    }

    #[test]
    fn quick_retap_without_release_is_an_edge() {
        // No release events: two taps 4 frames (≈67 ms) apart are both shots
        let mut keys = KeyTracker::new();
        assert!(keys.press(FIRE_KEY, 10));
        keys.take_input(10);
        assert!(keys.press(FIRE_KEY, 10 + FIRE_HOLD_WINDOW + 1));
        assert!(keys.take_input(10 + FIRE_HOLD_WINDOW + 1).fire);
    }

    #[test]
    fn press_after_release_is_an_edge() {
        let mut keys = KeyTracker::new();
        keys.press(FIRE_KEY, 10);
        keys.release(FIRE_KEY);
        assert!(keys.press(FIRE_KEY, 11));
    }

    #[test]
    fn movement_expires_after_hold_window() {
        let mut keys = KeyTracker::new();
        keys.press(KeyCode::Left, 5);
        assert!(keys.take_input(5 + HOLD_WINDOW).left);
        assert!(!keys.take_input(5 + HOLD_WINDOW + 1).left);

        keys.press(KeyCode::Char('d'), 20);
        keys.repeat(KeyCode::Char('d'), 27);
        assert!(keys.take_input(30).right);
        keys.release(KeyCode::Char('d'));
        assert!(!keys.take_input(30).right);
    }

    #[test]
    fn clear_drops_pending_fire() {
        let mut keys = KeyTracker::new();
        keys.press(FIRE_KEY, 1);
        keys.press(KeyCode::Right, 1);
        keys.clear();
        assert_eq!(keys.take_input(1), TickInput::default());
    }
}
