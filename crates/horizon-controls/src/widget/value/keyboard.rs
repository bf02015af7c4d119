//! Keyboard classification for range controls.
//!
//! [`classify`] maps a key and its modifiers to a [`ValueAction`].
//! [`HeldKeys`] tracks which range keys are down so the handler knows when a
//! keyboard interaction begins (first key down) and ends (last key up).

use horizon_controls_core::logging::targets;

use crate::widget::events::{Key, KeyboardModifiers};

/// Semantic effect of a key on a range control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueAction {
    /// One step up.
    Increment,
    /// One step down.
    Decrement,
    /// One page up.
    PageIncrement,
    /// One page down.
    PageDecrement,
    /// Straight to the minimum.
    JumpToMin,
    /// Straight to the maximum.
    JumpToMax,
    /// Not a range key.
    #[default]
    None,
}

impl ValueAction {
    /// Whether this is [`ValueAction::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, ValueAction::None)
    }
}

/// Whether `key` drives range controls at all.
pub fn is_range_key(key: Key) -> bool {
    key.is_navigation()
}

/// Classify a key press.
///
/// Arrow Left/Down decrement, Right/Up increment, Page Up/Down page,
/// Home/End jump. While Meta is held every key classifies as
/// [`ValueAction::None`]: some platforms never deliver the key-up of a
/// Meta chord, which would leave the key stuck in the held set.
pub fn classify(key: Key, modifiers: KeyboardModifiers) -> ValueAction {
    if modifiers.meta {
        return ValueAction::None;
    }

    match key {
        Key::ArrowRight | Key::ArrowUp => ValueAction::Increment,
        Key::ArrowLeft | Key::ArrowDown => ValueAction::Decrement,
        Key::PageUp => ValueAction::PageIncrement,
        Key::PageDown => ValueAction::PageDecrement,
        Key::Home => ValueAction::JumpToMin,
        Key::End => ValueAction::JumpToMax,
        _ => ValueAction::None,
    }
}

/// Result of [`HeldKeys::press`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTransition {
    /// The first key went down: a keyboard interaction begins.
    Started,
    /// Another key joined a chord.
    Added,
    /// The key was already down (auto-repeat).
    AlreadyHeld,
}

/// Result of [`HeldKeys::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseTransition {
    /// The last key came up: the keyboard interaction ends.
    Ended,
    /// Other keys are still down.
    StillHeld,
    /// The key was not being tracked.
    NotHeld,
}

/// The set of range keys currently held down, in press order.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: Vec<Key>,
}

impl HeldKeys {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` going down.
    pub fn press(&mut self, key: Key) -> PressTransition {
        if self.keys.contains(&key) {
            return PressTransition::AlreadyHeld;
        }
        self.keys.push(key);
        tracing::trace!(target: targets::KEYBOARD, ?key, held = self.keys.len(), "key held");
        if self.keys.len() == 1 {
            PressTransition::Started
        } else {
            PressTransition::Added
        }
    }

    /// Record `key` coming up.
    pub fn release(&mut self, key: Key) -> ReleaseTransition {
        let Some(index) = self.keys.iter().position(|held| *held == key) else {
            return ReleaseTransition::NotHeld;
        };
        self.keys.remove(index);
        tracing::trace!(target: targets::KEYBOARD, ?key, held = self.keys.len(), "key released");
        if self.keys.is_empty() {
            ReleaseTransition::Ended
        } else {
            ReleaseTransition::StillHeld
        }
    }

    /// Forget every held key.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Whether `key` is held.
    pub fn contains(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Whether no key is held.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of held keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_arrows() {
        let none = KeyboardModifiers::NONE;
        assert_eq!(classify(Key::ArrowLeft, none), ValueAction::Decrement);
        assert_eq!(classify(Key::ArrowDown, none), ValueAction::Decrement);
        assert_eq!(classify(Key::ArrowRight, none), ValueAction::Increment);
        assert_eq!(classify(Key::ArrowUp, KeyboardModifiers::SHIFT), ValueAction::Increment);
    }

    #[test]
    fn test_classify_page_and_jumps() {
        let none = KeyboardModifiers::NONE;
        assert_eq!(classify(Key::PageUp, none), ValueAction::PageIncrement);
        assert_eq!(classify(Key::PageDown, none), ValueAction::PageDecrement);
        assert_eq!(classify(Key::Home, none), ValueAction::JumpToMin);
        assert_eq!(classify(Key::End, none), ValueAction::JumpToMax);
    }

    #[test]
    fn test_classify_unknown_and_meta() {
        assert!(classify(Key::A, KeyboardModifiers::NONE).is_none());
        assert!(classify(Key::Unknown(0x1ff), KeyboardModifiers::NONE).is_none());
        assert!(classify(Key::ArrowRight, KeyboardModifiers::META).is_none());
    }

    #[test]
    fn test_held_keys_transitions() {
        let mut held = HeldKeys::new();
        assert_eq!(held.press(Key::ArrowRight), PressTransition::Started);
        assert_eq!(held.press(Key::ArrowRight), PressTransition::AlreadyHeld);
        assert_eq!(held.press(Key::ArrowUp), PressTransition::Added);
        assert_eq!(held.len(), 2);

        assert_eq!(held.release(Key::ArrowRight), ReleaseTransition::StillHeld);
        assert_eq!(held.release(Key::Home), ReleaseTransition::NotHeld);
        assert_eq!(held.release(Key::ArrowUp), ReleaseTransition::Ended);
        assert_eq!(held.release(Key::ArrowUp), ReleaseTransition::NotHeld);
        assert!(held.is_empty());
    }
}
