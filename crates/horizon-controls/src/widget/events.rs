//! Input event types delivered to controls.
//!
//! The platform input layer translates native events into these types and
//! hands them to the focused control. A control that consumes an event calls
//! [`EventBase::accept`]; the platform must then suppress its own default
//! behaviour for that event (the `preventDefault` equivalent).
//!
//! Every keyboard event also carries the [`Pointer`] it originated from. A
//! control that starts an interaction reserves that pointer so that no other
//! listener claims the same gesture.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::WidgetId;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Meta modifier only.
    pub const META: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: true,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Common data for all input events.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event. The platform must not run its default action.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing the default action and further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Keyboard key codes.
///
/// Follows the structure of web `KeyboardEvent.code` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Enter, Tab,

    // Whitespace
    Space,

    // Modifiers (also tracked via KeyboardModifiers)
    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    MetaLeft, MetaRight,

    // Control
    Escape,

    // Unknown/unmapped key
    Unknown(u16),
}

impl Key {
    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Key::ShiftLeft
                | Key::ShiftRight
                | Key::ControlLeft
                | Key::ControlRight
                | Key::AltLeft
                | Key::AltRight
                | Key::MetaLeft
                | Key::MetaRight
        )
    }

    /// Check if this is a navigation key.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp
                | Key::ArrowDown
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::Home
                | Key::End
                | Key::PageUp
                | Key::PageDown
        )
    }

    /// Check if this key activates buttons (Space or Enter).
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Space | Key::Enter)
    }
}

/// Identifier of a pointer known to the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(u64);

impl PointerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

/// What kind of device a pointer represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A mouse.
    Mouse,
    /// A finger on a touch screen.
    Touch,
    /// A stylus.
    Pen,
    /// The keyboard focus pointer.
    Keyboard,
    /// Input synthesized by assistive technology (screen reader gestures).
    AssistiveTechnology,
}

/// A pointer that can be exclusively reserved by one control.
///
/// Clones share the same reservation, so the platform can hand the same
/// pointer to every listener and each listener sees who owns it.
#[derive(Debug, Clone)]
pub struct Pointer {
    id: PointerId,
    kind: PointerKind,
    reservation: Arc<Mutex<Option<WidgetId>>>,
}

impl Pointer {
    /// Create a new, unreserved pointer.
    pub fn new(kind: PointerKind) -> Self {
        Self {
            id: PointerId::next(),
            kind,
            reservation: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a keyboard focus pointer.
    pub fn keyboard() -> Self {
        Self::new(PointerKind::Keyboard)
    }

    /// The pointer's identifier.
    pub fn id(&self) -> PointerId {
        self.id
    }

    /// The device kind.
    pub fn kind(&self) -> PointerKind {
        self.kind
    }

    /// Reserve this pointer for `owner`.
    ///
    /// Returns `false` if another control already holds the reservation.
    pub fn reserve(&self, owner: WidgetId) -> bool {
        let mut reservation = self.reservation.lock();
        match *reservation {
            Some(current) if current != owner => false,
            _ => {
                *reservation = Some(owner);
                true
            }
        }
    }

    /// Release the reservation if `owner` holds it.
    pub fn release(&self, owner: WidgetId) -> bool {
        let mut reservation = self.reservation.lock();
        if *reservation == Some(owner) {
            *reservation = None;
            true
        } else {
            false
        }
    }

    /// The control currently holding the reservation.
    pub fn reserved_by(&self) -> Option<WidgetId> {
        *self.reservation.lock()
    }

    /// Whether a control other than `owner` holds the reservation.
    pub fn is_reserved_by_other(&self, owner: WidgetId) -> bool {
        self.reserved_by().is_some_and(|current| current != owner)
    }
}

/// Key press event, sent when a key is pressed.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
    /// The pointer the event originated from.
    pub pointer: Pointer,
}

impl KeyPressEvent {
    /// Create a new key press event from a fresh keyboard pointer.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            is_repeat: false,
            pointer: Pointer::keyboard(),
        }
    }

    /// Mark the event as an auto-repeat.
    pub fn repeat(mut self) -> Self {
        self.is_repeat = true;
        self
    }

    /// Set the originating pointer.
    pub fn with_pointer(mut self, pointer: Pointer) -> Self {
        self.pointer = pointer;
        self
    }
}

/// Key release event, sent when a key is released.
#[derive(Debug, Clone)]
pub struct KeyReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was released.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyReleaseEvent {
    /// Create a new key release event.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
        }
    }
}

/// Reason for focus change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusReason {
    /// Focus changed due to a pointer click.
    Mouse,
    /// Focus changed due to Tab key.
    Tab,
    /// Focus changed due to Shift+Tab (backtab).
    Backtab,
    /// Focus changed because a popup closed.
    Popup,
    /// Focus changed programmatically.
    #[default]
    Other,
}

/// Focus out event, sent when a control loses keyboard focus (blur).
#[derive(Debug, Clone, Copy)]
pub struct FocusOutEvent {
    /// Base event data.
    pub base: EventBase,
    /// The reason focus was lost.
    pub reason: FocusReason,
}

impl FocusOutEvent {
    /// Create a new focus out event.
    pub fn new(reason: FocusReason) -> Self {
        Self {
            base: EventBase::new(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_constants() {
        assert!(KeyboardModifiers::NONE.none());
        assert!(KeyboardModifiers::SHIFT.shift);
        assert!(KeyboardModifiers::META.any());
    }

    #[test]
    fn test_event_accept_ignore() {
        let mut event = KeyPressEvent::new(Key::ArrowLeft, KeyboardModifiers::NONE);
        assert!(!event.base.is_accepted());
        event.base.accept();
        assert!(event.base.is_accepted());
        event.base.ignore();
        assert!(!event.base.is_accepted());
    }

    #[test]
    fn test_pointer_reservation_is_exclusive() {
        let pointer = Pointer::new(PointerKind::Touch);
        let slider = WidgetId::next();
        let dial = WidgetId::next();

        assert!(pointer.reserve(slider));
        assert!(pointer.reserve(slider));
        assert!(!pointer.reserve(dial));
        assert!(pointer.is_reserved_by_other(dial));

        let shared = pointer.clone();
        assert!(!shared.release(dial));
        assert!(shared.release(slider));
        assert_eq!(pointer.reserved_by(), None);
    }

    #[test]
    fn test_key_categories() {
        assert!(Key::PageDown.is_navigation());
        assert!(!Key::A.is_navigation());
        assert!(Key::MetaLeft.is_modifier());
        assert!(Key::Enter.is_activation());
    }
}
