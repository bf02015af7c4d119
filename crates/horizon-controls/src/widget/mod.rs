//! Widget layer for Horizon Controls.
//!
//! This module provides the input-handling side of the controls:
//!
//! - [`events`]: keyboard, focus and pointer input delivered to controls
//! - [`FocusManager`]: which control holds keyboard focus
//! - [`accessibility`]: roles, the [`Accessible`](accessibility::Accessible)
//!   trait and the announcement channel
//! - [`interaction`]: derived button/radio/toggle interaction states
//! - [`value`]: the accessible value handler behind every range control
//! - [`widgets`]: ready-made controls built from the pieces above
//!
//! # Overview
//!
//! Controls are headless. They own state, consume events, emit signals and
//! describe themselves to assistive technology; drawing them is the host's
//! job. Every control is identified by a [`WidgetId`], which is also what
//! pointer reservations and the focus manager refer to.

pub mod accessibility;
pub mod events;
mod focus;
pub mod interaction;
pub mod value;
pub mod widgets;

use std::sync::atomic::{AtomicU64, Ordering};

pub use events::{
    EventBase, FocusOutEvent, FocusReason, Key, KeyPressEvent, KeyReleaseEvent, KeyboardModifiers,
    Pointer, PointerId, PointerKind,
};
pub use focus::{FocusChange, FocusManager};

/// Unique identifier of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh identifier.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value (never zero).
    pub fn as_raw(self) -> u64 {
        self.0
    }
}

static_assertions::assert_impl_all!(WidgetId: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_ids_are_unique() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert_ne!(a, b);
        assert!(a.as_raw() > 0);
    }
}
