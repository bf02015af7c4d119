//! Focus management for controls.
//!
//! [`FocusManager`] tracks which control holds keyboard focus. Controls that
//! need to move focus before finishing an interaction (a combo box list box
//! returning focus to its button before reporting the selection) receive the
//! manager as an explicit collaborator and call [`FocusManager::set_focus`].
//!
//! # Usage
//!
//! ```
//! use horizon_controls::widget::{FocusManager, FocusReason, WidgetId};
//!
//! let focus = FocusManager::new();
//! let button = WidgetId::next();
//!
//! focus.focus_changed.connect(|change| {
//!     println!("{:?} -> {:?}", change.previous, change.current);
//! });
//!
//! focus.set_focus(button, FocusReason::Tab);
//! assert_eq!(focus.focused_widget(), Some(button));
//! ```

use horizon_controls_core::Signal;
use horizon_controls_core::logging::targets;
use parking_lot::Mutex;

use super::WidgetId;
use super::events::FocusReason;

/// Payload of [`FocusManager::focus_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    /// The control that lost focus, if any.
    pub previous: Option<WidgetId>,
    /// The control that gained focus, if any.
    pub current: Option<WidgetId>,
    /// Why focus moved.
    pub reason: FocusReason,
}

/// Tracks the focused control for one widget tree.
#[derive(Default)]
pub struct FocusManager {
    /// The currently focused control, if any.
    focused_widget: Mutex<Option<WidgetId>>,

    /// Emitted after focus moves.
    pub focus_changed: Signal<FocusChange>,
}

impl FocusManager {
    /// Create a new focus manager with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently focused control.
    #[inline]
    pub fn focused_widget(&self) -> Option<WidgetId> {
        *self.focused_widget.lock()
    }

    /// Check whether `widget` has focus.
    pub fn has_focus(&self, widget: WidgetId) -> bool {
        self.focused_widget() == Some(widget)
    }

    /// Move focus to `widget`.
    ///
    /// Returns `false` (and emits nothing) if `widget` already had focus.
    pub fn set_focus(&self, widget: WidgetId, reason: FocusReason) -> bool {
        self.move_focus(Some(widget), reason)
    }

    /// Clear focus entirely.
    pub fn clear_focus(&self, reason: FocusReason) -> bool {
        self.move_focus(None, reason)
    }

    fn move_focus(&self, target: Option<WidgetId>, reason: FocusReason) -> bool {
        let previous = {
            let mut focused = self.focused_widget.lock();
            if *focused == target {
                return false;
            }
            std::mem::replace(&mut *focused, target)
        };

        tracing::debug!(target: targets::FOCUS, ?previous, current = ?target, ?reason, "focus moved");
        self.focus_changed.emit(FocusChange {
            previous,
            current: target,
            reason,
        });
        true
    }
}

impl std::fmt::Debug for FocusManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusManager")
            .field("focused_widget", &self.focused_widget())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_set_focus_emits_change() {
        let focus = FocusManager::new();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        focus.focus_changed.connect(move |change| {
            changes_clone.lock().push(*change);
        });

        let first = WidgetId::next();
        let second = WidgetId::next();

        assert!(focus.set_focus(first, FocusReason::Tab));
        assert!(!focus.set_focus(first, FocusReason::Tab));
        assert!(focus.set_focus(second, FocusReason::Mouse));
        assert!(focus.clear_focus(FocusReason::Other));

        let changes = changes.lock();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[1].previous, Some(first));
        assert_eq!(changes[1].current, Some(second));
        assert_eq!(changes[2].current, None);
    }

    #[test]
    fn test_has_focus() {
        let focus = FocusManager::new();
        let id = WidgetId::next();
        assert!(!focus.has_focus(id));
        focus.set_focus(id, FocusReason::Other);
        assert!(focus.has_focus(id));
    }
}
