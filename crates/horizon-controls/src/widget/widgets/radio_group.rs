//! Radio button group with roving keyboard focus.
//!
//! [`RadioButtonGroup`] keeps exactly one of its buttons selected (once a
//! selection is made). Within the group, arrow keys move focus *and*
//! selection together, wrapping at the ends; Space selects the focused
//! button. Each button's appearance comes from
//! [`RadioButtonInteractionState`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_controls::prelude::*;
//!
//! let focus = Arc::new(FocusManager::new());
//! let mut group = RadioButtonGroup::new(["Small", "Medium", "Large"], focus);
//!
//! group.select(0);
//! group.focus_button(0);
//! group.handle_key_press(&mut KeyPressEvent::new(Key::ArrowRight, KeyboardModifiers::NONE));
//! assert_eq!(group.selected_index(), Some(1));
//! ```

use std::sync::Arc;

use horizon_controls_core::Signal;
use horizon_controls_core::logging::targets;

use crate::widget::accessibility::{Accessible, AccessibleRole};
use crate::widget::events::{FocusOutEvent, FocusReason, Key, KeyPressEvent, Pointer};
use crate::widget::interaction::{ButtonModel, RadioButtonInteractionState};
use crate::widget::{FocusManager, WidgetId};

struct RadioItem {
    label: String,
    model: ButtonModel,
}

/// A group of mutually exclusive radio buttons.
pub struct RadioButtonGroup {
    id: WidgetId,
    items: Vec<RadioItem>,
    focus: Arc<FocusManager>,
    selected: Option<usize>,
    focused: Option<usize>,

    /// Emitted with the new index when the selection changes.
    pub selection_changed: Signal<usize>,
}

impl RadioButtonGroup {
    /// Create a group with one button per label and nothing selected.
    pub fn new<I, S>(labels: I, focus: Arc<FocusManager>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = labels
            .into_iter()
            .map(|label| RadioItem {
                label: label.into(),
                model: ButtonModel::new(),
            })
            .collect();

        Self {
            id: WidgetId::next(),
            items,
            focus,
            selected: None,
            focused: None,
            selection_changed: Signal::new(),
        }
    }

    /// The group's identifier.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Number of buttons.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no buttons.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Label of button `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|item| item.label.as_str())
    }

    /// Identifier of button `index`.
    pub fn button_id(&self, index: usize) -> Option<WidgetId> {
        self.items.get(index).map(|item| item.model.id())
    }

    /// Selected button.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Button holding focus.
    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    /// Appearance state of button `index`.
    pub fn interaction_state(&self, index: usize) -> Option<RadioButtonInteractionState> {
        self.items
            .get(index)
            .map(|item| item.model.radio_interaction_state())
    }

    /// Select button `index`. Returns `true` if the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() || self.selected == Some(index) {
            return false;
        }

        if let Some(previous) = self.selected {
            self.items[previous].model.set_selected(false);
        }
        self.items[index].model.set_selected(true);
        self.selected = Some(index);

        tracing::debug!(target: targets::WIDGETS, index, "radio selection changed");
        self.selection_changed.emit(index);
        true
    }

    /// Move keyboard focus to button `index`.
    pub fn focus_button(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        if let Some(previous) = self.focused {
            self.items[previous].model.set_focused(false);
        }
        self.items[index].model.set_focused(true);
        self.focused = Some(index);
        self.focus.set_focus(self.items[index].model.id(), FocusReason::Other);
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Set whether the pointer is over button `index`.
    pub fn set_over(&mut self, index: usize, over: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.model.set_over(over);
        }
    }

    /// Press button `index` with `pointer`.
    pub fn press(&mut self, index: usize, pointer: &Pointer) -> bool {
        self.items
            .get_mut(index)
            .is_some_and(|item| item.model.press(pointer))
    }

    /// Release button `index`; a completed click selects it.
    pub fn release(&mut self, index: usize) -> bool {
        let clicked = self
            .items
            .get_mut(index)
            .is_some_and(|item| item.model.release());
        if clicked {
            self.select(index);
        }
        clicked
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key press on the focused button.
    pub fn handle_key_press(&mut self, event: &mut KeyPressEvent) -> bool {
        let Some(focused) = self.focused else {
            return false;
        };
        let count = self.items.len();

        let target = match event.key {
            Key::ArrowRight | Key::ArrowDown => (focused + 1) % count,
            Key::ArrowLeft | Key::ArrowUp => (focused + count - 1) % count,
            Key::Space => focused,
            _ => return false,
        };

        event.base.accept();
        self.focus_button(target);
        self.select(target);
        true
    }

    /// Handle focus leaving the group.
    pub fn handle_focus_out(&mut self, event: &FocusOutEvent) {
        if let Some(previous) = self.focused.take() {
            self.items[previous].model.handle_focus_out(event);
        }
    }
}

impl Accessible for RadioButtonGroup {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::RadioGroup
    }

    fn accessible_value(&self) -> Option<String> {
        self.selected.and_then(|index| self.label(index).map(str::to_string))
    }

    fn accessible_active_descendant(&self) -> Option<WidgetId> {
        self.focused.and_then(|index| self.button_id(index))
    }

    fn accessible_set_size(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

impl std::fmt::Debug for RadioButtonGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadioButtonGroup")
            .field("id", &self.id)
            .field("buttons", &self.items.len())
            .field("selected", &self.selected)
            .field("focused", &self.focused)
            .finish()
    }
}
