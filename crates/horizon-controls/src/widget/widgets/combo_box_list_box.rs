//! The popup list of a combo box.
//!
//! [`ComboBoxListBox`] is shown when its combo box button is activated. While
//! it is visible it owns keyboard focus: arrow keys move focus between items,
//! Enter/Space pick the focused item and Escape backs out. Either way focus
//! goes back to the button.
//!
//! Focus is returned to the button *before* `item_selected` is emitted, so
//! handlers of the selection (which often announce it or update the button's
//! label) see the button focused.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_controls::prelude::*;
//!
//! let focus = Arc::new(FocusManager::new());
//! let button = WidgetId::next();
//! let mut list = ComboBoxListBox::new(
//!     button,
//!     vec![ComboBoxItem::new("Low"), ComboBoxItem::new("High")],
//!     focus.clone(),
//! );
//!
//! list.show(Some(0));
//! list.handle_key_press(&mut KeyPressEvent::new(Key::ArrowDown, KeyboardModifiers::NONE));
//! list.handle_key_press(&mut KeyPressEvent::new(Key::Enter, KeyboardModifiers::NONE));
//!
//! assert_eq!(list.selected_index(), Some(1));
//! assert_eq!(focus.focused_widget(), Some(button));
//! assert!(!list.is_visible());
//! ```

use std::sync::Arc;

use horizon_controls_core::Signal;
use horizon_controls_core::logging::targets;

use crate::widget::accessibility::{Accessible, AccessibleAction, AccessibleRole};
use crate::widget::events::{FocusOutEvent, FocusReason, Key, KeyPressEvent};
use crate::widget::{FocusManager, WidgetId};

/// One entry of a [`ComboBoxListBox`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComboBoxItem {
    id: WidgetId,
    label: String,
}

impl ComboBoxItem {
    /// Create an item.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: WidgetId::next(),
            label: label.into(),
        }
    }

    /// Identifier the item is focused by.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Item text.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The popup list box of a combo box.
pub struct ComboBoxListBox {
    id: WidgetId,
    button: WidgetId,
    items: Vec<ComboBoxItem>,
    focus: Arc<FocusManager>,
    visible: bool,
    focused_index: Option<usize>,
    selected_index: Option<usize>,

    /// Emitted when an item is picked, after focus returned to the button.
    pub item_selected: Signal<usize>,

    /// Emitted when the list is dismissed without a pick.
    pub cancelled: Signal<()>,

    /// Emitted when the list is shown or hidden.
    pub visibility_changed: Signal<bool>,
}

impl ComboBoxListBox {
    /// Create a hidden list box for the combo box button `button`.
    pub fn new(button: WidgetId, items: Vec<ComboBoxItem>, focus: Arc<FocusManager>) -> Self {
        Self {
            id: WidgetId::next(),
            button,
            items,
            focus,
            visible: false,
            focused_index: None,
            selected_index: None,
            item_selected: Signal::new(),
            cancelled: Signal::new(),
            visibility_changed: Signal::new(),
        }
    }

    /// The list box's identifier.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The items.
    pub fn items(&self) -> &[ComboBoxItem] {
        &self.items
    }

    /// Whether the list is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Index of the item with focus.
    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    /// Index of the last picked item.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Show the list and focus `selected` (or the first item).
    pub fn show(&mut self, selected: Option<usize>) {
        if self.items.is_empty() {
            return;
        }
        if let Some(index) = selected.filter(|index| *index < self.items.len()) {
            self.selected_index = Some(index);
        }

        self.set_visible(true);
        self.focus_item(self.selected_index.unwrap_or(0));
    }

    /// Hide the list without moving focus.
    pub fn hide(&mut self) {
        self.focused_index = None;
        self.set_visible(false);
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Handle a key press while the list is visible.
    pub fn handle_key_press(&mut self, event: &mut KeyPressEvent) -> bool {
        if !self.visible {
            return false;
        }
        let Some(focused) = self.focused_index else {
            return false;
        };
        let last = self.items.len() - 1;

        match event.key {
            Key::ArrowDown => self.focus_item((focused + 1).min(last)),
            Key::ArrowUp => self.focus_item(focused.saturating_sub(1)),
            Key::Home => self.focus_item(0),
            Key::End => self.focus_item(last),
            Key::Enter | Key::Space => self.select(focused),
            Key::Escape => self.cancel(),
            Key::Tab => {
                // Let Tab move focus on; just get out of the way.
                self.hide();
                return false;
            }
            _ => return false,
        }
        event.base.accept();
        true
    }

    /// Handle focus leaving the list.
    pub fn handle_focus_out(&mut self, _event: &FocusOutEvent) {
        if self.visible {
            self.hide();
        }
    }

    /// Pick `index`: focus the button, report the pick, hide.
    pub fn select(&mut self, index: usize) {
        if index >= self.items.len() {
            tracing::warn!(target: targets::WIDGETS, index, "list box selection out of bounds");
            return;
        }

        self.selected_index = Some(index);
        self.focus.set_focus(self.button, FocusReason::Popup);
        tracing::debug!(target: targets::WIDGETS, index, label = %self.items[index].label, "list box item selected");
        self.item_selected.emit(index);
        self.hide();
    }

    /// Dismiss without picking, returning focus to the button.
    pub fn cancel(&mut self) {
        self.focus.set_focus(self.button, FocusReason::Popup);
        self.hide();
        self.cancelled.emit(());
    }

    fn focus_item(&mut self, index: usize) {
        self.focused_index = Some(index);
        self.focus.set_focus(self.items[index].id, FocusReason::Other);
    }

    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.visibility_changed.emit(visible);
        }
    }
}

impl Accessible for ComboBoxListBox {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ListBox
    }

    fn accessible_value(&self) -> Option<String> {
        self.selected_index
            .map(|index| self.items[index].label.clone())
    }

    fn is_accessible_expanded(&self) -> Option<bool> {
        Some(self.visible)
    }

    fn accessible_active_descendant(&self) -> Option<WidgetId> {
        self.focused_index.map(|index| self.items[index].id)
    }

    fn accessible_set_size(&self) -> Option<usize> {
        Some(self.items.len())
    }

    fn accessible_actions(&self) -> Vec<AccessibleAction> {
        if self.visible {
            vec![AccessibleAction::Collapse]
        } else {
            vec![AccessibleAction::Expand]
        }
    }
}

impl std::fmt::Debug for ComboBoxListBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboBoxListBox")
            .field("id", &self.id)
            .field("items", &self.items.len())
            .field("visible", &self.visible)
            .field("focused_index", &self.focused_index)
            .field("selected_index", &self.selected_index)
            .finish()
    }
}
