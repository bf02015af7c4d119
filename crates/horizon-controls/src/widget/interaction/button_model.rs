//! Button model: the input side of every button-like control.
//!
//! [`ButtonModel`] owns the raw [`InteractionInputs`] of one button and keeps
//! its derived interaction state current. Pointer and keyboard handlers feed
//! it; it reports clicks and state changes through signals.
//!
//! # Event Handling
//!
//! - Pointer press/release: a click fires on release, and only if the pointer
//!   is still over the button
//! - Keyboard activation: Space/Enter press the button, release clicks it
//! - Focus out: a press in progress is cancelled without clicking
//!
//! # Example
//!
//! ```
//! use horizon_controls::widget::interaction::{ButtonInteractionState, ButtonModel};
//! use horizon_controls::widget::{Pointer, PointerKind};
//!
//! let mut button = ButtonModel::new();
//! let mouse = Pointer::new(PointerKind::Mouse);
//!
//! button.set_over(true);
//! button.press(&mouse);
//! assert_eq!(button.interaction_state(), ButtonInteractionState::Pressed);
//! assert!(button.release());
//! ```

use horizon_controls_core::logging::targets;
use horizon_controls_core::{Property, Signal};

use super::state::{
    ButtonInteractionState, InteractionInputs, RadioButtonInteractionState,
    ToggleInteractionState, button_interaction_state, radio_button_interaction_state,
    toggle_interaction_state,
};
use crate::widget::WidgetId;
use crate::widget::accessibility::{Accessible, AccessibleAction, AccessibleRole};
use crate::widget::events::{FocusOutEvent, Key, KeyPressEvent, KeyReleaseEvent, Pointer};

/// Shared press/click behavior for push buttons, toggles and radio buttons.
pub struct ButtonModel {
    id: WidgetId,

    inputs: Property<InteractionInputs>,

    /// Last state reported through `interaction_state_changed`.
    state: Property<ButtonInteractionState>,

    /// Toggle `selected` on each click.
    checkable: bool,

    /// Pointer holding the current press, if the press came from a pointer.
    press_pointer: Option<Pointer>,

    /// Activation key holding the current press, if any.
    press_key: Option<Key>,

    /// Emitted on a completed click. Carries the selected state after the
    /// click (always `false` for non-checkable buttons).
    pub clicked: Signal<bool>,

    /// Emitted when the button goes down.
    pub pressed: Signal<()>,

    /// Emitted when the button comes back up, whether or not it clicked.
    pub released: Signal<()>,

    /// Emitted when the selected state changes.
    pub toggled: Signal<bool>,

    /// Emitted when the derived push-button state changes.
    pub interaction_state_changed: Signal<ButtonInteractionState>,
}

impl ButtonModel {
    /// Create an enabled, idle button.
    pub fn new() -> Self {
        Self {
            id: WidgetId::next(),
            inputs: Property::new(InteractionInputs::IDLE),
            state: Property::new(ButtonInteractionState::Idle),
            checkable: false,
            press_pointer: None,
            press_key: None,
            clicked: Signal::new(),
            pressed: Signal::new(),
            released: Signal::new(),
            toggled: Signal::new(),
            interaction_state_changed: Signal::new(),
        }
    }

    /// Make clicks toggle the selected state.
    pub fn with_checkable(mut self, checkable: bool) -> Self {
        self.checkable = checkable;
        self
    }

    /// Identifier used for pointer reservations.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Current raw inputs.
    pub fn inputs(&self) -> InteractionInputs {
        self.inputs.get()
    }

    /// Derived push-button state.
    pub fn interaction_state(&self) -> ButtonInteractionState {
        button_interaction_state(self.inputs())
    }

    /// Derived radio-button state.
    pub fn radio_interaction_state(&self) -> RadioButtonInteractionState {
        radio_button_interaction_state(self.inputs())
    }

    /// Derived toggle-button state.
    pub fn toggle_interaction_state(&self) -> ToggleInteractionState {
        toggle_interaction_state(self.inputs())
    }

    /// Whether the button is held down.
    pub fn is_pressed(&self) -> bool {
        self.inputs().pressed
    }

    /// Whether the button is selected (checked).
    pub fn is_selected(&self) -> bool {
        self.inputs().selected
    }

    /// Whether the button accepts input.
    pub fn is_enabled(&self) -> bool {
        self.inputs().enabled
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Set whether a pointer is over the button.
    pub fn set_over(&mut self, over: bool) {
        self.update_inputs(|inputs| inputs.over = over);
    }

    /// Set whether the button has keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.update_inputs(|inputs| inputs.focused = focused);
    }

    /// Set the selected state, emitting `toggled` if it changed.
    pub fn set_selected(&mut self, selected: bool) {
        if self.is_selected() == selected {
            return;
        }
        self.update_inputs(|inputs| inputs.selected = selected);
        self.toggled.emit(selected);
    }

    /// Enable or disable the button. Disabling cancels a press in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.cancel_press();
        }
        self.update_inputs(|inputs| inputs.enabled = enabled);
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Press the button with `pointer`.
    ///
    /// Returns `false` if the button is disabled or another control already
    /// reserved the pointer.
    pub fn press(&mut self, pointer: &Pointer) -> bool {
        if !self.is_enabled() || self.is_pressed() {
            return false;
        }
        if !pointer.reserve(self.id) {
            tracing::debug!(target: targets::WIDGETS, pointer = ?pointer.id(), "pointer reserved elsewhere");
            return false;
        }

        self.press_pointer = Some(pointer.clone());
        self.go_down();
        true
    }

    /// Release the pointer press.
    ///
    /// Returns `true` if a click occurred.
    pub fn release(&mut self) -> bool {
        let Some(pointer) = self.press_pointer.take() else {
            return false;
        };
        pointer.release(self.id);

        let still_over = self.inputs().over;
        self.go_up();
        if still_over {
            self.click();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key press event.
    ///
    /// Space and Enter press the button. Returns `true` if the event was
    /// handled.
    pub fn handle_key_press(&mut self, event: &mut KeyPressEvent) -> bool {
        if !self.is_enabled() || !event.key.is_activation() {
            return false;
        }

        event.base.accept();
        if event.is_repeat || self.is_pressed() {
            return true;
        }

        if event.pointer.is_reserved_by_other(self.id) {
            return true;
        }
        self.press_key = Some(event.key);
        self.go_down();
        true
    }

    /// Handle a key release event.
    ///
    /// Releasing the activation key that pressed the button clicks it.
    pub fn handle_key_release(&mut self, event: &mut KeyReleaseEvent) -> bool {
        if self.press_key != Some(event.key) {
            return false;
        }

        event.base.accept();
        self.press_key = None;
        self.go_up();
        self.click();
        true
    }

    /// Handle focus loss: drop focus and cancel a keyboard press.
    pub fn handle_focus_out(&mut self, _event: &FocusOutEvent) {
        if self.press_key.is_some() {
            self.cancel_press();
        }
        self.set_focused(false);
    }

    /// Cancel a press without clicking.
    pub fn cancel_press(&mut self) {
        if let Some(pointer) = self.press_pointer.take() {
            pointer.release(self.id);
        }
        self.press_key = None;
        if self.is_pressed() {
            self.go_up();
        }
    }

    /// Programmatically click the button.
    ///
    /// Toggles the selected state (if checkable) and emits `clicked`.
    pub fn click(&mut self) {
        if !self.is_enabled() {
            return;
        }

        if self.checkable {
            let selected = !self.is_selected();
            self.set_selected(selected);
        }

        tracing::debug!(target: targets::WIDGETS, id = ?self.id, "button clicked");
        self.clicked.emit(self.is_selected());
    }

    fn go_down(&mut self) {
        self.update_inputs(|inputs| inputs.pressed = true);
        self.pressed.emit(());
    }

    fn go_up(&mut self) {
        self.update_inputs(|inputs| inputs.pressed = false);
        self.released.emit(());
    }

    fn update_inputs(&mut self, change: impl FnOnce(&mut InteractionInputs)) {
        let mut inputs = self.inputs.get();
        change(&mut inputs);
        if !self.inputs.set(inputs) {
            return;
        }

        let state = button_interaction_state(inputs);
        if self.state.set(state) {
            self.interaction_state_changed.emit(state);
        }
    }
}

impl Accessible for ButtonModel {
    fn accessible_role(&self) -> AccessibleRole {
        if self.checkable {
            AccessibleRole::Switch
        } else {
            AccessibleRole::Button
        }
    }

    fn is_accessible_checked(&self) -> Option<bool> {
        self.checkable.then(|| self.is_selected())
    }

    fn is_accessible_disabled(&self) -> bool {
        !self.is_enabled()
    }

    fn accessible_actions(&self) -> Vec<AccessibleAction> {
        if self.is_enabled() {
            vec![AccessibleAction::Click, AccessibleAction::Focus]
        } else {
            Vec::new()
        }
    }
}

impl Default for ButtonModel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ButtonModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonModel")
            .field("id", &self.id)
            .field("inputs", &self.inputs())
            .field("checkable", &self.checkable)
            .finish()
    }
}
