//! Derived interaction states for button-like controls.
//!
//! These are pure functions of the raw inputs. Callers recompute them every
//! time an input changes; there is nothing to cache.

/// Raw inputs that interaction states are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionInputs {
    /// A pointer is over the control.
    pub over: bool,
    /// The control has keyboard focus.
    pub focused: bool,
    /// The control is held down (pointer or keyboard).
    pub pressed: bool,
    /// The control is selected/on (radio buttons, toggles).
    pub selected: bool,
    /// The control accepts input.
    pub enabled: bool,
}

impl InteractionInputs {
    /// Enabled, with every other input false.
    pub const IDLE: Self = Self {
        over: false,
        focused: false,
        pressed: false,
        selected: false,
        enabled: true,
    };

    /// Over or focused both count as "highlighted".
    pub fn highlighted(&self) -> bool {
        self.over || self.focused
    }
}

/// Appearance state of a push button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonInteractionState {
    /// Neither highlighted nor pressed.
    #[default]
    Idle,
    /// Highlighted but not pressed.
    Over,
    /// Highlighted and pressed.
    Pressed,
    /// Not accepting input.
    Disabled,
}

/// Appearance state of a radio button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RadioButtonInteractionState {
    /// Not selected and not highlighted.
    #[default]
    Deselected,
    /// Highlighted, not pressed, not selected.
    Over,
    /// Highlighted and pressed.
    Pressed,
    /// Selected.
    Selected,
}

/// Appearance state of a two-state toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToggleInteractionState {
    /// Off, idle.
    #[default]
    Off,
    /// Off, highlighted.
    OffOver,
    /// Off, pressed.
    OffPressed,
    /// On, idle.
    On,
    /// On, highlighted.
    OnOver,
    /// On, pressed.
    OnPressed,
    /// Not accepting input.
    Disabled,
}

/// Derive the push-button state.
///
/// A press that has slid off the control looks idle again.
pub fn button_interaction_state(inputs: InteractionInputs) -> ButtonInteractionState {
    if !inputs.enabled {
        ButtonInteractionState::Disabled
    } else if inputs.highlighted() && !inputs.pressed {
        ButtonInteractionState::Over
    } else if inputs.highlighted() && inputs.pressed {
        ButtonInteractionState::Pressed
    } else {
        ButtonInteractionState::Idle
    }
}

/// Derive the radio-button state.
///
/// Tie-break order: over, pressed, selected, deselected.
pub fn radio_button_interaction_state(inputs: InteractionInputs) -> RadioButtonInteractionState {
    let highlighted = inputs.highlighted();
    if highlighted && !(inputs.pressed || inputs.selected) {
        RadioButtonInteractionState::Over
    } else if highlighted && inputs.pressed {
        RadioButtonInteractionState::Pressed
    } else if inputs.selected {
        RadioButtonInteractionState::Selected
    } else {
        RadioButtonInteractionState::Deselected
    }
}

/// Derive the toggle-button state.
pub fn toggle_interaction_state(inputs: InteractionInputs) -> ToggleInteractionState {
    match (button_interaction_state(inputs), inputs.selected) {
        (ButtonInteractionState::Disabled, _) => ToggleInteractionState::Disabled,
        (ButtonInteractionState::Idle, false) => ToggleInteractionState::Off,
        (ButtonInteractionState::Over, false) => ToggleInteractionState::OffOver,
        (ButtonInteractionState::Pressed, false) => ToggleInteractionState::OffPressed,
        (ButtonInteractionState::Idle, true) => ToggleInteractionState::On,
        (ButtonInteractionState::Over, true) => ToggleInteractionState::OnOver,
        (ButtonInteractionState::Pressed, true) => ToggleInteractionState::OnPressed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(over: bool, focused: bool, pressed: bool, selected: bool) -> InteractionInputs {
        InteractionInputs {
            over,
            focused,
            pressed,
            selected,
            enabled: true,
        }
    }

    #[test]
    fn test_radio_tie_breaks() {
        use RadioButtonInteractionState as S;

        assert_eq!(radio_button_interaction_state(inputs(true, false, false, false)), S::Over);
        assert_eq!(radio_button_interaction_state(inputs(false, true, false, false)), S::Over);
        assert_eq!(radio_button_interaction_state(inputs(true, false, true, false)), S::Pressed);
        assert_eq!(radio_button_interaction_state(inputs(false, true, true, true)), S::Pressed);
        assert_eq!(radio_button_interaction_state(inputs(true, false, false, true)), S::Selected);
        assert_eq!(radio_button_interaction_state(inputs(false, false, true, true)), S::Selected);
        assert_eq!(radio_button_interaction_state(inputs(false, false, true, false)), S::Deselected);
        assert_eq!(radio_button_interaction_state(InteractionInputs::IDLE), S::Deselected);
    }

    #[test]
    fn test_button_states() {
        use ButtonInteractionState as S;

        assert_eq!(button_interaction_state(InteractionInputs::IDLE), S::Idle);
        assert_eq!(button_interaction_state(inputs(true, false, false, false)), S::Over);
        assert_eq!(button_interaction_state(inputs(true, false, true, false)), S::Pressed);
        // Pressed, then dragged off.
        assert_eq!(button_interaction_state(inputs(false, false, true, false)), S::Idle);

        let disabled = InteractionInputs {
            over: true,
            enabled: false,
            ..InteractionInputs::IDLE
        };
        assert_eq!(button_interaction_state(disabled), S::Disabled);
    }

    #[test]
    fn test_toggle_states() {
        use ToggleInteractionState as S;

        assert_eq!(toggle_interaction_state(inputs(false, false, false, false)), S::Off);
        assert_eq!(toggle_interaction_state(inputs(false, true, false, true)), S::OnOver);
        assert_eq!(toggle_interaction_state(inputs(true, false, true, true)), S::OnPressed);
        assert_eq!(toggle_interaction_state(inputs(true, false, true, false)), S::OffPressed);
    }
}
