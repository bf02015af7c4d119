//! Accessibility roles and actions for controls.

/// The accessibility role of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum AccessibleRole {
    /// A generic control with no specific role.
    #[default]
    Unknown,

    /// A push button.
    Button,

    /// An on/off toggle switch.
    Switch,

    /// A group of radio buttons.
    RadioGroup,

    /// A slider for selecting a value from a range.
    Slider,

    /// A list box popup.
    ListBox,
}

#[cfg(feature = "accessibility")]
impl AccessibleRole {
    /// Convert to AccessKit's Role enum.
    pub fn to_accesskit_role(self) -> accesskit::Role {
        use accesskit::Role;

        match self {
            AccessibleRole::Unknown => Role::Unknown,
            AccessibleRole::Button => Role::Button,
            AccessibleRole::Switch => Role::Switch,
            AccessibleRole::RadioGroup => Role::RadioGroup,
            AccessibleRole::Slider => Role::Slider,
            AccessibleRole::ListBox => Role::ListBox,
        }
    }
}

#[cfg(feature = "accessibility")]
impl From<AccessibleRole> for accesskit::Role {
    fn from(role: AccessibleRole) -> Self {
        role.to_accesskit_role()
    }
}

/// An action assistive technology can request on a control.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessibleAction {
    /// Activate the control.
    Click,
    /// Move keyboard focus to the control.
    Focus,
    /// Step a range control up.
    Increment,
    /// Step a range control down.
    Decrement,
    /// Set a range control to an exact value.
    SetValue(f64),
    /// Open a popup or expandable region.
    Expand,
    /// Close a popup or expandable region.
    Collapse,
}

#[cfg(feature = "accessibility")]
impl AccessibleAction {
    /// The AccessKit action this maps to.
    pub fn to_accesskit_action(&self) -> accesskit::Action {
        use accesskit::Action;

        match self {
            AccessibleAction::Click => Action::Click,
            AccessibleAction::Focus => Action::Focus,
            AccessibleAction::Increment => Action::Increment,
            AccessibleAction::Decrement => Action::Decrement,
            AccessibleAction::SetValue(_) => Action::SetValue,
            AccessibleAction::Expand => Action::Expand,
            AccessibleAction::Collapse => Action::Collapse,
        }
    }

    /// Translate an AccessKit action request.
    ///
    /// Returns `None` for actions controls do not handle, or for a
    /// `SetValue` request without a numeric payload.
    pub fn from_accesskit_request(request: &accesskit::ActionRequest) -> Option<Self> {
        use accesskit::{Action, ActionData};

        match request.action {
            Action::Click => Some(AccessibleAction::Click),
            Action::Focus => Some(AccessibleAction::Focus),
            Action::Increment => Some(AccessibleAction::Increment),
            Action::Decrement => Some(AccessibleAction::Decrement),
            Action::Expand => Some(AccessibleAction::Expand),
            Action::Collapse => Some(AccessibleAction::Collapse),
            Action::SetValue => match &request.data {
                Some(ActionData::NumericValue(value)) => Some(AccessibleAction::SetValue(*value)),
                Some(ActionData::Value(text)) => {
                    text.trim().parse().ok().map(AccessibleAction::SetValue)
                }
                _ => None,
            },
            _ => None,
        }
    }
}
