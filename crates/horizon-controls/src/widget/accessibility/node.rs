//! The Accessible trait for control accessibility support.

use crate::widget::WidgetId;

use super::role::{AccessibleAction, AccessibleRole};

/// Trait for controls that provide accessibility information.
///
/// Most methods have sensible defaults; controls override the ones relevant
/// to their functionality.
///
/// # Example
///
/// ```
/// use horizon_controls::widget::accessibility::{Accessible, AccessibleAction, AccessibleRole};
///
/// struct Mute {
///     on: bool,
/// }
///
/// impl Accessible for Mute {
///     fn accessible_role(&self) -> AccessibleRole {
///         AccessibleRole::Switch
///     }
///
///     fn accessible_name(&self) -> Option<String> {
///         Some("Mute".into())
///     }
///
///     fn is_accessible_checked(&self) -> Option<bool> {
///         Some(self.on)
///     }
///
///     fn accessible_actions(&self) -> Vec<AccessibleAction> {
///         vec![AccessibleAction::Click, AccessibleAction::Focus]
///     }
/// }
/// ```
pub trait Accessible {
    /// Get the accessibility role of this control.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Unknown
    }

    /// Get the accessible name (the primary label screen readers speak).
    fn accessible_name(&self) -> Option<String> {
        None
    }

    /// Get the accessible description.
    fn accessible_description(&self) -> Option<String> {
        None
    }

    /// Get the value as text (`aria-valuetext`).
    fn accessible_value(&self) -> Option<String> {
        None
    }

    /// Get the value as a number (`aria-valuenow`).
    fn accessible_numeric_value(&self) -> Option<f64> {
        None
    }

    /// Get the minimum numeric value.
    fn accessible_min_value(&self) -> Option<f64> {
        None
    }

    /// Get the maximum numeric value.
    fn accessible_max_value(&self) -> Option<f64> {
        None
    }

    /// Get the numeric value step.
    fn accessible_value_step(&self) -> Option<f64> {
        None
    }

    /// Get the checked/toggled state for checkable controls.
    fn is_accessible_checked(&self) -> Option<bool> {
        None
    }

    /// Get the expanded state for controls that open a popup.
    fn is_accessible_expanded(&self) -> Option<bool> {
        None
    }

    /// Get the selected state for selectable items.
    fn is_accessible_selected(&self) -> Option<bool> {
        None
    }

    /// Whether the control is disabled.
    fn is_accessible_disabled(&self) -> bool {
        false
    }

    /// Get the actions supported by this control.
    fn accessible_actions(&self) -> Vec<AccessibleAction> {
        Vec::new()
    }

    /// Get the active descendant for composite controls (list boxes).
    fn accessible_active_descendant(&self) -> Option<WidgetId> {
        None
    }

    /// Get the position in set (1-indexed) for list items.
    fn accessible_position_in_set(&self) -> Option<usize> {
        None
    }

    /// Get the set size for list items.
    fn accessible_set_size(&self) -> Option<usize> {
        None
    }

    /// Build an AccessKit Node from this control's accessibility info.
    #[cfg(feature = "accessibility")]
    fn build_accessible_node(&self, children: &[WidgetId]) -> accesskit::Node {
        use accesskit::{Node, Toggled};

        let mut node = Node::new(self.accessible_role().to_accesskit_role());

        if let Some(name) = self.accessible_name() {
            node.set_label(name);
        }
        if let Some(desc) = self.accessible_description() {
            node.set_description(desc);
        }
        if let Some(value) = self.accessible_value() {
            node.set_value(value);
        }

        if let Some(value) = self.accessible_numeric_value() {
            node.set_numeric_value(value);
        }
        if let Some(min) = self.accessible_min_value() {
            node.set_min_numeric_value(min);
        }
        if let Some(max) = self.accessible_max_value() {
            node.set_max_numeric_value(max);
        }
        if let Some(step) = self.accessible_value_step() {
            node.set_numeric_value_step(step);
        }

        if let Some(checked) = self.is_accessible_checked() {
            node.set_toggled(if checked { Toggled::True } else { Toggled::False });
        }
        if let Some(expanded) = self.is_accessible_expanded() {
            node.set_expanded(expanded);
        }
        if let Some(selected) = self.is_accessible_selected() {
            node.set_selected(selected);
        }
        if self.is_accessible_disabled() {
            node.set_disabled();
        }

        for action in self.accessible_actions() {
            node.add_action(action.to_accesskit_action());
        }

        if let Some(active) = self.accessible_active_descendant() {
            node.set_active_descendant(super::widget_id_to_node_id(active));
        }
        if let Some(pos) = self.accessible_position_in_set() {
            node.set_position_in_set(pos);
        }
        if let Some(size) = self.accessible_set_size() {
            node.set_size_of_set(size);
        }

        let child_ids: Vec<_> = children
            .iter()
            .map(|id| super::widget_id_to_node_id(*id))
            .collect();
        if !child_ids.is_empty() {
            node.set_children(child_ids);
        }

        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Level {
        value: f64,
    }

    impl Accessible for Level {
        fn accessible_role(&self) -> AccessibleRole {
            AccessibleRole::Slider
        }

        fn accessible_name(&self) -> Option<String> {
            Some("Water level".to_string())
        }

        fn accessible_numeric_value(&self) -> Option<f64> {
            Some(self.value)
        }

        fn accessible_min_value(&self) -> Option<f64> {
            Some(0.0)
        }

        fn accessible_max_value(&self) -> Option<f64> {
            Some(10.0)
        }

        fn accessible_actions(&self) -> Vec<AccessibleAction> {
            vec![AccessibleAction::Increment, AccessibleAction::Decrement]
        }
    }

    #[test]
    fn test_accessible_trait_defaults() {
        struct Minimal;
        impl Accessible for Minimal {}

        let widget = Minimal;
        assert_eq!(widget.accessible_role(), AccessibleRole::Unknown);
        assert!(widget.accessible_name().is_none());
        assert!(widget.accessible_value().is_none());
        assert!(widget.is_accessible_checked().is_none());
        assert!(!widget.is_accessible_disabled());
        assert!(widget.accessible_actions().is_empty());
    }

    #[cfg(feature = "accessibility")]
    #[test]
    fn test_build_accessible_node() {
        let level = Level { value: 4.0 };
        let node = level.build_accessible_node(&[]);

        assert_eq!(node.role(), accesskit::Role::Slider);
        assert_eq!(node.numeric_value(), Some(4.0));
        assert_eq!(node.max_numeric_value(), Some(10.0));
        assert!(node.supports_action(accesskit::Action::Increment));
    }
}
