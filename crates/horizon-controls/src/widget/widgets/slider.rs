//! Accessible slider.
//!
//! [`AccessibleSlider`] is a range control built from a [`ValueState`] and an
//! [`AccessibleValueHandler`]. The slider forwards input to the handler; the
//! handler does all of the session, rounding and announcement work.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_controls::prelude::*;
//!
//! let mut slider = AccessibleSlider::new(
//!     "Temperature",
//!     20.0,
//!     ValueRange::new(-10.0, 40.0)?,
//!     ValueHandlerOptions::default().with_value_text(|v| format!("{v} degrees")),
//!     Arc::new(UtteranceQueue::new()),
//!     Arc::new(SystemClock),
//! )?;
//!
//! slider.handler().value_changed.connect(|change| {
//!     println!("{} -> {}", change.old, change.new);
//! });
//!
//! assert_eq!(slider.accessible_value().as_deref(), Some("20 degrees"));
//! # Ok::<(), horizon_controls::ConfigError>(())
//! ```

use std::sync::Arc;

use horizon_controls_core::{Clock, PerfSpan, controls_debug};

use crate::error::ConfigError;
use crate::widget::WidgetId;
use crate::widget::accessibility::{
    Accessible, AccessibleAction, AccessibleRole, AnnouncementChannel,
};
use crate::widget::events::{FocusOutEvent, KeyPressEvent, KeyReleaseEvent, Pointer};
use crate::widget::value::{AccessibleValueHandler, ValueHandlerOptions, ValueRange, ValueState};

/// A slider whose thumb is driven by keyboard, pointer and assistive
/// technology.
pub struct AccessibleSlider {
    id: WidgetId,
    label: String,
    state: Arc<ValueState>,
    handler: AccessibleValueHandler,
}

impl AccessibleSlider {
    /// Create a slider labelled `label` with the given value and range.
    pub fn new(
        label: impl Into<String>,
        initial: f64,
        range: ValueRange,
        options: ValueHandlerOptions,
        channel: Arc<dyn AnnouncementChannel>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let id = WidgetId::next();
        let state = Arc::new(ValueState::new(initial, range)?);
        let handler = AccessibleValueHandler::new(id, state.clone(), options, channel, clock)?;

        Ok(Self {
            id,
            label: label.into(),
            state,
            handler,
        })
    }

    /// The slider's identifier.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The accessible label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the accessible label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.state.get()
    }

    /// Set the value programmatically.
    pub fn set_value(&self, value: f64) -> bool {
        self.state.set(value)
    }

    /// Current range.
    pub fn range(&self) -> ValueRange {
        self.state.range()
    }

    /// The shared value store.
    pub fn state(&self) -> &Arc<ValueState> {
        &self.state
    }

    /// The value handler, for its signals and queries.
    pub fn handler(&self) -> &AccessibleValueHandler {
        &self.handler
    }

    /// Mutable access to the value handler.
    pub fn handler_mut(&mut self) -> &mut AccessibleValueHandler {
        &mut self.handler
    }

    /// Enable or disable the slider.
    pub fn set_enabled(&mut self, enabled: bool) {
        controls_debug!(label = %self.label, enabled, "slider enabled state changed");
        self.handler.set_enabled(enabled);
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Handle a key press.
    pub fn handle_key_press(&mut self, event: &mut KeyPressEvent) -> bool {
        self.handler.handle_key_press(event)
    }

    /// Handle a key release.
    pub fn handle_key_release(&mut self, event: &mut KeyReleaseEvent) -> bool {
        self.handler.handle_key_release(event)
    }

    /// Handle focus loss.
    pub fn handle_focus_out(&mut self, event: &FocusOutEvent) {
        self.handler.handle_focus_out(event);
    }

    /// Press the thumb with `pointer`, moving it to `value`.
    pub fn thumb_press(&mut self, pointer: &Pointer, value: f64) -> bool {
        self.handler.begin_pointer_drag(pointer) && self.handler.pointer_drag(value)
    }

    /// Drag the thumb to `value`.
    pub fn thumb_drag(&mut self, value: f64) -> bool {
        self.handler.pointer_drag(value)
    }

    /// Release the thumb.
    pub fn thumb_release(&mut self) -> bool {
        self.handler.end_pointer_drag()
    }

    /// Perform an accessibility action.
    pub fn perform_action(&mut self, action: &AccessibleAction) -> bool {
        let _span = PerfSpan::new("slider_perform_action");
        self.handler.perform_action(action)
    }

    /// Deliver due announcements. Call from the host's event loop.
    pub fn poll(&mut self) -> bool {
        self.handler.poll_announcements()
    }
}

impl Accessible for AccessibleSlider {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Slider
    }

    fn accessible_name(&self) -> Option<String> {
        Some(self.label.clone())
    }

    fn accessible_value(&self) -> Option<String> {
        Some(self.handler.value_text())
    }

    fn accessible_numeric_value(&self) -> Option<f64> {
        Some(self.handler.pdom_value())
    }

    fn accessible_min_value(&self) -> Option<f64> {
        Some(self.range().min())
    }

    fn accessible_max_value(&self) -> Option<f64> {
        Some(self.range().max())
    }

    fn accessible_value_step(&self) -> Option<f64> {
        Some(self.handler.mapper().steps().unit_step)
    }

    fn is_accessible_disabled(&self) -> bool {
        !self.handler.is_enabled()
    }

    fn accessible_actions(&self) -> Vec<AccessibleAction> {
        if !self.handler.is_enabled() {
            return Vec::new();
        }
        vec![
            AccessibleAction::Focus,
            AccessibleAction::Increment,
            AccessibleAction::Decrement,
            AccessibleAction::SetValue(self.value()),
        ]
    }
}

impl std::fmt::Debug for AccessibleSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessibleSlider")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("value", &self.value())
            .field("range", &self.range())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::accessibility::UtteranceQueue;
    use crate::widget::events::{Key, KeyboardModifiers, PointerKind};
    use horizon_controls_core::ManualClock;

    fn slider(value: f64) -> AccessibleSlider {
        AccessibleSlider::new(
            "Level",
            value,
            ValueRange::new(0.0, 10.0).unwrap(),
            ValueHandlerOptions::default(),
            Arc::new(UtteranceQueue::new()),
            Arc::new(ManualClock::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_value_outside_range() {
        let result = AccessibleSlider::new(
            "Level",
            12.0,
            ValueRange::new(0.0, 10.0).unwrap(),
            ValueHandlerOptions::default(),
            Arc::new(UtteranceQueue::new()),
            Arc::new(ManualClock::new()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_thumb_drag() {
        let mut slider = slider(2.0);
        let touch = Pointer::new(PointerKind::Touch);

        assert!(slider.thumb_press(&touch, 3.5));
        assert!(slider.thumb_drag(12.0));
        assert_eq!(slider.value(), 10.0);
        assert!(slider.thumb_release());
        assert!(!slider.thumb_drag(4.0));
    }

    #[test]
    fn test_accessible_info() {
        let mut slider = slider(3.0);
        let mut event = KeyPressEvent::new(Key::ArrowUp, KeyboardModifiers::NONE);
        slider.handle_key_press(&mut event);

        assert_eq!(slider.accessible_role(), AccessibleRole::Slider);
        assert_eq!(slider.accessible_name().as_deref(), Some("Level"));
        assert_eq!(slider.accessible_numeric_value(), Some(4.0));
        assert_eq!(slider.accessible_value().as_deref(), Some("4"));
        assert_eq!(slider.accessible_value_step(), Some(1.0));

        slider.set_enabled(false);
        assert!(slider.is_accessible_disabled());
        assert!(slider.accessible_actions().is_empty());
    }

    #[test]
    fn test_accessibility_actions() {
        let mut slider = slider(5.0);

        assert!(slider.perform_action(&AccessibleAction::Decrement));
        assert_eq!(slider.value(), 4.0);
        assert!(slider.perform_action(&AccessibleAction::SetValue(8.25)));
        assert_eq!(slider.value(), 8.25);
        assert!(!slider.perform_action(&AccessibleAction::Expand));
        assert!(!slider.handler().is_active());
    }

    #[cfg(feature = "accessibility")]
    #[test]
    fn test_builds_accesskit_node() {
        let slider = slider(7.0);
        let node = slider.build_accessible_node(&[]);
        assert_eq!(node.role(), accesskit::Role::Slider);
        assert_eq!(node.numeric_value(), Some(7.0));
        assert_eq!(node.min_numeric_value(), Some(0.0));
        assert!(node.supports_action(accesskit::Action::SetValue));
    }
}
