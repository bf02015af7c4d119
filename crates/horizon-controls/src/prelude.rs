//! Prelude module for Horizon Controls.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use horizon_controls::prelude::*;
//! ```

// ============================================================================
// Signal/Slot, Property and Timer Systems
// ============================================================================

pub use horizon_controls_core::{
    Clock, ConnectionId, ManualClock, Property, Signal, SystemClock, TimerManager,
};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{ConfigError, ControlsError};

// ============================================================================
// Events and Focus
// ============================================================================

pub use crate::widget::{
    FocusManager, FocusOutEvent, FocusReason, Key, KeyPressEvent, KeyReleaseEvent,
    KeyboardModifiers, Pointer, PointerKind, WidgetId,
};

// ============================================================================
// Accessibility
// ============================================================================

pub use crate::widget::accessibility::{
    Accessible, AccessibleAction, AccessibleRole, AnnouncementChannel, AnnouncementRequest,
    UtteranceQueue,
};

// ============================================================================
// Interaction States
// ============================================================================

pub use crate::widget::interaction::{
    ButtonInteractionState, ButtonModel, InteractionInputs, RadioButtonInteractionState,
    ToggleInteractionState,
};

// ============================================================================
// Value Handling
// ============================================================================

pub use crate::widget::value::{
    AccessibleValueHandler, AnnouncementConfig, InteractionEnd, InteractionOwner,
    StepConfiguration, ValueAction, ValueHandlerConfig, ValueHandlerOptions, ValueRange,
    ValueState,
};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::widgets::{AccessibleSlider, ComboBoxItem, ComboBoxListBox, RadioButtonGroup};
