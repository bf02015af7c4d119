//! Accessible value handling for range controls.
//!
//! Range controls (sliders, spin boxes, dials) share one input pipeline:
//!
//! ```text
//! key/pointer/AT event ──► keyboard::classify ──► mapper ──► ValueState
//!                                │                             │
//!                                └── AccessibleValueHandler ───┴──► AnnouncementScheduler
//! ```
//!
//! - [`ValueState`]: the value and its range, shared with the host
//! - [`AccessibleValueHandler`]: interaction sessions and the commit path
//! - [`AnnouncementScheduler`]: debounced announcement of the new value
//! - [`ValueHandlerConfig`]: steps, rounding and announcement timing
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_controls::widget::{Key, KeyPressEvent, KeyReleaseEvent, KeyboardModifiers, WidgetId};
//! use horizon_controls::widget::accessibility::UtteranceQueue;
//! use horizon_controls::widget::value::{
//!     AccessibleValueHandler, ValueHandlerOptions, ValueRange, ValueState,
//! };
//! use horizon_controls_core::SystemClock;
//!
//! let state = Arc::new(ValueState::new(5.0, ValueRange::new(0.0, 10.0)?)?);
//! let mut handler = AccessibleValueHandler::new(
//!     WidgetId::next(),
//!     state.clone(),
//!     ValueHandlerOptions::default(),
//!     Arc::new(UtteranceQueue::new()),
//!     Arc::new(SystemClock),
//! )?;
//!
//! handler.handle_key_press(&mut KeyPressEvent::new(Key::ArrowRight, KeyboardModifiers::NONE));
//! handler.handle_key_release(&mut KeyReleaseEvent::new(Key::ArrowRight, KeyboardModifiers::NONE));
//! assert_eq!(state.get(), 6.0);
//! # Ok::<(), horizon_controls::ConfigError>(())
//! ```

mod announcement;
mod config;
mod handler;
pub mod keyboard;
pub mod mapper;
mod state;

pub use announcement::{AnnouncementScheduler, REPEAT_MARKER};
pub use config::{AnnouncementConfig, StepConfiguration, ValueHandlerConfig};
pub use handler::{
    AccessibleValueHandler, EndReason, InteractionEnd, InteractionOwner, InteractionStart,
    PanTarget, ValueCommit, ValueHandlerOptions,
};
pub use keyboard::{HeldKeys, ValueAction, classify};
pub use mapper::{ROUNDING_EPSILON, ValueMapper, compute_delta, round_to_step};
pub use state::{ValueChange, ValueRange, ValueState};
