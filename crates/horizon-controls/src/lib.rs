//! Horizon Controls - accessible interactive controls for Rust.
//!
//! This is the main crate that re-exports the core systems alongside the
//! widget layer.
//!
//! Controls are headless: they consume input events, own their state, emit
//! signals and describe themselves to assistive technology. Rendering is up
//! to the host.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_controls::prelude::*;
//!
//! let queue = Arc::new(UtteranceQueue::new());
//! let mut slider = AccessibleSlider::new(
//!     "Volume",
//!     5.0,
//!     ValueRange::new(0.0, 10.0)?,
//!     ValueHandlerOptions::default(),
//!     queue.clone(),
//!     Arc::new(SystemClock),
//! )?;
//!
//! slider.handle_key_press(&mut KeyPressEvent::new(Key::End, KeyboardModifiers::NONE));
//! assert_eq!(slider.value(), 10.0);
//! # Ok::<(), horizon_controls::ConfigError>(())
//! ```

pub use horizon_controls_core::*;

pub mod error;
pub mod prelude;
pub mod widget;

pub use error::{ConfigError, ControlsError, Result};
