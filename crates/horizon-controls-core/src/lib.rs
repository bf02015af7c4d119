//! Core systems for Horizon Controls.
//!
//! This crate provides the foundation the control library is built on:
//!
//! - **Signal/Slot System**: Type-safe notification of interaction events
//! - **Property System**: Values with change detection
//! - **Timers**: One-shot timers driven by an injectable [`Clock`]
//! - **Logging**: `tracing` targets and convenience macros
//!
//! # Example
//!
//! ```
//! use horizon_controls_core::{Property, Signal};
//!
//! let value = Property::new(0.0_f64);
//! let value_changed = Signal::<f64>::new();
//!
//! value_changed.connect(|v| println!("now {v}"));
//! if value.set(0.5) {
//!     value_changed.emit(0.5);
//! }
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;
mod timer;

pub use error::{CoreError, Result, TimerError};
pub use logging::PerfSpan;
pub use property::{Property, ReadOnlyProperty};
pub use signal::{ConnectionId, Signal};
pub use timer::{Clock, ManualClock, SystemClock, TimerId, TimerManager};
