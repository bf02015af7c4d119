//! Logging facilities for Horizon Controls.
//!
//! Horizon Controls uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("horizon_controls::value=debug"))
//!     .init();
//! ```
//!
//! Every subsystem logs under one of the [`targets`] so it can be filtered on
//! its own.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_controls_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_controls_core::signal";
    /// Timer system target.
    pub const TIMER: &str = "horizon_controls_core::timer";
    /// Keyboard classification and held-key tracking.
    pub const KEYBOARD: &str = "horizon_controls::keyboard";
    /// Value commits and interaction sessions.
    pub const VALUE: &str = "horizon_controls::value";
    /// Accessibility announcements.
    pub const ANNOUNCE: &str = "horizon_controls::announce";
    /// Focus changes.
    pub const FOCUS: &str = "horizon_controls::focus";
    /// Button, radio and list box widgets.
    pub const WIDGETS: &str = "horizon_controls::widgets";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Handy for measuring how long a burst of input processing takes.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_controls::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// These are thin wrappers around the `tracing` macros with a consistent
/// target.
#[macro_export]
macro_rules! controls_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_controls", $($arg)*)
    };
}

#[macro_export]
macro_rules! controls_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_controls", $($arg)*)
    };
}

#[macro_export]
macro_rules! controls_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "horizon_controls", $($arg)*)
    };
}

#[macro_export]
macro_rules! controls_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_controls", $($arg)*)
    };
}

#[macro_export]
macro_rules! controls_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "horizon_controls", $($arg)*)
    };
}
