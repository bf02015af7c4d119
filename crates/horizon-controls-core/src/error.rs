//! Error types for Horizon Controls core systems.

/// The main error type for core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Timer-related error.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is invalid or the timer has already fired or been stopped.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
