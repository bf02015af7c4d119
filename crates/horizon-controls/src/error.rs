//! Error types for Horizon Controls.

use horizon_controls_core::CoreError;

/// The main error type for control operations.
#[derive(Debug, thiserror::Error)]
pub enum ControlsError {
    /// Invalid control configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the core systems.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

/// Rejected configuration.
///
/// Raised when a control is constructed, never while it is running.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A step size is negative.
    #[error("{name} must be >= 0, got {value}")]
    NegativeStep {
        /// Which step.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Rounding to step needs a positive step.
    #[error("{name} must be > 0 when round_to_step is enabled")]
    ZeroStepWithRounding {
        /// Which step.
        name: &'static str,
    },

    /// The range is inverted.
    #[error("range minimum {min} is greater than maximum {max}")]
    InvertedRange {
        /// Range minimum.
        min: f64,
        /// Range maximum.
        max: f64,
    },

    /// The initial value lies outside the range.
    #[error("value {value} is outside [{min}, {max}]")]
    ValueOutOfRange {
        /// The rejected value.
        value: f64,
        /// Range minimum.
        min: f64,
        /// Range maximum.
        max: f64,
    },

    /// A NaN or infinite number.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Which field.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The TOML source could not be parsed.
    #[error("invalid TOML: {0}")]
    Toml(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err.message().to_string())
    }
}

/// A specialized Result type for control operations.
pub type Result<T> = std::result::Result<T, ControlsError>;
