//! Value handler configuration.
//!
//! The numeric tuning of a range control (step sizes, rounding, announcement
//! timing) is plain data and can be loaded from TOML:
//!
//! ```
//! use horizon_controls::widget::value::ValueHandlerConfig;
//!
//! let config = ValueHandlerConfig::from_toml_str(r#"
//! round_to_step = true
//!
//! [steps]
//! unit_step = 0.5
//! large_step = 0.1
//! page_step = 2.0
//!
//! [announcement]
//! per_change_delay_ms = 500
//! "#).unwrap();
//!
//! assert_eq!(config.steps.unit_step, 0.5);
//! assert_eq!(config.announcement.max_delay_ms, 1500);
//! ```
//!
//! Behavior that cannot be expressed as data (the constraint, value text
//! formatting) lives on [`ValueHandlerOptions`](super::ValueHandlerOptions).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Step sizes for keyboard and assistive-technology input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfiguration {
    /// Step for arrow keys.
    pub unit_step: f64,
    /// Step for arrow keys while Shift is held. Usually finer than
    /// `unit_step`.
    pub large_step: f64,
    /// Step for Page Up / Page Down.
    pub page_step: f64,
}

impl Default for StepConfiguration {
    fn default() -> Self {
        Self {
            unit_step: 1.0,
            large_step: 0.1,
            page_step: 10.0,
        }
    }
}

impl StepConfiguration {
    /// Create a step configuration.
    pub fn new(unit_step: f64, large_step: f64, page_step: f64) -> Self {
        Self {
            unit_step,
            large_step,
            page_step,
        }
    }

    /// Check every step is finite and non-negative, and that arrow steps are
    /// positive when values are rounded to them.
    pub fn validate(&self, round_to_step: bool) -> Result<(), ConfigError> {
        for (name, value) in [
            ("unit_step", self.unit_step),
            ("large_step", self.large_step),
            ("page_step", self.page_step),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeStep { name, value });
            }
        }

        if round_to_step {
            if self.unit_step == 0.0 {
                return Err(ConfigError::ZeroStepWithRounding { name: "unit_step" });
            }
            if self.large_step == 0.0 {
                return Err(ConfigError::ZeroStepWithRounding { name: "large_step" });
            }
        }

        Ok(())
    }
}

/// Timing of deferred value announcements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnouncementConfig {
    /// Delay when no value changed since the last delivery.
    pub base_delay_ms: u64,
    /// Extra delay per value change since the last delivery.
    pub per_change_delay_ms: u64,
    /// Upper bound on the delay.
    pub max_delay_ms: u64,
}

impl Default for AnnouncementConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 0,
            per_change_delay_ms: 700,
            max_delay_ms: 1500,
        }
    }
}

impl AnnouncementConfig {
    /// Delay for an announcement after `changes` value changes.
    pub fn delay_for(&self, changes: u32) -> Duration {
        let ms = if changes == 0 {
            self.base_delay_ms
        } else {
            self.max_delay_ms
                .min(u64::from(changes).saturating_mul(self.per_change_delay_ms))
        };
        Duration::from_millis(ms)
    }
}

/// Data configuration of an accessible value handler.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueHandlerConfig {
    /// Keyboard step sizes.
    pub steps: StepConfiguration,
    /// Snap committed values to the active step.
    pub round_to_step: bool,
    /// Announce the value even when its text did not change.
    pub repeat_equal_value_text: bool,
    /// Announcement timing.
    pub announcement: AnnouncementConfig,
}

impl ValueHandlerConfig {
    /// Parse a configuration from TOML. Missing fields take their defaults.
    ///
    /// The result is validated before it is returned.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|err| ConfigError::Toml(err.to_string()))
    }

    /// Set the step sizes.
    pub fn with_steps(mut self, steps: StepConfiguration) -> Self {
        self.steps = steps;
        self
    }

    /// Enable or disable rounding to step.
    pub fn with_round_to_step(mut self, round_to_step: bool) -> Self {
        self.round_to_step = round_to_step;
        self
    }

    /// Enable or disable repeat-equal-values announcements.
    pub fn with_repeat_equal_value_text(mut self, repeat: bool) -> Self {
        self.repeat_equal_value_text = repeat;
        self
    }

    /// Set the announcement timing.
    pub fn with_announcement(mut self, announcement: AnnouncementConfig) -> Self {
        self.announcement = announcement;
        self
    }

    /// Check the configuration can drive a control.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.steps.validate(self.round_to_step)
    }
}
