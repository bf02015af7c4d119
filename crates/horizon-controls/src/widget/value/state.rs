//! The numeric value store shared by a range control and its handler.

use std::sync::atomic::{AtomicU64, Ordering};

use horizon_controls_core::logging::targets;
use horizon_controls_core::{Property, Signal};

use crate::error::ConfigError;

/// Inclusive range of valid values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Create a range, rejecting non-finite bounds and `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() {
            return Err(ConfigError::NonFinite { name: "min", value: min });
        }
        if !max.is_finite() {
            return Err(ConfigError::NonFinite { name: "max", value: max });
        }
        if min > max {
            return Err(ConfigError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`.
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies within the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Payload of [`ValueState::value_changed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange {
    /// Value before the write.
    pub old: f64,
    /// Value after the write.
    pub new: f64,
}

/// A numeric value constrained to a range.
///
/// Owned by the control and shared (behind an `Arc`) with its
/// [`AccessibleValueHandler`](super::AccessibleValueHandler). Hosts may write
/// the value directly at any time; the handler notices and adapts.
///
/// Every write keeps the value inside the range. Reads return exactly what
/// was last written.
pub struct ValueState {
    value: Property<f64>,
    range: Property<ValueRange>,

    /// Bumped on every write that changed the value.
    revision: AtomicU64,

    /// Emitted after the value changes.
    pub value_changed: Signal<ValueChange>,

    /// Emitted after the range changes.
    pub range_changed: Signal<ValueRange>,
}

impl ValueState {
    /// Create a value store. `initial` must lie within `range`.
    pub fn new(initial: f64, range: ValueRange) -> Result<Self, ConfigError> {
        if !initial.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "value",
                value: initial,
            });
        }
        if !range.contains(initial) {
            return Err(ConfigError::ValueOutOfRange {
                value: initial,
                min: range.min(),
                max: range.max(),
            });
        }

        Ok(Self {
            value: Property::new(initial),
            range: Property::new(range),
            revision: AtomicU64::new(0),
            value_changed: Signal::new(),
            range_changed: Signal::new(),
        })
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f64 {
        self.value.get()
    }

    /// Current range.
    #[inline]
    pub fn range(&self) -> ValueRange {
        self.range.get()
    }

    /// Number of value changes so far.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Write the value from outside any interaction.
    ///
    /// Out-of-range values are clamped and non-finite values are ignored,
    /// both with a warning. Returns `true` if the value changed.
    pub fn set(&self, value: f64) -> bool {
        if !value.is_finite() {
            tracing::warn!(target: targets::VALUE, value, "ignoring non-finite value");
            return false;
        }

        let range = self.range();
        let clamped = range.clamp(value);
        if clamped != value {
            tracing::warn!(
                target: targets::VALUE,
                value,
                min = range.min(),
                max = range.max(),
                "value outside range, clamping"
            );
        }
        self.write(clamped)
    }

    /// Change the range, clamping the current value into it.
    pub fn set_range(&self, range: ValueRange) {
        if !self.range.set(range) {
            return;
        }
        self.range_changed.emit(range);

        let value = self.get();
        if !range.contains(value) {
            self.write(range.clamp(value));
        }
    }

    /// Write a value the handler has already clamped.
    pub(crate) fn commit(&self, value: f64) -> bool {
        let range = self.range();
        debug_assert!(range.contains(value), "commit outside range: {value}");
        self.write(range.clamp(value))
    }

    fn write(&self, value: f64) -> bool {
        let Some(old) = self.value.replace(value) else {
            return false;
        };
        self.revision.fetch_add(1, Ordering::AcqRel);
        self.value_changed.emit(ValueChange { old, new: value });
        true
    }
}

impl std::fmt::Debug for ValueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueState")
            .field("value", &self.get())
            .field("range", &self.range())
            .field("revision", &self.revision())
            .finish()
    }
}

static_assertions::assert_impl_all!(ValueState: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn range(min: f64, max: f64) -> ValueRange {
        ValueRange::new(min, max).unwrap()
    }

    #[test]
    fn test_range_validation() {
        assert!(ValueRange::new(0.0, 0.0).is_ok());
        assert_eq!(
            ValueRange::new(2.0, 1.0),
            Err(ConfigError::InvertedRange { min: 2.0, max: 1.0 })
        );
        assert!(matches!(
            ValueRange::new(f64::NEG_INFINITY, 1.0),
            Err(ConfigError::NonFinite { name: "min", .. })
        ));
    }

    #[test]
    fn test_initial_value_must_be_in_range() {
        assert!(matches!(
            ValueState::new(11.0, range(0.0, 10.0)),
            Err(ConfigError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_external_set_clamps() {
        let state = ValueState::new(5.0, range(0.0, 10.0)).unwrap();
        assert!(state.set(42.0));
        assert_eq!(state.get(), 10.0);
        assert!(!state.set(f64::NAN));
        assert_eq!(state.get(), 10.0);
    }

    #[test]
    fn test_value_changed_and_revision() {
        let state = ValueState::new(1.0, range(0.0, 10.0)).unwrap();
        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        state.value_changed.connect(move |change| changes_clone.lock().push(*change));

        assert!(state.set(2.5));
        assert!(!state.set(2.5));
        assert_eq!(state.revision(), 1);
        assert_eq!(*changes.lock(), vec![ValueChange { old: 1.0, new: 2.5 }]);
    }

    #[test]
    fn test_shrinking_range_clamps_value() {
        let state = ValueState::new(8.0, range(0.0, 10.0)).unwrap();
        state.set_range(range(0.0, 5.0));
        assert_eq!(state.get(), 5.0);
        assert_eq!(state.range().max(), 5.0);
    }

    #[test]
    fn test_read_back_is_exact() {
        let state = ValueState::new(0.0, range(0.0, 1.0)).unwrap();
        let v = 0.1 + 0.2;
        state.set(v);
        assert_eq!(state.get().to_bits(), v.to_bits());
    }
}
