//! Turning semantic actions into committed values.
//!
//! Every value change made by a handler goes through one path:
//!
//! 1. `raw = current + delta`
//! 2. optionally [`round_to_step`] against the value before the change
//! 3. the host constraint, unless the change is a fine (Shift) step
//! 4. clamp to the range
//!
//! The free functions here are pure. [`ValueMapper`] binds them to one
//! control's steps and constraint.

use std::sync::Arc;

use horizon_controls_core::logging::targets;

use super::config::StepConfiguration;
use super::keyboard::ValueAction;
use super::state::ValueRange;

/// Tolerance for floating-point error when correcting a rounding overshoot.
pub const ROUNDING_EPSILON: f64 = 1e-9;

/// Host-supplied value constraint. Must be monotonic and idempotent.
pub type ValueConstraint = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Formats a value as the text assistive technology reads out.
pub type ValueTextFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Maps a model value to the number exposed to assistive technology.
pub type PdomValueMapping = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Whether `action` with `shift_held` is a fine (large-step) change.
///
/// Fine changes bypass the host constraint.
pub fn is_fine_step(action: ValueAction, shift_held: bool) -> bool {
    shift_held && matches!(action, ValueAction::Increment | ValueAction::Decrement)
}

/// The step an action moves by, or `None` for jumps and `ValueAction::None`.
pub fn step_for(action: ValueAction, steps: &StepConfiguration, shift_held: bool) -> Option<f64> {
    match action {
        ValueAction::Increment | ValueAction::Decrement => Some(if shift_held {
            steps.large_step
        } else {
            steps.unit_step
        }),
        ValueAction::PageIncrement | ValueAction::PageDecrement => Some(steps.page_step),
        ValueAction::JumpToMin | ValueAction::JumpToMax | ValueAction::None => None,
    }
}

/// Signed change `action` makes to `current`.
///
/// Jumps return the full distance to the bound; `ValueAction::None`
/// returns zero.
pub fn compute_delta(
    action: ValueAction,
    steps: &StepConfiguration,
    shift_held: bool,
    current: f64,
    range: ValueRange,
) -> f64 {
    let step = step_for(action, steps, shift_held).unwrap_or(0.0);
    match action {
        ValueAction::Increment | ValueAction::PageIncrement => step,
        ValueAction::Decrement | ValueAction::PageDecrement => -step,
        ValueAction::JumpToMin => range.min() - current,
        ValueAction::JumpToMax => range.max() - current,
        ValueAction::None => 0.0,
    }
}

/// Snap `value` to the nearest multiple of `step`.
///
/// If `value` was at most one step from `reference` but snapping carried it
/// further than one step away, it is pulled back one step toward
/// `reference`. A single key press therefore never moves more than one step.
///
/// Returns `value` unchanged for non-positive or non-finite steps. For
/// `step > 0` the function is idempotent.
pub fn round_to_step(value: f64, reference: f64, step: f64) -> f64 {
    if !(step > 0.0 && step.is_finite() && value.is_finite()) {
        return value;
    }

    let mut k = (value / step).round();
    let within_one_step = (value - reference).abs() <= step + ROUNDING_EPSILON;
    if within_one_step && (k * step - reference).abs() - step > ROUNDING_EPSILON {
        if k * step > reference {
            k -= 1.0;
        } else {
            k += 1.0;
        }
    }
    k * step
}

/// Default value text: the number without float noise or trailing zeros.
pub fn default_value_text(value: f64) -> String {
    let tidy = (value * 1e9).round() / 1e9;
    // Avoid "-0".
    let tidy = if tidy == 0.0 { 0.0 } else { tidy };
    format!("{tidy}")
}

/// Binds the value arithmetic to one control's configuration.
#[derive(Clone)]
pub struct ValueMapper {
    steps: StepConfiguration,
    round_to_step: bool,
    constraint: Option<ValueConstraint>,
}

impl ValueMapper {
    /// Create a mapper without a constraint.
    pub fn new(steps: StepConfiguration, round_to_step: bool) -> Self {
        Self {
            steps,
            round_to_step,
            constraint: None,
        }
    }

    /// Attach a constraint.
    pub fn with_constraint(mut self, constraint: Option<ValueConstraint>) -> Self {
        self.constraint = constraint;
        self
    }

    /// Step sizes.
    pub fn steps(&self) -> &StepConfiguration {
        &self.steps
    }

    /// Whether committed values are snapped to the step.
    pub fn rounds_to_step(&self) -> bool {
        self.round_to_step
    }

    /// Apply the host constraint.
    ///
    /// A constraint producing a non-finite number is ignored.
    pub fn constrain(&self, raw: f64) -> f64 {
        let Some(constraint) = &self.constraint else {
            return raw;
        };
        let constrained = constraint(raw);
        if constrained.is_finite() {
            constrained
        } else {
            tracing::warn!(target: targets::VALUE, raw, constrained, "constraint returned non-finite value, ignoring");
            raw
        }
    }

    /// The value `action` commits, starting from `current`.
    pub fn apply_action(
        &self,
        action: ValueAction,
        shift_held: bool,
        current: f64,
        range: ValueRange,
    ) -> f64 {
        let delta = compute_delta(action, &self.steps, shift_held, current, range);
        self.finish(
            current + delta,
            current,
            step_for(action, &self.steps, shift_held),
            is_fine_step(action, shift_held),
            range,
        )
    }

    /// The value committed for an externally proposed value (pointer drags,
    /// assistive technology set-value requests). Not rounded to step.
    pub fn apply_proposed(&self, proposed: f64, current: f64, range: ValueRange) -> f64 {
        self.finish(proposed, current, None, false, range)
    }

    fn finish(
        &self,
        raw: f64,
        reference: f64,
        step: Option<f64>,
        fine: bool,
        range: ValueRange,
    ) -> f64 {
        let mut value = raw;
        if self.round_to_step
            && let Some(step) = step
        {
            value = round_to_step(value, reference, step);
        }
        if !fine {
            value = self.constrain(value);
        }
        range.clamp(value)
    }
}

impl std::fmt::Debug for ValueMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueMapper")
            .field("steps", &self.steps)
            .field("round_to_step", &self.round_to_step)
            .field("has_constraint", &self.constraint.is_some())
            .finish()
    }
}
