//! Integration tests for properties, signals and timers working together.

use std::sync::Arc;
use std::time::Duration;

use horizon_controls_core::{ManualClock, Property, Signal, TimerManager};
use parking_lot::Mutex;

struct Level {
    value: Property<f64>,
    value_changed: Signal<(f64, f64)>,
}

impl Level {
    fn new(value: f64) -> Self {
        Self {
            value: Property::new(value),
            value_changed: Signal::new(),
        }
    }

    fn set(&self, value: f64) {
        if let Some(old) = self.value.replace(value) {
            self.value_changed.emit((old, value));
        }
    }
}

#[test]
fn test_property_change_drives_signal() {
    let level = Level::new(1.0);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let seen_clone = seen.clone();
    level.value_changed.connect(move |&(old, new)| {
        seen_clone.lock().push((old, new));
    });

    level.set(1.0);
    level.set(2.5);
    level.set(0.0);

    assert_eq!(*seen.lock(), vec![(1.0, 2.5), (2.5, 0.0)]);
}

#[test]
fn test_restarting_a_timer_debounces() {
    let clock = Arc::new(ManualClock::new());
    let mut timers = TimerManager::new(clock.clone());

    let first = timers.start_one_shot(Duration::from_millis(200));
    clock.advance(Duration::from_millis(150));
    timers.stop(first).unwrap();
    let second = timers.start_one_shot(Duration::from_millis(200));

    clock.advance(Duration::from_millis(100));
    assert!(timers.process_expired().is_empty());

    clock.advance(Duration::from_millis(100));
    assert_eq!(timers.process_expired(), vec![second]);
}
