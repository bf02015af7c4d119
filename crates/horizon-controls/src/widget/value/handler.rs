//! The accessible value handler: one interaction session at a time.
//!
//! [`AccessibleValueHandler`] sits between a range control's input events
//! and its [`ValueState`]. It merges three input sources into a single
//! sequence of value commits:
//!
//! - the keyboard (arrow, page, Home/End keys)
//! - pointer drags, driven by the control through
//!   [`begin_pointer_drag`](AccessibleValueHandler::begin_pointer_drag)
//! - assistive technology, which either sends "input"/"change" events or
//!   requests an [`AccessibleAction`]
//!
//! # Sessions
//!
//! A session starts on the first held range key, the first unblocked
//! assistive-technology input, or a pointer drag, and ends when the last key
//! comes up, the drag ends, focus leaves, or [`interrupt`] is called. Only
//! one source owns a session; the others are ignored until it ends, except
//! that a range key ends an assistive-technology session whose "change"
//! never arrived. The originating [`Pointer`] is reserved for the control
//! while a session runs.
//!
//! Ending a session schedules an announcement of the new value and emits
//! `interaction_ended`. Ending twice is harmless: a key-up that arrives after
//! an interrupt finds nothing to end.
//!
//! Hosts may write the [`ValueState`] directly at any time. A write during a
//! session becomes the session's new starting value.
//!
//! [`interrupt`]: AccessibleValueHandler::interrupt

use std::sync::Arc;
use std::time::Duration;

use horizon_controls_core::logging::targets;
use horizon_controls_core::{Clock, Signal};

use super::announcement::AnnouncementScheduler;
use super::config::ValueHandlerConfig;
use super::keyboard::{HeldKeys, PressTransition, ReleaseTransition, ValueAction, classify, is_range_key};
use super::mapper::{
    PdomValueMapping, ValueConstraint, ValueMapper, ValueTextFormatter, default_value_text,
};
use super::state::ValueState;
use crate::error::ConfigError;
use crate::widget::WidgetId;
use crate::widget::accessibility::{AccessibleAction, AnnouncementChannel};
use crate::widget::events::{FocusOutEvent, KeyPressEvent, KeyReleaseEvent, Pointer};

/// Which input source owns the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InteractionOwner {
    /// No session.
    #[default]
    None,
    /// Range keys are held.
    Keyboard,
    /// A pointer drag or assistive-technology gesture.
    Pointer,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The last held key came up.
    KeysReleased,
    /// The pointer drag finished.
    PointerReleased,
    /// Assistive technology committed its change.
    Change,
    /// The control lost focus.
    Blur,
    /// [`AccessibleValueHandler::interrupt`] was called.
    Interrupted,
    /// A one-shot assistive-technology action completed.
    ActionComplete,
}

/// Payload of `interaction_started`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionStart {
    /// Value when the session began.
    pub value_at_start: f64,
    /// Source owning the session.
    pub owner: InteractionOwner,
}

/// Payload of `value_changed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueCommit {
    /// Value before this commit.
    pub old: f64,
    /// Value after this commit.
    pub new: f64,
    /// Value when the session began.
    pub value_at_start: f64,
}

/// Payload of `interaction_ended`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionEnd {
    /// Value when the session began.
    pub value_at_start: f64,
    /// Value when the session ended.
    pub final_value: f64,
    /// Source that owned the session.
    pub owner: InteractionOwner,
    /// Why the session ended.
    pub reason: EndReason,
}

impl InteractionEnd {
    /// Whether the session was cut short rather than finished by its owner.
    pub fn interrupted(&self) -> bool {
        matches!(self.reason, EndReason::Interrupted)
    }
}

/// Keeps a control visible while it is being adjusted.
///
/// Typically an animated pan/zoom service of the host. Called on every
/// keyboard-driven change.
pub trait PanTarget: Send + Sync {
    /// Bring `widget` into view.
    fn keep_visible(&self, widget: WidgetId);
}

/// Everything a handler needs besides its value, channel and clock.
#[derive(Clone, Default)]
pub struct ValueHandlerOptions {
    config: ValueHandlerConfig,
    constraint: Option<ValueConstraint>,
    value_text: Option<ValueTextFormatter>,
    pdom_mapping: Option<PdomValueMapping>,
    pan_target: Option<Arc<dyn PanTarget>>,
}

impl ValueHandlerOptions {
    /// Options with the given data configuration.
    pub fn new(config: ValueHandlerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Data configuration.
    pub fn config(&self) -> &ValueHandlerConfig {
        &self.config
    }

    /// Constrain committed values. The function must be monotonic and
    /// idempotent. Fine (Shift) steps bypass it.
    pub fn with_constraint<F>(mut self, constraint: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.constraint = Some(Arc::new(constraint));
        self
    }

    /// Format the value as spoken text.
    pub fn with_value_text<F>(mut self, format: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.value_text = Some(Arc::new(format));
        self
    }

    /// Map the value before exposing it as the accessible numeric value.
    pub fn with_pdom_mapping<F>(mut self, map: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        self.pdom_mapping = Some(Arc::new(map));
        self
    }

    /// Keep the control visible during keyboard interaction.
    pub fn with_pan_target(mut self, pan_target: Arc<dyn PanTarget>) -> Self {
        self.pan_target = Some(pan_target);
        self
    }
}

impl std::fmt::Debug for ValueHandlerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueHandlerOptions")
            .field("config", &self.config)
            .field("has_constraint", &self.constraint.is_some())
            .field("has_value_text", &self.value_text.is_some())
            .field("has_pdom_mapping", &self.pdom_mapping.is_some())
            .field("has_pan_target", &self.pan_target.is_some())
            .finish()
    }
}

/// Interaction session controller for one range control.
pub struct AccessibleValueHandler {
    id: WidgetId,
    state: Arc<ValueState>,
    mapper: ValueMapper,
    value_text: Option<ValueTextFormatter>,
    pdom_mapping: Option<PdomValueMapping>,
    pan_target: Option<Arc<dyn PanTarget>>,
    scheduler: AnnouncementScheduler,

    enabled: bool,
    held_keys: HeldKeys,
    owner: InteractionOwner,
    value_at_start: Option<f64>,
    reserved_pointer: Option<Pointer>,
    /// `ValueState::revision` after the handler's own last write.
    known_revision: u64,

    /// Emitted when a session begins.
    pub interaction_started: Signal<InteractionStart>,

    /// Emitted after every committed change made by this handler.
    pub value_changed: Signal<ValueCommit>,

    /// Emitted when a session ends, after its announcement is scheduled.
    pub interaction_ended: Signal<InteractionEnd>,
}

impl AccessibleValueHandler {
    /// Create a handler for the control `id` driving `state`.
    ///
    /// Fails if the configuration is invalid.
    pub fn new(
        id: WidgetId,
        state: Arc<ValueState>,
        options: ValueHandlerOptions,
        channel: Arc<dyn AnnouncementChannel>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        let ValueHandlerOptions {
            config,
            constraint,
            value_text,
            pdom_mapping,
            pan_target,
        } = options;
        config.validate()?;

        let mapper = ValueMapper::new(config.steps, config.round_to_step).with_constraint(constraint);
        let scheduler = AnnouncementScheduler::new(config.announcement, channel, clock)
            .with_repeat_equal_value_text(config.repeat_equal_value_text);
        let known_revision = state.revision();

        Ok(Self {
            id,
            state,
            mapper,
            value_text,
            pdom_mapping,
            pan_target,
            scheduler,
            enabled: true,
            held_keys: HeldKeys::new(),
            owner: InteractionOwner::None,
            value_at_start: None,
            reserved_pointer: None,
            known_revision,
            interaction_started: Signal::new(),
            value_changed: Signal::new(),
            interaction_ended: Signal::new(),
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The control this handler belongs to.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The value store.
    pub fn state(&self) -> &Arc<ValueState> {
        &self.state
    }

    /// The value arithmetic.
    pub fn mapper(&self) -> &ValueMapper {
        &self.mapper
    }

    /// Whether a session is in progress.
    pub fn is_active(&self) -> bool {
        self.value_at_start.is_some()
    }

    /// Source owning the current session.
    pub fn owner(&self) -> InteractionOwner {
        self.owner
    }

    /// Value when the current session began.
    pub fn value_at_start(&self) -> Option<f64> {
        self.value_at_start
    }

    /// Number of range keys held.
    pub fn held_key_count(&self) -> usize {
        self.held_keys.len()
    }

    /// Whether the handler accepts input.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable input. Disabling interrupts a running session.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.interrupt();
        }
        self.enabled = enabled;
    }

    /// The value as spoken text.
    pub fn value_text(&self) -> String {
        self.format_value(self.state.get())
    }

    /// The number exposed as the accessible value.
    pub fn pdom_value(&self) -> f64 {
        let value = self.state.get();
        match &self.pdom_mapping {
            Some(map) => map(value),
            None => value,
        }
    }

    /// The announcement scheduler.
    pub fn scheduler(&self) -> &AnnouncementScheduler {
        &self.scheduler
    }

    /// Deliver a due announcement. Call from the host's event loop.
    pub fn poll_announcements(&mut self) -> bool {
        self.scheduler.poll()
    }

    /// Time until the pending announcement is due.
    pub fn time_until_announcement(&mut self) -> Option<Duration> {
        self.scheduler.time_until_due()
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key press.
    ///
    /// Returns `true` (and accepts the event) for every range key, including
    /// those suppressed because Meta is held. Other keys are left alone.
    #[tracing::instrument(skip(self, event), target = "horizon_controls::value", level = "trace", fields(key = ?event.key))]
    pub fn handle_key_press(&mut self, event: &mut KeyPressEvent) -> bool {
        if !self.enabled || !is_range_key(event.key) {
            return false;
        }
        if event.pointer.is_reserved_by_other(self.id) {
            tracing::debug!(target: targets::VALUE, "pointer reserved by another control");
            return false;
        }

        event.base.accept();

        let action = classify(event.key, event.modifiers);
        if action.is_none() {
            tracing::trace!(target: targets::KEYBOARD, "range key suppressed by modifiers");
            return true;
        }
        if self.owner == InteractionOwner::Pointer {
            if self.reserved_pointer.is_some() {
                tracing::debug!(target: targets::VALUE, "pointer owns the session, ignoring key");
                return true;
            }
            // An assistive-technology session whose change event never came.
            self.end_session(EndReason::Change);
        }

        if self.held_keys.press(event.key) == PressTransition::Started {
            self.start_session(InteractionOwner::Keyboard, Some(&event.pointer));
        }

        self.step(action, event.modifiers.shift);
        if let Some(pan_target) = &self.pan_target {
            pan_target.keep_visible(self.id);
        }
        true
    }

    /// Handle a key release. Releasing the last held key ends the session.
    pub fn handle_key_release(&mut self, event: &mut KeyReleaseEvent) -> bool {
        match self.held_keys.release(event.key) {
            ReleaseTransition::NotHeld => false,
            ReleaseTransition::StillHeld => {
                event.base.accept();
                true
            }
            ReleaseTransition::Ended => {
                event.base.accept();
                self.end_session(EndReason::KeysReleased);
                true
            }
        }
    }

    /// Handle focus loss: end a running session, then reset key tracking.
    pub fn handle_focus_out(&mut self, _event: &FocusOutEvent) {
        self.end_session(EndReason::Blur);
        self.held_keys.clear();
    }

    // =========================================================================
    // Assistive technology
    // =========================================================================

    /// Handle an assistive-technology "input" event proposing `proposed`.
    ///
    /// Moves one unit step toward `proposed`. Ignored while keys are held,
    /// because platforms fire both a key-down and an input event for the
    /// same gesture, and during a pointer drag. A later range key ends the
    /// session if the matching change event never arrives.
    pub fn handle_input(&mut self, proposed: f64) -> bool {
        if !self.enabled || !proposed.is_finite() {
            return false;
        }
        if !self.held_keys.is_empty() || self.owner == InteractionOwner::Keyboard {
            tracing::trace!(target: targets::VALUE, "input blocked by held keys");
            return false;
        }
        if self.reserved_pointer.is_some() {
            tracing::trace!(target: targets::VALUE, "input blocked by pointer drag");
            return false;
        }

        if !self.is_active() {
            self.start_session(InteractionOwner::Pointer, None);
        }

        let current = self.state.get();
        let action = if proposed > current {
            ValueAction::Increment
        } else if proposed < current {
            ValueAction::Decrement
        } else {
            return true;
        };
        self.step(action, false);
        true
    }

    /// Handle an assistive-technology "change" event, which ends its session.
    pub fn handle_change(&mut self) -> bool {
        if self.owner != InteractionOwner::Pointer || self.reserved_pointer.is_some() {
            return false;
        }
        self.end_session(EndReason::Change);
        true
    }

    /// Perform an accessibility action request.
    ///
    /// Each request runs as its own complete session. Returns `false` for
    /// actions range controls do not support, or while another session runs.
    pub fn perform_action(&mut self, action: &AccessibleAction) -> bool {
        if !self.enabled || self.is_active() {
            return false;
        }

        match *action {
            AccessibleAction::Increment | AccessibleAction::Decrement => {
                let step = if *action == AccessibleAction::Increment {
                    ValueAction::Increment
                } else {
                    ValueAction::Decrement
                };
                self.start_session(InteractionOwner::Pointer, None);
                self.step(step, false);
            }
            AccessibleAction::SetValue(proposed) if proposed.is_finite() => {
                self.start_session(InteractionOwner::Pointer, None);
                let current = self.state.get();
                let next = self.mapper.apply_proposed(proposed, current, self.state.range());
                self.commit(next);
            }
            _ => return false,
        }
        self.end_session(EndReason::ActionComplete);
        true
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Start a pointer drag.
    ///
    /// Returns `false` if a session is already running or `pointer` is
    /// reserved by another control.
    pub fn begin_pointer_drag(&mut self, pointer: &Pointer) -> bool {
        if !self.enabled || self.is_active() || pointer.is_reserved_by_other(self.id) {
            return false;
        }
        self.start_session(InteractionOwner::Pointer, Some(pointer));
        true
    }

    /// Move the drag to `proposed`. Constrained and clamped, never rounded.
    pub fn pointer_drag(&mut self, proposed: f64) -> bool {
        if self.owner != InteractionOwner::Pointer || !proposed.is_finite() {
            return false;
        }
        self.sync_external_writes();
        let current = self.state.get();
        let next = self.mapper.apply_proposed(proposed, current, self.state.range());
        self.commit(next);
        true
    }

    /// Finish the pointer drag.
    pub fn end_pointer_drag(&mut self) -> bool {
        if self.owner != InteractionOwner::Pointer {
            return false;
        }
        self.end_session(EndReason::PointerReleased);
        true
    }

    // =========================================================================
    // Session boundaries
    // =========================================================================

    /// Cut the current session short.
    ///
    /// Safe in any state. With no session this does nothing. Otherwise held
    /// keys and the pointer reservation are dropped and the session ends; the
    /// value is announced only if it changed.
    pub fn interrupt(&mut self) {
        if !self.is_active() {
            return;
        }
        tracing::debug!(target: targets::VALUE, id = ?self.id, "interaction interrupted");
        self.end_session(EndReason::Interrupted);
    }

    fn start_session(&mut self, owner: InteractionOwner, pointer: Option<&Pointer>) {
        self.sync_external_writes();
        let value_at_start = self.state.get();
        self.value_at_start = Some(value_at_start);
        self.owner = owner;

        if let Some(pointer) = pointer
            && pointer.reserve(self.id)
        {
            self.reserved_pointer = Some(pointer.clone());
        }

        tracing::debug!(target: targets::VALUE, id = ?self.id, ?owner, value_at_start, "interaction started");
        self.interaction_started.emit(InteractionStart {
            value_at_start,
            owner,
        });
    }

    fn end_session(&mut self, reason: EndReason) {
        self.sync_external_writes();
        let Some(value_at_start) = self.value_at_start.take() else {
            return;
        };
        let owner = std::mem::take(&mut self.owner);
        self.held_keys.clear();
        if let Some(pointer) = self.reserved_pointer.take() {
            pointer.release(self.id);
        }

        let final_value = self.state.get();
        let unchanged = final_value == value_at_start;
        if reason != EndReason::Interrupted || !unchanged {
            let text = self.format_value(final_value);
            self.scheduler.schedule(&text, unchanged);
        }

        tracing::debug!(target: targets::VALUE, id = ?self.id, ?reason, value_at_start, final_value, "interaction ended");
        self.interaction_ended.emit(InteractionEnd {
            value_at_start,
            final_value,
            owner,
            reason,
        });
    }

    // =========================================================================
    // Commit path
    // =========================================================================

    fn step(&mut self, action: ValueAction, shift_held: bool) {
        self.sync_external_writes();
        let current = self.state.get();
        let next = self
            .mapper
            .apply_action(action, shift_held, current, self.state.range());
        self.commit(next);
    }

    fn commit(&mut self, next: f64) {
        let old = self.state.get();
        let revision = self.state.revision();
        // Slots of `ValueState::value_changed` may write again during the
        // commit; only the commit's own bump counts as ours.
        if !self.state.commit(next) {
            return;
        }
        self.known_revision = revision + 1;

        self.scheduler.note_value_change();
        let value_at_start = self.value_at_start.unwrap_or(old);
        tracing::trace!(target: targets::VALUE, old, new = next, "value committed");
        self.value_changed.emit(ValueCommit {
            old,
            new: next,
            value_at_start,
        });
    }

    /// Notice host writes made since the handler last wrote.
    fn sync_external_writes(&mut self) {
        let revision = self.state.revision();
        if revision == self.known_revision {
            return;
        }
        self.known_revision = revision;

        if let Some(value_at_start) = self.value_at_start.as_mut() {
            let value = self.state.get();
            tracing::debug!(
                target: targets::VALUE,
                previous_start = *value_at_start,
                value,
                "external write during interaction, re-basing start value"
            );
            *value_at_start = value;
        }
    }

    fn format_value(&self, value: f64) -> String {
        match &self.value_text {
            Some(format) => format(value),
            None => default_value_text(value),
        }
    }
}

impl std::fmt::Debug for AccessibleValueHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessibleValueHandler")
            .field("id", &self.id)
            .field("value", &self.state.get())
            .field("owner", &self.owner)
            .field("value_at_start", &self.value_at_start)
            .field("held_keys", &self.held_keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::accessibility::UtteranceQueue;
    use crate::widget::events::{FocusReason, Key, KeyboardModifiers, PointerKind};
    use crate::widget::value::{StepConfiguration, ValueRange};
    use horizon_controls_core::ManualClock;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixture {
        handler: AccessibleValueHandler,
        state: Arc<ValueState>,
        queue: Arc<UtteranceQueue>,
        clock: Arc<ManualClock>,
    }

    fn fixture(value: f64, options: ValueHandlerOptions) -> Fixture {
        let state = Arc::new(ValueState::new(value, ValueRange::new(0.0, 10.0).unwrap()).unwrap());
        let queue = Arc::new(UtteranceQueue::new());
        let clock = Arc::new(ManualClock::new());
        let handler = AccessibleValueHandler::new(
            WidgetId::next(),
            state.clone(),
            options,
            queue.clone(),
            clock.clone(),
        )
        .unwrap();
        Fixture {
            handler,
            state,
            queue,
            clock,
        }
    }

    fn press(handler: &mut AccessibleValueHandler, key: Key) -> KeyPressEvent {
        let mut event = KeyPressEvent::new(key, KeyboardModifiers::NONE);
        handler.handle_key_press(&mut event);
        event
    }

    fn release(handler: &mut AccessibleValueHandler, key: Key) {
        let mut event = KeyReleaseEvent::new(key, KeyboardModifiers::NONE);
        handler.handle_key_release(&mut event);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let state = Arc::new(ValueState::new(0.0, ValueRange::new(0.0, 1.0).unwrap()).unwrap());
        let config = ValueHandlerConfig::default()
            .with_round_to_step(true)
            .with_steps(StepConfiguration::new(0.0, 0.1, 1.0));
        let result = AccessibleValueHandler::new(
            WidgetId::next(),
            state,
            ValueHandlerOptions::new(config),
            Arc::new(UtteranceQueue::new()),
            Arc::new(ManualClock::new()),
        );
        assert!(matches!(result, Err(ConfigError::ZeroStepWithRounding { .. })));
    }

    #[test]
    fn test_keyboard_session_reserves_pointer() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let event = press(&mut fx.handler, Key::ArrowRight);

        assert!(event.base.is_accepted());
        assert_eq!(event.pointer.reserved_by(), Some(fx.handler.id()));
        assert_eq!(fx.handler.owner(), InteractionOwner::Keyboard);

        release(&mut fx.handler, Key::ArrowRight);
        assert_eq!(event.pointer.reserved_by(), None);
        assert!(!fx.handler.is_active());
    }

    #[test]
    fn test_unknown_key_not_accepted() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let event = press(&mut fx.handler, Key::A);
        assert!(!event.base.is_accepted());
        assert!(!fx.handler.is_active());
        assert_eq!(fx.state.get(), 5.0);
    }

    #[test]
    fn test_auto_repeat_keeps_one_session() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let starts = Arc::new(AtomicUsize::new(0));
        let starts_clone = starts.clone();
        fx.handler.interaction_started.connect(move |_| {
            starts_clone.fetch_add(1, Ordering::SeqCst);
        });

        let first = press(&mut fx.handler, Key::ArrowUp);
        let mut repeat = KeyPressEvent::new(Key::ArrowUp, KeyboardModifiers::NONE)
            .repeat()
            .with_pointer(first.pointer.clone());
        fx.handler.handle_key_press(&mut repeat);

        assert_eq!(fx.state.get(), 7.0);
        assert_eq!(starts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_late_key_up_after_interrupt_is_noop() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let ends = Arc::new(AtomicUsize::new(0));
        let ends_clone = ends.clone();
        fx.handler.interaction_ended.connect(move |_| {
            ends_clone.fetch_add(1, Ordering::SeqCst);
        });

        press(&mut fx.handler, Key::ArrowLeft);
        fx.handler.interrupt();
        release(&mut fx.handler, Key::ArrowLeft);
        fx.handler.interrupt();

        assert_eq!(ends.load(Ordering::SeqCst), 1);
        assert_eq!(fx.state.get(), 4.0);
    }

    #[test]
    fn test_interrupt_without_change_does_not_announce() {
        let mut fx = fixture(10.0, ValueHandlerOptions::default());
        press(&mut fx.handler, Key::End);
        fx.handler.interrupt();

        assert!(fx.handler.scheduler().pending().is_none());
    }

    #[test]
    fn test_blur_ends_session_and_announces() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let ends = Arc::new(Mutex::new(Vec::new()));
        let ends_clone = ends.clone();
        fx.handler.interaction_ended.connect(move |end| ends_clone.lock().push(*end));

        press(&mut fx.handler, Key::PageDown);
        fx.handler.handle_focus_out(&FocusOutEvent::new(FocusReason::Tab));

        assert!(!fx.handler.is_active());
        assert_eq!(fx.handler.held_key_count(), 0);
        let ends = ends.lock();
        assert_eq!(ends.len(), 1);
        assert_eq!(ends[0].reason, EndReason::Blur);
        assert_eq!(ends[0].final_value, 0.0);
        assert_eq!(fx.handler.scheduler().pending().map(|r| r.text.as_str()), Some("0"));
    }

    #[test]
    fn test_input_blocked_while_key_held() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        press(&mut fx.handler, Key::ArrowRight);
        assert!(!fx.handler.handle_input(9.0));
        assert_eq!(fx.state.get(), 6.0);
    }

    #[test]
    fn test_input_and_change_session() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        assert!(fx.handler.handle_input(9.0));
        assert_eq!(fx.handler.owner(), InteractionOwner::Pointer);
        assert_eq!(fx.state.get(), 6.0);
        assert!(fx.handler.handle_input(2.0));
        assert_eq!(fx.state.get(), 5.0);

        assert!(fx.handler.handle_change());
        assert!(!fx.handler.is_active());
        assert!(!fx.handler.handle_change());
    }

    #[test]
    fn test_range_key_ends_unfinished_input_session() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let ends = Arc::new(Mutex::new(Vec::new()));
        let ends_clone = ends.clone();
        fx.handler.interaction_ended.connect(move |end| ends_clone.lock().push(*end));

        assert!(fx.handler.handle_input(9.0));
        assert_eq!(fx.state.get(), 6.0);

        let event = press(&mut fx.handler, Key::ArrowRight);
        assert!(event.base.is_accepted());
        assert_eq!(fx.state.get(), 7.0);
        assert_eq!(fx.handler.owner(), InteractionOwner::Keyboard);
        release(&mut fx.handler, Key::ArrowRight);
        assert!(!fx.handler.is_active());

        let ends = ends.lock();
        assert_eq!(ends.len(), 2);
        assert_eq!(ends[0].reason, EndReason::Change);
        assert_eq!(ends[0].final_value, 6.0);
        assert_eq!(ends[1].reason, EndReason::KeysReleased);
        assert_eq!(ends[1].value_at_start, 6.0);
    }

    #[test]
    fn test_input_blocked_during_pointer_drag() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let mouse = Pointer::new(PointerKind::Mouse);
        assert!(fx.handler.begin_pointer_drag(&mouse));
        assert!(fx.handler.pointer_drag(4.0));

        assert!(!fx.handler.handle_input(0.0));
        assert_eq!(fx.state.get(), 4.0);
        assert!(!fx.handler.handle_change());
        assert!(fx.handler.is_active());
    }

    #[test]
    fn test_pointer_reserved_by_other_control_is_refused() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let other = WidgetId::next();

        let mut event = KeyPressEvent::new(Key::ArrowRight, KeyboardModifiers::NONE);
        assert!(event.pointer.reserve(other));
        assert!(!fx.handler.handle_key_press(&mut event));
        assert!(!event.base.is_accepted());
        assert_eq!(fx.state.get(), 5.0);
        assert!(!fx.handler.is_active());

        let touch = Pointer::new(PointerKind::Touch);
        assert!(touch.reserve(other));
        assert!(!fx.handler.begin_pointer_drag(&touch));
        assert!(!fx.handler.is_active());
        assert_eq!(touch.reserved_by(), Some(other));
    }

    #[test]
    fn test_write_from_value_changed_slot_rebases_start() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let ends = Arc::new(Mutex::new(Vec::new()));
        let ends_clone = ends.clone();
        fx.handler.interaction_ended.connect(move |end| ends_clone.lock().push(*end));

        let weak = Arc::downgrade(&fx.state);
        fx.state.value_changed.connect(move |change| {
            if change.new == 6.0
                && let Some(state) = weak.upgrade()
            {
                state.set(1.0);
            }
        });

        press(&mut fx.handler, Key::ArrowRight);
        release(&mut fx.handler, Key::ArrowRight);

        assert_eq!(fx.state.get(), 1.0);
        let ends = ends.lock();
        assert_eq!(ends[0].value_at_start, 1.0);
        assert_eq!(ends[0].final_value, 1.0);
    }

    #[test]
    fn test_keyboard_ignored_during_pointer_drag() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let mouse = Pointer::new(PointerKind::Mouse);
        assert!(fx.handler.begin_pointer_drag(&mouse));
        assert!(fx.handler.pointer_drag(7.25));

        let event = press(&mut fx.handler, Key::ArrowRight);
        assert!(event.base.is_accepted());
        assert_eq!(fx.state.get(), 7.25);
        assert_eq!(fx.handler.held_key_count(), 0);

        assert!(fx.handler.end_pointer_drag());
        assert_eq!(mouse.reserved_by(), None);
    }

    #[test]
    fn test_external_write_rebases_start() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        let ends = Arc::new(Mutex::new(Vec::new()));
        let ends_clone = ends.clone();
        fx.handler.interaction_ended.connect(move |end| ends_clone.lock().push(*end));

        press(&mut fx.handler, Key::ArrowRight);
        fx.state.set(2.0);
        press(&mut fx.handler, Key::ArrowRight);
        release(&mut fx.handler, Key::ArrowRight);

        let ends = ends.lock();
        assert_eq!(ends[0].value_at_start, 2.0);
        assert_eq!(ends[0].final_value, 3.0);
    }

    #[test]
    fn test_actions_use_commit_path() {
        let options = ValueHandlerOptions::default().with_constraint(|v| v.floor());
        let mut fx = fixture(5.0, options);

        assert!(fx.handler.perform_action(&AccessibleAction::Increment));
        assert_eq!(fx.state.get(), 6.0);
        assert!(fx.handler.perform_action(&AccessibleAction::SetValue(8.7)));
        assert_eq!(fx.state.get(), 8.0);
        assert!(fx.handler.perform_action(&AccessibleAction::SetValue(80.0)));
        assert_eq!(fx.state.get(), 10.0);
        assert!(!fx.handler.perform_action(&AccessibleAction::Click));
        assert!(!fx.handler.is_active());
    }

    #[test]
    fn test_pan_target_called_for_keyboard_changes() {
        struct CountingPan(AtomicUsize);
        impl PanTarget for CountingPan {
            fn keep_visible(&self, _widget: WidgetId) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let pan = Arc::new(CountingPan(AtomicUsize::new(0)));
        let mut fx = fixture(5.0, ValueHandlerOptions::default().with_pan_target(pan.clone()));
        press(&mut fx.handler, Key::ArrowRight);
        press(&mut fx.handler, Key::ArrowUp);

        assert_eq!(pan.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_value_text_and_pdom_mapping() {
        let options = ValueHandlerOptions::default()
            .with_value_text(|v| format!("{v} meters"))
            .with_pdom_mapping(|v| v * 10.0);
        let fx = fixture(4.0, options);

        assert_eq!(fx.handler.value_text(), "4 meters");
        assert_eq!(fx.handler.pdom_value(), 40.0);
    }

    #[test]
    fn test_announcement_delivered_after_delay() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        press(&mut fx.handler, Key::ArrowRight);
        release(&mut fx.handler, Key::ArrowRight);

        assert_eq!(fx.handler.time_until_announcement(), Some(Duration::from_millis(700)));
        assert!(!fx.handler.poll_announcements());
        fx.clock.advance(Duration::from_millis(700));
        assert!(fx.handler.poll_announcements());
        assert_eq!(fx.queue.pop().map(|r| r.text), Some("6".to_string()));
    }

    #[test]
    fn test_disable_interrupts() {
        let mut fx = fixture(5.0, ValueHandlerOptions::default());
        press(&mut fx.handler, Key::ArrowRight);
        fx.handler.set_enabled(false);

        assert!(!fx.handler.is_active());
        let event = press(&mut fx.handler, Key::ArrowRight);
        assert!(!event.base.is_accepted());
        assert_eq!(fx.state.get(), 6.0);
    }
}
