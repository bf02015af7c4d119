//! Deferred, debounced value announcements.
//!
//! When an interaction ends the handler asks the [`AnnouncementScheduler`] to
//! speak the new value. The request is not delivered immediately: the more
//! the value changed since the last delivery, the longer the scheduler waits,
//! giving speech already in progress time to finish. A newer request replaces
//! the pending one.
//!
//! The scheduler never blocks. The host's event loop calls
//! [`AnnouncementScheduler::poll`] and delivered requests go to the
//! [`AnnouncementChannel`].

use std::sync::Arc;
use std::time::Duration;

use horizon_controls_core::logging::targets;
use horizon_controls_core::{Clock, TimerId, TimerManager};

use super::config::AnnouncementConfig;
use crate::widget::accessibility::{AnnouncementChannel, AnnouncementRequest};

/// Zero-width space, appended to make identical text look new to screen
/// readers.
pub const REPEAT_MARKER: char = '\u{200B}';

#[derive(Debug)]
struct PendingAnnouncement {
    timer: TimerId,
    request: AnnouncementRequest,
}

/// Debounces announcements for one control.
pub struct AnnouncementScheduler {
    config: AnnouncementConfig,
    repeat_equal_value_text: bool,
    timers: TimerManager,
    channel: Arc<dyn AnnouncementChannel>,
    pending: Option<PendingAnnouncement>,
    /// Value changes since the last delivery.
    changes_since_delivery: u32,
    /// Exact text of the last delivered announcement.
    last_delivered: Option<String>,
}

impl AnnouncementScheduler {
    /// Create a scheduler delivering to `channel` on `clock`'s time.
    pub fn new(
        config: AnnouncementConfig,
        channel: Arc<dyn AnnouncementChannel>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            repeat_equal_value_text: false,
            timers: TimerManager::new(clock),
            channel,
            pending: None,
            changes_since_delivery: 0,
            last_delivered: None,
        }
    }

    /// Announce identical text again, made distinct with [`REPEAT_MARKER`].
    pub fn with_repeat_equal_value_text(mut self, repeat: bool) -> Self {
        self.repeat_equal_value_text = repeat;
        self
    }

    /// Timing configuration.
    pub fn config(&self) -> &AnnouncementConfig {
        &self.config
    }

    /// Record that the value changed.
    pub fn note_value_change(&mut self) {
        self.changes_since_delivery = self.changes_since_delivery.saturating_add(1);
    }

    /// Value changes since the last delivery.
    pub fn changes_since_delivery(&self) -> u32 {
        self.changes_since_delivery
    }

    /// Delay a request made now would get.
    pub fn current_delay(&self) -> Duration {
        self.config.delay_for(self.changes_since_delivery)
    }

    /// The request waiting for its delay to pass.
    pub fn pending(&self) -> Option<&AnnouncementRequest> {
        self.pending.as_ref().map(|pending| &pending.request)
    }

    /// Schedule `text`, replacing any pending request.
    ///
    /// `committed_same_as_before` says the interaction ended on the value it
    /// started from. Unless repeat-equal mode is on, such a request is
    /// dropped when its text matches the last delivery. Returns `true` if a
    /// request is now pending.
    #[tracing::instrument(skip(self, text), target = "horizon_controls::announce", level = "debug")]
    pub fn schedule(&mut self, text: &str, committed_same_as_before: bool) -> bool {
        let repeats_last = self
            .last_delivered
            .as_deref()
            .is_some_and(|last| last.trim_end_matches(REPEAT_MARKER) == text);

        let text = if !repeats_last {
            text.to_string()
        } else if self.repeat_equal_value_text {
            self.toggle_marker(text)
        } else if committed_same_as_before {
            tracing::debug!(target: targets::ANNOUNCE, "value and text unchanged, not announcing");
            self.cancel();
            return false;
        } else {
            text.to_string()
        };

        self.cancel();
        let delay = self.current_delay();
        let timer = self.timers.start_one_shot(delay);
        tracing::debug!(
            target: targets::ANNOUNCE,
            changes = self.changes_since_delivery,
            ?delay,
            "announcement scheduled"
        );
        self.pending = Some(PendingAnnouncement {
            timer,
            request: AnnouncementRequest {
                text,
                previous_announcement_count: self.changes_since_delivery,
                requested_delay: delay,
            },
        });
        true
    }

    /// Drop the pending request, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            // The timer may already have expired without being polled.
            let _ = self.timers.stop(pending.timer);
        }
    }

    /// Time until the pending request is due.
    pub fn time_until_due(&mut self) -> Option<Duration> {
        self.pending.as_ref()?;
        self.timers.time_until_next()
    }

    /// Deliver the pending request if its delay has passed.
    ///
    /// Returns `true` if something was delivered.
    pub fn poll(&mut self) -> bool {
        let fired = self.timers.process_expired();
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| fired.contains(&pending.timer));
        if !due {
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };

        tracing::debug!(target: targets::ANNOUNCE, text = %pending.request.text, "announcement delivered");
        self.last_delivered = Some(pending.request.text.clone());
        self.changes_since_delivery = 0;
        self.channel.announce(pending.request);
        true
    }

    fn toggle_marker(&self, text: &str) -> String {
        let last_had_marker = self
            .last_delivered
            .as_deref()
            .is_some_and(|last| last.ends_with(REPEAT_MARKER));
        if last_had_marker {
            text.to_string()
        } else {
            format!("{text}{REPEAT_MARKER}")
        }
    }
}

impl std::fmt::Debug for AnnouncementScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnouncementScheduler")
            .field("config", &self.config)
            .field("repeat_equal_value_text", &self.repeat_equal_value_text)
            .field("pending", &self.pending)
            .field("changes_since_delivery", &self.changes_since_delivery)
            .finish()
    }
}
