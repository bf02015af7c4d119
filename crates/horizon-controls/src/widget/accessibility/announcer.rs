//! The channel controls use to speak to assistive technology.
//!
//! Controls never talk to a screen reader directly. They hand an
//! [`AnnouncementRequest`] to an [`AnnouncementChannel`] supplied by the host;
//! the channel decides when and how the text is spoken. No acknowledgement is
//! expected back.
//!
//! [`UtteranceQueue`] is an in-memory channel: it keeps requests in arrival
//! order until the host drains them into its platform live region.

use std::collections::VecDeque;
use std::time::Duration;

use horizon_controls_core::logging::targets;
use parking_lot::Mutex;

/// Text to announce along with the scheduling information that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementRequest {
    /// What to speak.
    pub text: String,
    /// Value changes observed since the previous delivered announcement.
    pub previous_announcement_count: u32,
    /// Minimum delay requested before speaking.
    pub requested_delay: Duration,
}

impl AnnouncementRequest {
    /// Create a request with no delay.
    pub fn immediate(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            previous_announcement_count: 0,
            requested_delay: Duration::ZERO,
        }
    }
}

/// Destination for announcements.
pub trait AnnouncementChannel: Send + Sync {
    /// Accept a request for delivery.
    fn announce(&self, request: AnnouncementRequest);
}

/// Keeps at most this many undelivered announcements.
const DEFAULT_MAX_PENDING: usize = 100;

/// An [`AnnouncementChannel`] that queues requests in memory.
#[derive(Debug)]
pub struct UtteranceQueue {
    pending: Mutex<VecDeque<AnnouncementRequest>>,
    max_pending: usize,
}

impl UtteranceQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_PENDING)
    }

    /// Create an empty queue that drops the oldest entry beyond `max_pending`.
    pub fn with_capacity(max_pending: usize) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            max_pending: max_pending.max(1),
        }
    }

    /// Number of undelivered requests.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether there are no undelivered requests.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Take the oldest request.
    pub fn pop(&self) -> Option<AnnouncementRequest> {
        self.pending.lock().pop_front()
    }

    /// Take every request, oldest first.
    pub fn drain(&self) -> Vec<AnnouncementRequest> {
        self.pending.lock().drain(..).collect()
    }
}

impl Default for UtteranceQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnouncementChannel for UtteranceQueue {
    fn announce(&self, request: AnnouncementRequest) {
        let mut pending = self.pending.lock();
        if pending.len() >= self.max_pending {
            let dropped = pending.pop_front();
            tracing::warn!(target: targets::ANNOUNCE, ?dropped, "utterance queue full, dropping oldest");
        }
        tracing::debug!(target: targets::ANNOUNCE, text = %request.text, "utterance queued");
        pending.push_back(request);
    }
}
