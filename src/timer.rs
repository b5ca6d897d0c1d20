//! Single-slot one-shot deadline service.
//!
//! The engine keeps at most one pending deadline per detector. When a
//! deadline fires, the engine routes it into whichever state is active at
//! fire time; states that define no matching arm simply ignore it, which is
//! how a stale timer dies without explicit cancellation on every transition.

/// Name of a scheduled one-shot. Hold timeout is the only timer today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TimerId {
    HoldTimeout,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct TimerService {
    pending: Option<(TimerId, u64)>,
}

impl TimerService {
    /// Schedule a one-shot at `deadline_ms`, replacing any pending timer
    /// registered under the same id.
    pub(crate) fn start(&mut self, id: TimerId, deadline_ms: u64) {
        self.pending = Some((id, deadline_ms));
    }

    /// Cancel the pending timer under `id`. Idempotent.
    pub(crate) fn clear(&mut self, id: TimerId) {
        if matches!(self.pending, Some((pending_id, _)) if pending_id == id) {
            self.pending = None;
        }
    }

    pub(crate) fn clear_all(&mut self) {
        self.pending = None;
    }

    /// Pop the pending timer if its deadline is at or before `now_ms`.
    pub(crate) fn fire_due(&mut self, now_ms: u64) -> Option<TimerId> {
        match self.pending {
            Some((id, deadline)) if deadline <= now_ms => {
                self.pending = None;
                Some(id)
            }
            _ => None,
        }
    }

    pub(crate) fn deadline(&self) -> Option<u64> {
        self.pending.map(|(_, deadline)| deadline)
    }
}
