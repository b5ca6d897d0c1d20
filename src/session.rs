//! Working state one detector carries between events.

use crate::contact::{ContactId, Sample};
use crate::geometry::VelocityEstimator;

/// The typed blackboard shared by the gesture states.
///
/// Owned exclusively by one detector instance and mutated only by its state
/// handlers. `last2` mirrors the secondary contact's most recent position
/// because input events carry changed contacts only, so the two-finger states
/// need a stored counterpart when one finger moves.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) touch1: Option<ContactId>,
    pub(crate) touch2: Option<ContactId>,
    pub(crate) start: Sample,
    pub(crate) last: Sample,
    pub(crate) last2: Option<Sample>,
    pub(crate) velocity: VelocityEstimator,
    pub(crate) start_distance: f32,
    pub(crate) last_distance: f32,
    pub(crate) start_angle: f32,
    pub(crate) last_angle: f32,
    pub(crate) scaled: bool,
    pub(crate) rotated: bool,
    /// Most recent completed tap, kept across returns to the idle state so
    /// the next press can be matched as a double tap.
    pub(crate) last_tap: Option<Sample>,
}

impl SessionState {
    /// Back-to-idle reset. Clears everything except `last_tap`.
    pub(crate) fn reset(&mut self) {
        let last_tap = self.last_tap;
        *self = Self::default();
        self.last_tap = last_tap;
    }

    /// Full discard, used when the detector detaches.
    pub(crate) fn discard(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn is_primary(&self, id: ContactId) -> bool {
        self.touch1 == Some(id)
    }

    pub(crate) fn is_tracked(&self, id: ContactId) -> bool {
        self.touch1 == Some(id) || self.touch2 == Some(id)
    }
}
