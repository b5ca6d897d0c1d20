//! Listener registry for recognized gestures.
//!
//! Plays the role of the bound event target: hosts register callbacks per
//! gesture kind and feed detector output through [`GestureTarget::dispatch`].
//! Dispatch is synchronous, on the caller's stack, in registration order, so
//! gesture handling is deterministically ordered relative to the raw input
//! that produced it.

use crate::engine::GestureOutput;
use crate::gesture::{Gesture, GestureKind};

/// Handed to each listener; lets it cancel the event's default action.
#[derive(Debug, Default)]
pub struct DispatchControl {
    canceled: bool,
}

impl DispatchControl {
    pub fn prevent_default(&mut self) {
        self.canceled = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.canceled
    }
}

type Listener = Box<dyn FnMut(&Gesture, &mut DispatchControl)>;

/// The bound target gestures are dispatched on.
#[derive(Default)]
pub struct GestureTarget {
    listeners: Vec<(GestureKind, Listener)>,
}

impl GestureTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(
        &mut self,
        kind: GestureKind,
        listener: impl FnMut(&Gesture, &mut DispatchControl) + 'static,
    ) {
        self.listeners.push((kind, Box::new(listener)));
    }

    /// Invoke every listener registered for the gesture's kind. Cancellation
    /// does not stop later listeners; it only flips the return value, which
    /// is `true` when the host should still run its default action.
    pub fn dispatch(&mut self, gesture: &Gesture) -> bool {
        let mut control = DispatchControl::default();
        let kind = gesture.kind();
        for (registered, listener) in &mut self.listeners {
            if *registered == kind {
                listener(gesture, &mut control);
            }
        }
        !control.canceled
    }

    /// Dispatch everything a detector call produced. Returns the number of
    /// gestures delivered.
    pub fn dispatch_output(&mut self, output: &GestureOutput) -> usize {
        let mut delivered = 0;
        for gesture in output.iter() {
            self.dispatch(gesture);
            delivered += 1;
        }
        delivered
    }
}
