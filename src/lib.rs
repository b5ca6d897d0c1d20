//! Touch gesture recognition.
//!
//! Classifies a raw stream of touch-contact events into semantic gestures:
//! tap, double tap, pan, swipe, hold, and two-finger transform
//! (scale + rotate). The crate is the interaction layer between low-level
//! touch input and UI behavior; it knows nothing about widgets or rendering.
//!
//! ```
//! use gesturekit::{Contact, ContactId, GestureDetector, GestureKind, TouchPhase};
//!
//! let mut detector = GestureDetector::new();
//! detector.start_detecting();
//!
//! let finger = Contact { id: ContactId(1), screen_x: 100, screen_y: 100, ..Contact::default() };
//! detector.handle(TouchPhase::Start, 0, &[finger]);
//! let output = detector.handle(TouchPhase::End, 80, &[finger]);
//!
//! assert_eq!(output.iter().next().map(|g| g.kind()), Some(GestureKind::Tap));
//! ```

pub mod config;
pub mod contact;
pub mod emitter;
mod engine;
pub mod geometry;
pub mod gesture;
mod session;
mod timer;

pub use config::GestureConfig;
pub use contact::{Contact, ContactId, Sample, TouchPhase};
pub use emitter::{DispatchControl, GestureTarget};
pub use engine::{DetectorState, GestureDetector, GestureOutput};
pub use gesture::{
    Gesture, GestureKind, PanDelta, SwipeDirection, SwipeGesture, TransformDelta, TransformGesture,
};
pub use geometry::Midpoint;
