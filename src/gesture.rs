//! Emitted gesture event types.

use crate::contact::Sample;
use crate::geometry::Midpoint;

/// Cardinal swipe direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    /// Classify an `atan2(dy, dx)` angle in degrees, screen-space dy.
    ///
    /// Bands: `[-135,-45) → Down`, `[-45,45) → Right`, `[45,135) → Up`,
    /// everything else Left.
    pub fn from_angle(angle_deg: f32) -> Self {
        if (-135.0..-45.0).contains(&angle_deg) {
            SwipeDirection::Down
        } else if (-45.0..45.0).contains(&angle_deg) {
            SwipeDirection::Right
        } else if (45.0..135.0).contains(&angle_deg) {
            SwipeDirection::Up
        } else {
            SwipeDirection::Left
        }
    }
}

/// Displacement of a pan step, in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanDelta {
    pub dx: i32,
    pub dy: i32,
}

/// Full swipe description emitted when a pan lifts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeGesture {
    pub start: Sample,
    pub end: Sample,
    pub dx: i32,
    pub dy: i32,
    pub dt_ms: u64,
    /// Smoothed velocity at release, px/ms.
    pub vx: f32,
    pub vy: f32,
    pub direction: SwipeDirection,
    pub angle_deg: f32,
}

/// Scale/rotate step of a two-finger transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformDelta {
    /// Finger-distance ratio; 1.0 means unchanged.
    pub scale: f32,
    /// Angle change in degrees.
    pub rotate: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformGesture {
    /// Change since the transform began.
    pub absolute: TransformDelta,
    /// Change since the previous emitted step.
    pub relative: TransformDelta,
    pub midpoint: Midpoint,
}

/// A recognized gesture, carried with its payload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Tap { at: Sample },
    DoubleTap { at: Sample },
    Pan { absolute: PanDelta, relative: PanDelta },
    Swipe(SwipeGesture),
    HoldStart { at: Sample },
    HoldMove { at: Sample },
    HoldEnd { at: Sample },
    Transform(TransformGesture),
}

/// Payload-free discriminant, used for listener registration and labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Tap,
    DoubleTap,
    Pan,
    Swipe,
    HoldStart,
    HoldMove,
    HoldEnd,
    Transform,
}

impl Gesture {
    pub fn kind(&self) -> GestureKind {
        match self {
            Gesture::Tap { .. } => GestureKind::Tap,
            Gesture::DoubleTap { .. } => GestureKind::DoubleTap,
            Gesture::Pan { .. } => GestureKind::Pan,
            Gesture::Swipe(_) => GestureKind::Swipe,
            Gesture::HoldStart { .. } => GestureKind::HoldStart,
            Gesture::HoldMove { .. } => GestureKind::HoldMove,
            Gesture::HoldEnd { .. } => GestureKind::HoldEnd,
            Gesture::Transform(_) => GestureKind::Transform,
        }
    }
}

impl GestureKind {
    pub fn label(&self) -> &'static str {
        match self {
            GestureKind::Tap => "tap",
            GestureKind::DoubleTap => "dbltap",
            GestureKind::Pan => "pan",
            GestureKind::Swipe => "swipe",
            GestureKind::HoldStart => "holdstart",
            GestureKind::HoldMove => "holdmove",
            GestureKind::HoldEnd => "holdend",
            GestureKind::Transform => "transform",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_bands_match_the_table() {
        assert_eq!(SwipeDirection::from_angle(0.0), SwipeDirection::Right);
        assert_eq!(SwipeDirection::from_angle(-45.0), SwipeDirection::Right);
        assert_eq!(SwipeDirection::from_angle(44.9), SwipeDirection::Right);
        assert_eq!(SwipeDirection::from_angle(45.0), SwipeDirection::Up);
        assert_eq!(SwipeDirection::from_angle(134.9), SwipeDirection::Up);
        assert_eq!(SwipeDirection::from_angle(135.0), SwipeDirection::Left);
        assert_eq!(SwipeDirection::from_angle(180.0), SwipeDirection::Left);
        assert_eq!(SwipeDirection::from_angle(-180.0), SwipeDirection::Left);
        assert_eq!(SwipeDirection::from_angle(-135.0), SwipeDirection::Down);
        assert_eq!(SwipeDirection::from_angle(-45.1), SwipeDirection::Down);
    }
}
