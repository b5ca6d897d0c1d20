//! Pure geometry and velocity helpers shared by the gesture states.

use crate::config::GestureConfig;
use crate::contact::Sample;

/// Euclidean distance between two samples in screen space.
pub fn distance(a: &Sample, b: &Sample) -> f32 {
    let dx = (b.screen_x - a.screen_x) as f32;
    let dy = (b.screen_y - a.screen_y) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// Angle of the segment a→b in degrees, range (-180, 180].
///
/// Screen convention: Y grows downward, 0° points right.
pub fn angle_deg(a: &Sample, b: &Sample) -> f32 {
    let dy = (b.screen_y - a.screen_y) as f32;
    let dx = (b.screen_x - a.screen_x) as f32;
    dy.atan2(dx).to_degrees()
}

/// Midpoint of two contacts, floored per axis, across all coordinate spaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Midpoint {
    pub screen_x: i32,
    pub screen_y: i32,
    pub client_x: i32,
    pub client_y: i32,
    pub page_x: i32,
    pub page_y: i32,
}

pub fn midpoint(a: &Sample, b: &Sample) -> Midpoint {
    // div_euclid keeps the floor semantics for negative client/page coords.
    Midpoint {
        screen_x: (a.screen_x + b.screen_x).div_euclid(2),
        screen_y: (a.screen_y + b.screen_y).div_euclid(2),
        client_x: (a.client_x + b.client_x).div_euclid(2),
        client_y: (a.client_y + b.client_y).div_euclid(2),
        page_x: (a.page_x + b.page_x).div_euclid(2),
        page_y: (a.page_y + b.page_y).div_euclid(2),
    }
}

/// Whether `curr` completes a double tap started by `prev`.
///
/// Axis-wise distance check, strict thresholds on both axes and on time.
pub fn is_double_tap(prev: &Sample, curr: &Sample, config: &GestureConfig) -> bool {
    let dx = (curr.screen_x - prev.screen_x).abs() as f32;
    let dy = (curr.screen_y - prev.screen_y).abs() as f32;
    dx < config.double_tap_distance_px
        && dy < config.double_tap_distance_px
        && curr.time_stamp.saturating_sub(prev.time_stamp) < config.double_tap_time_ms
}

/// Exponentially smoothed velocity estimate in px/ms.
///
/// The first sample of an episode seeds the estimate with the instantaneous
/// velocity; later samples blend as `v = v*s + inst*(1-s)` per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityEstimator {
    pub vx: f32,
    pub vy: f32,
    primed: bool,
}

impl VelocityEstimator {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed one movement segment. Zero-duration segments are skipped so the
    /// estimate never divides by zero.
    pub fn update(&mut self, dx: f32, dy: f32, dt_ms: u64, smoothing: f32) {
        if dt_ms == 0 {
            return;
        }
        let inst_x = dx / dt_ms as f32;
        let inst_y = dy / dt_ms as f32;
        if self.primed {
            self.vx = self.vx * smoothing + inst_x * (1.0 - smoothing);
            self.vy = self.vy * smoothing + inst_y * (1.0 - smoothing);
        } else {
            self.vx = inst_x;
            self.vy = inst_y;
            self.primed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: i32, y: i32, t: u64) -> Sample {
        Sample {
            screen_x: x,
            screen_y: y,
            client_x: x,
            client_y: y,
            page_x: x,
            page_y: y,
            time_stamp: t,
        }
    }

    #[test]
    fn distance_is_euclidean() {
        let a = sample(0, 0, 0);
        let b = sample(3, 4, 0);
        assert_eq!(distance(&a, &b), 5.0);
    }

    #[test]
    fn angle_follows_screen_convention() {
        let origin = sample(0, 0, 0);
        assert_eq!(angle_deg(&origin, &sample(10, 0, 0)), 0.0);
        assert_eq!(angle_deg(&origin, &sample(0, 10, 0)), 90.0);
        assert_eq!(angle_deg(&origin, &sample(0, -10, 0)), -90.0);
        assert_eq!(angle_deg(&origin, &sample(-10, 0, 0)), 180.0);
    }

    #[test]
    fn midpoint_floors_every_axis() {
        let a = sample(0, 0, 0);
        let b = sample(5, 3, 0);
        let mid = midpoint(&a, &b);
        assert_eq!((mid.screen_x, mid.screen_y), (2, 1));

        // Floor, not truncation, for negative coordinates.
        let c = sample(-5, -3, 0);
        let mid = midpoint(&a, &c);
        assert_eq!((mid.screen_x, mid.screen_y), (-3, -2));
    }

    #[test]
    fn double_tap_requires_both_axes_and_time() {
        let config = GestureConfig::default();
        let first = sample(100, 100, 0);
        assert!(is_double_tap(&first, &sample(105, 104, 250), &config));
        assert!(!is_double_tap(&first, &sample(160, 100, 250), &config));
        assert!(!is_double_tap(&first, &sample(100, 160, 250), &config));
        assert!(!is_double_tap(&first, &sample(105, 104, 600), &config));
    }

    #[test]
    fn velocity_seeds_then_blends() {
        let mut v = VelocityEstimator::default();
        v.update(100.0, 0.0, 100, 0.5);
        assert_eq!(v.vx, 1.0);
        assert_eq!(v.vy, 0.0);

        v.update(0.0, 0.0, 100, 0.5);
        assert_eq!(v.vx, 0.5);
    }

    #[test]
    fn velocity_skips_zero_duration_segments() {
        let mut v = VelocityEstimator::default();
        v.update(100.0, 50.0, 0, 0.5);
        assert_eq!(v, VelocityEstimator::default());
    }
}
