//! Tunable recognition thresholds.

pub const HOLD_INTERVAL_MS: u64 = 1_500;
pub const PAN_THRESHOLD_PX: f32 = 50.0;
pub const DOUBLE_TAP_DISTANCE_PX: f32 = 50.0;
pub const DOUBLE_TAP_TIME_MS: u64 = 500;
pub const VELOCITY_SMOOTHING: f32 = 0.5;
pub const SCALE_THRESHOLD_PX: f32 = 40.0;
pub const ROTATE_THRESHOLD_DEG: f32 = 22.5;

/// Per-detector recognition thresholds.
///
/// The defaults above are the global tuning; construct a detector with
/// [`crate::GestureDetector::with_config`] to override them per instance.
/// The config is immutable for the lifetime of a detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// How long a stationary press must last before it becomes a hold.
    pub hold_interval_ms: u64,
    /// Axis movement from the press origin that turns a press into a pan.
    pub pan_threshold_px: f32,
    /// Maximum axis distance between two taps counted as a double tap.
    pub double_tap_distance_px: f32,
    /// Maximum delay between two taps counted as a double tap.
    pub double_tap_time_ms: u64,
    /// EMA weight kept from the previous velocity estimate, 0.0..=1.0.
    pub velocity_smoothing: f32,
    /// Finger-distance change required to activate the scale dimension.
    pub scale_threshold_px: f32,
    /// Angle change in degrees required to activate the rotate dimension.
    pub rotate_threshold_deg: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            hold_interval_ms: HOLD_INTERVAL_MS,
            pan_threshold_px: PAN_THRESHOLD_PX,
            double_tap_distance_px: DOUBLE_TAP_DISTANCE_PX,
            double_tap_time_ms: DOUBLE_TAP_TIME_MS,
            velocity_smoothing: VELOCITY_SMOOTHING,
            scale_threshold_px: SCALE_THRESHOLD_PX,
            rotate_threshold_deg: ROTATE_THRESHOLD_DEG,
        }
    }
}
