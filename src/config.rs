//! Device configuration.

use crate::servo::ServoCalibration;
use crate::types::{DEFAULT_FRAME_INTERVAL_MS, DEFAULT_HUE_STEP_DEGREES, DEFAULT_IDLE_INCREMENT};

/// Tunables for a flower and its built-in sequences.
///
/// Start from [`FlowerConfig::default`] and override individual values with
/// the `with_*` setters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlowerConfig {
    /// Servo pulse range.
    pub servo: ServoCalibration,

    /// Magnitude of the idle sequence's per-frame opening change.
    pub idle_increment: f32,

    /// Hue advance per frame for rainbow sequences, in degrees.
    pub hue_step_degrees: f32,

    /// Interval at which the host should tick the runner.
    pub frame_interval_ms: u32,
}

impl FlowerConfig {
    /// Overrides the servo calibration.
    pub fn with_servo(mut self, servo: ServoCalibration) -> Self {
        self.servo = servo;
        self
    }

    /// Overrides the idle increment. The sign is ignored.
    pub fn with_idle_increment(mut self, increment: f32) -> Self {
        self.idle_increment = increment.abs();
        self
    }

    /// Overrides the rainbow hue step.
    pub fn with_hue_step_degrees(mut self, degrees: f32) -> Self {
        self.hue_step_degrees = degrees;
        self
    }

    /// Overrides the frame interval.
    pub fn with_frame_interval_ms(mut self, interval_ms: u32) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    /// Ticks per second implied by the frame interval.
    pub fn frames_per_second(&self) -> u32 {
        if self.frame_interval_ms == 0 {
            return 0;
        }
        1000 / self.frame_interval_ms
    }
}

impl Default for FlowerConfig {
    fn default() -> Self {
        Self {
            servo: ServoCalibration::default(),
            idle_increment: DEFAULT_IDLE_INCREMENT,
            hue_step_degrees: DEFAULT_HUE_STEP_DEGREES,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}
