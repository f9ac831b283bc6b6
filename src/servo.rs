//! Servo calibration for converting an opening fraction to a PWM pulse.
//!
//! The core only deals in opening fractions. [`FlowerHardware`] implementors
//! use [`ServoCalibration`] to turn them into pulse widths or duty values for
//! their PWM peripheral.
//!
//! [`FlowerHardware`]: crate::flower::FlowerHardware

/// Standard hobby servo PWM period (50 Hz).
pub const DEFAULT_PERIOD_US: u32 = 20_000;

/// Pulse width for a fully closed flower.
pub const DEFAULT_CLOSED_PULSE_US: u32 = 1_000;

/// Pulse width for a fully open flower.
pub const DEFAULT_OPEN_PULSE_US: u32 = 2_000;

/// Pulse widths at both ends of the petal travel.
///
/// `open_pulse_us` may be smaller than `closed_pulse_us` when the servo is
/// mounted reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoCalibration {
    /// Pulse width at opening 0.0.
    pub closed_pulse_us: u32,

    /// Pulse width at opening 1.0.
    pub open_pulse_us: u32,

    /// PWM period.
    pub period_us: u32,
}

impl ServoCalibration {
    /// Creates a calibration with the default 50 Hz period.
    pub const fn new(closed_pulse_us: u32, open_pulse_us: u32) -> Self {
        Self {
            closed_pulse_us,
            open_pulse_us,
            period_us: DEFAULT_PERIOD_US,
        }
    }

    /// Overrides the PWM period.
    pub const fn with_period_us(mut self, period_us: u32) -> Self {
        self.period_us = period_us;
        self
    }

    /// Pulse width for `opening`, clamped to the calibrated range.
    pub fn pulse_width_us(&self, opening: f32) -> u32 {
        let opening = if opening.is_nan() { 0.0 } else { opening.clamp(0.0, 1.0) };
        let closed = self.closed_pulse_us as f32;
        let open = self.open_pulse_us as f32;
        (closed + (open - closed) * opening + 0.5) as u32
    }

    /// Duty value for `opening` given the peripheral's maximum duty.
    pub fn duty(&self, opening: f32, max_duty: u32) -> u32 {
        if self.period_us == 0 {
            return 0;
        }
        let pulse = self.pulse_width_us(opening) as u64;
        ((pulse * max_duty as u64) / self.period_us as u64) as u32
    }
}

impl Default for ServoCalibration {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSED_PULSE_US, DEFAULT_OPEN_PULSE_US)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_width_spans_calibrated_range() {
        let servo = ServoCalibration::default();
        assert_eq!(servo.pulse_width_us(0.0), 1_000);
        assert_eq!(servo.pulse_width_us(0.5), 1_500);
        assert_eq!(servo.pulse_width_us(1.0), 2_000);
    }

    #[test]
    fn pulse_width_clamps_out_of_range_openings() {
        let servo = ServoCalibration::default();
        assert_eq!(servo.pulse_width_us(-3.0), 1_000);
        assert_eq!(servo.pulse_width_us(7.0), 2_000);
        assert_eq!(servo.pulse_width_us(f32::NAN), 1_000);
    }

    #[test]
    fn reversed_servo_maps_open_to_shorter_pulse() {
        let servo = ServoCalibration::new(2_000, 1_000);
        assert_eq!(servo.pulse_width_us(1.0), 1_000);
        assert_eq!(servo.pulse_width_us(0.25), 1_750);
    }

    #[test]
    fn duty_scales_with_period() {
        let servo = ServoCalibration::default();
        // 1.5ms of 20ms at 14-bit resolution
        assert_eq!(servo.duty(0.5, 16_384), 1_228);
        assert_eq!(servo.with_period_us(0).duty(0.5, 16_384), 0);
    }
}
