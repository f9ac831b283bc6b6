//! The flower's actuator state and its hardware sink.
//!
//! Provides [`Flower`], the single logical model of the device (servo opening,
//! LED color, configuration mode, detection indicator), and the
//! [`FlowerHardware`] trait through which that model reaches the physical
//! outputs.
//!
//! The in-memory state is the source of truth. A failed hardware write is
//! logged and reported, but the model keeps the new value and the write is
//! retried the next time the value is set.

use crate::colors;
use crate::types::{Actuator, FlowerError};
use palette::Srgb;

/// Trait for abstracting the flower's hardware.
///
/// Implement this for your servo PWM channel, LED driver and indicator GPIO.
/// Every write is best-effort: return an error and the flower will log it and
/// carry on.
pub trait FlowerHardware {
    /// Hardware-specific error type.
    type Error: core::fmt::Debug;

    /// Moves the servo to `opening` (0.0 closed, 1.0 fully open).
    fn write_servo_opening(&mut self, opening: f32) -> Result<(), Self::Error>;

    /// Sets the RGB LEDs. Components are in the range 0.0-1.0.
    fn write_led_color(&mut self, color: Srgb) -> Result<(), Self::Error>;

    /// Drives the person-detection indicator LED.
    fn write_detection_indicator(&mut self, present: bool) -> Result<(), Self::Error>;

    /// Releases the underlying peripherals.
    fn release(&mut self) -> Result<(), Self::Error>;
}

/// Color the LEDs start with.
pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);

/// Physical state of the flower.
///
/// Created once at device start and lent by exclusive reference to whichever
/// sequence is active. After [`Flower::destroy`] the state keeps updating but
/// nothing reaches the hardware.
pub struct Flower<H: FlowerHardware> {
    hardware: Option<H>,
    opening: f32,
    color: Srgb,
    config_mode: bool,
    person_detected: bool,
    servo_synced: bool,
    led_synced: bool,
    fault_count: u32,
}

impl<H: FlowerHardware> Flower<H> {
    /// Creates a closed, dark flower and pushes that state to the hardware.
    pub fn new(hardware: H) -> Self {
        let mut flower = Self {
            hardware: Some(hardware),
            opening: 0.0,
            color: COLOR_OFF,
            config_mode: false,
            person_detected: false,
            servo_synced: false,
            led_synced: false,
            fault_count: 0,
        };

        // Failures are logged and counted by `write`, and retried on the next write.
        flower.sync_servo().ok();
        flower.sync_led().ok();
        flower.write_indicator().ok();
        flower
    }

    /// Sets the servo opening, clamped to 0.0-1.0.
    ///
    /// NaN is ignored and leaves the opening unchanged. The servo is only
    /// written when the value changed or the previous write failed.
    ///
    /// # Errors
    /// * `HardwareWrite(Servo)` - The servo write failed; the new opening is kept
    pub fn set_opening(&mut self, opening: f32) -> Result<(), FlowerError> {
        if opening.is_nan() {
            log::warn!("ignoring NaN servo opening");
            return Ok(());
        }

        let opening = opening.clamp(0.0, 1.0);
        if opening != self.opening {
            self.opening = opening;
            self.servo_synced = false;
        }

        if self.servo_synced {
            return Ok(());
        }
        self.sync_servo()
    }

    /// Sets the LED color. Components are clamped to 0.0-1.0.
    ///
    /// # Errors
    /// * `HardwareWrite(Led)` - The LED write failed; the new color is kept
    pub fn set_color(&mut self, color: Srgb) -> Result<(), FlowerError> {
        let color = colors::clamp(color);
        if color != self.color {
            self.color = color;
            self.led_synced = false;
        }

        if self.led_synced {
            return Ok(());
        }
        self.sync_led()
    }

    /// Drives the detection indicator.
    ///
    /// # Errors
    /// * `HardwareWrite(DetectionIndicator)` - The indicator write failed
    pub fn set_person_detected(&mut self, present: bool) -> Result<(), FlowerError> {
        if present != self.person_detected {
            log::info!("person detected: {}", present);
        }
        self.person_detected = present;
        self.write_indicator()
    }

    /// Enters or leaves configuration mode.
    ///
    /// While active, every sequence step forces the flower fully open.
    pub fn set_config_mode(&mut self, active: bool) {
        if active != self.config_mode {
            log::info!("configuration mode {}", if active { "on" } else { "off" });
        }
        self.config_mode = active;
    }

    /// Flips configuration mode and returns the new value.
    pub fn toggle_config_mode(&mut self) -> bool {
        self.set_config_mode(!self.config_mode);
        self.config_mode
    }

    /// Releases the hardware. Safe to call more than once.
    ///
    /// The hardware is dropped even when releasing it fails.
    ///
    /// # Errors
    /// * `ResourceTeardown` - The hardware reported a failure while releasing
    pub fn destroy(&mut self) -> Result<(), FlowerError> {
        let Some(mut hardware) = self.hardware.take() else {
            return Ok(());
        };

        match hardware.release() {
            Ok(()) => {
                log::info!("flower hardware released");
                Ok(())
            }
            Err(err) => {
                log::warn!("flower was unable to release hardware: {:?}", err);
                self.fault_count = self.fault_count.saturating_add(1);
                Err(FlowerError::ResourceTeardown)
            }
        }
    }

    /// Returns the current opening.
    pub fn opening(&self) -> f32 {
        self.opening
    }

    /// Returns the current LED color.
    pub fn color(&self) -> Srgb {
        self.color
    }

    /// Returns true while configuration mode is active.
    pub fn is_in_config_mode(&self) -> bool {
        self.config_mode
    }

    /// Returns the last reported detection state.
    pub fn is_person_detected(&self) -> bool {
        self.person_detected
    }

    /// Returns true once [`destroy`](Self::destroy) has run.
    pub fn is_destroyed(&self) -> bool {
        self.hardware.is_none()
    }

    /// Number of hardware failures seen so far.
    pub fn fault_count(&self) -> u32 {
        self.fault_count
    }

    /// Returns a reference to the hardware, if not yet released.
    pub fn hardware(&self) -> Option<&H> {
        self.hardware.as_ref()
    }

    /// Returns a mutable reference to the hardware, if not yet released.
    pub fn hardware_mut(&mut self) -> Option<&mut H> {
        self.hardware.as_mut()
    }

    fn sync_servo(&mut self) -> Result<(), FlowerError> {
        let opening = self.opening;
        let result = self.write(Actuator::Servo, |hw| hw.write_servo_opening(opening));
        self.servo_synced = result.is_ok();
        result
    }

    fn sync_led(&mut self) -> Result<(), FlowerError> {
        let color = self.color;
        let result = self.write(Actuator::Led, |hw| hw.write_led_color(color));
        self.led_synced = result.is_ok();
        result
    }

    fn write_indicator(&mut self) -> Result<(), FlowerError> {
        let present = self.person_detected;
        self.write(Actuator::DetectionIndicator, |hw| {
            hw.write_detection_indicator(present)
        })
    }

    fn write(
        &mut self,
        actuator: Actuator,
        op: impl FnOnce(&mut H) -> Result<(), H::Error>,
    ) -> Result<(), FlowerError> {
        let Some(hardware) = self.hardware.as_mut() else {
            log::trace!("{} write skipped, hardware released", actuator);
            return Ok(());
        };

        op(hardware).map_err(|err| {
            log::warn!("error updating {}: {:?}", actuator, err);
            self.fault_count = self.fault_count.saturating_add(1);
            FlowerError::HardwareWrite(actuator)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::vec::Vec;

    #[derive(Default)]
    struct RecordingHardware {
        servo: Vec<f32>,
        fail_servo: bool,
        released: u32,
    }

    impl FlowerHardware for RecordingHardware {
        type Error = &'static str;

        fn write_servo_opening(&mut self, opening: f32) -> Result<(), Self::Error> {
            if self.fail_servo {
                return Err("servo offline");
            }
            self.servo.push(opening);
            Ok(())
        }

        fn write_led_color(&mut self, _color: Srgb) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write_detection_indicator(&mut self, _present: bool) -> Result<(), Self::Error> {
            Ok(())
        }

        fn release(&mut self) -> Result<(), Self::Error> {
            self.released += 1;
            Ok(())
        }
    }

    #[test]
    fn unchanged_opening_is_not_rewritten() {
        let mut flower = Flower::new(RecordingHardware::default());
        flower.set_opening(0.4).unwrap();
        flower.set_opening(0.4).unwrap();

        let hw = flower.hardware().unwrap();
        assert_eq!(hw.servo.as_slice(), &[0.0, 0.4]);
    }

    #[test]
    fn failed_write_is_retried_with_same_value() {
        let mut flower = Flower::new(RecordingHardware::default());
        flower.hardware_mut().unwrap().fail_servo = true;

        assert_eq!(
            flower.set_opening(0.7),
            Err(FlowerError::HardwareWrite(Actuator::Servo))
        );
        assert_eq!(flower.opening(), 0.7);

        flower.hardware_mut().unwrap().fail_servo = false;
        flower.set_opening(0.7).unwrap();
        assert_eq!(flower.hardware().unwrap().servo.last(), Some(&0.7));
    }

    #[test]
    fn nan_opening_is_ignored() {
        let mut flower = Flower::new(RecordingHardware::default());
        flower.set_opening(0.25).unwrap();
        flower.set_opening(f32::NAN).unwrap();
        assert_eq!(flower.opening(), 0.25);
    }
}
