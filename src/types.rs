//! Core types shared by the flower, its sequences and the runner.

/// Opening forced by configuration mode.
pub const CONFIG_MODE_OPENING: f32 = 1.0;

/// Opening change per frame used by the idle sequence.
pub const DEFAULT_IDLE_INCREMENT: f32 = 0.0075;

/// Hue advance per frame used by the rainbow sequence, in degrees.
pub const DEFAULT_HUE_STEP_DEGREES: f32 = 1.5;

/// Nominal interval between ticks (about 30 frames per second).
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 33;

/// A physical output of the flower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Actuator {
    /// Servo driving the petals.
    Servo,

    /// RGB LEDs inside the flower.
    Led,

    /// Single LED signalling that a person is in view.
    DetectionIndicator,
}

impl core::fmt::Display for Actuator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Actuator::Servo => write!(f, "servo"),
            Actuator::Led => write!(f, "led"),
            Actuator::DetectionIndicator => write!(f, "detection indicator"),
        }
    }
}

/// Errors reported by the flower and the sequence runner.
///
/// None of these is fatal: hardware failures leave the in-memory actuator
/// state updated, and rejected sequences leave the runner untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlowerError {
    /// Writing to an actuator failed.
    HardwareWrite(Actuator),

    /// The active sequence cannot be interrupted.
    SequenceRejected,

    /// Releasing the hardware on shutdown failed.
    ResourceTeardown,
}

impl core::fmt::Display for FlowerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FlowerError::HardwareWrite(actuator) => {
                write!(f, "failed to write {} state to hardware", actuator)
            }
            FlowerError::SequenceRejected => {
                write!(f, "active sequence is not interruptible")
            }
            FlowerError::ResourceTeardown => {
                write!(f, "failed to release flower hardware")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FlowerError {}

/// A sequence step whose hardware writes failed.
///
/// The flower state was updated regardless, so the step still counts:
/// `finished` reports whether the sequence completed on this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepError {
    /// The write failure.
    pub error: FlowerError,

    /// Whether the sequence completed despite the failure.
    pub finished: bool,
}

impl core::fmt::Display for StepError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.error, f)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StepError {}

/// Result of a single runner tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// No sequence is active. Nothing was written.
    Idle,

    /// The active sequence advanced one frame and keeps running.
    Running,

    /// The active sequence finished on this tick and its callback ran.
    Finished,
}
