//! Top-level controller tying the flower to its sequence runner.

use crate::command::FlowerEvent;
use crate::flower::{Flower, FlowerHardware};
use crate::random::RandomSource;
use crate::runner::{DefaultSequence, SequenceRunner};
use crate::sequence::Sequence;
use crate::types::{FlowerError, TickOutcome};

/// Owns the flower and its runner and routes external input to them.
///
/// This is the single entry point for the host: the frame clock calls
/// [`tick`](Self::tick), the detector calls
/// [`on_person_detected`](Self::on_person_detected), the key handler calls
/// [`toggle_config_mode`](Self::toggle_config_mode), and shutdown calls
/// [`shutdown`](Self::shutdown).
///
/// # Type Parameters
/// * `H` - Flower hardware implementation
/// * `R` - Random source for wandering sequences
/// * `C` - Completion callback type
pub struct ExpressionFlower<H: FlowerHardware, R: RandomSource, C: FnOnce() = fn()> {
    flower: Flower<H>,
    runner: SequenceRunner<R, C>,
}

impl<H, R, C> ExpressionFlower<H, R, C>
where
    H: FlowerHardware,
    R: RandomSource,
    C: FnOnce(),
{
    /// Creates a controller with an idle runner.
    pub fn new(hardware: H, rng: R) -> Self {
        Self {
            flower: Flower::new(hardware),
            runner: SequenceRunner::new(rng),
        }
    }

    /// Creates a controller that runs `default` now and after every
    /// sequence that finishes.
    pub fn with_default(hardware: H, rng: R, default: DefaultSequence<C>) -> Self {
        let mut controller = Self::new(hardware, rng);
        controller.runner.set_default(default);
        controller.runner.start_default();
        controller
    }

    /// Handles an event by dispatching to the matching method.
    ///
    /// # Returns
    /// * `Ok(TickOutcome)` - Outcome of a tick, or the runner's current
    ///   status (`Idle` or `Running`) for other events
    /// * `Err` - The sequence was rejected or the indicator write failed
    pub fn handle_event(&mut self, event: FlowerEvent<C>) -> Result<TickOutcome, FlowerError> {
        match event {
            FlowerEvent::Tick => return Ok(self.tick()),
            FlowerEvent::Start(sequence) => self.start(sequence)?,
            FlowerEvent::PersonDetected(present) => self.on_person_detected(present)?,
            FlowerEvent::SetConfigMode(active) => self.set_config_mode(active),
            FlowerEvent::ToggleConfigMode => {
                self.toggle_config_mode();
            }
        }
        Ok(self.status())
    }

    /// Advances the active sequence by one frame.
    pub fn tick(&mut self) -> TickOutcome {
        self.runner.tick(&mut self.flower)
    }

    /// Starts a sequence if the active one allows it.
    ///
    /// # Errors
    /// * `SequenceRejected` - The active sequence is not interruptible
    pub fn start(&mut self, sequence: Sequence<C>) -> Result<(), FlowerError> {
        self.runner.start(sequence)
    }

    /// Forwards a detection result to the indicator LED.
    ///
    /// # Errors
    /// * `HardwareWrite(DetectionIndicator)` - The indicator write failed
    pub fn on_person_detected(&mut self, present: bool) -> Result<(), FlowerError> {
        self.flower.set_person_detected(present)
    }

    /// Enters or leaves configuration mode.
    pub fn set_config_mode(&mut self, active: bool) {
        self.flower.set_config_mode(active);
    }

    /// Flips configuration mode and returns the new value.
    pub fn toggle_config_mode(&mut self) -> bool {
        self.flower.toggle_config_mode()
    }

    /// Stops animating and releases the hardware.
    ///
    /// The active sequence is discarded without its callback. Safe to call
    /// more than once.
    ///
    /// # Errors
    /// * `ResourceTeardown` - Releasing the hardware failed; it is still
    ///   considered released
    pub fn shutdown(&mut self) -> Result<(), FlowerError> {
        self.runner.clear_default();
        self.runner.clear();
        self.flower.destroy()
    }

    /// `Running` while a sequence is active, `Idle` otherwise.
    pub fn status(&self) -> TickOutcome {
        if self.runner.is_idle() {
            TickOutcome::Idle
        } else {
            TickOutcome::Running
        }
    }

    /// Returns the flower.
    pub fn flower(&self) -> &Flower<H> {
        &self.flower
    }

    /// Returns the flower for direct control.
    pub fn flower_mut(&mut self) -> &mut Flower<H> {
        &mut self.flower
    }

    /// Returns the runner.
    pub fn runner(&self) -> &SequenceRunner<R, C> {
        &self.runner
    }

    /// Returns the runner for direct control.
    pub fn runner_mut(&mut self) -> &mut SequenceRunner<R, C> {
        &mut self.runner
    }
}
