//! Sequence runner driving one animation at a time.
//!
//! Provides [`SequenceRunner`], which owns the single active [`Sequence`],
//! advances it once per tick against a borrowed [`Flower`], handles
//! interruption, and fires completion callbacks.
//!
//! `start` and `tick` both take `&mut self`, so two sequences can never step
//! the flower at once. Share a runner across threads only behind one mutex
//! guarding both calls.

use crate::flower::{Flower, FlowerHardware};
use crate::random::RandomSource;
use crate::sequence::Sequence;
use crate::types::{FlowerError, TickOutcome};

/// Builds the sequence to fall back to when nothing else is running.
pub type DefaultSequence<C> = fn() -> Sequence<C>;

/// Runs at most one sequence at a time over a flower.
///
/// The runner owns the frame counter and the random source; the flower is
/// lent to each [`tick`](Self::tick) so it can be shared with detection and
/// UI handling between ticks.
///
/// # Type Parameters
/// * `R` - Random source lent to sequences
/// * `C` - Completion callback type
pub struct SequenceRunner<R: RandomSource, C: FnOnce() = fn()> {
    active: Option<Sequence<C>>,
    frame: u32,
    rng: R,
    default: Option<DefaultSequence<C>>,
}

impl<R: RandomSource, C: FnOnce()> SequenceRunner<R, C> {
    /// Creates an idle runner.
    pub fn new(rng: R) -> Self {
        Self {
            active: None,
            frame: 0,
            rng,
            default: None,
        }
    }

    /// Sets the sequence started whenever another one finishes.
    pub fn set_default(&mut self, default: DefaultSequence<C>) {
        self.default = Some(default);
    }

    /// Removes the default sequence.
    pub fn clear_default(&mut self) {
        self.default = None;
    }

    /// Starts a sequence, replacing the active one if it is interruptible.
    ///
    /// The replaced sequence is dropped without running its completion
    /// callback. The frame counter restarts at zero.
    ///
    /// # Errors
    /// * `SequenceRejected` - The active sequence is not interruptible; the
    ///   runner is unchanged and `sequence` is dropped
    pub fn start(&mut self, sequence: Sequence<C>) -> Result<(), FlowerError> {
        if let Some(active) = &self.active {
            if !active.is_interruptible() {
                log::debug!(
                    "rejected {} sequence: {} is not interruptible",
                    sequence.name(),
                    active.name()
                );
                return Err(FlowerError::SequenceRejected);
            }
            log::debug!("interrupting {} sequence at frame {}", active.name(), self.frame);
        }

        log::info!("starting {} sequence", sequence.name());
        self.active = Some(sequence);
        self.frame = 0;
        Ok(())
    }

    /// Starts the default sequence if the runner is idle.
    ///
    /// Returns true if a sequence was started.
    pub fn start_default(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }
        match self.default {
            Some(default) => self.start(default()).is_ok(),
            None => false,
        }
    }

    /// Advances the active sequence by one frame.
    ///
    /// Hardware failures during the step are logged and never delay
    /// completion. When the sequence finishes, its callback runs before this
    /// call returns and the runner is idle (or running the default sequence)
    /// by the next tick.
    pub fn tick<H: FlowerHardware>(&mut self, flower: &mut Flower<H>) -> TickOutcome {
        let Some(sequence) = self.active.as_mut() else {
            return TickOutcome::Idle;
        };

        let frame = self.frame;
        self.frame = self.frame.saturating_add(1);

        let finished = match sequence.step(frame, flower, &mut self.rng) {
            Ok(finished) => finished,
            Err(err) => {
                log::debug!("{} sequence frame {}: {}", sequence.name(), frame, err);
                err.finished
            }
        };

        if !finished {
            return TickOutcome::Running;
        }

        if let Some(mut sequence) = self.active.take() {
            log::info!("{} sequence finished after {} frames", sequence.name(), self.frame);
            if let Some(callback) = sequence.take_completion() {
                callback();
            }
        }
        self.start_default();
        TickOutcome::Finished
    }

    /// Drops the active sequence without running its callback.
    ///
    /// Returns true if a sequence was active. The default sequence is not
    /// re-armed.
    pub fn clear(&mut self) -> bool {
        match self.active.take() {
            Some(sequence) => {
                log::debug!("cleared {} sequence at frame {}", sequence.name(), self.frame);
                self.frame = 0;
                true
            }
            None => false,
        }
    }

    /// Returns the active sequence, if any.
    pub fn active(&self) -> Option<&Sequence<C>> {
        self.active.as_ref()
    }

    /// Returns true when no sequence is active.
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Frame index the next tick will pass to the active sequence.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Returns the random source.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
