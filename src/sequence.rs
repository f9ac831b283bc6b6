//! Animation sequences.
//!
//! A [`Sequence`] pairs one of the built-in animation policies
//! ([`SequenceKind`]) with an optional one-shot completion callback. The
//! runner calls [`Sequence::step`] once per frame, lending it the flower and
//! the random source for the duration of that call.

use crate::colors;
use crate::config::FlowerConfig;
use crate::flower::{Flower, FlowerHardware};
use crate::random::RandomSource;
use crate::types::{
    CONFIG_MODE_OPENING, DEFAULT_HUE_STEP_DEGREES, DEFAULT_IDLE_INCREMENT, FlowerError, StepError,
};
use palette::Srgb;

/// Idle sequences turn back upward at or below this opening.
pub const IDLE_LOWER_TURN: f32 = 0.5;

/// Idle sequences turn back downward at or above this opening.
pub const IDLE_UPPER_TURN: f32 = 0.75;

/// Draws above this value reverse the idle direction spontaneously.
pub const IDLE_REVERSAL_THRESHOLD: u8 = 85;

/// Ambient wandering: the opening drifts between half and three quarters
/// open, occasionally changing direction at random.
///
/// Never finishes. Always interruptible.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleSequence {
    increment: f32,
}

impl IdleSequence {
    /// Creates an idle sequence opening by the default increment.
    pub fn new() -> Self {
        Self::with_increment(DEFAULT_IDLE_INCREMENT)
    }

    /// Creates an idle sequence with an explicit signed starting increment.
    pub fn with_increment(increment: f32) -> Self {
        Self { increment }
    }

    /// Creates an idle sequence using the configured increment.
    pub fn from_config(config: &FlowerConfig) -> Self {
        Self::with_increment(config.idle_increment)
    }

    /// Current signed opening change per frame.
    pub fn increment(&self) -> f32 {
        self.increment
    }

    fn step<H: FlowerHardware, R: RandomSource>(
        &mut self,
        flower: &mut Flower<H>,
        rng: &mut R,
    ) -> Result<(), FlowerError> {
        let draw = rng.draw_percent();

        if flower.is_in_config_mode() {
            log::trace!("idle: configuration mode active");
            return flower.set_opening(CONFIG_MODE_OPENING);
        }

        let opening = flower.opening();
        if (opening <= IDLE_LOWER_TURN && self.increment < 0.0)
            || (opening >= IDLE_UPPER_TURN && self.increment > 0.0)
            || draw > IDLE_REVERSAL_THRESHOLD
        {
            self.increment = -self.increment;
        }

        flower.set_opening(opening + self.increment)
    }
}

impl Default for IdleSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds a fixed opening while rotating the LED hue.
///
/// Never finishes. Always interruptible.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RainbowSequence {
    opening: f32,
    hue_step_millidegrees: u32,
}

impl RainbowSequence {
    /// Creates a rainbow holding `opening`.
    pub fn new(opening: f32) -> Self {
        Self {
            opening,
            hue_step_millidegrees: colors::degrees_to_millidegrees(DEFAULT_HUE_STEP_DEGREES),
        }
    }

    /// Creates a rainbow holding `opening` with the configured hue step.
    pub fn from_config(opening: f32, config: &FlowerConfig) -> Self {
        Self::new(opening).with_hue_step_degrees(config.hue_step_degrees)
    }

    /// Sets the hue advance per frame. Negative steps become zero.
    pub fn with_hue_step_degrees(mut self, degrees: f32) -> Self {
        self.hue_step_millidegrees = colors::degrees_to_millidegrees(degrees);
        self
    }

    /// Target opening.
    pub fn opening(&self) -> f32 {
        self.opening
    }

    /// Hue in degrees shown on `frame`.
    pub fn hue_at(&self, frame: u32) -> f32 {
        colors::rainbow_hue(frame, self.hue_step_millidegrees)
    }

    fn step<H: FlowerHardware>(
        &mut self,
        frame: u32,
        flower: &mut Flower<H>,
    ) -> Result<(), FlowerError> {
        let opening = if flower.is_in_config_mode() {
            log::trace!("rainbow: configuration mode active");
            CONFIG_MODE_OPENING
        } else {
            self.opening
        };

        let opened = flower.set_opening(opening);
        let colored = flower.set_color(colors::hue(self.hue_at(frame)));
        opened.and(colored)
    }
}

/// Glides from the current opening to a target over a fixed number of
/// frames, showing a fixed color, then finishes.
///
/// Not interruptible unless built with [`interruptible`](Self::interruptible).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSequence {
    target: f32,
    color: Srgb,
    frames: u32,
    interruptible: bool,
    origin: Option<f32>,
}

impl TransitionSequence {
    /// Creates a transition reaching `target` on the `frames`-th step.
    ///
    /// Zero frames behaves like one: the target is applied on the first step.
    pub fn new(target: f32, color: Srgb, frames: u32) -> Self {
        Self {
            target,
            color,
            frames: frames.max(1),
            interruptible: false,
            origin: None,
        }
    }

    /// Allows other sequences to replace this one before it finishes.
    pub fn interruptible(mut self, interruptible: bool) -> Self {
        self.interruptible = interruptible;
        self
    }

    /// Target opening.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Number of steps until completion.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Returns true if the step for `frame` is the last one.
    pub fn finishes_on(&self, frame: u32) -> bool {
        frame.saturating_add(1) >= self.frames
    }

    fn step<H: FlowerHardware>(
        &mut self,
        frame: u32,
        flower: &mut Flower<H>,
    ) -> Result<(), FlowerError> {
        let origin = *self.origin.get_or_insert(flower.opening());
        let done = self.finishes_on(frame);

        let opening = if flower.is_in_config_mode() {
            log::trace!("transition: configuration mode active");
            CONFIG_MODE_OPENING
        } else if done {
            self.target
        } else {
            let progress = (frame + 1) as f32 / self.frames as f32;
            origin + (self.target - origin) * progress
        };

        let opened = flower.set_opening(opening);
        let colored = flower.set_color(self.color);
        opened.and(colored)
    }
}

/// The built-in animation policies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequenceKind {
    /// Random walk of the opening.
    Idle(IdleSequence),

    /// Fixed opening with rotating hue.
    Rainbow(RainbowSequence),

    /// Finite glide to a target opening.
    Transition(TransitionSequence),
}

impl SequenceKind {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            SequenceKind::Idle(_) => "idle",
            SequenceKind::Rainbow(_) => "rainbow",
            SequenceKind::Transition(_) => "transition",
        }
    }

    /// Whether the step for `frame` completes the animation.
    pub fn finishes_on(&self, frame: u32) -> bool {
        match self {
            SequenceKind::Idle(_) | SequenceKind::Rainbow(_) => false,
            SequenceKind::Transition(transition) => transition.finishes_on(frame),
        }
    }

    /// Whether a running sequence of this kind may be replaced.
    pub fn is_interruptible(&self) -> bool {
        match self {
            SequenceKind::Idle(_) | SequenceKind::Rainbow(_) => true,
            SequenceKind::Transition(transition) => transition.interruptible,
        }
    }
}

impl From<IdleSequence> for SequenceKind {
    fn from(sequence: IdleSequence) -> Self {
        SequenceKind::Idle(sequence)
    }
}

impl From<RainbowSequence> for SequenceKind {
    fn from(sequence: RainbowSequence) -> Self {
        SequenceKind::Rainbow(sequence)
    }
}

impl From<TransitionSequence> for SequenceKind {
    fn from(sequence: TransitionSequence) -> Self {
        SequenceKind::Transition(sequence)
    }
}

/// One animation plus the callback to run when it finishes on its own.
///
/// The callback fires at most once, and never when the sequence is
/// interrupted or cleared.
///
/// # Type Parameters
/// * `C` - Completion callback type. Use `fn()` without an allocator, or any
///   closure type (e.g. `Box<dyn FnOnce()>`) with one.
pub struct Sequence<C = fn()> {
    kind: SequenceKind,
    on_complete: Option<C>,
}

impl<C> Sequence<C> {
    /// Creates a sequence without a completion callback.
    pub fn new(kind: impl Into<SequenceKind>) -> Self {
        Self {
            kind: kind.into(),
            on_complete: None,
        }
    }

    /// Creates an idle sequence with the default increment.
    pub fn idle() -> Self {
        Self::new(IdleSequence::new())
    }

    /// Creates a rainbow sequence holding `opening`.
    pub fn rainbow(opening: f32) -> Self {
        Self::new(RainbowSequence::new(opening))
    }

    /// Creates a non-interruptible transition.
    pub fn transition(target: f32, color: Srgb, frames: u32) -> Self {
        Self::new(TransitionSequence::new(target, color, frames))
    }

    /// Sets the completion callback.
    pub fn on_complete(mut self, callback: C) -> Self {
        self.on_complete = Some(callback);
        self
    }

    /// Returns the animation policy.
    pub fn kind(&self) -> &SequenceKind {
        &self.kind
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Whether this sequence may be replaced while running.
    pub fn is_interruptible(&self) -> bool {
        self.kind.is_interruptible()
    }

    /// Returns true while the completion callback has not been taken.
    pub fn has_completion(&self) -> bool {
        self.on_complete.is_some()
    }

    /// Advances the animation by one frame.
    ///
    /// `frame` is the absolute index since the sequence started and is
    /// expected to increase by one per call.
    ///
    /// # Returns
    /// * `Ok(true)` - The sequence has finished and should be retired
    /// * `Ok(false)` - The sequence keeps running
    /// * `Err` - A hardware write failed. The flower state was still updated
    ///   and [`StepError::finished`] tells whether the sequence is done anyway
    pub fn step<H: FlowerHardware, R: RandomSource>(
        &mut self,
        frame: u32,
        flower: &mut Flower<H>,
        rng: &mut R,
    ) -> Result<bool, StepError> {
        let finished = self.kind.finishes_on(frame);
        let written = match &mut self.kind {
            SequenceKind::Idle(idle) => idle.step(flower, rng),
            SequenceKind::Rainbow(rainbow) => rainbow.step(frame, flower),
            SequenceKind::Transition(transition) => transition.step(frame, flower),
        };
        written
            .map(|()| finished)
            .map_err(|error| StepError { error, finished })
    }

    /// Takes the completion callback, leaving none behind.
    pub(crate) fn take_completion(&mut self) -> Option<C> {
        self.on_complete.take()
    }
}

impl<C> core::fmt::Debug for Sequence<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sequence")
            .field("kind", &self.kind)
            .field("has_completion", &self.has_completion())
            .finish()
    }
}
