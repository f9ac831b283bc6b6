//! Event-based control for the flower.
//!
//! External collaborators (frame clock, person detector, key handler) can
//! forward their input as [`FlowerEvent`]s, e.g. over a channel, instead of
//! calling the controller directly.

use crate::sequence::Sequence;

/// Input delivered to an [`ExpressionFlower`](crate::ExpressionFlower).
#[derive(Debug)]
pub enum FlowerEvent<C = fn()> {
    /// Advance the active sequence by one frame.
    Tick,
    /// Start a sequence, interrupting the active one if allowed.
    Start(Sequence<C>),
    /// The detector reported a person entering or leaving view.
    PersonDetected(bool),
    /// Enter or leave configuration mode.
    SetConfigMode(bool),
    /// Flip configuration mode.
    ToggleConfigMode,
}
