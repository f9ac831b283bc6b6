//! Random draws for sequences that wander.
//!
//! Sequences never reach for a global generator. The runner owns a
//! [`RandomSource`] and lends it to the active sequence on every step, so
//! tests and demos can swap in a scripted source.

use heapless::Vec;
use rand::{Rng, RngCore};

/// Source of uniform draws in `1..=100`.
pub trait RandomSource {
    /// Returns the next draw in `1..=100`.
    fn draw_percent(&mut self) -> u8;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn draw_percent(&mut self) -> u8 {
        (**self).draw_percent()
    }
}

/// Adapts any [`rand::RngCore`] generator into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    /// Wraps a generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the wrapped generator.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn draw_percent(&mut self) -> u8 {
        self.rng.gen_range(1..=100)
    }
}

/// Replays a fixed list of draws, starting over at the end.
///
/// Values outside `1..=100` are clamped into range. An empty script always
/// draws 1.
///
/// # Type Parameters
/// * `N` - Maximum number of draws in the script
#[derive(Debug, Clone)]
pub struct ScriptedSource<const N: usize> {
    draws: Vec<u8, N>,
    position: usize,
}

impl<const N: usize> ScriptedSource<N> {
    /// Creates a source replaying `draws`.
    ///
    /// # Panics
    /// Panics if `draws` holds more than `N` values.
    pub fn new(draws: &[u8]) -> Self {
        let mut script = Vec::new();
        for &draw in draws {
            if script.push(draw.clamp(1, 100)).is_err() {
                panic!("scripted source capacity exceeded");
            }
        }
        Self {
            draws: script,
            position: 0,
        }
    }

    /// Creates a source that always draws `value`.
    pub fn constant(value: u8) -> Self {
        Self::new(&[value])
    }

    /// Number of draws handed out so far.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<const N: usize> RandomSource for ScriptedSource<N> {
    fn draw_percent(&mut self) -> u8 {
        if self.draws.is_empty() {
            return 1;
        }
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn scripted_source_cycles_through_draws() {
        let mut source = ScriptedSource::<4>::new(&[10, 90, 50]);
        assert_eq!(source.draw_percent(), 10);
        assert_eq!(source.draw_percent(), 90);
        assert_eq!(source.draw_percent(), 50);
        assert_eq!(source.draw_percent(), 10);
        assert_eq!(source.position(), 4);
    }

    #[test]
    fn scripted_source_clamps_out_of_range_draws() {
        let mut source = ScriptedSource::<2>::new(&[0, 250]);
        assert_eq!(source.draw_percent(), 1);
        assert_eq!(source.draw_percent(), 100);
    }

    #[test]
    fn empty_script_draws_one() {
        let mut source = ScriptedSource::<1>::new(&[]);
        assert_eq!(source.draw_percent(), 1);
    }

    #[test]
    #[should_panic(expected = "scripted source capacity exceeded")]
    fn scripted_source_rejects_overlong_script() {
        let _ = ScriptedSource::<2>::new(&[1, 2, 3]);
    }

    #[test]
    fn rng_source_stays_in_range() {
        let mut source = RngSource::new(rand::rngs::SmallRng::seed_from_u64(7));
        for _ in 0..1000 {
            let draw = source.draw_percent();
            assert!((1..=100).contains(&draw));
        }
    }
}
