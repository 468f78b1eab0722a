//! Random source for loot rolls and title generation.
//!
//! Every engine operation that needs randomness takes a `&mut impl Dice`.
//! Any `rand::Rng` is a `Dice`, so the host passes `thread_rng()` and tests
//! pass a seeded `ChaCha8Rng` or a [`ScriptedDice`] with exact roll values.

use rand::Rng;
use std::collections::VecDeque;

/// Roll value that misses every tier, even at the highest flow multiplier.
pub const MISS_ROLL: f64 = 0.999_999;

pub trait Dice {
    /// Uniform value in `[0, 1)`.
    fn roll(&mut self) -> f64;

    /// Uniform integer in `[min, max]`. Returns `min` when `max <= min`.
    fn between(&mut self, min: u32, max: u32) -> u32;

    /// Uniform index in `[0, len)`. Returns 0 for empty or single-element ranges.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng> Dice for R {
    fn roll(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn between(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.gen_range(min..=max)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.gen_range(0..len)
    }
}

/// Replays a fixed sequence of rolls, then repeats `fallback` forever.
///
/// `between` and `pick` consume one roll each and scale it the same way
/// `floor(roll * span)` would, so a script can force specific damage values
/// and word choices.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: MISS_ROLL,
        }
    }

    /// Dice that never produce a loot hit.
    pub fn always_miss() -> Self {
        Self::new([])
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback.clamp(0.0, MISS_ROLL);
        self
    }

    /// Scripted rolls not consumed yet.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Default for ScriptedDice {
    fn default() -> Self {
        Self::always_miss()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }

    fn between(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = max - min;
        let offset = (self.roll() * (span as f64 + 1.0)) as u32;
        min + offset.min(span)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        ((self.roll() * len as f64) as usize).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_scripted_rolls_then_fallback() {
        let mut dice = ScriptedDice::new([0.25, 0.5]);
        assert_eq!(dice.roll(), 0.25);
        assert_eq!(dice.roll(), 0.5);
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.roll(), MISS_ROLL);
    }

    #[test]
    fn test_scripted_between_covers_inclusive_range() {
        let mut dice = ScriptedDice::new([0.0, 0.34, 0.67, MISS_ROLL]);
        assert_eq!(dice.between(3, 5), 3);
        assert_eq!(dice.between(3, 5), 4);
        assert_eq!(dice.between(3, 5), 5);
        assert_eq!(dice.between(3, 5), 5);
    }

    #[test]
    fn test_scripted_between_degenerate_range_consumes_nothing() {
        let mut dice = ScriptedDice::new([0.5]);
        assert_eq!(dice.between(7, 7), 7);
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn test_scripted_pick_stays_in_bounds() {
        let mut dice = ScriptedDice::new([0.0, MISS_ROLL]);
        assert_eq!(dice.pick(10), 0);
        assert_eq!(dice.pick(10), 9);
        assert_eq!(dice.pick(0), 0);
    }

    #[test]
    fn test_fallback_is_clamped_below_one() {
        let mut dice = ScriptedDice::always_miss().with_fallback(3.0);
        assert!(dice.roll() < 1.0);
    }

    #[test]
    fn test_rng_dice_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let r = rng.roll();
            assert!((0.0..1.0).contains(&r));
            let d = rng.between(21, 50);
            assert!((21..=50).contains(&d));
            assert!(rng.pick(4) < 4);
        }
        assert_eq!(rng.between(9, 2), 9);
    }
}
