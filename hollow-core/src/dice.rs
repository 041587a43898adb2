//! Dice rolling for combat resolution.
//!
//! Every random decision the engine makes goes through a [`DiceSource`]:
//! die rolls for attacks, initiative and defenses, and unit-interval draws
//! for probability checks. Production code uses [`RandomDice`] backed by a
//! `rand` RNG; tests replay fixed sequences with
//! [`ScriptedDice`](crate::testing::ScriptedDice).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sides of the die used by every combat check.
pub const D6: u32 = 6;

/// A source of dice rolls and probability draws.
pub trait DiceSource {
    /// Roll a die with `sides` faces, returning a value in `1..=sides`.
    fn roll(&mut self, sides: u32) -> u32;

    /// Draw a uniform value in `[0, 1)`.
    fn draw(&mut self) -> f64;

    /// Roll a six-sided die.
    fn d6(&mut self) -> u32 {
        self.roll(D6)
    }

    /// Return `true` with the given probability.
    ///
    /// Each call consumes exactly one draw, so two calls are two
    /// independent checks.
    fn chance(&mut self, probability: f64) -> bool {
        self.draw() < probability
    }

    /// Uniform integer in `min..=max`. Returns `min` when the range is empty.
    fn between(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        min - 1 + self.roll(max - min + 1)
    }
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll(&mut self, sides: u32) -> u32 {
        (**self).roll(sides)
    }

    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}

/// Dice backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomDice<R: Rng = StdRng> {
    rng: R,
}

impl RandomDice<StdRng> {
    /// Reproducible dice: the same seed always yields the same rolls.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Dice seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomDice<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> DiceSource for RandomDice<R> {
    fn roll(&mut self, sides: u32) -> u32 {
        if sides <= 1 {
            return 1;
        }
        self.rng.gen_range(1..=sides)
    }

    fn draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
