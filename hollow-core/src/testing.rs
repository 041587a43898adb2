//! Testing utilities for combat scenarios.
//!
//! - [`ScriptedDice`] replays fixed rolls and draws for deterministic tests
//! - [`sample_character`] and [`sample_spell`] give ready-made fixtures

use crate::character::{Attributes, Character};
use crate::dice::DiceSource;
use crate::spell::{AreaShape, DamageType, Spell, SpellArgs, SpellError};
use std::collections::VecDeque;

/// Dice that return scripted values.
///
/// Queued rolls and draws are consumed in order. Once a queue is empty the
/// fallback value is returned forever. Rolls are clamped into the die's
/// range so a script written for d6 stays valid on any die.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    draws: VecDeque<f64>,
    fallback_roll: u32,
    fallback_draw: f64,
    rolls_made: usize,
    draws_made: usize,
}

impl ScriptedDice {
    /// Empty script: every roll is 1 and every draw is 0.5.
    pub fn new() -> Self {
        Self {
            rolls: VecDeque::new(),
            draws: VecDeque::new(),
            fallback_roll: 1,
            fallback_draw: 0.5,
            rolls_made: 0,
            draws_made: 0,
        }
    }

    /// Every roll comes up `value`.
    pub fn always(value: u32) -> Self {
        Self::new().with_fallback_roll(value)
    }

    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn with_draws(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.draws.extend(draws);
        self
    }

    pub fn with_fallback_roll(mut self, value: u32) -> Self {
        self.fallback_roll = value;
        self
    }

    /// Queue more rolls after construction.
    pub fn push_rolls(&mut self, rolls: impl IntoIterator<Item = u32>) {
        self.rolls.extend(rolls);
    }

    pub fn rolls_made(&self) -> usize {
        self.rolls_made
    }

    pub fn draws_made(&self) -> usize {
        self.draws_made
    }
}

impl Default for ScriptedDice {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rolls_made += 1;
        let value = self.rolls.pop_front().unwrap_or(self.fallback_roll);
        value.clamp(1, sides.max(1))
    }

    fn draw(&mut self) -> f64 {
        self.draws_made += 1;
        self.draws.pop_front().unwrap_or(self.fallback_draw)
    }
}

/// The default character (strength 4, agility 2, will 2) with no spells.
pub fn sample_character() -> Character {
    Character::new("Hollow", Attributes::default())
}

/// A 10-damage fire bolt costing 37 mana.
pub fn sample_spell() -> Result<Spell, SpellError> {
    Spell::new(
        SpellArgs::new(AreaShape::Projectile)
            .with_radius_or_depth(1.0)
            .with_range(10.0)
            .with_damage(10)
            .with_damage_type(DamageType::Fire),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_then_fallback() {
        let mut dice = ScriptedDice::always(6).with_rolls([2, 3]);
        assert_eq!(dice.d6(), 2);
        assert_eq!(dice.d6(), 3);
        assert_eq!(dice.d6(), 6);
        assert_eq!(dice.rolls_made(), 3);
    }

    #[test]
    fn test_rolls_clamped_to_die() {
        let mut dice = ScriptedDice::new().with_rolls([9, 0]);
        assert_eq!(dice.roll(6), 6);
        assert_eq!(dice.roll(6), 1);
    }

    #[test]
    fn test_draws() {
        let mut dice = ScriptedDice::new().with_draws([0.1]);
        assert!(dice.chance(0.2));
        assert!(!dice.chance(0.2));
        assert_eq!(dice.draws_made(), 2);
    }
}
