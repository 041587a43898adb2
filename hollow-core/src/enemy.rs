//! Opposing combatants.

use crate::dice::DiceSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an enemy within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub Uuid);

impl EnemyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EnemyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An enemy combatant.
///
/// `hp` may dip below zero on the hit that defeats the enemy; the engine
/// removes it from the roster right after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub name: String,
    pub hp: i32,
    pub reactions: u32,
    reaction_chance: f64,
    strength: u8,
    agility: u8,
}

impl Enemy {
    /// A fresh enemy with modest stats. Adjust with the `with_*` methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EnemyId::new(),
            name: name.into(),
            hp: 10,
            reactions: 1,
            reaction_chance: 0.5,
            strength: 1,
            agility: 1,
        }
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_reactions(mut self, reactions: u32) -> Self {
        self.reactions = reactions;
        self
    }

    /// Probability of reacting to a hit, clamped into `[0, 1]`.
    pub fn with_reaction_chance(mut self, chance: f64) -> Self {
        self.reaction_chance = if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 1.0)
        };
        self
    }

    pub fn with_strength(mut self, strength: u8) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_agility(mut self, agility: u8) -> Self {
        self.agility = agility;
        self
    }

    /// Garrik, the brawler waiting at the tavern.
    pub fn garrik() -> Self {
        Enemy::new("Garrik")
            .with_hp(15)
            .with_reactions(3)
            .with_reaction_chance(0.75)
            .with_strength(3)
            .with_agility(1)
    }

    /// A randomly rolled nameless enemy.
    pub fn random(dice: &mut impl DiceSource) -> Self {
        let hp = dice.between(3, 13);
        let reactions = dice.between(1, 3);
        let reaction_chance = 0.3 + dice.draw() * 0.7;
        let strength = dice.between(1, 5);
        let agility = dice.between(1, 5);

        Enemy::new("Enemy")
            .with_hp(hp as i32)
            .with_reactions(reactions)
            .with_reaction_chance(reaction_chance)
            .with_strength(strength as u8)
            .with_agility(agility as u8)
    }

    pub fn reaction_chance(&self) -> f64 {
        self.reaction_chance
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }

    pub fn agility(&self) -> u8 {
        self.agility
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Rough threat rating shown next to the enemy.
    pub fn power(&self) -> i64 {
        i64::from(self.hp)
            + i64::from(self.reactions)
            + i64::from(self.strength)
            + i64::from(self.agility)
    }
}
