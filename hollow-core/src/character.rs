//! The player's combatant.
//!
//! Base attributes are fixed for an encounter; resource maxima are computed
//! from them on every query so they can never drift from the stats.

use crate::spell::Spell;
use serde::{Deserialize, Serialize};

/// Maximum hit points for a strength score.
pub fn hp_formula(strength: u8) -> i32 {
    i32::from(strength) * 2
}

/// Maximum reactions per encounter for an agility score.
pub fn reaction_formula(agility: u8) -> u32 {
    u32::from(agility) / 2
}

/// Maximum mana for a will score.
pub fn mana_formula(will: u8) -> i32 {
    80 + i32::from(will) * 10
}

/// Base attributes.
///
/// Strength drives weapon damage and hit points, agility drives reactions
/// and evasion, will drives spellcasting and the mana pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u8,
    pub agility: u8,
    pub will: u8,
}

impl Attributes {
    pub fn new(strength: u8, agility: u8, will: u8) -> Self {
        Self {
            strength,
            agility,
            will,
        }
    }

    pub fn max_hp(&self) -> i32 {
        hp_formula(self.strength)
    }

    pub fn max_reactions(&self) -> u32 {
        reaction_formula(self.agility)
    }

    pub fn max_mana(&self) -> i32 {
        mana_formula(self.will)
    }

    /// The better of strength and agility.
    pub fn best_physical(&self) -> u8 {
        self.strength.max(self.agility)
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(4, 2, 2)
    }
}

/// The player character with its mutable combat resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    attributes: Attributes,
    spells: Vec<Spell>,
    pub current_hp: i32,
    pub current_mana: i32,
    pub current_reactions: u32,
}

impl Character {
    /// Create a character with every resource at its maximum.
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            spells: Vec::new(),
            current_hp: attributes.max_hp(),
            current_mana: attributes.max_mana(),
            current_reactions: attributes.max_reactions(),
        }
    }

    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.spells.push(spell);
        self
    }

    pub fn with_spells(mut self, spells: impl IntoIterator<Item = Spell>) -> Self {
        self.spells.extend(spells);
        self
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    pub fn strength(&self) -> u8 {
        self.attributes.strength
    }

    pub fn agility(&self) -> u8 {
        self.attributes.agility
    }

    pub fn will(&self) -> u8 {
        self.attributes.will
    }

    pub fn max_hp(&self) -> i32 {
        self.attributes.max_hp()
    }

    pub fn max_mana(&self) -> i32 {
        self.attributes.max_mana()
    }

    pub fn max_reactions(&self) -> u32 {
        self.attributes.max_reactions()
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Whether the character has enough mana for `spell`.
    pub fn can_afford(&self, spell: &Spell) -> bool {
        spell.affordable_with(self.current_mana)
    }

    pub fn has_reactions(&self) -> bool {
        self.current_reactions > 0
    }

    /// Refill the reaction pool for a new encounter.
    pub fn replenish_reactions(&mut self) {
        self.current_reactions = self.max_reactions();
    }

    /// Reduce hit points, never below zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.current_hp = (self.current_hp - amount.max(0)).max(0);
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new("Hollow", Attributes::default())
    }
}
