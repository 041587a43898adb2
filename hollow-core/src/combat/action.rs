//! Choices a player can feed into the engine.

use super::CombatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Index the UI uses for the basic weapon strike.
pub const WEAPON_ACTION_INDEX: i64 = -1;

/// What the player attacks with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Basic weapon strike. Restores mana instead of spending it.
    Weapon,
    /// Cast the known spell at this index.
    Spell(usize),
}

impl PlayerAction {
    /// Decode the UI's action index: `-1` is the weapon, `0..known` a spell
    /// slot.
    pub fn from_index(index: i64, known: usize) -> Result<Self, CombatError> {
        if index == WEAPON_ACTION_INDEX {
            return Ok(PlayerAction::Weapon);
        }
        usize::try_from(index)
            .ok()
            .filter(|slot| *slot < known)
            .map(PlayerAction::Spell)
            .ok_or(CombatError::InvalidAction { index, known })
    }

    pub fn index(&self) -> i64 {
        match self {
            PlayerAction::Weapon => WEAPON_ACTION_INDEX,
            PlayerAction::Spell(i) => *i as i64,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, PlayerAction::Weapon)
    }
}

/// Defensive reaction the player may spend against an enemy attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    /// Avoid all damage on an agility check.
    Dodge,
    /// Halve the damage on a strength check.
    Block,
    /// Strike back for half strength on the better physical check.
    Parry,
}

impl Reaction {
    pub const ALL: [Reaction; 3] = [Reaction::Dodge, Reaction::Block, Reaction::Parry];

    pub fn name(&self) -> &'static str {
        match self {
            Reaction::Dodge => "dodge",
            Reaction::Block => "block",
            Reaction::Parry => "parry",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Reaction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dodge" => Ok(Reaction::Dodge),
            "block" => Ok(Reaction::Block),
            "parry" => Ok(Reaction::Parry),
            other => Err(format!("Unknown reaction: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(PlayerAction::from_index(-1, 0).unwrap(), PlayerAction::Weapon);
        assert_eq!(PlayerAction::from_index(2, 3).unwrap(), PlayerAction::Spell(2));
        assert_eq!(
            PlayerAction::from_index(-2, 3),
            Err(CombatError::InvalidAction { index: -2, known: 3 })
        );
        assert_eq!(
            PlayerAction::from_index(3, 3),
            Err(CombatError::InvalidAction { index: 3, known: 3 })
        );
        assert_eq!(PlayerAction::Spell(3).index(), 3);
        assert_eq!(PlayerAction::Weapon.index(), -1);
    }

    #[test]
    fn test_reaction_parse() {
        assert_eq!("Dodge".parse::<Reaction>().unwrap(), Reaction::Dodge);
        assert_eq!(" parry ".parse::<Reaction>().unwrap(), Reaction::Parry);
        assert!("duck".parse::<Reaction>().is_err());
    }
}
