//! Initiative and turn order.

use crate::character::Character;
use crate::dice::DiceSource;
use crate::enemy::{Enemy, EnemyId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A slot in the turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Participant {
    Player,
    Enemy(EnemyId),
}

impl Participant {
    pub fn is_player(&self) -> bool {
        matches!(self, Participant::Player)
    }

    pub fn enemy_id(&self) -> Option<EnemyId> {
        match self {
            Participant::Player => None,
            Participant::Enemy(id) => Some(*id),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::Player => write!(f, "player"),
            Participant::Enemy(id) => write!(f, "{id}"),
        }
    }
}

/// One participant's initiative result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiative {
    pub participant: Participant,
    pub roll: u32,
    pub total: u32,
}

/// Roll initiative for every enemy (in roster order) and then the character,
/// and return the slots sorted by ascending total.
///
/// The sort is stable: ties keep roster order, with the player after any
/// enemy it ties with.
pub fn roll_turn_order<D: DiceSource>(
    dice: &mut D,
    sides: u32,
    enemies: &[Enemy],
    character: &Character,
) -> Vec<Initiative> {
    let mut rolls: Vec<Initiative> = enemies
        .iter()
        .map(|e| (Participant::Enemy(e.id), e.agility()))
        .chain(std::iter::once((Participant::Player, character.agility())))
        .map(|(participant, agility)| {
            let roll = dice.roll(sides);
            let total = roll.saturating_add(u32::from(agility));
            debug!(%participant, roll, total, "Initiative rolled");
            Initiative {
                participant,
                roll,
                total,
            }
        })
        .collect();

    rolls.sort_by_key(|i| i.total);
    rolls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedDice;

    #[test]
    fn test_ascending_order() {
        let fast = Enemy::new("fast").with_agility(5);
        let slow = Enemy::new("slow").with_agility(1);
        let character = Character::default();
        let mut dice = ScriptedDice::new().with_rolls([1, 1, 1]);

        let order = roll_turn_order(&mut dice, 6, &[fast.clone(), slow.clone()], &character);
        let slots: Vec<Participant> = order.iter().map(|i| i.participant).collect();
        assert_eq!(
            slots,
            vec![
                Participant::Enemy(slow.id),
                Participant::Player,
                Participant::Enemy(fast.id)
            ]
        );
        assert_eq!(order[1].total, 3);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let a = Enemy::new("a").with_agility(2);
        let b = Enemy::new("b").with_agility(2);
        let character = Character::default();
        let mut dice = ScriptedDice::always(4);

        let order = roll_turn_order(&mut dice, 6, &[a.clone(), b.clone()], &character);
        let slots: Vec<Participant> = order.iter().map(|i| i.participant).collect();
        assert_eq!(
            slots,
            vec![
                Participant::Enemy(a.id),
                Participant::Enemy(b.id),
                Participant::Player
            ]
        );
    }

    #[test]
    fn test_huge_die_saturates() {
        let enemy = Enemy::new("a").with_agility(3);
        let character = Character::default();
        let mut dice = ScriptedDice::always(u32::MAX);

        let order = roll_turn_order(&mut dice, u32::MAX, &[enemy], &character);
        assert!(order.iter().all(|i| i.total == u32::MAX));
        assert_eq!(order[1].participant, Participant::Player);
    }

    #[test]
    fn test_player_display() {
        assert_eq!(Participant::Player.to_string(), "player");
    }
}
