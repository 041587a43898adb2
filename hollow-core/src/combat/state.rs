//! The combat aggregate.

use super::outcome::Outcome;
use super::turn::Participant;
use crate::character::Character;
use crate::enemy::{Enemy, EnemyId};
use serde::{Deserialize, Serialize};

/// Where an encounter stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatStatus {
    /// No encounter has been started.
    Idle,
    Ongoing,
    /// Every enemy has been removed from the roster.
    Victory,
    /// The character has no hit points left.
    Defeat,
}

/// State of one combat encounter.
///
/// Only [`CombatEngine`](super::CombatEngine) mutates it; everyone else
/// gets read-only accessors.
#[derive(Debug, Clone, Serialize)]
pub struct CombatState {
    pub(crate) character: Character,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) started: bool,
    pub(crate) turn_number: u32,
    pub(crate) turn_order: Vec<Participant>,
    pub(crate) turn_priority_index: usize,
    pub(crate) last_outcome: Option<Outcome>,
    pub(crate) last_outcome_message: String,
}

impl CombatState {
    pub(crate) fn new(character: Character) -> Self {
        Self {
            character,
            enemies: Vec::new(),
            started: false,
            turn_number: 1,
            turn_order: vec![Participant::Player],
            turn_priority_index: 0,
            last_outcome: None,
            last_outcome_message: String::new(),
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Enemies still standing, in roster order.
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Turn slots fixed at combat start. Defeated enemies keep their slot.
    pub fn turn_order(&self) -> &[Participant] {
        &self.turn_order
    }

    pub fn turn_priority_index(&self) -> usize {
        self.turn_priority_index
    }

    pub fn current_participant(&self) -> Participant {
        self.turn_order
            .get(self.turn_priority_index)
            .copied()
            .unwrap_or(Participant::Player)
    }

    pub fn is_player_turn(&self) -> bool {
        self.current_participant().is_player()
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// HTML rendering of the last outcome, empty before the first action.
    pub fn last_outcome_message(&self) -> &str {
        &self.last_outcome_message
    }

    pub fn status(&self) -> CombatStatus {
        if !self.started {
            CombatStatus::Idle
        } else if !self.character.is_alive() {
            CombatStatus::Defeat
        } else if self.enemies.is_empty() {
            CombatStatus::Victory
        } else {
            CombatStatus::Ongoing
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status(), CombatStatus::Victory | CombatStatus::Defeat)
    }

    /// Indices of known spells the character can currently pay for.
    pub fn affordable_spells(&self) -> Vec<usize> {
        self.character
            .spells()
            .iter()
            .enumerate()
            .filter(|(_, spell)| self.character.can_afford(spell))
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether a reaction may be chosen against the next enemy attack.
    pub fn can_react(&self) -> bool {
        self.character.has_reactions()
    }
}
