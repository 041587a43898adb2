//! Turn-based combat between the character and a roster of enemies.
//!
//! Resolution pipeline for one action:
//! 1. The caller picks a [`PlayerAction`] and a target, or a [`Reaction`]
//!    for the enemy's turn.
//! 2. [`CombatEngine`] rolls the dice, updates hit points, mana and
//!    reaction pools, and prunes defeated enemies from the roster.
//! 3. The resulting [`Outcome`] and its rendered message are stored on the
//!    [`CombatState`] for the presentation layer.
//! 4. The caller advances with [`CombatEngine::next_turn`].

mod action;
mod engine;
mod outcome;
mod state;
mod turn;

pub use action::{PlayerAction, Reaction, WEAPON_ACTION_INDEX};
pub use engine::CombatEngine;
pub use outcome::{
    AttackResult, EnemyAttackReport, Outcome, OutcomeMessage, PlayerAttackReport, Segment,
};
pub use state::{CombatState, CombatStatus};
pub use turn::{roll_turn_order, Initiative, Participant};

use thiserror::Error;

/// Precondition violations reported by the combat engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("No combat in progress")]
    NotStarted,

    #[error("Invalid action index {index} ({known} spells known)")]
    InvalidAction { index: i64, known: usize },

    #[error("Invalid target index {index} ({active} enemies standing)")]
    InvalidTarget { index: usize, active: usize },

    #[error("No reactions remaining")]
    NoReactionsRemaining,

    #[error("Not enough mana: spell costs {cost}, {available} available")]
    InsufficientMana { cost: u32, available: i32 },
}
