//! Combat engine and spell valuation for the Dusk Hollow text adventure.
//!
//! This crate provides:
//! - Deterministic cost and name generation for player-authored spells
//! - A turn-based combat engine with initiative, attacks, critical hits
//!   and dodge/block/parry reactions
//! - Injectable dice so every battle can be replayed from a seed
//! - A headless battle driver for scripts and tests
//!
//! # Quick Start
//!
//! ```
//! use hollow_core::{CombatEngine, Character, Enemy, PlayerAction, RandomDice};
//!
//! let mut engine = CombatEngine::new(Character::default(), RandomDice::seeded(42));
//! engine.start_combat(vec![Enemy::garrik()]);
//!
//! if engine.state().is_player_turn() {
//!     let outcome = engine.attack(PlayerAction::Weapon, 0).unwrap();
//!     println!("{}", outcome.message());
//! }
//! engine.next_turn();
//! ```

pub mod character;
pub mod combat;
pub mod config;
pub mod dice;
pub mod enemy;
pub mod headless;
pub mod spell;
pub mod testing;

// Primary public API
pub use character::{Attributes, Character};
pub use combat::{
    AttackResult, CombatEngine, CombatError, CombatState, CombatStatus, Outcome, OutcomeMessage,
    Participant, PlayerAction, Reaction,
};
pub use config::{CombatConfig, ConfigError, ManaPolicy};
pub use dice::{DiceSource, RandomDice};
pub use enemy::{Enemy, EnemyId};
pub use headless::{HeadlessBattle, HeadlessConfig, HeadlessError};
pub use spell::{generate_spell_name, AreaShape, DamageType, Effect, Spell, SpellArgs, SpellError};
