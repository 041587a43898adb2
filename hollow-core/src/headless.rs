//! Headless battle interface for programmatic play.
//!
//! This module drives one encounter the way the battle screen does: on the
//! player's turn the player strikes with the weapon or casts an affordable
//! spell, on an enemy's turn the player endures the blow or spends a
//! reaction. Every resolved action is followed by a turn advance.
//!
//! # Example
//!
//! ```
//! use hollow_core::headless::{HeadlessBattle, HeadlessConfig};
//!
//! let config = HeadlessConfig::quick_start().with_seed(7);
//! let mut battle = HeadlessBattle::new(config);
//!
//! while !battle.is_over() {
//!     let command = if battle.is_player_turn() { "sword" } else { "endure" };
//!     let report = battle.send(command).expect("command is always available");
//!     println!("{}", report.message);
//! }
//! ```

use crate::character::{Attributes, Character};
use crate::combat::{
    CombatEngine, CombatError, CombatState, CombatStatus, Outcome, Participant, PlayerAction,
    Reaction,
};
use crate::config::CombatConfig;
use crate::dice::{DiceSource, RandomDice};
use crate::enemy::Enemy;
use crate::spell::Spell;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Errors from headless commands.
#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error("Combat error: {0}")]
    Combat(#[from] CombatError),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Not available now: {0}")]
    Unavailable(String),

    #[error("Combat is over")]
    CombatOver,
}

/// A player choice, one per battle-screen button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Weapon strike against the enemy at this roster index.
    Sword { target: usize },
    /// Cast the known spell at `spell` against the enemy at `target`.
    Cast { spell: usize, target: usize },
    /// Take the enemy's blow without reacting.
    Endure,
    /// Spend a reaction against the enemy's blow.
    React(Reaction),
}

impl FromStr for Command {
    type Err = HeadlessError;

    /// Parse `sword [target]`, `cast <spell> [target]`, `endure`, `dodge`,
    /// `block` or `parry`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let unknown = || HeadlessError::UnknownCommand(s.trim().to_string());
        let index = |i: usize, default: Option<usize>| -> Result<usize, HeadlessError> {
            match parts.get(i) {
                Some(raw) => raw.parse().map_err(|_| unknown()),
                None => default.ok_or_else(unknown),
            }
        };

        let Some(verb) = parts.first() else {
            return Err(unknown());
        };
        match verb.to_lowercase().as_str() {
            "sword" | "attack" => Ok(Command::Sword {
                target: index(1, Some(0))?,
            }),
            "cast" => Ok(Command::Cast {
                spell: index(1, None)?,
                target: index(2, Some(0))?,
            }),
            "endure" | "take" => Ok(Command::Endure),
            other => other.parse::<Reaction>().map(Command::React).map_err(|_| unknown()),
        }
    }
}

/// Result of one headless command.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub outcome: Outcome,
    /// Plain-text outcome message.
    pub message: String,
    pub status: CombatStatus,
    /// Turn on which the command was resolved.
    pub resolved_turn: u32,
    /// Whose turn it is now.
    pub next: Participant,
    pub turn_number: u32,
}

/// Configuration for a headless battle.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub character_name: String,
    pub attributes: Attributes,
    pub spells: Vec<Spell>,
    pub enemies: Vec<Enemy>,
    /// Extra randomly rolled enemies added after `enemies`.
    pub random_enemies: usize,
    pub seed: Option<u64>,
    pub combat: CombatConfig,
}

impl HeadlessConfig {
    /// The default character against Garrik.
    pub fn quick_start() -> Self {
        Self {
            character_name: "Hollow".to_string(),
            attributes: Attributes::default(),
            spells: Vec::new(),
            enemies: vec![Enemy::garrik()],
            random_enemies: 0,
            seed: None,
            combat: CombatConfig::default(),
        }
    }

    pub fn with_character_name(mut self, name: impl Into<String>) -> Self {
        self.character_name = name.into();
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_spells(mut self, spells: impl IntoIterator<Item = Spell>) -> Self {
        self.spells.extend(spells);
        self
    }

    /// Replace the enemy roster.
    pub fn with_enemies(mut self, enemies: Vec<Enemy>) -> Self {
        self.enemies = enemies;
        self
    }

    pub fn with_random_enemies(mut self, count: usize) -> Self {
        self.random_enemies = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_combat_config(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    fn build_character(&self) -> Character {
        Character::new(self.character_name.clone(), self.attributes).with_spells(self.spells.clone())
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self::quick_start()
    }
}

/// A battle driven by text or [`Command`] values.
pub struct HeadlessBattle<D: DiceSource = RandomDice> {
    engine: CombatEngine<D>,
}

impl HeadlessBattle<RandomDice> {
    /// Start a battle with seeded dice, or entropy when no seed is set.
    pub fn new(config: HeadlessConfig) -> Self {
        let dice = match config.seed {
            Some(seed) => RandomDice::seeded(seed),
            None => RandomDice::from_entropy(),
        };
        Self::with_dice(config, dice)
    }
}

impl<D: DiceSource> HeadlessBattle<D> {
    /// Start a battle with the given dice.
    pub fn with_dice(config: HeadlessConfig, mut dice: D) -> Self {
        let mut enemies = config.enemies.clone();
        enemies.extend((0..config.random_enemies).map(|_| Enemy::random(&mut dice)));

        let mut engine = CombatEngine::with_config(config.build_character(), dice, config.combat);
        engine.start_combat(enemies);

        let mut battle = Self { engine };
        battle.skip_idle_slots();
        battle
    }

    pub fn state(&self) -> &CombatState {
        self.engine.state()
    }

    pub fn engine(&self) -> &CombatEngine<D> {
        &self.engine
    }

    pub fn is_player_turn(&self) -> bool {
        self.state().is_player_turn()
    }

    pub fn is_over(&self) -> bool {
        self.state().is_over()
    }

    /// Parse and execute a text command.
    pub fn send(&mut self, input: &str) -> Result<TurnReport, HeadlessError> {
        let command = input.parse::<Command>()?;
        self.execute(command)
    }

    /// Commands that would be accepted right now.
    pub fn available_commands(&self) -> Vec<Command> {
        let state = self.state();
        if state.is_over() {
            return Vec::new();
        }
        if state.is_player_turn() {
            let mut commands = vec![Command::Sword { target: 0 }];
            commands.extend(
                state
                    .affordable_spells()
                    .into_iter()
                    .map(|spell| Command::Cast { spell, target: 0 }),
            );
            commands
        } else {
            let mut commands = vec![Command::Endure];
            if state.can_react() {
                commands.extend(Reaction::ALL.into_iter().map(Command::React));
            }
            commands
        }
    }

    /// Execute a command, then advance the turn.
    pub fn execute(&mut self, command: Command) -> Result<TurnReport, HeadlessError> {
        if self.is_over() {
            return Err(HeadlessError::CombatOver);
        }

        let player_turn = self.is_player_turn();
        let resolved_turn = self.state().turn_number();
        let outcome = match command {
            Command::Sword { target } if player_turn => {
                self.engine.attack(PlayerAction::Weapon, target)?.clone()
            }
            Command::Cast { spell, target } if player_turn => {
                self.check_affordable(spell)?;
                self.engine.attack(PlayerAction::Spell(spell), target)?.clone()
            }
            Command::Endure if !player_turn => self.engine.enemy_attack(None)?.clone(),
            Command::React(reaction) if !player_turn => {
                if !self.state().can_react() {
                    return Err(HeadlessError::Unavailable(format!(
                        "no reactions left to {reaction}"
                    )));
                }
                self.engine.enemy_attack(Some(reaction))?.clone()
            }
            Command::Sword { .. } | Command::Cast { .. } => {
                return Err(HeadlessError::Unavailable(
                    "attacks wait for the player's turn".to_string(),
                ))
            }
            Command::Endure | Command::React(_) => {
                return Err(HeadlessError::Unavailable(
                    "it is the player's turn".to_string(),
                ))
            }
        };

        self.engine.next_turn();
        self.skip_idle_slots();

        let state = self.state();
        Ok(TurnReport {
            message: outcome.message().plain(),
            outcome,
            status: state.status(),
            resolved_turn,
            next: state.current_participant(),
            turn_number: state.turn_number(),
        })
    }

    fn check_affordable(&self, spell: usize) -> Result<(), HeadlessError> {
        let character = self.state().character();
        match character.spells().get(spell) {
            Some(known) if !character.can_afford(known) => Err(HeadlessError::Unavailable(
                format!("{} costs {} mana", known.name(), known.cost()),
            )),
            _ => Ok(()),
        }
    }

    /// Move past slots of enemies that are no longer standing.
    fn skip_idle_slots(&mut self) {
        while !self.is_over() {
            let slot = self.state().current_participant();
            let live = match slot.enemy_id() {
                None => true,
                Some(id) => self.state().enemy(id).is_some(),
            };
            if live {
                break;
            }
            debug!(%slot, "Skipping defeated enemy's turn");
            self.engine.next_turn();
        }
    }
}
