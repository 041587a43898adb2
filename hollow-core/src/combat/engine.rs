//! Attack, reaction and turn resolution.

use super::action::{PlayerAction, Reaction};
use super::outcome::{AttackResult, EnemyAttackReport, Outcome, PlayerAttackReport};
use super::state::{CombatState, CombatStatus};
use super::turn::{roll_turn_order, Participant};
use super::CombatError;
use crate::character::Character;
use crate::config::{CombatConfig, ManaPolicy};
use crate::dice::{DiceSource, RandomDice};
use crate::enemy::Enemy;
use tracing::{debug, info, warn};

/// Single entry point for every combat mutation.
///
/// The engine exclusively owns its [`CombatState`]; callers issue actions
/// and read the state back through [`CombatEngine::state`]. Every action
/// resolves completely before it returns. Turns only advance when the
/// caller invokes [`CombatEngine::next_turn`].
#[derive(Debug)]
pub struct CombatEngine<D: DiceSource = RandomDice> {
    config: CombatConfig,
    dice: D,
    state: CombatState,
}

impl<D: DiceSource> CombatEngine<D> {
    pub fn new(character: Character, dice: D) -> Self {
        Self::with_config(character, dice, CombatConfig::default())
    }

    pub fn with_config(character: Character, dice: D, config: CombatConfig) -> Self {
        Self {
            config,
            dice,
            state: CombatState::new(character),
        }
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Begin an encounter against `enemies`.
    ///
    /// Rolls initiative, fixes the turn order for the encounter, resets the
    /// turn counters and refills the character's reaction pool.
    pub fn start_combat(&mut self, enemies: Vec<Enemy>) -> &CombatState {
        let order = roll_turn_order(
            &mut self.dice,
            self.config.die_sides,
            &enemies,
            &self.state.character,
        );

        self.state.turn_order = order.into_iter().map(|i| i.participant).collect();
        self.state.enemies = enemies;
        self.state.turn_number = 1;
        self.state.turn_priority_index = 0;
        self.state.started = true;
        self.state.last_outcome = None;
        self.state.last_outcome_message.clear();
        self.state.character.replenish_reactions();

        info!(
            enemies = self.state.enemies.len(),
            first = %self.state.current_participant(),
            "Combat started"
        );
        &self.state
    }

    /// Resolve a player attack against the enemy at `target_index` in the
    /// active roster.
    pub fn attack(
        &mut self,
        action: PlayerAction,
        target_index: usize,
    ) -> Result<&Outcome, CombatError> {
        self.ensure_started()?;

        let active = self.state.enemies.len();
        if target_index >= active {
            return Err(CombatError::InvalidTarget {
                index: target_index,
                active,
            });
        }

        let character = &self.state.character;
        let strength = i32::from(character.strength());
        let will = i32::from(character.will());

        let (ability_name, base_damage, mana_cost, attack_stat) = match action {
            PlayerAction::Weapon => {
                let restore = will * to_i32(self.config.weapon_mana_per_will);
                (self.config.weapon_name.clone(), strength, -restore, strength)
            }
            PlayerAction::Spell(index) => {
                let spell =
                    character
                        .spells()
                        .get(index)
                        .ok_or(CombatError::InvalidAction {
                            index: index as i64,
                            known: character.spells().len(),
                        })?;
                if self.config.mana_policy == ManaPolicy::RequireFunds
                    && !character.can_afford(spell)
                {
                    return Err(CombatError::InsufficientMana {
                        cost: spell.cost(),
                        available: character.current_mana,
                    });
                }
                (
                    spell.name(),
                    to_i32(spell.damage()),
                    to_i32(spell.cost()),
                    will,
                )
            }
        };
        let is_weapon = action.is_weapon();

        let attack_roll = self.roll_plus(attack_stat);
        let hits = attack_roll > self.config.hit_threshold;
        let critical = attack_roll > self.config.critical_threshold;

        let enemy = &self.state.enemies[target_index];
        let (enemy_id, enemy_name) = (enemy.id, enemy.name.clone());
        let reaction_chance = enemy.reaction_chance();
        let defense_stat = i32::from(if is_weapon {
            enemy.strength()
        } else {
            enemy.agility()
        });

        // A critical gives the enemy a second, independent chance to react.
        let reaction_attempted = hits
            && enemy.reactions > 0
            && (self.dice.chance(reaction_chance)
                || (critical && self.dice.chance(reaction_chance)));

        let dodged = reaction_attempted && {
            let defense_roll = self.roll_plus(defense_stat);
            let bar = if critical {
                self.config.critical_threshold
            } else {
                self.config.hit_threshold
            };
            debug!(defense_roll, bar, "Enemy reaction roll");
            defense_roll > bar
        };

        let result = if !hits {
            AttackResult::Missed
        } else if dodged {
            AttackResult::Dodged
        } else {
            let damage = match (is_weapon, critical) {
                (true, true) => strength * 2,
                (true, false) => strength,
                (false, true) => base_damage.saturating_add(will / 2),
                (false, false) => base_damage,
            };
            AttackResult::Hit { damage, critical }
        };

        debug!(
            action = action.index(),
            attack_roll,
            hits,
            critical,
            reaction_attempted,
            ?result,
            "Player attack resolved"
        );

        let mana_delta = self.apply_mana_cost(mana_cost);

        let enemy = &mut self.state.enemies[target_index];
        enemy.hp = enemy.hp.saturating_sub(result.damage());
        if reaction_attempted {
            enemy.reactions = enemy.reactions.saturating_sub(1);
        }
        let target_defeated = enemy.is_defeated();
        if target_defeated {
            let removed = self.state.enemies.remove(target_index);
            info!(enemy = %removed.name, id = %removed.id, "Enemy defeated");
        }

        let report = PlayerAttackReport {
            action,
            ability_name,
            target: enemy_id,
            target_name: enemy_name,
            attack_roll,
            result,
            reaction_attempted,
            mana_delta,
            target_defeated,
        };
        Ok(self.record(Outcome::PlayerAttack(report)))
    }

    /// Resolve a player attack from the UI's action index, where `-1` is the
    /// weapon strike and `0..` a known spell.
    pub fn attack_index(
        &mut self,
        action_index: i64,
        target_index: usize,
    ) -> Result<&Outcome, CombatError> {
        self.ensure_started()?;
        let known = self.state.character.spells().len();
        let action = PlayerAction::from_index(action_index, known)?;
        self.attack(action, target_index)
    }

    /// Resolve the attack of the enemy whose turn it is, with an optional
    /// reaction from the player.
    ///
    /// If the current slot does not hold a live enemy the action is a
    /// no-op and resolves to [`Outcome::Idle`].
    pub fn enemy_attack(&mut self, reaction: Option<Reaction>) -> Result<&Outcome, CombatError> {
        self.ensure_started()?;

        let slot = self.state.current_participant();
        let Some(index) = slot
            .enemy_id()
            .and_then(|id| self.state.enemies.iter().position(|e| e.id == id))
        else {
            warn!(%slot, turn = self.state.turn_number, "No live enemy in turn slot");
            return Ok(self.record(Outcome::Idle { slot }));
        };

        if reaction.is_some() && !self.state.character.has_reactions() {
            return Err(CombatError::NoReactionsRemaining);
        }

        let enemy = &self.state.enemies[index];
        let (attacker, attacker_name) = (enemy.id, enemy.name.clone());
        let enemy_strength = i32::from(enemy.strength());
        let attack_stat = i32::from(enemy.strength().max(enemy.agility()));

        let attack_roll = self.roll_plus(attack_stat);
        let hits = attack_roll > self.config.hit_threshold;
        let critical = attack_roll > self.config.critical_threshold;

        let attributes = self.state.character.attributes();
        let reaction_succeeded = match reaction {
            None => false,
            Some(choice) => {
                self.state.character.current_reactions -= 1;
                let (stat, bar) = match choice {
                    Reaction::Dodge => (attributes.agility, self.config.dodge_threshold),
                    Reaction::Block => (attributes.strength, self.config.block_threshold),
                    Reaction::Parry => (attributes.best_physical(), self.config.parry_threshold),
                };
                let roll = self.roll_plus(i32::from(stat));
                debug!(reaction = %choice, roll, bar, "Player reaction roll");
                roll > bar
            }
        };

        let dodged = reaction == Some(Reaction::Dodge) && reaction_succeeded;
        let blocked = reaction == Some(Reaction::Block) && reaction_succeeded;
        let parried = reaction == Some(Reaction::Parry) && reaction_succeeded;

        let result = if !hits {
            AttackResult::Missed
        } else if dodged {
            AttackResult::Dodged
        } else {
            let raw = if critical {
                enemy_strength * 2
            } else {
                enemy_strength
            };
            let damage = if blocked { raw / 2 } else { raw };
            AttackResult::Hit {
                damage: damage.max(0),
                critical,
            }
        };

        let retaliation = if parried {
            i32::from(attributes.strength) / 2
        } else {
            0
        };

        debug!(
            enemy = %attacker_name,
            attack_roll,
            hits,
            critical,
            ?reaction,
            reaction_succeeded,
            ?result,
            "Enemy attack resolved"
        );

        self.state.character.take_damage(result.damage());

        let enemy = &mut self.state.enemies[index];
        enemy.hp = enemy.hp.saturating_sub(retaliation);
        let attacker_defeated = enemy.is_defeated();
        if attacker_defeated {
            let removed = self.state.enemies.remove(index);
            info!(enemy = %removed.name, id = %removed.id, "Enemy defeated by parry");
        }
        if !self.state.character.is_alive() {
            info!(by = %attacker_name, "Character defeated");
        }

        let report = EnemyAttackReport {
            attacker,
            attacker_name,
            attack_roll,
            result,
            reaction,
            reaction_succeeded,
            retaliation,
            attacker_defeated,
        };
        Ok(self.record(Outcome::EnemyAttack(report)))
    }

    /// Advance to the next slot in the turn order.
    pub fn next_turn(&mut self) -> Participant {
        let len = self.state.turn_order.len().max(1);
        self.state.turn_number += 1;
        self.state.turn_priority_index = (self.state.turn_priority_index + 1) % len;

        let current = self.state.current_participant();
        debug!(turn = self.state.turn_number, %current, "Turn advanced");
        if self.state.status() == CombatStatus::Victory {
            info!(turn = self.state.turn_number, "Combat over, no enemies remain");
        }
        current
    }

    fn ensure_started(&self) -> Result<(), CombatError> {
        if self.state.started {
            Ok(())
        } else {
            Err(CombatError::NotStarted)
        }
    }

    fn roll_plus(&mut self, stat: i32) -> u32 {
        let roll = self.dice.roll(self.config.die_sides);
        roll.saturating_add_signed(stat)
    }

    /// Apply a mana cost (negative restores) and return the actual change.
    ///
    /// The pool never exceeds its maximum. The lower bound follows the
    /// configured [`ManaPolicy`].
    fn apply_mana_cost(&mut self, cost: i32) -> i32 {
        let character = &mut self.state.character;
        let before = character.current_mana;
        let mut after = before.saturating_sub(cost).min(character.max_mana());
        if self.config.mana_policy != ManaPolicy::AllowNegative {
            after = after.max(0);
        }
        character.current_mana = after;
        after - before
    }

    fn record(&mut self, outcome: Outcome) -> &Outcome {
        self.state.last_outcome_message = outcome.message().html();
        self.state.last_outcome.insert(outcome)
    }
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_character, sample_spell, ScriptedDice};

    /// Enemy first, player second: initiative rolls 1 then 6.
    fn enemy_first(enemy: Enemy, character: Character) -> CombatEngine<ScriptedDice> {
        let mut engine = CombatEngine::new(character, ScriptedDice::new().with_rolls([1, 6]));
        engine.start_combat(vec![enemy]);
        assert!(!engine.state().is_player_turn());
        engine
    }

    fn brute() -> Enemy {
        Enemy::new("Brute")
            .with_hp(15)
            .with_reactions(0)
            .with_strength(3)
            .with_agility(1)
    }

    #[test]
    fn test_actions_require_started_combat() {
        let mut engine = CombatEngine::new(sample_character(), ScriptedDice::new());
        assert_eq!(
            engine.attack(PlayerAction::Weapon, 0).unwrap_err(),
            CombatError::NotStarted
        );
        assert_eq!(
            engine.enemy_attack(None).unwrap_err(),
            CombatError::NotStarted
        );
        assert_eq!(engine.state().status(), CombatStatus::Idle);
    }

    #[test]
    fn test_weapon_restores_mana_up_to_max() {
        let mut character = sample_character();
        character.current_mana = 50;
        let mut engine = CombatEngine::new(character, ScriptedDice::always(1));
        engine.start_combat(vec![brute().with_hp(100)]);

        let outcome = engine.attack(PlayerAction::Weapon, 0).unwrap().clone();
        let Outcome::PlayerAttack(report) = outcome else {
            panic!("expected a player attack");
        };
        assert_eq!(report.mana_delta, 10);
        assert_eq!(engine.state().character().current_mana, 60);

        engine.attack(PlayerAction::Weapon, 0).unwrap();
        engine.attack(PlayerAction::Weapon, 0).unwrap();
        engine.attack(PlayerAction::Weapon, 0).unwrap();
        engine.attack(PlayerAction::Weapon, 0).unwrap();
        engine.attack(PlayerAction::Weapon, 0).unwrap();
        assert_eq!(engine.state().character().current_mana, 100);
    }

    #[test]
    fn test_spell_mana_policies() {
        let spell = sample_spell().unwrap();

        let mut character = sample_character().with_spell(spell.clone());
        character.current_mana = 10;

        let mut engine = CombatEngine::new(character.clone(), ScriptedDice::always(3));
        engine.start_combat(vec![brute()]);
        engine.attack(PlayerAction::Spell(0), 0).unwrap();
        assert_eq!(engine.state().character().current_mana, 10 - 37);

        let config = CombatConfig::default().with_mana_policy(ManaPolicy::ClampAtZero);
        let mut engine = CombatEngine::with_config(character.clone(), ScriptedDice::always(3), config);
        engine.start_combat(vec![brute()]);
        engine.attack(PlayerAction::Spell(0), 0).unwrap();
        assert_eq!(engine.state().character().current_mana, 0);

        let config = CombatConfig::default().with_mana_policy(ManaPolicy::RequireFunds);
        let mut engine = CombatEngine::with_config(character, ScriptedDice::always(3), config);
        engine.start_combat(vec![brute()]);
        assert_eq!(
            engine.attack(PlayerAction::Spell(0), 0).unwrap_err(),
            CombatError::InsufficientMana {
                cost: 37,
                available: 10
            }
        );
        assert_eq!(engine.state().enemies()[0].hp, 15);
        assert!(engine.state().last_outcome().is_none());
    }

    #[test]
    fn test_enemy_block_halves_critical() {
        let mut engine = enemy_first(brute(), sample_character());
        // Attack 4 + 3 = 7 is critical for 6, block 1 + 4 = 5 succeeds.
        engine.dice_mut().push_rolls([4, 1]);

        let outcome = engine.enemy_attack(Some(Reaction::Block)).unwrap();
        assert_eq!(
            outcome.message().plain(),
            "Critical Attack Brute hit for 3 damage (blocked)"
        );
        assert_eq!(engine.state().character().current_hp, 5);
        assert_eq!(engine.state().character().current_reactions, 0);
    }

    #[test]
    fn test_parry_can_defeat_attacker() {
        let mut engine = enemy_first(brute().with_hp(2), sample_character());
        // Attack 2 + 3 = 5 hits for 3, parry 3 + 4 = 7 succeeds for 2.
        engine.dice_mut().push_rolls([2, 3]);

        let outcome = engine.enemy_attack(Some(Reaction::Parry)).unwrap().clone();
        let Outcome::EnemyAttack(report) = outcome else {
            panic!("expected an enemy attack");
        };
        assert_eq!(report.result.damage(), 3);
        assert_eq!(report.retaliation, 2);
        assert!(report.attacker_defeated);
        assert!(engine.state().enemies().is_empty());
        assert_eq!(engine.state().character().current_hp, 5);
        assert_eq!(engine.state().status(), CombatStatus::Victory);
    }

    #[test]
    fn test_reaction_requires_pool() {
        let clumsy = Character::new("Clumsy", crate::character::Attributes::new(4, 1, 2));
        let mut engine = enemy_first(brute(), clumsy);
        assert_eq!(
            engine.enemy_attack(Some(Reaction::Dodge)).unwrap_err(),
            CombatError::NoReactionsRemaining
        );
        assert!(engine.enemy_attack(None).is_ok());
    }

    #[test]
    fn test_last_outcome_message_is_html() {
        let mut engine = CombatEngine::new(sample_character(), ScriptedDice::always(6));
        engine.start_combat(vec![brute()]);
        engine.attack(PlayerAction::Weapon, 0).unwrap();
        assert!(engine
            .state()
            .last_outcome_message()
            .starts_with("<span class=\"text-green-500\">Critical </span>"));
    }
}
