//! Line-oriented battle loop.
//!
//! Lines starting with `#` are runner commands (quit, status, state, help).
//! Everything else is a battle command: `sword [target]`,
//! `cast <spell> [target]`, `endure`, `dodge`, `block` or `parry`.

use anyhow::Result;
use hollow_core::headless::{HeadlessBattle, HeadlessConfig, TurnReport};
use hollow_core::{CombatConfig, CombatState, CombatStatus, Spell};
use std::io::{self, BufRead, Write};
use tracing::info;

/// Options collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub seed: Option<u64>,
    pub name: Option<String>,
    pub random_enemies: usize,
    pub spells: Vec<Spell>,
    pub combat: CombatConfig,
}

impl RunOptions {
    fn into_config(self) -> HeadlessConfig {
        let mut config = HeadlessConfig::quick_start()
            .with_spells(self.spells)
            .with_random_enemies(self.random_enemies)
            .with_combat_config(self.combat);
        if let Some(name) = self.name {
            config = config.with_character_name(name);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// Run one battle against stdin.
pub fn run_headless(options: RunOptions) -> Result<()> {
    let seed = options.seed;
    let mut battle = HeadlessBattle::new(options.into_config());
    info!(?seed, "Battle ready");

    println!("=== Dusk Hollow ===");
    print_status(battle.state());
    println!();
    print_help();
    println!();
    print_prompt(battle.state());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('#') {
            let parts: Vec<&str> = command.split_whitespace().collect();
            match parts.first().copied() {
                Some("quit") | Some("exit") => {
                    println!("Goodbye!");
                    break;
                }
                Some("status") => print_status(battle.state()),
                Some("state") => match serde_json::to_string_pretty(battle.state()) {
                    Ok(json) => println!("{json}"),
                    Err(e) => println!("[ERROR] {e}"),
                },
                Some("help") => print_help(),
                _ => println!("[ERROR] Unknown command. Type #help for help."),
            }
            stdout.flush().ok();
            continue;
        }

        match battle.send(line) {
            Ok(report) => print_report(&report),
            Err(e) => println!("[ERROR] {e}"),
        }

        if battle.is_over() {
            match battle.state().status() {
                CombatStatus::Victory => println!("[VICTORY] Every enemy has fallen."),
                CombatStatus::Defeat => println!("[DEFEAT] You have fallen."),
                _ => {}
            }
            break;
        }
        print_prompt(battle.state());
        stdout.flush().ok();
    }

    Ok(())
}

fn print_report(report: &TurnReport) {
    println!("[TURN {}] {}", report.resolved_turn, report.message);
}

fn print_prompt(state: &CombatState) {
    if state.is_player_turn() {
        println!("> Your turn");
    } else {
        let attacker = state
            .current_participant()
            .enemy_id()
            .and_then(|id| state.enemy(id))
            .map(|enemy| enemy.name.as_str())
            .unwrap_or("An enemy");
        println!("> {attacker} attacks");
    }
}

fn print_status(state: &CombatState) {
    let character = state.character();
    println!("[STATUS]");
    println!(
        "  {}: HP {}/{}, Mana {}/{}, Reactions {}/{}",
        character.name,
        character.current_hp,
        character.max_hp(),
        character.current_mana,
        character.max_mana(),
        character.current_reactions,
        character.max_reactions(),
    );
    for (index, enemy) in state.enemies().iter().enumerate() {
        println!(
            "  [{index}] {}: HP {}, Reactions {}",
            enemy.name, enemy.hp, enemy.reactions
        );
    }
    for (index, spell) in character.spells().iter().enumerate() {
        let marker = if character.can_afford(spell) { "" } else { " (too costly)" };
        println!("  spell {index}: {} - {} mana{marker}", spell.name(), spell.cost());
    }
    println!("  Turn: {}", state.turn_number());
}

fn print_help() {
    println!("[HELP]");
    println!("  sword [target]          - Strike with your weapon");
    println!("  cast <spell> [target]   - Cast a known spell");
    println!("  endure                  - Take the enemy's blow");
    println!("  dodge | block | parry   - Spend a reaction");
    println!("  #status                 - Show the battle");
    println!("  #state                  - Dump the battle as JSON");
    println!("  #help                   - Show this help");
    println!("  #quit                   - Leave");
}
