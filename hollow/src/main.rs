//! Dusk Hollow battle runner.
//!
//! Plays one encounter from stdin, one command per line:
//!
//! ```bash
//! cargo run -p hollow -- --seed 42 --enemies 2 --spellbook spells.json
//! ```

mod headless;

use anyhow::{Context, Result};
use hollow_core::{CombatConfig, Spell};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use headless::RunOptions;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hollow=info,hollow_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let options = parse_options_from_args(&args)?;
    headless::run_headless(options)
}

/// Parse runner options from command line arguments.
///
/// `--seed` falls back to the `HOLLOW_SEED` environment variable.
fn parse_options_from_args(args: &[String]) -> Result<RunOptions> {
    let mut options = RunOptions::default();
    let mut spellbook: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                if let Some(seed) = args.get(i + 1) {
                    options.seed = Some(seed.parse().context("--seed expects an integer")?);
                    i += 1;
                }
            }
            "--enemies" => {
                if let Some(count) = args.get(i + 1) {
                    options.random_enemies =
                        count.parse().context("--enemies expects a count")?;
                    i += 1;
                }
            }
            "--name" => {
                if let Some(name) = args.get(i + 1) {
                    options.name = Some(name.clone());
                    i += 1;
                }
            }
            "--config" => {
                config = args.get(i + 1).map(PathBuf::from);
                i += 1;
            }
            "--spellbook" => {
                spellbook = args.get(i + 1).map(PathBuf::from);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }

    if options.seed.is_none() {
        if let Ok(seed) = std::env::var("HOLLOW_SEED") {
            options.seed = Some(seed.parse().context("HOLLOW_SEED must be an integer")?);
        }
    }

    if let Some(path) = config {
        options.combat = CombatConfig::load(&path)
            .with_context(|| format!("Failed to load combat config {}", path.display()))?;
    }

    if let Some(path) = spellbook {
        options.spells = load_spellbook(&path)?;
    }

    Ok(options)
}

/// Read a JSON array of spells.
fn load_spellbook(path: &Path) -> Result<Vec<Spell>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read spellbook {}", path.display()))?;
    let spells: Vec<Spell> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid spellbook {}", path.display()))?;
    Ok(spells)
}

fn print_help() {
    println!("Dusk Hollow - turn-based battle runner");
    println!();
    println!("USAGE:");
    println!("  hollow [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help            Show this help message");
    println!("  --seed <N>            Seed the dice (default: HOLLOW_SEED or entropy)");
    println!("  --name <NAME>         Character name (default: Hollow)");
    println!("  --enemies <N>         Add N random enemies after Garrik");
    println!("  --config <PATH>       Combat rules as JSON");
    println!("  --spellbook <PATH>    Known spells as a JSON array");
    println!();
    println!("ENVIRONMENT:");
    println!("  RUST_LOG              Log filter (default: hollow=info,hollow_core=info)");
    println!();
    println!("EXAMPLES:");
    println!("  hollow --seed 7");
    println!("  hollow --enemies 2 --spellbook spells.json");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let options =
            parse_options_from_args(&args(&["hollow", "--seed", "9", "--enemies", "2"])).unwrap();
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.random_enemies, 2);
        assert!(options.spells.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_seed() {
        assert!(parse_options_from_args(&args(&["hollow", "--seed", "many"])).is_err());
    }
}
