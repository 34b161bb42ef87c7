//! Inspect saved battle records
//!
//! Accepts the output of `run --out` (a list of named battles), a single named
//! battle, or a bare record.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use battle_core::BattleRecord;
use clap::Parser;
use console::style;

use super::SavedBattle;
use crate::report;

/// Print a saved battle record
#[derive(Parser)]
pub struct Inspect {
    /// Record file (JSON)
    #[arg(value_name = "RECORD")]
    path: PathBuf,

    /// Only print this round (1-based)
    #[arg(short, long, value_name = "N")]
    round: Option<usize>,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let battles = load_battles(&self.path)?;
        println!("{} {}", style("File:").bold().cyan(), self.path.display());
        println!();

        for battle in &battles {
            match self.round {
                Some(round) => {
                    let rounds = battle.record.num_rounds();
                    if round == 0 || round > rounds {
                        anyhow::bail!(
                            "Battle {} has {} rounds; round {} does not exist",
                            battle.name,
                            rounds,
                            round
                        );
                    }
                    println!("{} {}", style("Battle:").bold().cyan(), battle.name);
                    report::print_round(&battle.record, round - 1);
                }
                None => {
                    report::print_summary(&battle.name, &battle.record);
                    println!();
                    report::print_rounds(&battle.record);
                }
            }
            println!();
        }

        Ok(())
    }
}

/// Load every battle in a record file.
///
/// The shape of the JSON decides how it is read: an array is the output of
/// `run --out`, an object with a `record` field is one named battle, and
/// anything else must be a bare record. Decoding goes through
/// `serde_json::Value` so integer player keys in the statistics maps survive.
fn load_battles(path: &Path) -> Result<Vec<SavedBattle>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse record file: {}", path.display()))?;

    let battles = if value.is_array() {
        serde_json::from_value(value)
    } else if value.get("record").is_some() {
        serde_json::from_value(value).map(|battle: SavedBattle| vec![battle])
    } else {
        serde_json::from_value(value).map(|record: BattleRecord| {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            vec![SavedBattle { name, record }]
        })
    };
    battles.with_context(|| format!("Failed to decode record file: {}", path.display()))
}
