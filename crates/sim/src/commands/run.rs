//! Run battle scenarios
//!
//! Each scenario becomes an independent battle on a blocking task; results are
//! reported in the order the scenarios were given.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use battle_content::{RulesLoader, ScenarioLoader};
use battle_core::{Battle, BattleRules};
use clap::Parser;
use console::style;
use tracing::info;

use super::SavedBattle;
use crate::report;

/// Run one or more scenarios and report the outcome
#[derive(Parser)]
pub struct Run {
    /// Scenario files (RON)
    #[arg(value_name = "SCENARIO", required = true)]
    scenarios: Vec<PathBuf>,

    /// Rules file (TOML); overrides rules pinned in the scenarios
    #[arg(short, long, value_name = "TOML")]
    rules: Option<PathBuf>,

    /// Seed override applied to every battle
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Also write the records as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Casualties and survivors
    Summary,
    /// Summary followed by the full action log
    Rounds,
    /// Records as JSON
    Json,
}

impl Run {
    pub async fn execute(self) -> Result<()> {
        let override_rules = self
            .rules
            .as_deref()
            .map(RulesLoader::load)
            .transpose()?;

        let mut pending = Vec::with_capacity(self.scenarios.len());
        for path in &self.scenarios {
            let (scenario, pinned) = ScenarioLoader::load(path)?.into_parts();
            let rules = resolve_rules(override_rules.as_ref(), pinned, self.seed);
            let battle = Battle::from_scenario(rules, &scenario)
                .with_context(|| format!("Failed to set up battle {}", path.display()))?;
            info!(
                scenario = %scenario.name,
                tokens = battle.tokens().len(),
                seed = battle.rules().seed,
                "battle queued"
            );
            let task = tokio::task::spawn_blocking(move || battle.run());
            pending.push((scenario.name, task));
        }

        let mut battles = Vec::with_capacity(pending.len());
        for (name, task) in pending {
            let record = task
                .await
                .with_context(|| format!("Battle {} did not complete", name))?;
            battles.push(SavedBattle { name, record });
        }

        match self.format {
            OutputFormat::Summary | OutputFormat::Rounds => {
                for (i, battle) in battles.iter().enumerate() {
                    if i > 0 {
                        println!("{}", style("─".repeat(60)).dim());
                    }
                    report::print_summary(&battle.name, &battle.record);
                    if matches!(self.format, OutputFormat::Rounds) {
                        println!();
                        report::print_rounds(&battle.record);
                    }
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&battles)?);
            }
        }

        if let Some(out) = &self.out {
            write_records(out, &battles)?;
            println!("{} {}", style("Saved:").bold().cyan(), out.display());
        }

        Ok(())
    }
}

/// Rules for one scenario: the `--rules` file wins over rules pinned in the
/// scenario, which win over the defaults. `--seed` applies last.
fn resolve_rules(
    override_rules: Option<&BattleRules>,
    pinned: Option<BattleRules>,
    seed: Option<u64>,
) -> BattleRules {
    let mut rules = override_rules.cloned().or(pinned).unwrap_or_default();
    if let Some(seed) = seed {
        rules.seed = seed;
    }
    rules
}

fn write_records(path: &Path, battles: &[SavedBattle]) -> Result<()> {
    let json = serde_json::to_string_pretty(battles)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write records: {}", path.display()))
}
