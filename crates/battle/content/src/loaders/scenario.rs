//! Battle scenario loader.
//!
//! A scenario file is a frozen snapshot of one encounter: the players with
//! their relations and battle plans, the resolved ship designs and the fleets
//! present. It may also pin the rules the battle runs with.

use std::path::Path;

use battle_core::{BattleRules, BattleScenario, Fleet, Player, ShipDesignSpec};

use crate::loaders::{LoadResult, read_file};

/// On-disk layout of a scenario.
///
/// ```ron
/// (
///     name: "Skirmish",
///     rules: Some((max_rounds: 10, seed: 7)),
///     players: [(num: 1, name: "Humans"), (num: 2, name: "Insectoids")],
///     designs: [(id: 1, name: "Frigate", armor: 20, movement: 4,
///                weapons: [(kind: Beam, count: 1, power: 10, range: 1)])],
///     fleets: [
///         (num: 1, player: 1, name: "Home Guard", stacks: [(design: 1, quantity: 3)]),
///         (num: 2, player: 2, name: "Raiders", stacks: [(design: 1, quantity: 2)]),
///     ],
/// )
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ScenarioFile {
    pub name: String,
    pub rules: Option<BattleRules>,
    pub players: Vec<Player>,
    pub designs: Vec<ShipDesignSpec>,
    pub fleets: Vec<Fleet>,
}

impl ScenarioFile {
    /// Split into the engine snapshot and the optional pinned rules.
    pub fn into_parts(self) -> (BattleScenario, Option<BattleRules>) {
        let scenario = BattleScenario {
            name: self.name,
            players: self.players,
            designs: self.designs,
            fleets: self.fleets,
        };
        (scenario, self.rules)
    }
}

/// Loader for battle scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    ///
    /// An unnamed scenario is named after its file stem. Pinned rules are
    /// validated here; cross references (players, designs, plans) are checked
    /// when the battle is built.
    pub fn load(path: &Path) -> LoadResult<ScenarioFile> {
        let content = read_file(path)?;
        let mut file: ScenarioFile = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse scenario RON {}: {}", path.display(), e)
        })?;

        if file.name.is_empty() {
            file.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        if let Some(rules) = &file.rules {
            rules.validate().map_err(|e| {
                anyhow::anyhow!("Invalid rules in scenario {}: {}", path.display(), e)
            })?;
        }

        Ok(file)
    }
}
