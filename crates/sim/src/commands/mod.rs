//! Command implementations for battle-sim
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect;
mod run;

pub use inspect::Inspect;
pub use run::Run;

use battle_core::BattleRecord;

/// A finished battle as written by `run --out` and read by `inspect`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SavedBattle {
    pub name: String,
    pub record: BattleRecord,
}
