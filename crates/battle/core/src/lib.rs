//! Deterministic tactical combat resolver for fleets sharing a location.
//!
//! `battle-core` takes a frozen snapshot of the participating players, ship
//! designs and fleets, simulates a bounded number of rounds on a 10×10 board
//! (shield regeneration, movement, initiative-ordered fire, retreat) and
//! produces a [`BattleRecord`]: a replayable per-round action log plus
//! per-player casualty statistics. All state mutation flows through
//! [`Battle`]; nothing here performs I/O.
pub mod battle;
pub mod board;
pub mod config;
pub mod design;
pub mod error;
pub mod fleet;
pub mod player;
pub mod record;
pub mod rng;
pub mod token;
pub mod weapon;

pub use battle::Battle;
pub use board::{BattleVector, Board};
pub use config::BattleRules;
pub use design::{Cost, DesignId, ShipDesignSpec, WeaponKind, WeaponSlotSpec};
pub use error::{BattleError, BattleFault, BattleResult, ErrorSeverity};
pub use fleet::{BattleScenario, Fleet, ShipStack};
pub use player::{
    BattleAttackWho, BattlePlan, BattleTactic, BattleTarget, Player, PlayerId, PlayerRelation,
    RaceTraits,
};
pub use record::{
    BattleRecord, BattleRecordStats, BattleRecordToken, BattleRecordTokenAction,
    BattleRecordTokenOutcome, TokenActionKind,
};
pub use rng::{BattleDice, PcgRng, RngOracle, compute_seed};
pub use token::{BattleToken, StackDamage, TokenAttributes};
pub use weapon::{BattleWeaponSlot, TorpedoEstimate, VolleyHit, WeaponFamily};
