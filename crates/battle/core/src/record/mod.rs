//! Replayable battle record.
//!
//! The record captures the starting roster, one list of actions per round and
//! the final state of every stack. It is built incrementally by the battle and
//! never read back by the engine itself.

mod action;
mod stats;

pub use action::{BattleRecordTokenAction, TokenActionKind};
pub use stats::BattleRecordStats;

use crate::board::BattleVector;
use crate::design::DesignId;
use crate::player::PlayerId;
use crate::token::BattleToken;

/// Starting snapshot of one token.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRecordToken {
    pub num: u32,
    pub player: PlayerId,
    pub fleet_num: u32,
    pub design: DesignId,
    pub design_name: String,
    pub quantity: u32,
    pub position: BattleVector,
    pub initiative: i32,
    pub movement: u32,
    pub armor: u32,
    pub shield: u32,
}

impl From<&BattleToken> for BattleRecordToken {
    fn from(token: &BattleToken) -> Self {
        Self {
            num: token.num,
            player: token.player,
            fleet_num: token.fleet_num,
            design: token.design,
            design_name: token.design_name.clone(),
            quantity: token.quantity,
            position: token.position,
            initiative: token.initiative,
            movement: token.movement,
            armor: token.armor,
            shield: token.shield,
        }
    }
}

/// Final state of one token, enough for the caller to update its fleet.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRecordTokenOutcome {
    pub num: u32,
    pub player: PlayerId,
    pub fleet_num: u32,
    pub design: DesignId,
    pub quantity: u32,
    pub quantity_damaged: u32,
    pub damage: f64,
    pub destroyed: u32,
    pub ran_away: bool,
}

impl From<&BattleToken> for BattleRecordTokenOutcome {
    fn from(token: &BattleToken) -> Self {
        Self {
            num: token.num,
            player: token.player,
            fleet_num: token.fleet_num,
            design: token.design,
            quantity: token.quantity,
            quantity_damaged: token.quantity_damaged,
            damage: token.damage,
            destroyed: token.destroyed,
            ran_away: token.ran_away,
        }
    }
}

/// Everything that happened in one battle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRecord {
    pub tokens: Vec<BattleRecordToken>,
    pub action_rounds: Vec<Vec<BattleRecordTokenAction>>,
    pub token_outcomes: Vec<BattleRecordTokenOutcome>,
    pub stats: BattleRecordStats,
}

impl BattleRecord {
    /// Start a record from the roster as placed on the board.
    pub fn new(tokens: &[BattleToken]) -> Self {
        let mut stats = BattleRecordStats::default();
        for token in tokens {
            *stats.ships_at_start.entry(token.player).or_default() += token.quantity;
        }
        Self {
            tokens: tokens.iter().map(BattleRecordToken::from).collect(),
            action_rounds: Vec::new(),
            token_outcomes: Vec::new(),
            stats,
        }
    }

    pub fn start_round(&mut self) {
        self.action_rounds.push(Vec::new());
    }

    /// Append an action to the current round.
    pub fn record(&mut self, action: BattleRecordTokenAction) {
        if self.action_rounds.is_empty() {
            self.start_round();
        }
        if let Some(round) = self.action_rounds.last_mut() {
            round.push(action);
        }
    }

    pub fn num_rounds(&self) -> usize {
        self.action_rounds.len()
    }

    /// Actions of round `round` (zero-based); empty if it never ran.
    pub fn actions(&self, round: usize) -> &[BattleRecordTokenAction] {
        self.action_rounds.get(round).map_or(&[], Vec::as_slice)
    }

    /// Every action in the battle, in order.
    pub fn all_actions(&self) -> impl Iterator<Item = &BattleRecordTokenAction> {
        self.action_rounds.iter().flatten()
    }

    /// Tally final outcomes and per-player statistics.
    pub fn finish(&mut self, tokens: &[BattleToken]) {
        self.token_outcomes = tokens.iter().map(BattleRecordTokenOutcome::from).collect();
        self.stats.tally(self.action_rounds.len() as u32, tokens);
    }
}
