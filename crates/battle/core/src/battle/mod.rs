//! Battle orchestration.
//!
//! A [`Battle`] owns every token for one encounter and drives the round loop:
//!
//! 1. shield regeneration
//! 2. weapon target refresh
//! 3. movement, one step at a time in a shuffled order
//! 4. fire, in descending slot initiative
//! 5. retreat of disengaging stacks that are out of enemy range
//!
//! The loop stops at the round cap or as soon as no stack has anything left to
//! shoot at. Everything that happens is appended to the [`BattleRecord`].
//!
//! # Modules
//!
//! - `setup`: input validation and token placement
//! - `movement`: per-tactic destination scoring
//! - `firing`: initiative ordering and volley resolution

mod firing;
mod movement;
mod setup;

use tracing::{debug, info};

use crate::board::Board;
use crate::config::BattleRules;
use crate::record::BattleRecord;
use crate::rng::{BattleDice, RngOracle};
use crate::token::BattleToken;

/// One battle between every fleet present at a location.
#[derive(Debug)]
pub struct Battle {
    rules: BattleRules,
    board: Board,
    tokens: Vec<BattleToken>,
    record: BattleRecord,
    dice: BattleDice,
    round: u32,
}

impl Battle {
    /// Replace the random source; the battle seed is kept.
    pub fn with_rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.dice = BattleDice::with_rng(self.rules.seed, rng);
        self
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tokens(&self) -> &[BattleToken] {
        &self.tokens
    }

    pub fn record(&self) -> &BattleRecord {
        &self.record
    }

    /// Rounds completed so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whether any stack still in battle would target another one.
    pub fn has_targets(&self) -> bool {
        self.tokens.iter().filter(|t| t.is_still_in_battle()).any(|attacker| {
            self.tokens
                .iter()
                .any(|target| target.is_still_in_battle() && attacker.will_target(target))
        })
    }

    pub fn is_over(&self) -> bool {
        self.round >= self.rules.max_rounds || !self.has_targets()
    }

    /// Run the battle to completion and return its record.
    pub fn run(mut self) -> BattleRecord {
        info!(
            tokens = self.tokens.len(),
            players = self.record.stats.ships_at_start.len(),
            seed = self.rules.seed,
            "battle started"
        );
        while !self.is_over() {
            self.run_round();
        }
        self.finish()
    }

    /// Simulate a single round.
    pub fn run_round(&mut self) {
        self.record.start_round();

        for token in self.tokens.iter_mut().filter(|t| t.is_still_in_battle()) {
            token.regenerate_shields();
        }
        self.refresh_targets();
        self.move_tokens();
        self.fire_weapons();
        self.check_retreats();

        debug!(
            round = self.round,
            actions = self.record.actions(self.round as usize).len(),
            in_battle = self.tokens.iter().filter(|t| t.is_still_in_battle()).count(),
            "round complete"
        );
        self.round += 1;
    }

    /// Tally statistics and hand out the record.
    pub fn finish(mut self) -> BattleRecord {
        self.record.finish(&self.tokens);
        let stats = &self.record.stats;
        info!(
            rounds = stats.num_rounds,
            destroyed = stats.total_destroyed(),
            survivors = ?stats.survivors(),
            "battle finished"
        );
        self.record
    }

    /// Recompute every weapon slot's target list.
    fn refresh_targets(&mut self) {
        for index in 0..self.tokens.len() {
            let token = &self.tokens[index];
            let targets = if token.is_still_in_battle() {
                token.find_weapons_targets(&self.tokens)
            } else {
                vec![Vec::new(); token.weapon_slots.len()]
            };
            self.tokens[index].set_weapons_targets(targets);
        }
    }
}
