use tracing::debug;

use super::Battle;
use crate::board::BattleVector;
use crate::player::BattleTactic;
use crate::record::BattleRecordTokenAction;
use crate::rng::{CONTEXT_MOVE_ORDER, CONTEXT_MOVE_PICK};
use crate::token::BattleToken;

/// Unarmed stacks behave as if their plan said `Disengage`.
pub(super) fn wants_to_disengage(token: &BattleToken) -> bool {
    token.is_disengaging() || !token.is_armed()
}

impl Battle {
    /// Move every token for this round.
    ///
    /// The roster is shuffled once per round. Movement then proceeds in
    /// single-cell steps: in step `n` every token with more than `n` moves
    /// left this round takes one step, so fast stacks do not cover their whole
    /// distance before slow ones react.
    pub(super) fn move_tokens(&mut self) {
        let round = self.round;
        let mut order: Vec<usize> = (0..self.tokens.len())
            .filter(|&i| {
                let token = &self.tokens[i];
                token.is_still_in_battle() && token.moves_in_round(round) > 0
            })
            .collect();
        self.dice.shuffle(&mut order, CONTEXT_MOVE_ORDER);

        let steps = order
            .iter()
            .map(|&i| self.tokens[i].moves_in_round(round))
            .max()
            .unwrap_or(0);
        for step in 0..steps {
            for &index in &order {
                let token = &self.tokens[index];
                if token.is_still_in_battle() && step < token.moves_in_round(round) {
                    self.move_token(index);
                }
            }
        }
    }

    /// Take one step with token `index`, or stay put.
    fn move_token(&mut self, index: usize) {
        let token = &self.tokens[index];
        let disengaging = wants_to_disengage(token);

        let move_target = if disengaging {
            None
        } else {
            token.find_move_target(&self.tokens)
        };
        let threats = if disengaging {
            self.threats_to(index)
        } else {
            Vec::new()
        };
        if (!disengaging && move_target.is_none()) || (disengaging && threats.is_empty()) {
            return;
        }

        let closing = !disengaging && !self.can_deal_damage_nearby(index);
        let mut best_score = f64::NEG_INFINITY;
        let mut best_moves: Vec<BattleVector> = Vec::new();
        for cell in self.board.neighbourhood(token.position) {
            let score = if disengaging {
                self.escape_score(cell, &threats)
            } else {
                self.attack_score(index, cell, move_target, closing)
            };
            if score > best_score {
                best_score = score;
                best_moves = self.board.update_best_moves(true, cell, best_moves);
            } else if score == best_score {
                best_moves = self.board.update_best_moves(false, cell, best_moves);
            }
        }

        let num = token.num;
        let pick = self.dice.pick(best_moves.len(), num, CONTEXT_MOVE_PICK);
        let Some(&destination) = best_moves.get(pick) else {
            return;
        };
        if destination == self.tokens[index].position {
            return;
        }

        let action = BattleRecordTokenAction::movement(self.round, &self.tokens[index], destination);
        debug!(
            round = self.round,
            token = num,
            from = %action.from,
            to = %destination,
            "token moved"
        );
        self.record.record(action);

        let token = &mut self.tokens[index];
        token.position = destination;
        token.moves_made += 1;
    }

    /// Tokens in battle that would fire at token `index`.
    fn threats_to(&self, index: usize) -> Vec<usize> {
        let token = &self.tokens[index];
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, other)| other.is_still_in_battle() && other.will_target(token))
            .map(|(i, _)| i)
            .collect()
    }

    /// Distance from `cell` to the nearest threat.
    fn escape_score(&self, cell: BattleVector, threats: &[usize]) -> f64 {
        threats
            .iter()
            .map(|&i| self.tokens[i].position.distance(cell))
            .min()
            .map_or(0.0, f64::from)
    }

    fn attack_score(
        &self,
        index: usize,
        cell: BattleVector,
        move_target: Option<usize>,
        closing: bool,
    ) -> f64 {
        let token = &self.tokens[index];
        let approach = move_target.map_or(0.0, |target| {
            -f64::from(cell.distance(self.tokens[target].position))
        });

        match token.tactic() {
            BattleTactic::MaximizeDamage | BattleTactic::DisengageIfChallenged => approach,
            BattleTactic::MaximizeNetDamage | BattleTactic::MaximizeDamageRatio if closing => {
                approach
            }
            BattleTactic::MaximizeNetDamage => {
                self.damage_dealt_from(index, cell) - self.damage_received_at(index, cell)
            }
            BattleTactic::MaximizeDamageRatio => {
                self.damage_dealt_from(index, cell) / self.damage_received_at(index, cell).max(1.0)
            }
            BattleTactic::MinimizeDamageToSelf => -self.damage_received_at(index, cell),
            BattleTactic::Disengage => 0.0,
        }
    }

    /// Whether token `index` could hit anything from its cell or a neighbour.
    fn can_deal_damage_nearby(&self, index: usize) -> bool {
        let position = self.tokens[index].position;
        self.board
            .neighbourhood(position)
            .into_iter()
            .any(|cell| self.damage_dealt_from(index, cell) > 0.0)
    }

    /// Expected damage token `index` would deal standing at `cell`.
    ///
    /// Each slot is scored against the first target in its priority list that
    /// would be in range; gatling slots against every target in range.
    pub(super) fn damage_dealt_from(&self, index: usize, cell: BattleVector) -> f64 {
        let token = &self.tokens[index];
        let mut total = 0.0;
        for slot in &token.weapon_slots {
            let mut reachable = slot
                .targets
                .iter()
                .map(|&t| &self.tokens[t])
                .filter(|t| t.is_still_in_battle() && slot.is_in_range(cell, t.position));
            let estimate = |target: &BattleToken| {
                slot.estimated_damage(cell, token.quantity, target, target.position)
            };
            total += if slot.is_gatling() {
                reachable.map(estimate).sum::<f64>()
            } else {
                reachable.next().map_or(0.0, estimate)
            };
        }
        total
    }

    /// Expected damage token `index` would take standing at `cell`.
    pub(super) fn damage_received_at(&self, index: usize, cell: BattleVector) -> f64 {
        let token = &self.tokens[index];
        self.tokens
            .iter()
            .filter(|enemy| enemy.is_still_in_battle() && enemy.will_target(token))
            .flat_map(|enemy| {
                enemy
                    .weapon_slots
                    .iter()
                    .filter(|slot| slot.will_damage(token))
                    .map(move |slot| slot.estimated_damage(enemy.position, enemy.quantity, token, cell))
            })
            .sum()
    }
}
