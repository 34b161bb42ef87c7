use tracing::trace;

use super::{BattleWeaponSlot, WeaponFamily};
use crate::token::BattleToken;

impl BattleWeaponSlot {
    /// Legal targets for this slot in firing priority order.
    ///
    /// Tokens in the plan's primary category come first, then the secondary
    /// category; each group is sorted by descending attractiveness. Ties keep
    /// roster order.
    pub fn find_targets(&self, tokens: &[BattleToken]) -> Vec<usize> {
        let Some(owner) = tokens.get(self.token) else {
            return Vec::new();
        };

        let mut primary = Vec::new();
        let mut secondary = Vec::new();
        for (index, target) in tokens.iter().enumerate() {
            if !target.is_still_in_battle()
                || target.player == owner.player
                || !owner.will_attack(target.player)
                || !self.will_damage(target)
            {
                continue;
            }
            let score = self.attractiveness(target);
            if target.is_target_of(owner.plan.primary_target) {
                primary.push((index, score));
            } else if target.is_target_of(owner.plan.secondary_target) {
                secondary.push((index, score));
            }
        }

        primary.sort_by(|a, b| b.1.total_cmp(&a.1));
        secondary.sort_by(|a, b| b.1.total_cmp(&a.1));

        let targets: Vec<usize> = primary
            .into_iter()
            .chain(secondary)
            .map(|(index, _)| index)
            .collect();
        trace!(
            token = owner.num,
            slot = self.slot,
            targets = ?targets,
            "weapon targets refreshed"
        );
        targets
    }

    /// Sappers skip stacks whose shields are already down.
    pub fn will_damage(&self, target: &BattleToken) -> bool {
        !self.is_sapper() || target.stack_shields > 0.0
    }

    /// Value of the target per point of effective defense against this slot.
    pub fn attractiveness(&self, target: &BattleToken) -> f64 {
        if !target.is_still_in_battle() {
            return 0.0;
        }
        let armor = target.remaining_armor();
        let shields = target.stack_shields;

        let defense = match self.family {
            WeaponFamily::Beam { .. } => (armor + shields) * (1.0 + target.beam_defense),
            WeaponFamily::Torpedo {
                capital_ship_missile,
                ..
            } => {
                let accuracy = self.torpedo_accuracy(target.jamming);
                if accuracy <= 0.0 {
                    return 0.0;
                }
                let missile_factor = if capital_ship_missile { 2.0 } else { 1.0 };
                if shields >= armor {
                    armor * 2.0 / accuracy
                } else {
                    shields * 2.0 / accuracy + (armor - shields) / (accuracy * missile_factor)
                }
            }
        };

        if defense <= 0.0 {
            return 0.0;
        }
        target.stack_value() / defense
    }

    /// Hit chance of one torpedo against a stack with `jamming`.
    ///
    /// Jamming beyond the computer bonus scales accuracy down; a bonus beyond
    /// the jamming closes part of the gap to a certain hit. Beams always hit.
    pub fn torpedo_accuracy(&self, jamming: f64) -> f64 {
        let WeaponFamily::Torpedo { accuracy, .. } = self.family else {
            return 1.0;
        };
        let bonus = self.torpedo_bonus;
        let effective = if jamming >= bonus {
            accuracy * (1.0 - (jamming - bonus))
        } else {
            accuracy + (1.0 - accuracy) * (bonus - jamming)
        };
        effective.clamp(0.0, 1.0)
    }
}
