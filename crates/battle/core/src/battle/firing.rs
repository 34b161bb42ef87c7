use tracing::debug;

use super::Battle;
use super::movement::wants_to_disengage;
use crate::record::BattleRecordTokenAction;

impl Battle {
    /// Fire every weapon slot once, highest initiative first.
    ///
    /// Ties go to the lower token number, then the lower slot index. A stack
    /// destroyed earlier in the phase does not fire.
    pub(super) fn fire_weapons(&mut self) {
        let mut order: Vec<(i32, usize, usize)> = self
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.is_still_in_battle() && !token.is_disengaging())
            .flat_map(|(index, token)| {
                token
                    .weapon_slots
                    .iter()
                    .map(move |slot| (slot.initiative, index, slot.slot))
            })
            .collect();
        order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

        for (_, index, slot_index) in order {
            if !self.tokens[index].is_still_in_battle() {
                continue;
            }
            let Some(slot) = self.tokens[index].weapon_slots.get(slot_index).cloned() else {
                continue;
            };

            let hits = if slot.is_torpedo() {
                slot.fire_torpedo(&mut self.tokens, &mut self.dice)
            } else {
                slot.fire_beam_weapon(&mut self.tokens)
            };

            for hit in &hits {
                let shooter = &self.tokens[index];
                let target = &self.tokens[hit.target];
                debug!(
                    round = self.round,
                    token = shooter.num,
                    slot = slot.slot,
                    target = target.num,
                    shields = hit.damage.shield_damage,
                    armor = hit.damage.armor_damage,
                    destroyed = hit.damage.ships_destroyed,
                    "volley"
                );
                let action = BattleRecordTokenAction::fire(self.round, shooter, &slot, target, hit);
                self.record.record(action);
            }
        }
    }

    /// Mark disengaging stacks that no enemy can reach as fled.
    pub(super) fn check_retreats(&mut self) {
        let fleeing: Vec<usize> = (0..self.tokens.len())
            .filter(|&index| {
                let token = &self.tokens[index];
                token.is_still_in_battle()
                    && !token.is_starbase()
                    && wants_to_disengage(token)
                    && !self.in_enemy_range(index)
            })
            .collect();

        for index in fleeing {
            let action = BattleRecordTokenAction::ran_away(self.round, &self.tokens[index]);
            self.record.record(action);
            let token = &mut self.tokens[index];
            token.ran_away = true;
            debug!(round = self.round, token = token.num, "token ran away");
        }
    }

    /// Whether any stack that targets token `index` has it in weapon range.
    fn in_enemy_range(&self, index: usize) -> bool {
        let token = &self.tokens[index];
        self.tokens.iter().any(|enemy| {
            enemy.is_still_in_battle()
                && enemy.will_target(token)
                && enemy
                    .weapon_slots
                    .iter()
                    .any(|slot| slot.is_in_range(enemy.position, token.position))
        })
    }
}
