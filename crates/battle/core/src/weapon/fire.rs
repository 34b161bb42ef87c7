use tracing::debug;

use super::{BattleWeaponSlot, WeaponFamily};
use crate::board::BattleVector;
use crate::rng::{BattleDice, CONTEXT_TORPEDO_ROLL};
use crate::token::{BattleToken, StackDamage};

/// What one slot did to one target stack in one round.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VolleyHit {
    pub target: usize,
    pub damage: StackDamage,
    /// Torpedoes that hit; zero for beams.
    pub hits: u32,
    /// Torpedoes that missed; zero for beams.
    pub misses: u32,
}

impl VolleyHit {
    fn new(target: usize) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }
}

impl BattleWeaponSlot {
    fn shooter(&self, tokens: &[BattleToken]) -> Option<(BattleVector, u32, u32)> {
        tokens
            .get(self.token)
            .filter(|owner| owner.is_still_in_battle())
            .map(|owner| (owner.position, owner.quantity, owner.num))
    }

    fn can_strike(&self, from: BattleVector, target: &BattleToken) -> bool {
        target.is_still_in_battle() && self.is_in_range(from, target.position)
    }

    /// Fire this beam slot at its target list.
    ///
    /// A normal beam volley is computed against the first target in range and
    /// anything left after wiping a stack carries to the next target in
    /// range. Gatling beams deal a full volley to every target in range.
    /// Sappers only strip shields and stop at the first target.
    pub fn fire_beam_weapon(&self, tokens: &mut [BattleToken]) -> Vec<VolleyHit> {
        let WeaponFamily::Beam { gatling, sapper, .. } = self.family else {
            return Vec::new();
        };
        let Some((from, ships, _)) = self.shooter(tokens) else {
            return Vec::new();
        };

        let mut hits = Vec::new();
        let mut carried: Option<f64> = None;
        for &index in &self.targets {
            let Some(target) = tokens.get_mut(index) else {
                continue;
            };
            if !self.can_strike(from, target) {
                continue;
            }

            let full_volley = self.beam_damage(from.distance(target.position), target.beam_defense)
                * f64::from(self.count)
                * f64::from(ships);
            let amount = if gatling {
                full_volley
            } else {
                carried.unwrap_or(full_volley)
            };
            if amount <= 0.0 {
                if gatling {
                    continue;
                }
                break;
            }

            let damage = if sapper {
                StackDamage {
                    shield_damage: target.apply_shield_damage(amount),
                    ..StackDamage::default()
                }
            } else {
                target.apply_stack_damage(amount)
            };
            hits.push(VolleyHit {
                damage,
                ..VolleyHit::new(index)
            });

            if gatling {
                continue;
            }
            if sapper || damage.leftover <= 0.0 {
                break;
            }
            carried = Some(damage.leftover);
        }
        hits
    }

    /// Fire this torpedo slot shot by shot.
    ///
    /// Every shot rolls against the effective accuracy for its current target.
    /// Fire moves down the target list only once the current stack is gone or
    /// out of range.
    pub fn fire_torpedo(&self, tokens: &mut [BattleToken], dice: &mut BattleDice) -> Vec<VolleyHit> {
        let WeaponFamily::Torpedo {
            capital_ship_missile,
            splash,
            ..
        } = self.family
        else {
            return Vec::new();
        };
        let Some((from, ships, shooter_num)) = self.shooter(tokens) else {
            return Vec::new();
        };

        let power = f64::from(self.power);
        let shots = self.count * ships;
        let mut hits: Vec<VolleyHit> = Vec::new();
        let mut cursor = 0;

        for _ in 0..shots {
            while let Some(&index) = self.targets.get(cursor) {
                if tokens.get(index).is_some_and(|t| self.can_strike(from, t)) {
                    break;
                }
                cursor += 1;
            }
            let Some(&index) = self.targets.get(cursor) else {
                break;
            };
            let target = &mut tokens[index];

            if hits.last().is_none_or(|hit| hit.target != index) {
                hits.push(VolleyHit::new(index));
            }
            let Some(entry) = hits.last_mut() else {
                break;
            };

            let accuracy = self.torpedo_accuracy(target.jamming);
            if dice.roll(shooter_num, CONTEXT_TORPEDO_ROLL) < accuracy {
                entry.damage.accumulate(target.apply_torpedo_hit(power, capital_ship_missile));
                entry.hits += 1;
            } else {
                entry.damage.shield_damage += target.apply_shield_damage(power * splash);
                entry.misses += 1;
            }
        }

        debug!(
            token = shooter_num,
            slot = self.slot,
            shots,
            targets = hits.len(),
            "torpedo salvo resolved"
        );
        hits
    }
}

#[cfg(test)]
mod tests {
    use crate::board::BattleVector;
    use crate::design::{ShipDesignSpec, WeaponSlotSpec};
    use crate::player::BattlePlan;
    use crate::rng::{BattleDice, RngOracle};
    use crate::token::tests::token_for;
    use crate::token::BattleToken;

    /// Oracle returning a fixed unit value for every draw.
    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn battle_line(weapon: WeaponSlotSpec, shooters: u32, targets: &[(u32, u32, u32)]) -> Vec<BattleToken> {
        let design = ShipDesignSpec::new(1, "Shooter", 50).with_weapon(weapon);
        let mut tokens = vec![token_for(0, 1, &design, shooters, BattlePlan::default())];
        tokens[0].position = BattleVector::new(4, 4);
        for (i, &(armor, shield, quantity)) in targets.iter().enumerate() {
            let num = i as u32 + 1;
            let target = ShipDesignSpec::new(10 + num, "Target", armor).with_shield(shield);
            let mut token = token_for(num, 2, &target, quantity, BattlePlan::default());
            token.position = BattleVector::new(5, 4);
            tokens.push(token);
        }
        let targets = tokens[0].find_weapons_targets(&tokens);
        tokens[0].set_weapons_targets(targets);
        tokens
    }

    #[test]
    fn beam_damages_single_ship() {
        let mut tokens = battle_line(WeaponSlotSpec::beam(1, 10, 1), 1, &[(20, 0, 1)]);
        let slot = tokens[0].weapon_slots[0].clone();
        // range 1, distance 1: 10 * (1 - 0.1) = 9
        let hits = slot.fire_beam_weapon(&mut tokens);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].damage.armor_damage, 9.0);
        assert_eq!(tokens[1].quantity, 1);
        assert_eq!(tokens[1].damage, 9.0);
    }

    #[test]
    fn point_blank_beam_matches_power() {
        let mut tokens = battle_line(WeaponSlotSpec::beam(1, 10, 1), 1, &[(20, 0, 1)]);
        tokens[1].position = tokens[0].position;
        let slot = tokens[0].weapon_slots[0].clone();
        slot.fire_beam_weapon(&mut tokens);
        assert_eq!(tokens[1].damage, 10.0);
        assert_eq!(tokens[1].quantity_damaged, 1);
    }

    #[test]
    fn leftover_carries_to_next_target() {
        let mut tokens = battle_line(WeaponSlotSpec::beam(1, 10, 2), 5, &[(10, 0, 2), (100, 0, 1)]);
        for token in tokens.iter_mut().skip(1) {
            token.position = BattleVector::new(4, 4);
        }
        // both targets are worth nothing, so roster order decides
        let slot = tokens[0].weapon_slots[0].clone();
        assert_eq!(slot.targets, vec![1, 2]);
        let hits = slot.fire_beam_weapon(&mut tokens);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].damage.ships_destroyed, 2);
        assert_eq!(hits[0].damage.leftover, 30.0);
        assert_eq!(hits[1].damage.armor_damage, 30.0);
        assert_eq!(tokens[2].damage, 30.0);
    }

    #[test]
    fn gatling_hits_every_target_in_range() {
        let mut tokens = battle_line(
            WeaponSlotSpec::beam(1, 10, 1).gatling(),
            1,
            &[(100, 0, 1), (100, 0, 1)],
        );
        for token in tokens.iter_mut().skip(1) {
            token.position = BattleVector::new(4, 4);
        }
        let slot = tokens[0].weapon_slots[0].clone();
        let hits = slot.fire_beam_weapon(&mut tokens);
        assert_eq!(hits.len(), 2);
        assert_eq!(tokens[1].damage, 10.0);
        assert_eq!(tokens[2].damage, 10.0);
    }

    #[test]
    fn out_of_range_targets_are_skipped() {
        let mut tokens = battle_line(WeaponSlotSpec::beam(1, 10, 1), 1, &[(20, 0, 1)]);
        tokens[1].position = BattleVector::new(7, 4);
        let slot = tokens[0].weapon_slots[0].clone();
        assert!(slot.fire_beam_weapon(&mut tokens).is_empty());
        assert_eq!(tokens[1].damage_taken, 0.0);
    }

    #[test]
    fn sapper_only_strips_shields() {
        let mut tokens = battle_line(WeaponSlotSpec::beam(1, 50, 1).sapper(), 1, &[(20, 10, 1)]);
        tokens[1].position = tokens[0].position;
        let slot = tokens[0].weapon_slots[0].clone();
        let hits = slot.fire_beam_weapon(&mut tokens);
        assert_eq!(hits[0].damage.shield_damage, 10.0);
        assert_eq!(hits[0].damage.armor_damage, 0.0);
        assert_eq!(tokens[1].quantity_damaged, 0);
    }

    #[test]
    fn certain_torpedo_hit_damages_armor() {
        let mut tokens = battle_line(WeaponSlotSpec::torpedo(1, 10, 4, 1.0), 1, &[(20, 0, 1)]);
        let slot = tokens[0].weapon_slots[0].clone();
        let mut dice = BattleDice::new(7);
        let hits = slot.fire_torpedo(&mut tokens, &mut dice);
        assert_eq!(hits[0].hits, 1);
        assert_eq!(hits[0].damage.armor_damage, 10.0);
        assert!(tokens[1].is_still_in_battle());
        assert_eq!(tokens[1].damage, 10.0);
        assert_eq!(dice.draws(), 1);
    }

    #[test]
    fn torpedoes_move_on_after_a_kill() {
        let mut tokens = battle_line(
            WeaponSlotSpec::torpedo(3, 10, 4, 1.0),
            1,
            &[(10, 0, 1), (50, 0, 1)],
        );
        let slot = tokens[0].weapon_slots[0].clone();
        let hits = slot.fire_torpedo(&mut tokens, &mut BattleDice::new(1));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].damage.ships_destroyed, 1);
        assert_eq!(hits[1].hits, 2);
        assert_eq!(tokens[2].damage, 20.0);
    }

    #[test]
    fn torpedo_misses_splash_shields() {
        let mut tokens = battle_line(WeaponSlotSpec::torpedo(2, 16, 4, 0.5), 1, &[(50, 20, 1)]);
        let slot = tokens[0].weapon_slots[0].clone();
        let mut dice = BattleDice::with_rng(0, Fixed(u32::MAX));
        let hits = slot.fire_torpedo(&mut tokens, &mut dice);
        assert_eq!(hits[0].misses, 2);
        // 2 * 16 / 8
        assert_eq!(hits[0].damage.shield_damage, 4.0);
        assert_eq!(tokens[1].stack_shields, 16.0);
        assert_eq!(tokens[1].quantity_damaged, 0);
    }
}
