//! Damage bookkeeping on ship stacks.
//!
//! A stack never tracks individual ships. It keeps how many ships are alive,
//! how many of those carry damage, and the damage per damaged ship. Kills are
//! derived by dividing accumulated armor damage by per-ship armor, and whatever
//! is left over is spread evenly across the survivors.
//!
//! # Invariants (after every mutation)
//!
//! - `0 <= quantity_damaged <= quantity`
//! - `0 <= damage < armor`, and `damage == 0` when no ship is damaged
//! - `0 <= stack_shields <= total_stack_shields == shield * quantity`

use super::BattleToken;

/// Damage applied to one stack by one volley or shot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StackDamage {
    pub shield_damage: f64,
    pub armor_damage: f64,
    pub ships_destroyed: u32,
    /// Damage that could not be absorbed because the whole stack died.
    pub leftover: f64,
}

impl StackDamage {
    pub fn total(&self) -> f64 {
        self.shield_damage + self.armor_damage
    }

    pub fn accumulate(&mut self, other: StackDamage) {
        self.shield_damage += other.shield_damage;
        self.armor_damage += other.armor_damage;
        self.ships_destroyed += other.ships_destroyed;
        self.leftover += other.leftover;
    }
}

impl BattleToken {
    /// Apply an aggregate volley: shields first, then armor spread over the
    /// stack.
    ///
    /// Armor damage short of a full kill is spread evenly over the stack, so
    /// the survivors share it even when it would finish a ship: 30 against
    /// two 20-armor ships kills one and leaves the other carrying 10.
    ///
    /// When the volley kills every ship, the unused part is returned in
    /// [`StackDamage::leftover`] so the caller can carry it to the next target.
    pub fn apply_stack_damage(&mut self, damage: f64) -> StackDamage {
        let mut result = StackDamage::default();
        if damage <= 0.0 {
            return result;
        }
        if self.quantity == 0 || self.armor == 0 {
            result.leftover = damage;
            return result;
        }

        let shields_consumed = damage.min(self.stack_shields).max(0.0);
        self.stack_shields -= shields_consumed;
        result.shield_damage = shields_consumed;

        let armor_damage = damage - shields_consumed;
        if armor_damage <= 0.0 {
            self.damage_taken += result.total();
            self.normalize();
            return result;
        }

        let armor = f64::from(self.armor);
        let existing_damage = self.damage * f64::from(self.quantity_damaged);
        let total_damage = existing_damage + armor_damage;
        let ships_destroyed = ((total_damage / armor).floor() as u32).min(self.quantity);

        if ships_destroyed == self.quantity {
            let armor_consumed = armor * f64::from(self.quantity) - existing_damage;
            result.armor_damage = armor_consumed;
            result.ships_destroyed = ships_destroyed;
            result.leftover = (damage - armor_consumed - shields_consumed).max(0.0);

            self.destroyed += ships_destroyed;
            self.quantity = 0;
            self.quantity_damaged = 0;
            self.damage = 0.0;
        } else {
            result.armor_damage = armor_damage;
            result.ships_destroyed = ships_destroyed;

            self.destroyed += ships_destroyed;
            self.quantity -= ships_destroyed;
            let remaining_damage = total_damage - f64::from(ships_destroyed) * armor;
            if remaining_damage > 0.0 {
                self.damage = remaining_damage / f64::from(self.quantity);
                self.quantity_damaged = self.quantity;
            } else {
                self.damage = 0.0;
                self.quantity_damaged = 0;
            }
        }

        self.damage_taken += result.shield_damage + result.armor_damage;
        self.normalize();
        result
    }

    /// Apply damage that can only touch shields; returns what was absorbed.
    pub fn apply_shield_damage(&mut self, damage: f64) -> f64 {
        if damage <= 0.0 || !self.is_still_in_battle() {
            return 0.0;
        }
        let consumed = damage.min(self.stack_shields).max(0.0);
        self.stack_shields -= consumed;
        self.damage_taken += consumed;
        self.normalize();
        consumed
    }

    /// Apply one torpedo hit of `power`.
    ///
    /// While the stack has shields the hit splits evenly between shields and
    /// armor (shields absorb at most what they have left). Once shields are
    /// gone the whole hit lands on armor, doubled for capital ship missiles.
    /// Armor damage goes to a single ship; damage beyond that ship's remaining
    /// armor carries on to the next ship in the stack.
    pub fn apply_torpedo_hit(&mut self, power: f64, capital_ship_missile: bool) -> StackDamage {
        let mut result = StackDamage::default();
        if power <= 0.0 {
            return result;
        }
        if !self.is_still_in_battle() || self.armor == 0 {
            result.leftover = power;
            return result;
        }

        let mut pending = if self.stack_shields > 0.0 {
            let shield_part = (power / 2.0).min(self.stack_shields);
            self.stack_shields -= shield_part;
            result.shield_damage = shield_part;
            power - shield_part
        } else if capital_ship_missile {
            power * 2.0
        } else {
            power
        };

        let armor = f64::from(self.armor);
        while pending > 0.0 && self.quantity > 0 {
            let current = if self.quantity_damaged > 0 {
                self.damage
            } else {
                0.0
            };
            let needed = armor - current;
            if pending >= needed {
                pending -= needed;
                result.armor_damage += needed;
                result.ships_destroyed += 1;

                self.destroyed += 1;
                self.quantity -= 1;
                if self.quantity_damaged > 0 {
                    self.quantity_damaged -= 1;
                }
                if self.quantity_damaged == 0 {
                    self.damage = 0.0;
                }
            } else {
                result.armor_damage += pending;
                if self.quantity_damaged > 0 {
                    let damaged = f64::from(self.quantity_damaged);
                    self.damage = (self.damage * damaged + pending) / damaged;
                } else {
                    self.quantity_damaged = 1;
                    self.damage = pending;
                }
                pending = 0.0;
            }
        }
        result.leftover = pending;

        self.damage_taken += result.shield_damage + result.armor_damage;
        self.normalize();
        result
    }

    /// Clamp the aggregate state back into its valid ranges.
    pub(crate) fn normalize(&mut self) {
        if self.quantity == 0 {
            self.quantity_damaged = 0;
            self.damage = 0.0;
        }
        self.quantity_damaged = self.quantity_damaged.min(self.quantity);
        if self.quantity_damaged == 0 || !self.damage.is_finite() {
            self.damage = 0.0;
            if self.quantity_damaged > 0 {
                self.quantity_damaged = 0;
            }
        }
        self.damage = self.damage.clamp(0.0, f64::from(self.armor));

        self.total_stack_shields = f64::from(self.shield) * f64::from(self.quantity);
        self.stack_shields = if self.stack_shields.is_finite() {
            self.stack_shields.clamp(0.0, self.total_stack_shields)
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use crate::design::{ShipDesignSpec, WeaponSlotSpec};
    use crate::player::BattlePlan;
    use crate::token::tests::token_for;

    fn design(armor: u32, shield: u32) -> ShipDesignSpec {
        ShipDesignSpec::new(1, "Target", armor)
            .with_shield(shield)
            .with_weapon(WeaponSlotSpec::beam(1, 10, 1))
    }

    fn assert_invariants(token: &crate::token::BattleToken) {
        assert!(token.quantity_damaged <= token.quantity);
        assert!(token.damage >= 0.0);
        assert!(token.stack_shields >= 0.0);
        assert!(token.stack_shields <= token.total_stack_shields);
    }

    #[test]
    fn partial_damage_to_single_ship() {
        let mut token = token_for(0, 1, &design(20, 0), 1, BattlePlan::default());
        let result = token.apply_stack_damage(10.0);
        assert_eq!(result.armor_damage, 10.0);
        assert_eq!(result.ships_destroyed, 0);
        assert_eq!(token.quantity, 1);
        assert_eq!(token.quantity_damaged, 1);
        assert_eq!(token.damage, 10.0);
        assert_invariants(&token);
    }

    #[test]
    fn exact_kill_leaves_survivor_clean() {
        let mut token = token_for(0, 1, &design(20, 0), 2, BattlePlan::default());
        let result = token.apply_stack_damage(20.0);
        assert_eq!(result.ships_destroyed, 1);
        assert_eq!(token.quantity, 1);
        assert_eq!(token.quantity_damaged, 0);
        assert_eq!(token.damage, 0.0);
        assert_invariants(&token);
    }

    #[test]
    fn overkill_spreads_to_survivors() {
        let mut token = token_for(0, 1, &design(20, 0), 2, BattlePlan::default());
        let result = token.apply_stack_damage(30.0);
        assert_eq!(result.ships_destroyed, 1);
        assert_eq!(result.leftover, 0.0);
        assert_eq!(token.quantity, 1);
        assert_eq!(token.quantity_damaged, 1);
        assert_eq!(token.damage, 10.0);
    }

    #[test]
    fn damage_spreads_over_whole_stack() {
        let mut token = token_for(0, 1, &design(20, 0), 4, BattlePlan::default());
        token.apply_stack_damage(10.0);
        assert_eq!(token.quantity_damaged, 4);
        assert_eq!(token.damage, 2.5);

        // existing 10 + 30 = 40 => two kills, nothing left over
        let result = token.apply_stack_damage(30.0);
        assert_eq!(result.ships_destroyed, 2);
        assert_eq!(token.quantity, 2);
        assert_eq!(token.quantity_damaged, 0);
        assert_invariants(&token);
    }

    #[test]
    fn wiped_stack_returns_leftover() {
        let mut token = token_for(0, 1, &design(20, 10), 2, BattlePlan::default());
        let result = token.apply_stack_damage(70.0);
        assert_eq!(result.shield_damage, 20.0);
        assert_eq!(result.armor_damage, 40.0);
        assert_eq!(result.ships_destroyed, 2);
        assert_eq!(result.leftover, 10.0);
        assert!(!token.is_still_in_battle());
        assert_eq!(token.destroyed, 2);
        assert_invariants(&token);
    }

    #[test]
    fn shields_absorb_first() {
        let mut token = token_for(0, 1, &design(20, 15), 1, BattlePlan::default());
        let result = token.apply_stack_damage(10.0);
        assert_eq!(result.shield_damage, 10.0);
        assert_eq!(result.armor_damage, 0.0);
        assert_eq!(token.stack_shields, 5.0);
        assert_eq!(token.quantity_damaged, 0);
    }

    #[test]
    fn torpedo_splits_while_shields_hold() {
        let mut token = token_for(0, 1, &design(50, 20), 1, BattlePlan::default());
        let result = token.apply_torpedo_hit(10.0, false);
        assert_eq!(result.shield_damage, 5.0);
        assert_eq!(result.armor_damage, 5.0);
        assert_eq!(token.stack_shields, 15.0);
        assert_eq!(token.damage, 5.0);
    }

    #[test]
    fn torpedo_overflows_thin_shields_into_armor() {
        let mut token = token_for(0, 1, &design(50, 2), 1, BattlePlan::default());
        let result = token.apply_torpedo_hit(10.0, false);
        assert_eq!(result.shield_damage, 2.0);
        assert_eq!(result.armor_damage, 8.0);
    }

    #[test]
    fn capital_missile_doubles_once_shields_are_down() {
        let mut plain = token_for(0, 1, &design(50, 0), 1, BattlePlan::default());
        let mut capital = plain.clone();
        assert_eq!(plain.apply_torpedo_hit(10.0, false).armor_damage, 10.0);
        assert_eq!(capital.apply_torpedo_hit(10.0, true).armor_damage, 20.0);
    }

    #[test]
    fn torpedo_kill_carries_into_next_ship() {
        let mut token = token_for(0, 1, &design(20, 0), 3, BattlePlan::default());
        token.apply_torpedo_hit(15.0, false);
        assert_eq!((token.quantity_damaged, token.damage), (1, 15.0));

        let result = token.apply_torpedo_hit(15.0, false);
        assert_eq!(result.ships_destroyed, 1);
        assert_eq!(result.armor_damage, 15.0);
        assert_eq!(token.quantity, 2);
        assert_eq!((token.quantity_damaged, token.damage), (1, 10.0));
        assert_invariants(&token);
    }

    #[test]
    fn shield_only_damage_never_touches_armor() {
        let mut token = token_for(0, 1, &design(20, 5), 1, BattlePlan::default());
        assert_eq!(token.apply_shield_damage(8.0), 5.0);
        assert_eq!(token.stack_shields, 0.0);
        assert_eq!(token.quantity_damaged, 0);
        assert_eq!(token.apply_shield_damage(8.0), 0.0);
    }
}
