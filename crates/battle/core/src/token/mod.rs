//! Battle tokens: one stack of identical ships owned by one player.
//!
//! A token owns every piece of combat-mutable state for its stack. Damage is
//! tracked as an aggregate `(quantity, quantity_damaged, damage)` triple rather
//! than per ship, see [`damage`] for the bookkeeping rules.

mod attributes;
mod damage;

use std::collections::BTreeMap;

pub use attributes::TokenAttributes;
pub use damage::StackDamage;

use crate::board::BattleVector;
use crate::config::BattleRules;
use crate::design::{Cost, DesignId, ShipDesignSpec};
use crate::fleet::{Fleet, ShipStack};
use crate::player::{BattlePlan, BattleTactic, BattleTarget, Player, PlayerId, PlayerRelation};
use crate::weapon::BattleWeaponSlot;

/// One stack of ships taking part in a battle.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleToken {
    /// Roster index, also the token's number in the record.
    pub num: u32,
    pub player: PlayerId,
    pub fleet_num: u32,
    pub design: DesignId,
    pub design_name: String,

    pub initiative: i32,
    /// Quarter cells per round.
    pub movement: u32,
    /// Armor per ship.
    pub armor: u32,
    /// Shields per ship.
    pub shield: u32,
    /// Cost per ship.
    pub cost: Cost,
    pub beam_defense: f64,
    pub jamming: f64,
    pub attributes: TokenAttributes,

    pub position: BattleVector,
    pub quantity: u32,
    pub quantity_damaged: u32,
    /// Armor damage carried by each damaged ship.
    pub damage: f64,
    pub stack_shields: f64,
    pub total_stack_shields: f64,

    /// Ships lost in this battle.
    pub destroyed: u32,
    pub ran_away: bool,
    /// Shield and armor damage absorbed in this battle.
    pub damage_taken: f64,
    pub moves_made: u32,

    pub plan: BattlePlan,
    relations: BTreeMap<PlayerId, PlayerRelation>,
    shield_regen_rate: f64,

    pub weapon_slots: Vec<BattleWeaponSlot>,
}

impl BattleToken {
    /// Build a token for one stack of a fleet.
    ///
    /// Callers validate the stack; quantities are clamped here only so the
    /// aggregate invariants hold from the first round.
    pub fn new(
        num: u32,
        fleet: &Fleet,
        stack: &ShipStack,
        design: &ShipDesignSpec,
        owner: &Player,
        plan: &BattlePlan,
        rules: &BattleRules,
    ) -> Self {
        let quantity = stack.quantity;
        let total_stack_shields = f64::from(design.shield) * f64::from(quantity);

        let mut token = Self {
            num,
            player: fleet.player,
            fleet_num: fleet.num,
            design: design.id,
            design_name: design.name.clone(),
            initiative: design.initiative,
            movement: if design.starbase { 0 } else { design.movement },
            armor: design.armor,
            shield: design.shield,
            cost: design.cost,
            beam_defense: design.beam_defense.clamp(0.0, 1.0),
            jamming: design.jamming.clamp(0.0, 1.0),
            attributes: TokenAttributes::from_design(design),
            position: BattleVector::default(),
            quantity,
            quantity_damaged: stack.quantity_damaged.min(quantity),
            damage: stack.damage,
            stack_shields: total_stack_shields,
            total_stack_shields,
            destroyed: 0,
            ran_away: false,
            damage_taken: 0.0,
            moves_made: 0,
            plan: plan.clone(),
            relations: owner.relations.clone(),
            shield_regen_rate: owner.race.shield_regen_rate,
            weapon_slots: Vec::new(),
        };
        token.weapon_slots = BattleWeaponSlot::from_design(num as usize, design, rules);
        token.normalize();
        token
    }

    /// True unless the stack was destroyed or fled.
    pub fn is_still_in_battle(&self) -> bool {
        self.quantity > 0 && !self.ran_away
    }

    pub fn is_armed(&self) -> bool {
        self.attributes.contains(TokenAttributes::ARMED)
    }

    pub fn is_starbase(&self) -> bool {
        self.attributes.contains(TokenAttributes::STARBASE)
    }

    /// Took any damage this battle.
    pub fn is_challenged(&self) -> bool {
        self.damage_taken > 0.0 || self.destroyed > 0
    }

    /// Tactic currently in force; `DisengageIfChallenged` turns into
    /// `Disengage` once the stack has been hit.
    pub fn tactic(&self) -> BattleTactic {
        match self.plan.tactic {
            BattleTactic::DisengageIfChallenged if self.is_challenged() => BattleTactic::Disengage,
            tactic => tactic,
        }
    }

    /// Whether the token tries to leave the battle rather than fight.
    pub fn is_disengaging(&self) -> bool {
        self.tactic() == BattleTactic::Disengage
    }

    pub fn relation_to(&self, other: PlayerId) -> PlayerRelation {
        if other == self.player {
            return PlayerRelation::Friend;
        }
        self.relations.get(&other).copied().unwrap_or_default()
    }

    /// Whether this token engages stacks owned by `other`.
    pub fn will_attack(&self, other: PlayerId) -> bool {
        if !self.is_armed() || self.is_disengaging() || other == self.player {
            return false;
        }
        self.plan.attack_who.includes(self.relation_to(other))
    }

    /// Whether this token falls into the `target` category.
    pub fn is_target_of(&self, target: BattleTarget) -> bool {
        self.attributes.matches(target)
    }

    /// Whether this token would pick `other` as a primary or secondary target.
    pub fn will_target(&self, other: &BattleToken) -> bool {
        self.will_attack(other.player)
            && (other.is_target_of(self.plan.primary_target)
                || other.is_target_of(self.plan.secondary_target))
    }

    /// Restore a share of the stack shields; a stack with no shields left
    /// never regenerates.
    pub fn regenerate_shields(&mut self) {
        if self.shield_regen_rate <= 0.0 || self.stack_shields <= 0.0 {
            return;
        }
        let regen = (self.total_stack_shields * self.shield_regen_rate).round();
        self.stack_shields = (self.stack_shields + regen).clamp(0.0, self.total_stack_shields);
    }

    /// Chebyshev distance from the token to `position`.
    pub fn distance_away(&self, position: BattleVector) -> u32 {
        self.position.distance(position)
    }

    /// Armor left across the whole stack.
    pub fn remaining_armor(&self) -> f64 {
        let total = f64::from(self.armor) * f64::from(self.quantity);
        (total - self.damage * f64::from(self.quantity_damaged)).max(0.0)
    }

    /// Boranium plus resources of every ship still alive.
    pub fn stack_value(&self) -> f64 {
        let cost = self.cost.times(self.quantity);
        f64::from(cost.boranium) + f64::from(cost.resources)
    }

    /// Single-cell steps available in `round` (zero-based).
    ///
    /// Movement accrues in quarter cells so a 2½ speed stack alternates
    /// between two and three steps.
    pub fn moves_in_round(&self, round: u32) -> u32 {
        if self.is_starbase() {
            return 0;
        }
        let per_cell = BattleRules::MOVEMENT_UNITS_PER_CELL;
        self.movement * (round + 1) / per_cell - self.movement * round / per_cell
    }

    /// Recompute the target list of every weapon slot.
    pub fn find_weapons_targets(&self, tokens: &[BattleToken]) -> Vec<Vec<usize>> {
        self.weapon_slots
            .iter()
            .map(|slot| slot.find_targets(tokens))
            .collect()
    }

    pub fn set_weapons_targets(&mut self, targets: Vec<Vec<usize>>) {
        for (slot, targets) in self.weapon_slots.iter_mut().zip(targets) {
            slot.targets = targets;
        }
    }

    /// The most attractive first-choice target across all weapon slots.
    pub fn find_move_target(&self, tokens: &[BattleToken]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for slot in &self.weapon_slots {
            let Some(&target) = slot
                .targets
                .iter()
                .find(|&&t| tokens.get(t).is_some_and(BattleToken::is_still_in_battle))
            else {
                continue;
            };
            let attractiveness = slot.attractiveness(&tokens[target]);
            if best.is_none_or(|(_, score)| attractiveness > score) {
                best = Some((target, attractiveness));
            }
        }
        best.map(|(target, _)| target)
    }
}
