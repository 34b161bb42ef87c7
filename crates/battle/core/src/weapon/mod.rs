//! Weapon slots mounted on battle tokens.
//!
//! A slot aggregates every identical weapon on one design; at fire time it is
//! multiplied by the number of ships left in the stack. The two weapon families
//! share range, power and target bookkeeping and differ in how damage is
//! computed and applied:
//!
//! - **Beams** resolve as one aggregate volley per round, attenuated by range
//!   and by the target's deflectors.
//! - **Torpedoes** resolve shot by shot with an accuracy roll each, unaffected
//!   by range.
//!
//! # Modules
//!
//! - `targeting`: legal targets, attractiveness ranking, effective accuracy
//! - `estimate`: expected damage used by targeting and movement
//! - `fire`: damage resolution against live tokens

mod estimate;
mod fire;
mod targeting;

pub use estimate::TorpedoEstimate;
pub use fire::VolleyHit;

use crate::board::BattleVector;
use crate::config::BattleRules;
use crate::design::{ShipDesignSpec, WeaponKind, WeaponSlotSpec};

/// Family-specific behaviour of a weapon slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeaponFamily {
    Beam {
        /// Hits every target in range with the full volley.
        gatling: bool,
        /// Damages shields only.
        sapper: bool,
        /// Fraction of power lost at maximum range.
        dropoff: f64,
    },
    Torpedo {
        /// Base hit chance before jamming and computers.
        accuracy: f64,
        /// Double armor damage once shields are down.
        capital_ship_missile: bool,
        /// Fraction of power a miss still deals to shields.
        splash: f64,
    },
}

/// One merged weapon slot of a token.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleWeaponSlot {
    /// Index of the owning token in the battle roster.
    pub token: usize,
    /// Index of this slot on the owning token.
    pub slot: usize,
    pub family: WeaponFamily,
    pub range: u32,
    pub power: u32,
    /// Weapons in this slot per ship.
    pub count: u32,
    pub initiative: i32,
    /// Battle computer bonus countering enemy jamming.
    pub torpedo_bonus: f64,
    /// Token indices in firing priority order, refreshed every round.
    pub targets: Vec<usize>,
}

impl BattleWeaponSlot {
    /// Build the merged weapon slots of a design for token `token`.
    pub fn from_design(token: usize, design: &ShipDesignSpec, rules: &BattleRules) -> Vec<Self> {
        let mut merged: Vec<WeaponSlotSpec> = Vec::new();
        for spec in design.weapons.iter().filter(|w| w.count > 0 && w.power > 0) {
            match merged.iter_mut().find(|m| m.merges_with(spec)) {
                Some(existing) => existing.count += spec.count,
                None => merged.push(spec.clone()),
            }
        }

        merged
            .into_iter()
            .enumerate()
            .map(|(slot, spec)| {
                let (family, power) = match spec.kind {
                    WeaponKind::Beam => (
                        WeaponFamily::Beam {
                            gatling: spec.gatling,
                            sapper: spec.sapper,
                            dropoff: rules.beam_range_dropoff,
                        },
                        (f64::from(spec.power) * (1.0 + design.beam_bonus.max(0.0))).round()
                            as u32,
                    ),
                    WeaponKind::Torpedo => (
                        WeaponFamily::Torpedo {
                            accuracy: spec.accuracy.clamp(0.0, 1.0),
                            capital_ship_missile: spec.capital_ship_missile,
                            splash: rules.torpedo_splash_damage,
                        },
                        spec.power,
                    ),
                };
                Self {
                    token,
                    slot,
                    family,
                    range: spec.range + spec.range_bonus,
                    power,
                    count: spec.count,
                    initiative: design.initiative + spec.initiative,
                    torpedo_bonus: design.torpedo_bonus.clamp(0.0, 1.0),
                    targets: Vec::new(),
                }
            })
            .collect()
    }

    pub fn is_beam(&self) -> bool {
        matches!(self.family, WeaponFamily::Beam { .. })
    }

    pub fn is_torpedo(&self) -> bool {
        matches!(self.family, WeaponFamily::Torpedo { .. })
    }

    pub fn is_gatling(&self) -> bool {
        matches!(self.family, WeaponFamily::Beam { gatling: true, .. })
    }

    pub fn is_sapper(&self) -> bool {
        matches!(self.family, WeaponFamily::Beam { sapper: true, .. })
    }

    /// Whether `position` is within range of a shooter standing at `from`.
    pub fn is_in_range(&self, from: BattleVector, position: BattleVector) -> bool {
        from.distance(position) <= self.range
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::design::Cost;

    #[test]
    fn identical_mounts_merge() {
        let design = ShipDesignSpec::new(1, "Cruiser", 100)
            .with_weapon(WeaponSlotSpec::beam(2, 18, 2))
            .with_weapon(WeaponSlotSpec::torpedo(1, 12, 4, 0.35))
            .with_weapon(WeaponSlotSpec::beam(3, 18, 2));
        let slots = BattleWeaponSlot::from_design(4, &design, &BattleRules::default());
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].count, 5);
        assert_eq!(slots[0].token, 4);
        assert_eq!(slots[1].slot, 1);
        assert!(slots[1].is_torpedo());
    }

    #[test]
    fn modifiers_are_folded_in() {
        let mut design = ShipDesignSpec::new(1, "Cruiser", 100)
            .with_cost(Cost::new(1, 1, 1, 1))
            .with_initiative(3)
            .with_weapon(WeaponSlotSpec {
                range_bonus: 1,
                ..WeaponSlotSpec::beam(1, 10, 2).with_initiative(2)
            });
        design.beam_bonus = 0.2;
        let slots = BattleWeaponSlot::from_design(0, &design, &BattleRules::default());
        assert_eq!(slots[0].power, 12);
        assert_eq!(slots[0].range, 3);
        assert_eq!(slots[0].initiative, 5);
    }

    #[test]
    fn range_check_is_chebyshev() {
        let design = ShipDesignSpec::new(1, "Frigate", 20).with_weapon(WeaponSlotSpec::beam(1, 10, 2));
        let slot = &BattleWeaponSlot::from_design(0, &design, &BattleRules::default())[0];
        let from = BattleVector::new(3, 3);
        assert!(slot.is_in_range(from, BattleVector::new(5, 5)));
        assert!(!slot.is_in_range(from, BattleVector::new(6, 4)));
    }
}
