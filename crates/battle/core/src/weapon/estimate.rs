use super::{BattleWeaponSlot, WeaponFamily};
use crate::board::BattleVector;
use crate::token::BattleToken;

/// Expected damage of a torpedo volley, split by what it lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TorpedoEstimate {
    pub shield_damage: f64,
    pub armor_damage: f64,
}

impl TorpedoEstimate {
    pub fn total(&self) -> f64 {
        self.shield_damage + self.armor_damage
    }
}

impl BattleWeaponSlot {
    fn beam_power_at(&self, distance: u32, beam_defense: f64) -> f64 {
        let WeaponFamily::Beam { dropoff, .. } = self.family else {
            return 0.0;
        };
        let power = f64::from(self.power);
        let attenuated = if self.range > 0 {
            power * (1.0 - f64::from(distance) / f64::from(self.range) * dropoff)
        } else {
            power
        };
        (attenuated * (1.0 - beam_defense)).max(0.0)
    }

    /// Damage of a single beam at `distance` against `beam_defense`.
    pub fn beam_damage(&self, distance: u32, beam_defense: f64) -> f64 {
        self.beam_power_at(distance, beam_defense).round()
    }

    /// Planning variant of [`Self::beam_damage`]; rounds up.
    pub fn estimated_beam_damage(&self, distance: u32, beam_defense: f64) -> f64 {
        self.beam_power_at(distance, beam_defense).ceil()
    }

    /// Expected result of `shots` torpedoes against `target`.
    ///
    /// Hits split evenly between shields and armor, each part capped by what
    /// the stack has left. Misses still splash a fraction of their power onto
    /// the remaining shields.
    pub fn estimated_torpedo_damage_to_target(
        &self,
        shots: u32,
        target: &BattleToken,
    ) -> TorpedoEstimate {
        let WeaponFamily::Torpedo { splash, .. } = self.family else {
            return TorpedoEstimate::default();
        };
        let accuracy = self.torpedo_accuracy(target.jamming);
        let hits = (f64::from(shots) * accuracy).round();
        let misses = f64::from(shots) - hits;
        let power = f64::from(self.power);

        let hit_damage = power * hits;
        let shield_damage = (hit_damage / 2.0).min(target.stack_shields);
        let armor_damage = (hit_damage / 2.0).min(target.remaining_armor());
        let splash_damage =
            (power * misses * splash).min((target.stack_shields - shield_damage).max(0.0));

        TorpedoEstimate {
            shield_damage: shield_damage + splash_damage,
            armor_damage,
        }
    }

    /// Expected damage this slot deals to `target` standing at `at`, fired by
    /// `ships` ships standing at `from`. Zero when out of range.
    pub fn estimated_damage(
        &self,
        from: BattleVector,
        ships: u32,
        target: &BattleToken,
        at: BattleVector,
    ) -> f64 {
        if ships == 0 || !target.is_still_in_battle() || !self.is_in_range(from, at) {
            return 0.0;
        }
        match self.family {
            WeaponFamily::Beam { sapper, .. } => {
                let per_beam = self.estimated_beam_damage(from.distance(at), target.beam_defense);
                let volley = per_beam * f64::from(self.count) * f64::from(ships);
                if sapper {
                    volley.min(target.stack_shields)
                } else {
                    volley.min(target.stack_shields + target.remaining_armor())
                }
            }
            WeaponFamily::Torpedo { .. } => self
                .estimated_torpedo_damage_to_target(self.count * ships, target)
                .total(),
        }
    }
}
