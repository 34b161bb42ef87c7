use bitflags::bitflags;

use crate::design::{ShipDesignSpec, WeaponKind};
use crate::player::BattleTarget;

bitflags! {
    /// Combat roles of a token, derived once from its design.
    ///
    /// Target categories in battle plans are answered purely from these bits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TokenAttributes: u8 {
        const ARMED          = 1 << 0;
        const BEAMS          = 1 << 1;
        const TORPEDOES      = 1 << 2;
        const STARBASE       = 1 << 3;
        const BOMBER         = 1 << 4;
        const FREIGHTER      = 1 << 5;
        const FUEL_TRANSPORT = 1 << 6;
    }
}

impl TokenAttributes {
    pub fn from_design(design: &ShipDesignSpec) -> Self {
        let mut attributes = Self::empty();
        for weapon in design.weapons.iter().filter(|w| w.count > 0 && w.power > 0) {
            attributes |= Self::ARMED;
            attributes |= match weapon.kind {
                WeaponKind::Beam => Self::BEAMS,
                WeaponKind::Torpedo => Self::TORPEDOES,
            };
        }
        attributes.set(Self::STARBASE, design.starbase);
        attributes.set(Self::BOMBER, design.bomber);
        attributes.set(Self::FREIGHTER, design.cargo_capacity > 0);
        attributes.set(Self::FUEL_TRANSPORT, design.fuel_transport);
        attributes
    }

    /// Whether a token with these attributes falls into `target`.
    pub fn matches(self, target: BattleTarget) -> bool {
        match target {
            BattleTarget::None => false,
            BattleTarget::Any => true,
            BattleTarget::Starbase => self.contains(Self::STARBASE),
            BattleTarget::ArmedShips => {
                self.contains(Self::ARMED) && !self.contains(Self::STARBASE)
            }
            BattleTarget::UnarmedShips => {
                !self.contains(Self::ARMED) && !self.contains(Self::STARBASE)
            }
            BattleTarget::BombersFreighters => self.intersects(Self::BOMBER | Self::FREIGHTER),
            BattleTarget::FuelTransports => self.contains(Self::FUEL_TRANSPORT),
            BattleTarget::Freighters => self.contains(Self::FREIGHTER),
        }
    }
}
