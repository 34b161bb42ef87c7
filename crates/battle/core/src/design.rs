//! Combat statistics of ship designs.
//!
//! These are computed upstream from hulls, components and research and handed
//! to the engine already resolved; the engine never looks at components.

use std::fmt;

/// Design identifier referenced by fleet stacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DesignId(pub u32);

impl fmt::Display for DesignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mineral and resource cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Cost {
    pub ironium: u32,
    pub boranium: u32,
    pub germanium: u32,
    pub resources: u32,
}

impl Cost {
    pub const fn new(ironium: u32, boranium: u32, germanium: u32, resources: u32) -> Self {
        Self {
            ironium,
            boranium,
            germanium,
            resources,
        }
    }

    pub const fn times(self, quantity: u32) -> Self {
        Self {
            ironium: self.ironium.saturating_mul(quantity),
            boranium: self.boranium.saturating_mul(quantity),
            germanium: self.germanium.saturating_mul(quantity),
            resources: self.resources.saturating_mul(quantity),
        }
    }
}

/// Weapon family of a mounted slot.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaponKind {
    #[default]
    Beam,
    Torpedo,
}

/// One weapon slot of a design, as resolved upstream.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponSlotSpec {
    pub kind: WeaponKind,
    /// Mounted weapons in this slot, per ship.
    pub count: u32,
    /// Damage per shot.
    pub power: u32,
    /// Range in cells.
    pub range: u32,
    /// Added to the design initiative when ordering fire.
    pub initiative: i32,
    /// Base hit chance for torpedoes, `0..=1`.
    pub accuracy: f64,
    /// Beam hits every target in range at once.
    pub gatling: bool,
    /// Beam damages shields only.
    pub sapper: bool,
    /// Torpedo deals double armor damage once shields are down.
    pub capital_ship_missile: bool,
    /// Extra range granted by the hull.
    pub range_bonus: u32,
}

impl WeaponSlotSpec {
    pub fn beam(count: u32, power: u32, range: u32) -> Self {
        Self {
            kind: WeaponKind::Beam,
            count,
            power,
            range,
            ..Self::default()
        }
    }

    pub fn torpedo(count: u32, power: u32, range: u32, accuracy: f64) -> Self {
        Self {
            kind: WeaponKind::Torpedo,
            count,
            power,
            range,
            accuracy,
            ..Self::default()
        }
    }

    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.initiative = initiative;
        self
    }

    pub fn gatling(mut self) -> Self {
        self.gatling = true;
        self
    }

    pub fn sapper(mut self) -> Self {
        self.sapper = true;
        self
    }

    pub fn capital_ship_missile(mut self) -> Self {
        self.capital_ship_missile = true;
        self
    }

    /// Slots that only differ in mount count fire as one.
    pub fn merges_with(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.power == other.power
            && self.range + self.range_bonus == other.range + other.range_bonus
            && self.initiative == other.initiative
            && self.accuracy == other.accuracy
            && self.gatling == other.gatling
            && self.sapper == other.sapper
            && self.capital_ship_missile == other.capital_ship_missile
    }
}

/// Combat-relevant statistics of one ship design.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShipDesignSpec {
    pub id: DesignId,
    pub name: String,
    /// Armor per ship.
    pub armor: u32,
    /// Shields per ship.
    pub shield: u32,
    /// Cost per ship.
    pub cost: Cost,
    pub initiative: i32,
    /// Battle movement in quarter cells per round; starbases have none.
    pub movement: u32,
    /// Beam deflection, `0..1`.
    pub beam_defense: f64,
    /// Torpedo jamming, `0..1`.
    pub jamming: f64,
    /// Battle computer accuracy bonus for torpedoes, `0..1`.
    pub torpedo_bonus: f64,
    /// Capacitor multiplier bonus on beam power.
    pub beam_bonus: f64,
    pub starbase: bool,
    pub bomber: bool,
    pub fuel_transport: bool,
    pub cargo_capacity: u32,
    pub weapons: Vec<WeaponSlotSpec>,
}

impl ShipDesignSpec {
    pub fn new(id: u32, name: impl Into<String>, armor: u32) -> Self {
        Self {
            id: DesignId(id),
            name: name.into(),
            armor,
            movement: 4,
            ..Self::default()
        }
    }

    pub fn with_shield(mut self, shield: u32) -> Self {
        self.shield = shield;
        self
    }

    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.initiative = initiative;
        self
    }

    pub fn with_movement(mut self, movement: u32) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponSlotSpec) -> Self {
        self.weapons.push(weapon);
        self
    }

    pub fn with_beam_defense(mut self, beam_defense: f64) -> Self {
        self.beam_defense = beam_defense;
        self
    }

    pub fn with_jamming(mut self, jamming: f64) -> Self {
        self.jamming = jamming;
        self
    }

    pub fn with_cargo_capacity(mut self, cargo_capacity: u32) -> Self {
        self.cargo_capacity = cargo_capacity;
        self
    }

    pub fn as_starbase(mut self) -> Self {
        self.starbase = true;
        self.movement = 0;
        self
    }

    pub fn is_armed(&self) -> bool {
        self.weapons.iter().any(|w| w.count > 0 && w.power > 0)
    }
}
