use crate::design::{DesignId, ShipDesignSpec};
use crate::player::{Player, PlayerId};

/// A group of identical ships inside a fleet.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShipStack {
    pub design: DesignId,
    pub quantity: u32,
    /// Ships carrying damage from earlier battles.
    pub quantity_damaged: u32,
    /// Armor damage per damaged ship.
    pub damage: f64,
}

impl ShipStack {
    pub fn new(design: u32, quantity: u32) -> Self {
        Self {
            design: DesignId(design),
            quantity,
            quantity_damaged: 0,
            damage: 0.0,
        }
    }

    pub fn with_damage(mut self, quantity_damaged: u32, damage: f64) -> Self {
        self.quantity_damaged = quantity_damaged;
        self.damage = damage;
        self
    }
}

/// A fleet present at the battle location.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Fleet {
    pub num: u32,
    pub player: PlayerId,
    pub name: String,
    /// Number of the owner's battle plan this fleet follows.
    pub battle_plan: u32,
    pub stacks: Vec<ShipStack>,
}

impl Fleet {
    pub fn new(num: u32, player: u32, name: impl Into<String>) -> Self {
        Self {
            num,
            player: PlayerId(player),
            name: name.into(),
            battle_plan: 0,
            stacks: Vec::new(),
        }
    }

    pub fn with_stack(mut self, stack: ShipStack) -> Self {
        self.stacks.push(stack);
        self
    }

    pub fn with_battle_plan(mut self, plan: u32) -> Self {
        self.battle_plan = plan;
        self
    }
}

/// Frozen snapshot of everything one battle needs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleScenario {
    pub name: String,
    pub players: Vec<Player>,
    pub designs: Vec<ShipDesignSpec>,
    pub fleets: Vec<Fleet>,
}

impl BattleScenario {
    pub fn player(&self, num: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.num == num)
    }

    pub fn design(&self, id: DesignId) -> Option<&ShipDesignSpec> {
        self.designs.iter().find(|d| d.id == id)
    }
}
