//! Players, diplomatic relations and battle plans.
//!
//! Battle plans are plain policy values: the token consults them through a
//! handful of pure predicates (`will_attack`, `is_target_of`) and the movement
//! scorer picks an objective from the tactic.

use std::collections::BTreeMap;
use std::fmt;

/// Player number as used by the surrounding game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How one player regards another.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PlayerRelation {
    Friend,
    Neutral,
    /// Default for players without a declared relation.
    #[default]
    Enemy,
}

/// Which other players a battle plan engages.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleAttackWho {
    #[default]
    Enemies,
    EnemiesAndNeutrals,
    Everyone,
}

impl BattleAttackWho {
    /// Whether this policy engages a player we hold `relation` with.
    pub fn includes(self, relation: PlayerRelation) -> bool {
        match self {
            Self::Enemies => relation == PlayerRelation::Enemy,
            Self::EnemiesAndNeutrals => {
                matches!(relation, PlayerRelation::Enemy | PlayerRelation::Neutral)
            }
            Self::Everyone => true,
        }
    }
}

/// Movement and engagement policy of a battle plan.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleTactic {
    /// Never fire, run for the board edge and leave once out of enemy range.
    Disengage,
    /// Fight like `MaximizeDamage` until damaged, then disengage.
    DisengageIfChallenged,
    /// Stay where incoming fire is lowest.
    MinimizeDamageToSelf,
    /// Maximize damage dealt minus damage taken.
    MaximizeNetDamage,
    /// Maximize damage dealt over damage taken.
    #[default]
    MaximizeDamageRatio,
    /// Close on the best target regardless of return fire.
    MaximizeDamage,
}

/// Target category a battle plan prefers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleTarget {
    None,
    #[default]
    Any,
    Starbase,
    ArmedShips,
    BombersFreighters,
    UnarmedShips,
    FuelTransports,
    Freighters,
}

/// Player-authored orders for fleets entering battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattlePlan {
    pub num: u32,
    pub name: String,
    pub primary_target: BattleTarget,
    pub secondary_target: BattleTarget,
    pub tactic: BattleTactic,
    pub attack_who: BattleAttackWho,
}

impl BattlePlan {
    pub fn new(num: u32, name: impl Into<String>) -> Self {
        Self {
            num,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_targets(mut self, primary: BattleTarget, secondary: BattleTarget) -> Self {
        self.primary_target = primary;
        self.secondary_target = secondary;
        self
    }

    pub fn with_tactic(mut self, tactic: BattleTactic) -> Self {
        self.tactic = tactic;
        self
    }

    pub fn with_attack_who(mut self, attack_who: BattleAttackWho) -> Self {
        self.attack_who = attack_who;
        self
    }
}

impl Default for BattlePlan {
    fn default() -> Self {
        Self {
            num: 0,
            name: String::from("Default"),
            primary_target: BattleTarget::ArmedShips,
            secondary_target: BattleTarget::Any,
            tactic: BattleTactic::MaximizeDamageRatio,
            attack_who: BattleAttackWho::Enemies,
        }
    }
}

/// Race abilities that matter in combat.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RaceTraits {
    /// Fraction of maximum stack shields restored each round.
    pub shield_regen_rate: f64,
}

/// A participant as seen by the battle engine.
///
/// Every player starts out with the default battle plan as plan 0.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Player {
    pub num: PlayerId,
    pub name: String,
    pub race: RaceTraits,
    pub relations: BTreeMap<PlayerId, PlayerRelation>,
    pub battle_plans: Vec<BattlePlan>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(0, "")
    }
}

impl Player {
    pub fn new(num: u32, name: impl Into<String>) -> Self {
        Self {
            num: PlayerId(num),
            name: name.into(),
            race: RaceTraits::default(),
            relations: BTreeMap::new(),
            battle_plans: vec![BattlePlan::default()],
        }
    }

    pub fn with_relation(mut self, other: u32, relation: PlayerRelation) -> Self {
        self.relations.insert(PlayerId(other), relation);
        self
    }

    pub fn with_battle_plan(mut self, plan: BattlePlan) -> Self {
        self.battle_plans.retain(|p| p.num != plan.num);
        self.battle_plans.push(plan);
        self
    }

    pub fn with_shield_regen_rate(mut self, rate: f64) -> Self {
        self.race.shield_regen_rate = rate;
        self
    }

    /// Relation toward `other`; players are their own friends and undeclared
    /// players are enemies.
    pub fn relation_to(&self, other: PlayerId) -> PlayerRelation {
        if other == self.num {
            return PlayerRelation::Friend;
        }
        self.relations.get(&other).copied().unwrap_or_default()
    }

    pub fn battle_plan(&self, num: u32) -> Option<&BattlePlan> {
        self.battle_plans.iter().find(|plan| plan.num == num)
    }
}
