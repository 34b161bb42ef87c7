use crate::board::BattleVector;
use crate::token::BattleToken;
use crate::weapon::{BattleWeaponSlot, VolleyHit};

/// What a token did.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TokenActionKind {
    #[default]
    Move,
    BeamFire,
    TorpedoFire,
    RanAway,
}

/// One entry of the per-round action log.
///
/// `from`/`to` hold the mover's cells for moves and the shooter and target
/// cells for fire actions.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleRecordTokenAction {
    pub kind: TokenActionKind,
    pub round: u32,
    pub token: u32,
    pub slot: Option<u32>,
    pub target: Option<u32>,
    pub from: BattleVector,
    pub to: BattleVector,
    pub shield_damage: f64,
    pub armor_damage: f64,
    pub ships_destroyed: u32,
    pub torpedo_hits: u32,
    pub torpedo_misses: u32,
}

impl BattleRecordTokenAction {
    /// `token` moving from its current cell to `to`.
    pub fn movement(round: u32, token: &BattleToken, to: BattleVector) -> Self {
        Self {
            kind: TokenActionKind::Move,
            round,
            token: token.num,
            from: token.position,
            to,
            ..Self::default()
        }
    }

    /// One slot's damage to one target.
    pub fn fire(
        round: u32,
        shooter: &BattleToken,
        slot: &BattleWeaponSlot,
        target: &BattleToken,
        hit: &VolleyHit,
    ) -> Self {
        Self {
            kind: if slot.is_torpedo() {
                TokenActionKind::TorpedoFire
            } else {
                TokenActionKind::BeamFire
            },
            round,
            token: shooter.num,
            slot: Some(slot.slot as u32),
            target: Some(target.num),
            from: shooter.position,
            to: target.position,
            shield_damage: hit.damage.shield_damage,
            armor_damage: hit.damage.armor_damage,
            ships_destroyed: hit.damage.ships_destroyed,
            torpedo_hits: hit.hits,
            torpedo_misses: hit.misses,
        }
    }

    pub fn ran_away(round: u32, token: &BattleToken) -> Self {
        Self {
            kind: TokenActionKind::RanAway,
            round,
            token: token.num,
            from: token.position,
            to: token.position,
            ..Self::default()
        }
    }

    pub fn total_damage(&self) -> f64 {
        self.shield_damage + self.armor_damage
    }
}
