//! Error infrastructure for battle setup.
//!
//! A battle either resolves completely or fails before the first round: every
//! fault here is raised while the roster is being assembled from the input
//! snapshot, and none are produced once combat has started. Runtime anomalies
//! (a target that died earlier in the round, rounding that would push a value
//! below zero) are absorbed by clamping and never surface as errors.

use crate::design::DesignId;
use crate::player::PlayerId;

/// Severity level of an error, used for categorization by callers.
///
/// - **Validation**: the snapshot handed to the engine is malformed
/// - **Internal**: the snapshot is well-formed but inconsistent with itself,
///   which points at a bug in the upstream turn logic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not be retried without changes.
    ///
    /// Examples: zero-quantity stack, zero-armor design, empty board
    Validation,

    /// Dangling reference between input tables.
    ///
    /// Examples: fleet owned by an unknown player, stack referencing a missing design
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates an upstream bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for battle-core errors.
///
/// Provides a uniform interface for classification so the turn processor can
/// decide whether to log-and-skip a battle or to abort the whole turn.
pub trait BattleFault: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised while building a battle from its input snapshot.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BattleError {
    #[error("fleet {fleet} is owned by unknown player {player}")]
    PlayerNotFound { player: PlayerId, fleet: u32 },

    #[error("fleet {fleet} references unknown design {design}")]
    DesignNotFound { design: DesignId, fleet: u32 },

    #[error("player {player} has no battle plan {plan}")]
    BattlePlanNotFound { player: PlayerId, plan: u32 },

    #[error("battle needs at least two players, found {found}")]
    NotEnoughParticipants { found: usize },

    #[error("fleet {fleet} has an invalid stack of design {design}: {reason}")]
    InvalidStack {
        fleet: u32,
        design: DesignId,
        reason: &'static str,
    },

    #[error("invalid battle rules: {0}")]
    InvalidRules(&'static str),
}

impl BattleFault for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PlayerNotFound { .. }
            | Self::DesignNotFound { .. }
            | Self::BattlePlanNotFound { .. } => ErrorSeverity::Internal,
            Self::NotEnoughParticipants { .. }
            | Self::InvalidStack { .. }
            | Self::InvalidRules(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerNotFound { .. } => "player_not_found",
            Self::DesignNotFound { .. } => "design_not_found",
            Self::BattlePlanNotFound { .. } => "battle_plan_not_found",
            Self::NotEnoughParticipants { .. } => "not_enough_participants",
            Self::InvalidStack { .. } => "invalid_stack",
            Self::InvalidRules(_) => "invalid_rules",
        }
    }
}

/// Result type alias for battle setup.
pub type BattleResult<T> = Result<T, BattleError>;
