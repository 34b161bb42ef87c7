use crate::error::{BattleError, BattleResult};

/// Rules and balance constants for one encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleRules {
    /// Hard cap on the number of rounds simulated.
    pub max_rounds: u32,

    /// Width and height of the square board, in cells.
    pub board_size: i32,

    /// Fraction of beam power lost at maximum range.
    pub beam_range_dropoff: f64,

    /// Fraction of torpedo power a miss still deals to shields.
    pub torpedo_splash_damage: f64,

    /// Seed for every random decision in the battle.
    pub seed: u64,
}

impl BattleRules {
    // ===== defaults =====
    pub const DEFAULT_MAX_ROUNDS: u32 = 16;
    pub const DEFAULT_BOARD_SIZE: i32 = 10;
    pub const DEFAULT_BEAM_RANGE_DROPOFF: f64 = 0.1;
    pub const DEFAULT_TORPEDO_SPLASH_DAMAGE: f64 = 0.125;

    /// Movement is expressed in quarter cells per round.
    pub const MOVEMENT_UNITS_PER_CELL: u32 = 4;

    pub fn new() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            board_size: Self::DEFAULT_BOARD_SIZE,
            beam_range_dropoff: Self::DEFAULT_BEAM_RANGE_DROPOFF,
            torpedo_splash_damage: Self::DEFAULT_TORPEDO_SPLASH_DAMAGE,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_beam_range_dropoff(mut self, dropoff: f64) -> Self {
        self.beam_range_dropoff = dropoff;
        self
    }

    /// Reject rule sets the engine cannot run with.
    pub fn validate(&self) -> BattleResult<()> {
        if self.max_rounds == 0 {
            return Err(BattleError::InvalidRules("max_rounds must be positive"));
        }
        if self.board_size < 2 {
            return Err(BattleError::InvalidRules("board_size must be at least 2"));
        }
        if !(0.0..=1.0).contains(&self.beam_range_dropoff) {
            return Err(BattleError::InvalidRules(
                "beam_range_dropoff must be within 0..=1",
            ));
        }
        if !(0.0..=1.0).contains(&self.torpedo_splash_damage) {
            return Err(BattleError::InvalidRules(
                "torpedo_splash_damage must be within 0..=1",
            ));
        }
        Ok(())
    }
}

impl Default for BattleRules {
    fn default() -> Self {
        Self::new()
    }
}
