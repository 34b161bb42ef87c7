//! Deterministic random number generation for battle resolution.
//!
//! Torpedo hit rolls, the per-round movement order and the pick among equally
//! good destination cells are the only random decisions in a battle. Each one
//! derives a fresh seed from the battle seed, a draw counter, the acting token
//! and a context tag, so replaying the same snapshot with the same seed always
//! yields the same record.

/// Seed context for a torpedo hit roll.
pub const CONTEXT_TORPEDO_ROLL: u32 = 0;
/// Seed context for shuffling the movement order at the start of a round.
pub const CONTEXT_MOVE_ORDER: u32 = 1;
/// Seed context for choosing among tied best moves.
pub const CONTEXT_MOVE_PICK: u32 = 2;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }

    /// Generate an index in `[0, len)`; returns 0 for empty ranges.
    fn index(&self, seed: u64, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next_u32(seed) as usize % len
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: every call maps a seed to one output, the caller owns sequencing.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute a deterministic seed for one random draw.
///
/// * `battle_seed` - seed fixed for the whole battle
/// * `nonce` - draw counter, incremented for every roll
/// * `token` - token number performing the roll
/// * `context` - which kind of decision this roll is for
pub fn compute_seed(battle_seed: u64, nonce: u64, token: u32, context: u32) -> u64 {
    let mut hash = battle_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(token).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequenced random draws for one battle.
///
/// Wraps a stateless [`RngOracle`] with the battle seed and a monotonically
/// increasing nonce.
pub struct BattleDice {
    rng: Box<dyn RngOracle>,
    seed: u64,
    nonce: u64,
}

impl BattleDice {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seed, PcgRng)
    }

    pub fn with_rng(seed: u64, rng: impl RngOracle + 'static) -> Self {
        Self {
            rng: Box::new(rng),
            seed,
            nonce: 0,
        }
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self, token: u32, context: u32) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, token, context);
        self.nonce += 1;
        seed
    }

    /// Roll a value in `[0, 1)`.
    pub fn roll(&mut self, token: u32, context: u32) -> f64 {
        let seed = self.next_seed(token, context);
        self.rng.unit(seed)
    }

    /// Pick an index in `[0, len)`.
    pub fn pick(&mut self, len: usize, token: u32, context: u32) -> usize {
        if len <= 1 {
            return 0;
        }
        let seed = self.next_seed(token, context);
        self.rng.index(seed, len)
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, slice: &mut [T], context: u32) {
        for i in (1..slice.len()).rev() {
            let j = self.pick(i + 1, i as u32, context);
            slice.swap(i, j);
        }
    }
}

impl core::fmt::Debug for BattleDice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleDice")
            .field("seed", &self.seed)
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}
