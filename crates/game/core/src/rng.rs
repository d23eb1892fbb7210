//! Deterministic random number generation for combat rolls.
//!
//! Every roll in a resolution is derived from the resolution seed plus the
//! roll's coordinates (turn, acting side, roll kind), so two resolutions with
//! the same seed and inputs see exactly the same numbers regardless of how
//! many rolls were skipped along the way.

use crate::combat::Side;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / 4_294_967_296.0
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state, a single multiply
/// plus xorshift and rotate.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
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

/// Compute a deterministic seed from roll coordinates.
///
/// # Arguments
///
/// * `base_seed` - Seed of the whole resolution (or match, for derived duel seeds)
/// * `nonce` - Sequence number (turn, round)
/// * `actor_id` - Acting side or lineup position
/// * `context` - Distinguishes independent rolls of the same actor and nonce
pub fn compute_seed(base_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style combiners
    let mut hash = base_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Kind of roll made during an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    Dodge = 0,
    Variance = 1,
    Critical = 2,
    Counter = 3,
}

/// Seeded roll source for one resolution.
#[derive(Clone, Copy, Debug)]
pub struct CombatRng<R: RngOracle = PcgRng> {
    seed: u64,
    oracle: R,
}

impl CombatRng<PcgRng> {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            oracle: PcgRng,
        }
    }
}

impl<R: RngOracle> CombatRng<R> {
    pub fn with_oracle(seed: u64, oracle: R) -> Self {
        Self { seed, oracle }
    }

    /// Uniform roll in `[0, 1)` for the given coordinates.
    pub fn roll(&self, turn: u32, actor: Side, context: RollContext) -> f64 {
        let seed = compute_seed(self.seed, u64::from(turn), actor.index() as u32, context as u32);
        self.oracle.unit(seed)
    }

    /// Returns true with probability `chance` (values outside `[0, 1]` saturate).
    pub fn chance(&self, turn: u32, actor: Side, context: RollContext, chance: f64) -> bool {
        chance > 0.0 && self.roll(turn, actor, context) < chance
    }
}
