//! RNG oracle for deterministic random number generation.
//!
//! This module provides a trait-based RNG system so every random draw the
//! battle rules make (dodge, crit, turn order) comes from an injected source.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same sequence of random numbers. This is critical
//! for replays and for reproducible tests.

/// RNG oracle for deterministic random number generation.
///
/// Implementations are owned per battle; nothing here is process-global, so two
/// battles running side by side never share a generator.
pub trait RngOracle: Send {
    /// Generate the next random u32 value.
    fn next_u32(&mut self) -> u32;

    /// Uniform draw in `[0, 1)`.
    ///
    /// Uses the top 24 bits so the result is exactly representable as `f32`
    /// and can never round up to `1.0`.
    fn unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
    }

    /// Uniform index in `[0, len)`. Returns 0 when `len` is 0 or 1.
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }
}

impl<R: RngOracle + ?Sized> RngOracle for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn unit(&mut self) -> f32 {
        (**self).unit()
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG is a family of simple, fast, space-efficient RNGs with excellent
/// statistical quality. This implementation uses PCG-XSH-RR, which produces
/// 32-bit output from 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed ^ Self::INCREMENT),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Replays a fixed list of unit draws, cycling when exhausted.
///
/// Useful for forcing dodge/crit outcomes and for replaying a recorded battle.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceRng {
    rolls: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    /// Creates a sequence. Values are clamped into `[0, 1)`; an empty list always yields 0.
    pub fn new(rolls: impl Into<Vec<f32>>) -> Self {
        let rolls = rolls
            .into()
            .into_iter()
            .map(|r| r.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { rolls, cursor: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RngOracle for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        (self.unit() * u32::MAX as f32) as u32
    }

    fn unit(&mut self) -> f32 {
        if self.rolls.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }

    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        ((self.unit() * len as f32) as usize).min(len - 1)
    }
}

/// Compute a deterministic seed from battle components.
///
/// Combines multiple entropy sources so independent random streams (combat
/// rolls, AI choices, encounter generation) derived from one battle seed never
/// overlap.
///
/// # Arguments
///
/// * `battle_seed` - Base seed set at battle start (for replay/determinism)
/// * `round` - Round number
/// * `actor_id` - Entity the stream belongs to (0 for battle-wide streams)
/// * `context` - Distinguishes streams that share the other inputs
pub fn compute_seed(battle_seed: u64, round: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = battle_seed;

    hash ^= round.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
