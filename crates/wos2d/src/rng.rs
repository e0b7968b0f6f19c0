//! Deterministic pseudo-random number generation helpers.
//!
//! Every estimator takes an explicit `&mut Rng` rather than touching any
//! process-wide generator: runs are reproducible for a given seed, and a
//! parallel caller hands each task its own generator derived with
//! [`splitmix64`] instead of sharing one behind a lock.

/// Default seed used by [`XorShift64::default`]. Documented and fixed so that
/// repeated runs without an explicit seed produce identical output.
pub const DEFAULT_SEED: u64 = 0xA5A5_A5A5_1234_5678;

/// A small, fast 64-bit XorShift PRNG.
///
/// - `no_std` friendly.
/// - Not cryptographically secure.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Seed the RNG. A zero seed is remapped to a non-zero constant to avoid the fixed point.
    #[inline]
    pub fn seed_from(seed: u64) -> Self {
        let s = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: s }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        // xorshift64 step
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in [0,1).
    #[inline]
    pub fn uniform_f32(&mut self) -> f32 {
        const SCALE: f32 = 1.0 / (u32::MAX as f32 + 1.0);
        let v = (self.next_u64() >> 32) as u32;
        (v as f32) * SCALE
    }

    /// Derive a decorrelated child generator, advancing `self`.
    ///
    /// Useful when one logical stream must spawn independent sub-streams
    /// (e.g. one generator per concurrent pixel) without the children
    /// replaying the parent's sequence.
    #[inline]
    pub fn split(&mut self) -> Self {
        Self::seed_from(splitmix64(self.next_u64()))
    }
}

impl Default for XorShift64 {
    fn default() -> Self {
        Self::seed_from(DEFAULT_SEED)
    }
}

pub use XorShift64 as Rng;

/// SplitMix64 mixing function.
///
/// Maps nearby inputs (e.g. consecutive pixel indices) to statistically
/// independent seeds, which makes per-task generators safe to derive from a
/// base seed plus a task index.
#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
