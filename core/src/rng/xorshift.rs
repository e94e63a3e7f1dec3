//! xorshift64* random number generator
//!
//! A fast, high-quality PRNG that is deterministic and suitable for
//! reproducible pivot sampling in the approximate betweenness pass.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. This is CRITICAL for:
//! - Reproducing a detection run bit-for-bit
//! - Testing (verify pivot selection)
//! - The fixed seed (42) contract for approximate betweenness

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use money_muling_detection_core_rs::rng::RngManager;
///
/// let mut rng = RngManager::new(42);
/// let value = rng.next();
/// let range_value = rng.range(0, 100); // [0, 100)
/// ```
#[derive(Debug, Clone)]
pub struct RngManager {
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    pub fn new(seed: u64) -> Self {
        // xorshift requires a non-zero state
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value, advancing internal state
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate a random value in range [min, max)
    ///
    /// # Panics
    /// Panics if `min >= max`.
    pub fn range(&mut self, min: usize, max: usize) -> usize {
        assert!(min < max, "min must be less than max");
        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as usize
    }

    /// Get current RNG state (useful for reproducing a sampling pass)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
