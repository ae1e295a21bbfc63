//! Seedable PRNG for combat rolls. SplitMix64 for throughput and good
//! statistical quality; not cryptographically secure.
//!
//! The generator is passed explicitly into every roll, never read from a
//! hidden global, so any simulation can be replayed from its seed.

use std::fmt;

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from OS entropy. Used for unseeded runs and batch base seeds.
    pub fn from_entropy() -> Result<Self, RngError> {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes).map_err(RngError::Entropy)?;
        Ok(Self::new(u64::from_le_bytes(bytes)))
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }

    /// Uniform float in [0, 1) with 53 bits of precision.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform integer in the closed range [lo, hi]. Spans here are tiny
    /// (damage rolls), so a modulo draw is adequate.
    #[inline]
    pub fn next_range(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo <= hi);
        let span = u64::from(hi - lo) + 1;
        lo + (self.next_u64() % span) as u32
    }
}

#[derive(Debug)]
pub enum RngError {
    Entropy(getrandom::Error),
}

impl fmt::Display for RngError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entropy(err) => write!(f, "failed to read OS entropy: {err}"),
        }
    }
}

impl std::error::Error for RngError {}
