//! Small linear congruential generator for demos. Not suitable for cryptography.
//!
//! State update: `state = state * 0x5555_5555_5555_5555 + 1 (mod 2^64)`, which has
//! full period regardless of the seed. Low bits of an LCG cycle quickly, so only
//! the high 32 bits of the state are ever returned.

use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

const MULTIPLIER: u64 = 0x5555_5555_5555_5555;
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RandomError {
    #[error("empty range [{min}, {max}]")]
    EmptyRange { min: f64, max: f64 },
}

#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn with_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from an FNV-1 hash of the current wall-clock time.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(fnv1(&nanos.to_le_bytes()))
    }

    pub fn seed(&mut self, seed: u64) {
        self.state = seed;
    }

    /// Uniform over `[0, 2^32 - 1]`.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(1);
        (self.state >> 32) as u32
    }

    /// Uniform over `[0, 2^31 - 1]`.
    pub fn next_i32(&mut self) -> i32 {
        (self.next_u32() >> 1) as i32
    }

    /// Uniform over `[min, max]` by rejection sampling.
    pub fn range_u32(&mut self, min: u32, max: u32) -> Result<u32, RandomError> {
        if max < min {
            return Err(empty(min, max));
        }
        let span = u64::from(max - min) + 1;
        if span == 1 {
            return Ok(min);
        }
        // Largest multiple of `span` that fits the output range; draws above it
        // would bias the modulo toward small values.
        let limit = (1u64 << 32) / span * span;
        loop {
            let x = u64::from(self.next_u32());
            if x < limit {
                return Ok(min + (x % span) as u32);
            }
        }
    }

    /// Uniform over `[min, max]`.
    pub fn range_i32(&mut self, min: i32, max: i32) -> Result<i32, RandomError> {
        if max < min {
            return Err(empty(min, max));
        }
        let span = max.wrapping_sub(min) as u32;
        let offset = self.range_u32(0, span)?;
        Ok(min.wrapping_add(offset as i32))
    }

    /// Uniform over `[0.0, 1.0)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform over `[min, max)`.
    pub fn range_f64(&mut self, min: f64, max: f64) -> Result<f64, RandomError> {
        if !(max > min) {
            return Err(RandomError::EmptyRange { min, max });
        }
        Ok(min + self.next_f64() * (max - min))
    }

    pub fn next_u8(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::from_time()
    }
}

fn empty(min: impl Into<f64>, max: impl Into<f64>) -> RandomError {
    RandomError::EmptyRange {
        min: min.into(),
        max: max.into(),
    }
}

fn fnv1(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        hash.wrapping_mul(FNV_PRIME) ^ u64::from(b)
    })
}
