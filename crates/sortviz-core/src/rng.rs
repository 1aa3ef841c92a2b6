//! Deterministic PRNG and random bar-height generation.
//!
//! Uses the SplitMix64 algorithm: fast, 8 bytes of state, and trivially
//! serializable, so a seed fully determines the array a run starts from.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::array::SortArray;
use crate::error::SortError;

/// SplitMix64 pseudo-random number generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the wall clock. Used when no seed is configured.
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos)
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform integer in `[min, max]`. Rejection sampling avoids modulo bias.
    ///
    /// Callers must ensure `min <= max`.
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max);
        let span = u64::from(max - min) + 1;
        // Largest multiple of `span` that fits in u64; draws above it are biased.
        let zone = u64::MAX - (u64::MAX % span);
        loop {
            let r = self.next_u64();
            if r < zone {
                return min + (r % span) as u32;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Value range
// ---------------------------------------------------------------------------

/// Inclusive bounds for generated bar heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub fn new(min: u32, max: u32) -> Result<Self, SortError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), SortError> {
        if self.min > self.max {
            return Err(SortError::invalid(format!(
                "value range min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for ValueRange {
    /// Heights 10..=589: a 600px canvas minus a 10px margin at either end.
    fn default() -> Self {
        Self { min: 10, max: 589 }
    }
}

/// Build an array of `size` heights drawn uniformly from `range`.
pub fn generate_random_array(
    size: usize,
    range: ValueRange,
    rng: &mut SimRng,
) -> Result<SortArray, SortError> {
    if size == 0 {
        return Err(SortError::invalid("array size must be at least 1"));
    }
    range.validate()?;
    let values = (0..size)
        .map(|_| rng.range_inclusive(range.min, range.max))
        .collect();
    Ok(SortArray::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(2);
        // Extremely unlikely to match.
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn range_stays_in_bounds() {
        let mut rng = SimRng::new(7);
        for _ in 0..1_000 {
            let v = rng.range_inclusive(10, 20);
            assert!((10..=20).contains(&v));
        }
    }

    #[test]
    fn degenerate_and_full_ranges() {
        let mut rng = SimRng::new(3);
        assert_eq!(rng.range_inclusive(5, 5), 5);
        // Full u32 span must not overflow.
        let _ = rng.range_inclusive(0, u32::MAX);
    }

    #[test]
    fn range_roughly_uniform() {
        let mut rng = SimRng::new(12345);
        let mut buckets = [0u32; 4];
        for _ in 0..10_000 {
            buckets[rng.range_inclusive(0, 3) as usize] += 1;
        }
        // Expect ~2500 each; very generous tolerance.
        for hits in buckets {
            assert!((2000..=3000).contains(&hits), "got {buckets:?}");
        }
    }

    #[test]
    fn generate_respects_size_and_range() {
        let mut rng = SimRng::new(99);
        let range = ValueRange::new(10, 589).unwrap();
        let arr = generate_random_array(15, range, &mut rng).unwrap();
        assert_eq!(arr.len(), 15);
        assert!(arr.as_slice().iter().all(|&v| range.contains(v)));
    }

    #[test]
    fn generate_is_reproducible_from_seed() {
        let range = ValueRange::default();
        let a = generate_random_array(15, range, &mut SimRng::new(5)).unwrap();
        let b = generate_random_array(15, range, &mut SimRng::new(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn generate_rejects_empty_size() {
        let err = generate_random_array(0, ValueRange::default(), &mut SimRng::new(1)).unwrap_err();
        assert!(matches!(err, SortError::InvalidConfiguration(_)));
    }

    #[test]
    fn inverted_range_rejected() {
        assert!(ValueRange::new(9, 3).is_err());
    }

    #[test]
    fn serialization_round_trip() {
        let mut rng = SimRng::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }

        let json = serde_json::to_string(&rng).unwrap();
        let restored: SimRng = serde_json::from_str(&json).unwrap();
        assert_eq!(rng, restored);

        let mut rng2 = restored;
        for _ in 0..10 {
            assert_eq!(rng.next_u64(), rng2.next_u64());
        }
    }
}
