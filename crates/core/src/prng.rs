//! Seedable random sources.
//!
//! Every random draw an effect makes goes through [`RandomSource`], so a
//! simulation can be replayed from a seed ([`Xorshift64`]) or driven by a
//! fixed script of values ([`SequenceSource`]) when a test needs to pin an
//! exact resample.

use serde::{Deserialize, Serialize};

/// A source of uniformly distributed values in [0, 1).
pub trait RandomSource {
    /// Returns the next value in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Returns a uniformly distributed value in [min, max).
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Shift parameters (13, 7, 17). A seed of 0 is replaced with a non-zero
/// fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for Xorshift64 {
    /// Upper 53 bits of `next_u64()` divided by 2^53.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed list of values, cycling back to the start when exhausted.
///
/// Values are clamped into [0, 1) on construction so the trait contract holds.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Largest f64 strictly below 1.0.
    const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

    /// Creates a source that yields `values` in order, forever.
    ///
    /// An empty list yields 0.0 on every draw.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, Self::BELOW_ONE))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // Replays recorded with seed 42 depend on this value.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_is_replaced_by_fallback() {
        let mut zero = Xorshift64::new(0);
        let mut fallback = Xorshift64::new(Xorshift64::FALLBACK_SEED);
        for _ in 0..3 {
            let v = zero.next_u64();
            assert_ne!(v, 0);
            assert_eq!(v, fallback.next_u64());
        }
    }

    #[test]
    fn clones_diverge_only_if_advanced_separately() {
        let mut a = Xorshift64::new(7);
        a.next_u64();
        let mut b = a.clone();
        for i in 0..500 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits(), "index {i}");
        }
    }

    #[test]
    fn next_range_respects_half_open_interval() {
        let mut rng = Xorshift64::new(9999);
        for _ in 0..10_000 {
            let v = rng.next_range(50.0, 150.0);
            assert!((50.0..150.0).contains(&v), "{v} outside [50, 150)");
        }
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for _ in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64());
        }
    }

    #[test]
    fn sequence_source_cycles_through_values() {
        let mut src = SequenceSource::new(vec![0.1, 0.5, 0.9]);
        let drawn: Vec<f64> = (0..5).map(|_| src.next_f64()).collect();
        assert_eq!(drawn, vec![0.1, 0.5, 0.9, 0.1, 0.5]);
        assert_eq!(src.draws(), 5);
    }

    #[test]
    fn sequence_source_clamps_into_unit_interval() {
        let mut src = SequenceSource::new(vec![-3.0, 1.0, 7.5]);
        assert_eq!(src.next_f64(), 0.0);
        assert!(src.next_f64() < 1.0);
        assert!(src.next_f64() < 1.0);
    }

    #[test]
    fn empty_sequence_yields_zero() {
        let mut src = SequenceSource::new(Vec::new());
        assert_eq!(src.next_f64(), 0.0);
        assert_eq!(src.next_range(2.0, 4.0), 2.0);
    }

    #[test]
    fn mutable_reference_is_a_random_source() {
        fn draw(mut rng: impl RandomSource) -> f64 {
            rng.next_f64()
        }
        let mut rng = Xorshift64::new(3);
        let mut copy = rng.clone();
        assert_eq!(draw(&mut rng), copy.next_f64());
        assert_eq!(rng.next_f64(), copy.next_f64());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "{v} for seed {seed}");
                }
            }

            #[test]
            fn next_range_in_bounds_for_any_range(
                seed: u64,
                min in -1e3_f64..1e3,
                span in 1.0_f64..1e3,
            ) {
                let mut rng = Xorshift64::new(seed);
                let max = min + span;
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v <= max, "{v} outside [{min}, {max}]");
                }
            }

            #[test]
            fn next_f64_approximate_uniformity(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                let mut buckets = [0u32; 10];
                for _ in 0..10_000 {
                    let idx = (rng.next_f64() * 10.0).min(9.0) as usize;
                    buckets[idx] += 1;
                }
                for (i, &count) in buckets.iter().enumerate() {
                    prop_assert!(count >= 500, "bucket {i} has only {count}");
                }
            }
        }
    }
}
