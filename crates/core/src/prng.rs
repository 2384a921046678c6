//! Deterministic PRNG based on the Xorshift64 algorithm.
//!
//! Every random decision an effect makes — particle placement, velocities,
//! scatter angles, sparkle targets — flows through this generator, so a
//! (seed, params, dimensions) triple replays to bit-identical frames across
//! platforms (pure integer arithmetic in the core algorithm).

use serde::{Deserialize, Serialize};

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17) for good statistical
/// properties across the full 64-bit state space. Seed of 0 is automatically
/// replaced with a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Fallback seed used when the caller provides 0, which is a fixed point
    /// of the xorshift algorithm.
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    ///
    /// If `seed` is 0, uses the fallback constant to avoid the xorshift
    /// all-zeros fixed point.
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

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` for full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0 (division by zero in modulo).
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }

    /// Returns a uniformly distributed angle in [0, 2π).
    pub fn next_angle(&mut self) -> f64 {
        self.next_f64() * std::f64::consts::TAU
    }

    /// Returns a uniformly distributed f64 in (-magnitude, magnitude).
    ///
    /// Used for symmetric jitter. A non-positive magnitude yields 0.
    pub fn next_signed(&mut self, magnitude: f64) -> f64 {
        if magnitude <= 0.0 {
            return 0.0;
        }
        (self.next_f64() * 2.0 - 1.0) * magnitude
    }

    /// Returns true with probability 1/2.
    pub fn next_bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // Golden value for xorshift64(seed=42, shifts=13,7,17). If this
        // breaks, the algorithm changed and every recorded (seed, frame)
        // pairing is invalidated.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_produce_all_zeros() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0, "seed=0 guard failed");
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn two_instances_with_same_seed_produce_identical_sequences() {
        let mut rng_a = Xorshift64::new(42);
        let mut rng_b = Xorshift64::new(42);
        for i in 0..1000 {
            assert_eq!(
                rng_a.next_u64(),
                rng_b.next_u64(),
                "sequences diverged at index {i}"
            );
        }
    }

    #[test]
    fn next_f64_always_in_unit_interval() {
        let mut rng = Xorshift64::new(12345);
        for i in 0..10_000 {
            let v = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&v),
                "next_f64() = {v} out of [0, 1) at iteration {i}"
            );
        }
    }

    #[test]
    fn next_angle_stays_on_the_circle() {
        let mut rng = Xorshift64::new(777);
        for _ in 0..10_000 {
            let a = rng.next_angle();
            assert!((0.0..std::f64::consts::TAU).contains(&a));
        }
    }

    #[test]
    fn next_signed_is_symmetric_and_bounded() {
        let mut rng = Xorshift64::new(31);
        let mut saw_negative = false;
        let mut saw_positive = false;
        for _ in 0..10_000 {
            let v = rng.next_signed(0.25);
            assert!(v.abs() < 0.25, "next_signed(0.25) = {v}");
            saw_negative |= v < 0.0;
            saw_positive |= v > 0.0;
        }
        assert!(saw_negative && saw_positive, "jitter never changed sign");
    }

    #[test]
    fn next_signed_zero_magnitude_is_zero() {
        let mut rng = Xorshift64::new(5);
        assert_eq!(rng.next_signed(0.0), 0.0);
        assert_eq!(rng.next_signed(-1.0), 0.0);
    }

    #[test]
    fn next_bool_produces_both_values() {
        let mut rng = Xorshift64::new(99);
        let trues = (0..1000).filter(|_| rng.next_bool()).count();
        assert!((300..=700).contains(&trues), "suspicious bias: {trues}/1000");
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(
                rng.next_u64(),
                restored.next_u64(),
                "sequences diverged after deserialization at index {i}"
            );
        }
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v));
                }
            }

            #[test]
            fn next_range_in_bounds_for_any_seed_and_range(
                seed: u64,
                min in -1e6_f64..1e6,
                max in -1e6_f64..1e6,
            ) {
                prop_assume!(min < max);
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max);
                }
            }

            #[test]
            fn next_usize_in_bounds_for_any_seed_and_max(
                seed: u64,
                max in 1_usize..10_000,
            ) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    prop_assert!(rng.next_usize(max) < max);
                }
            }

            #[test]
            fn next_signed_bounded_for_any_magnitude(
                seed: u64,
                magnitude in 0.0_f64..1e6,
            ) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    prop_assert!(rng.next_signed(magnitude).abs() <= magnitude);
                }
            }
        }
    }
}
