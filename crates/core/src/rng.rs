//! RNG module - seeded piece selection
//!
//! Piece choice only needs to be roughly uniform and reproducible, so a
//! 32-bit LCG is enough. The same seed always yields the same piece sequence,
//! which keeps game tests deterministic.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in `[0, max)`; the high bits are used since the low bits of an
    /// LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_range_hits_every_bucket() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [0u32; 7];
        for _ in 0..7000 {
            seen[rng.next_range(7) as usize] += 1;
        }
        // Loose uniformity bound: every bucket within 30% of the mean.
        for count in seen {
            assert!((700..=1300).contains(&count), "bucket count {}", count);
        }
    }
}
