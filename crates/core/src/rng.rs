//! RNG module - uniform random piece selection
//!
//! Every spawn draws one of the seven kinds with equal probability,
//! independently of earlier draws (no bag, no history).
//!
//! The generator is a small seeded LCG so a session can be replayed from its seed.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }
}

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceRandomizer {
    rng: SimpleRng,
    seed: u32,
}

impl PieceRandomizer {
    /// Create a new randomizer with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Seed this randomizer was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceRandomizer {
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
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_randomizer_replays_from_seed() {
        let mut a = PieceRandomizer::new(99);
        let mut b = PieceRandomizer::new(99);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
        assert_eq!(a.seed(), 99);
    }

    #[test]
    fn test_randomizer_covers_every_kind() {
        let mut queue = PieceRandomizer::new(1);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            counts[(queue.draw().index() - 1) as usize] += 1;
        }

        // Uniform draw: every kind shows up, none dominates.
        for (i, &n) in counts.iter().enumerate() {
            assert!(n > 700 && n < 1300, "kind {} drawn {} times", i + 1, n);
        }
    }

    #[test]
    fn test_randomizer_repeats_are_possible() {
        // Unlike a bag, the same kind may come up twice in a row.
        let mut queue = PieceRandomizer::new(3);
        let mut prev = queue.draw();
        let mut saw_repeat = false;
        for _ in 0..200 {
            let next = queue.draw();
            if next == prev {
                saw_repeat = true;
                break;
            }
            prev = next;
        }
        assert!(saw_repeat);
    }
}
