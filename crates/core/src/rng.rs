//! RNG module - 7-bag random piece generation
//!
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled with
//! Fisher-Yates. Pieces are handed out front to back until the bag is empty,
//! then a fresh bag is shuffled.
//!
//! The random source is injected, so a seeded session (or a scripted source
//! in tests) reproduces the exact piece sequence.

use crate::types::PieceKind;

/// Source of randomness for the bag shuffle.
pub trait RandomSource {
    /// Uniform value in `[0, bound)`. `bound` is always at least 1.
    fn next_below(&mut self, bound: u32) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state is a fixed point of the multiply step
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * bound as u64) >> 32) as u32
    }
}

/// Shuffle a slice using Fisher-Yates
pub fn shuffle<T>(rng: &mut impl RandomSource, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_below((i + 1) as u32) as usize;
        slice.swap(i, j);
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct SevenBag<R = SimpleRng> {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index of the next piece to hand out; 7 means empty
    bag_index: usize,
    rng: R,
}

impl SevenBag<SimpleRng> {
    /// Bag driven by the built-in LCG.
    pub fn seeded(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> SevenBag<R> {
    /// Create an empty bag; the first draw shuffles.
    pub fn new(rng: R) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: 7,
            rng,
        }
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        shuffle(&mut self.rng, &mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece, refilling and reshuffling when the bag is empty.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> PieceKind {
        if self.bag_index >= 7 {
            self.refill();
        }

        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Discard the rest of the current bag. The random stream continues, so
    /// the next draw starts a new bag boundary.
    pub fn reset(&mut self) {
        self.bag_index = 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns `bound - 1`, which makes Fisher-Yates the identity permutation.
    struct NoSwap;

    impl RandomSource for NoSwap {
        fn next_below(&mut self, bound: u32) -> u32 {
            bound - 1
        }
    }

    fn assert_permutation(group: &[PieceKind]) {
        let mut sorted = group.to_vec();
        sorted.sort();
        assert_eq!(sorted, PieceKind::ALL.to_vec(), "group {:?}", group);
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        assert_eq!(SimpleRng::new(0).state, 1);
    }

    #[test]
    fn next_below_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for bound in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_below(bound) < bound);
            }
        }
    }

    #[test]
    fn every_aligned_group_of_seven_is_a_permutation() {
        for seed in [1, 2, 42, 12345, u32::MAX] {
            let mut bag = SevenBag::seeded(seed);
            let draws: Vec<PieceKind> = (0..7 * 20).map(|_| bag.next()).collect();
            for group in draws.chunks(7) {
                assert_permutation(group);
            }
        }
    }

    #[test]
    fn scripted_source_yields_catalog_order() {
        let mut bag = SevenBag::new(NoSwap);
        let draws: Vec<PieceKind> = (0..14).map(|_| bag.next()).collect();
        assert_eq!(&draws[..7], &PieceKind::ALL);
        assert_eq!(&draws[7..], &PieceKind::ALL);
    }

    #[test]
    fn first_draw_fills_the_bag() {
        let mut bag = SevenBag::seeded(3);
        assert_eq!(bag.bag_index, 7);

        let first = bag.next();
        assert_eq!(bag.bag_index, 1);
        assert_eq!(bag.bag[0], first);
        assert!(!bag.bag[1..].contains(&first));
    }

    #[test]
    fn reset_starts_a_new_bag_boundary() {
        let mut bag = SevenBag::seeded(9);
        bag.next();
        bag.next();
        bag.reset();

        let draws: Vec<PieceKind> = (0..7).map(|_| bag.next()).collect();
        assert_permutation(&draws);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SevenBag::seeded(2024);
        let mut b = SevenBag::seeded(2024);
        for _ in 0..50 {
            assert_eq!(a.next(), b.next());
        }
    }
}
