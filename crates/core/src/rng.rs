//! RNG module - piece selection
//!
//! Pieces are drawn independently and uniformly from the seven-piece catalog,
//! with replacement: the same kind can come up several times in a row and no
//! bag or shuffle evens the distribution out.
//!
//! A simple LCG keeps the draw sequence reproducible from a seed.

use std::fmt;

use crate::types::{PieceKind, PIECE_COUNT};

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
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Where the engine gets its pieces from
pub trait PieceSource: fmt::Debug {
    /// Choose the kind of the next piece
    fn pick(&mut self) -> PieceKind;
}

/// Uniform random selection with replacement
#[derive(Debug, Clone)]
pub struct RandomPicker {
    seed: u32,
    rng: SimpleRng,
}

impl RandomPicker {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: SimpleRng::new(seed),
        }
    }

    /// Seed this picker was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for RandomPicker {
    fn pick(&mut self) -> PieceKind {
        let index = self.rng.next_range(PIECE_COUNT as u32) as usize;
        PieceKind::ALL[index]
    }
}

/// Cycles through a fixed list of kinds (scripted games and tests)
#[derive(Debug, Clone)]
pub struct FixedSequence {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl FixedSequence {
    /// Returns None for an empty list
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Option<Self> {
        let kinds = kinds.into();
        if kinds.is_empty() {
            return None;
        }
        Some(Self { kinds, pos: 0 })
    }

    /// Always the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self {
            kinds: vec![kind],
            pos: 0,
        }
    }
}

impl PieceSource for FixedSequence {
    fn pick(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos];
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
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
        assert_eq!(rng.state(), 1);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_random_picker_reaches_every_kind() {
        let mut picker = RandomPicker::new(12345);
        let mut seen = [false; PIECE_COUNT];
        for _ in 0..500 {
            seen[picker.pick().index()] = true;
        }
        assert!(seen.iter().all(|s| *s), "seen = {:?}", seen);
    }

    #[test]
    fn test_random_picker_same_seed_same_sequence() {
        let mut a = RandomPicker::new(99);
        let mut b = RandomPicker::new(99);
        for _ in 0..50 {
            assert_eq!(a.pick(), b.pick());
        }
    }

    #[test]
    fn test_fixed_sequence_cycles() {
        let mut seq = FixedSequence::new([PieceKind::I, PieceKind::O]).unwrap();
        assert_eq!(seq.pick(), PieceKind::I);
        assert_eq!(seq.pick(), PieceKind::O);
        assert_eq!(seq.pick(), PieceKind::I);
        assert!(FixedSequence::new(Vec::<PieceKind>::new()).is_none());
    }
}
