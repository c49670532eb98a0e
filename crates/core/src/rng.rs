//! RNG module - seeded piece randomizer
//!
//! Two rules pick the kind of each spawned piece:
//! - **Uniform**: every draw is an independent pick among the seven kinds.
//! - **Bag7**: each bag holds one of each kind, shuffled; draws empty the bag
//!   before a new one is generated.
//!
//! Both run on a small LCG so a seed fully determines the piece sequence.

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Rule used to pick the next piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomizer {
    /// Independent uniform pick per piece
    #[default]
    Uniform,
    /// Shuffled bag of all seven kinds
    Bag7,
}

/// Seeded source of piece kinds
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rule: Randomizer,
    /// Current bag (Bag7 only)
    bag: [PieceKind; 7],
    /// Index into current bag
    bag_index: usize,
    rng: SimpleRng,
    seed: u32,
}

impl PieceQueue {
    /// Create a new piece queue with the given rule and seed
    pub fn new(rule: Randomizer, seed: u32) -> Self {
        let mut queue = Self {
            rule,
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
            seed,
        };
        if rule == Randomizer::Bag7 {
            queue.refill_bag();
        }
        queue
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match self.rule {
            Randomizer::Uniform => {
                let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[idx]
            }
            Randomizer::Bag7 => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let piece = self.bag[self.bag_index];
                self.bag_index += 1;
                piece
            }
        }
    }

    /// Seed the queue was created with (restart a round with the same sequence)
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(Randomizer::Uniform, 1)
    }
}
