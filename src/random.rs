use crate::board::Board;
use crate::error::{Error, NoLegalMoveError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices.
pub trait RandomGenerator {
    /// Returns an index in `0..len`. `len` must be positive.
    fn next_index(&mut self, len: usize) -> usize;

    /// Picks one item, `None` if `items` is empty.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_index(items.len()))
    }
}

/// Draws from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Reproducible generator: the same seed yields the same sequence.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl SeededRandomGenerator {
    /// Seeds the generator with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// An opponent that plays a uniformly random legal move.
#[derive(Debug, Clone, Default)]
pub struct RandomPlayer<K: RandomGenerator> {
    random: K,
}

impl<K: RandomGenerator> RandomPlayer<K> {
    /// Wraps the generator used to pick moves.
    pub fn new(random: K) -> Self {
        Self { random }
    }

    /// Picks one of the legal moves of `state` at random.
    pub fn choose_action<T: Board>(&mut self, state: &T) -> Result<T::Move, Error> {
        let moves = state.get_available_moves();
        self.random
            .choose(&moves)
            .copied()
            .ok_or_else(|| NoLegalMoveError.into())
    }
}
