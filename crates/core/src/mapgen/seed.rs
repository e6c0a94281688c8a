//! The single seeded random stream that drives a generation pass.
//!
//! Every random decision draws from this stream in a fixed order, so the same
//! seed and settings always reproduce the same map.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

pub(crate) struct MapRng {
    rng: ChaCha8Rng,
}

impl MapRng {
    pub(crate) fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform draw in `[min_value, max_value)`. An empty range yields `min_value`
    /// without consuming the stream.
    pub(crate) fn range(&mut self, min_value: usize, max_value: usize) -> usize {
        if max_value <= min_value {
            return min_value;
        }
        let range_size = (max_value - min_value) as u64;
        min_value + (self.rng.next_u64() % range_size) as usize
    }

    /// Uniform draw in `[0, 100)`.
    pub(crate) fn percent(&mut self) -> u32 {
        self.range(0, 100) as u32
    }

    pub(crate) fn coin(&mut self) -> bool {
        self.range(0, 2) == 1
    }
}
