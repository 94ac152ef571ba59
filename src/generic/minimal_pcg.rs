//! A simple pseudorandom number generator.
//!
//! Specifically, a translation of the *really* minimal C PCG32 implementation from <https://www.pcg-random.org/> implemented to satisfy the [RngCore](rand_core::RngCore) trait.[^note]
//!
//! PCG(32) was chosen as the default source of (pseudo)random numbers as it is simple, fast, and has some nice supporting documentation.
//!
//! Each [context](crate::context) stores a source of rng, parameterised to anything which satisfies [Rng](rand::Rng).
//! Though to keep the rest of the library straightforward the rng is fixed in the [context](crate::context::Context) as [MinimalPCG32].
//! Still, revising or parameterising the context is all that's needed for a different source of rng.
//!
//! [^note]: At the time of writing, the C implementation is at the top of the [download page](https://www.pcg-random.org/download.html).

use rand_core::{impls, RngCore, SeedableRng};

/// State and increment
#[derive(Default)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = ((old_state >> 18) ^ old_state) >> 27;
        let rot = (old_state >> 59) as u32;
        (xorshifted as u32).rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        /// Entirely unmotivated.
        const INCREMENT: u64 = 3215534235932367344;
        Self {
            state: (u64::from_le_bytes(seed)).wrapping_add(INCREMENT),
            inc: INCREMENT,
        }
    }
}

#[cfg(test)]
mod pcg_tests {
    use super::*;

    #[test]
    fn determinism() {
        let mut first = MinimalPCG32::from_seed(2u64.to_le_bytes());
        let mut second = MinimalPCG32::from_seed(2u64.to_le_bytes());

        for _ in 0..64 {
            assert_eq!(first.next_u64(), second.next_u64());
        }
    }

    #[test]
    fn seed_sensitivity() {
        let mut two_seed = MinimalPCG32::from_seed(2u64.to_le_bytes());
        let mut seventy_three_seed = MinimalPCG32::from_seed(73u64.to_le_bytes());

        let two_draws: Vec<u64> = (0..8).map(|_| two_seed.next_u64()).collect();
        let seventy_three_draws: Vec<u64> = (0..8).map(|_| seventy_three_seed.next_u64()).collect();

        assert_ne!(two_draws, seventy_three_draws);
    }
}
