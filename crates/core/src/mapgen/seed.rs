//! Random source seam and seed mixing for manor generation.
//! This module exists so every generation step draws from one injectable stream.
//! It does not own any gameplay decisions.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

/// The only randomness the manor ever consumes.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform-ish index in `0..n`; `n` must be nonzero.
    fn below(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        (self.next_u64() % n as u64) as usize
    }

    /// True with `percent` in 100 odds; anything at or above 100 always hits.
    fn percent_chance(&mut self, percent: u32) -> bool {
        self.next_u64() % 100 < u64::from(percent)
    }
}

impl RandomSource for ChaCha8Rng {
    fn next_u64(&mut self) -> u64 {
        Rng::next_u64(self)
    }
}

/// Folds an arbitrary entropy value and a stream id into a session seed.
pub fn mix_seed(entropy: u64, stream: u64) -> u64 {
    let mut mixed = entropy ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}
