// src/rng.rs
// Seedable random source for practice text

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// All practice text is drawn from a PCG32 stream so a run can be replayed from its seed.
pub fn create_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// A fresh seed from the thread RNG, for runs without an explicit seed.
pub fn random_seed() -> u64 {
    rand::thread_rng().next_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(2025);
        let mut b = create_rng(2025);
        for _ in 0..32 {
            assert_eq!(a.gen_range(0..1000), b.gen_range(0..1000));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = create_rng(1);
        let mut b = create_rng(2);
        let xs: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(xs, ys);
    }
}
