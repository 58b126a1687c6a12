//! Uniform sampling helpers over an injected random source, plus per-level seed mixing.

use rand_chacha::rand_core::Rng;

use crate::config::IntRange;

pub(crate) fn roll<R: Rng + ?Sized>(rng: &mut R, min_value: usize, max_value: usize) -> usize {
    debug_assert!(min_value <= max_value);
    let range_size = (max_value - min_value) as u64 + 1;
    min_value + (rng.next_u64() % range_size) as usize
}

pub(crate) fn roll_range<R: Rng + ?Sized>(rng: &mut R, range: IntRange) -> usize {
    roll(rng, range.min, range.max)
}

pub(crate) fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, options: &[T]) -> Option<T> {
    if options.is_empty() {
        return None;
    }
    Some(options[roll(rng, 0, options.len() - 1)])
}

/// Mixes a run seed and level number into an independent per-level seed.
pub fn derive_level_seed(run_seed: u64, level: u32) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= u64::from(level).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}
