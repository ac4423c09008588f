//! Seed hashing and the xorshift32 stream that drives mine placement.
//!
//! Neither piece is cryptographically secure. They only turn a human-readable
//! seed into a reproducible sequence so anyone holding the seed can rebuild
//! the board.

use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Substituted for a zero seed, since zero is a fixed point of xorshift.
pub const FALLBACK_STATE: u32 = 2_463_534_242;

/// FNV-1a style 32-bit hash over the UTF-16 code units of `input`.
pub fn hash32(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Marsaglia's xorshift32 generator producing floats in `[0, 1]`.
///
/// The right shift sign-extends, as on the signed 32-bit integers browsers
/// run this generator on, so published seeds rebuild the same boards.
///
/// The upper bound is only reached from the all-ones state, which callers
/// mapping draws to indices must clamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub const fn new(seed: u32) -> Self {
        let state = if seed == 0 { FALLBACK_STATE } else { seed };
        Self { state }
    }

    /// Generator for the given seed string, via [`hash32`].
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(hash32(seed))
    }

    pub const fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= ((x as i32) >> 17) as u32;
        x ^= x << 5;
        self.state = x;
        x
    }

    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }

    /// Maps the next draw onto `0..len`.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        // truncation is floor for non-negative draws
        let index = (self.next_f64() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

impl Iterator for Xorshift32 {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn hash_of_empty_string_is_offset_basis() {
        assert_eq!(hash32(""), FNV_OFFSET_BASIS);
    }

    #[test]
    fn hash_matches_fnv1a_reference_values() {
        // FNV-1a 32 reference vectors; ASCII code units equal the bytes
        assert_eq!(hash32("a"), 0xe40c_292c);
        assert_eq!(hash32("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn hash_is_pure() {
        let seed = "uid:1|t:0|b:5|s:1";
        assert_eq!(hash32(seed), hash32(seed));
        assert_ne!(hash32(seed), hash32("uid:1|t:0|b:5|s:2"));
    }

    #[test]
    fn zero_seed_uses_fallback_state() {
        assert_eq!(Xorshift32::new(0).state(), FALLBACK_STATE);
        assert_eq!(Xorshift32::new(0), Xorshift32::new(FALLBACK_STATE));
    }

    #[test]
    fn first_draw_from_one() {
        // 1 -> 0x2001 -> 0x2001 -> 0x42021
        let mut rng = Xorshift32::new(1);
        assert_eq!(rng.next_u32(), 0x0004_2021);
    }

    #[test]
    fn right_shift_sign_extends_from_high_bit_state() {
        let mut rng = Xorshift32::new(0x8000_0001);
        let draws: Vec<u32> = (0..4).map(|_| rng.next_u32()).collect();
        assert_eq!(draws, [0x8003_e021, 0x7cff_fa62, 0xf5c3_0cdb, 0x1f53_7817]);
    }

    #[test]
    fn same_seed_same_sequence() {
        let a: Vec<f64> = Xorshift32::from_seed_str("seed").take(32).collect();
        let b: Vec<f64> = Xorshift32::from_seed_str("seed").take(32).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        let mut rng = Xorshift32::new(12345);
        for _ in 0..10_000 {
            let value = rng.next_f64();
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn indices_stay_in_range() {
        let mut rng = Xorshift32::new(1);
        for _ in 0..10_000 {
            assert!(rng.next_index(5) < 5);
        }
    }
}
