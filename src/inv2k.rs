//! 2-adic inverse of an odd modulus by Hensel lifting.
//!
//! This is the production path for the Montgomery constant
//! `p^-1 mod 2^N`: it needs nothing beyond multiplication and
//! truncation, so it runs unchanged on targets without a native
//! big-integer inverse. The direct full-precision inverse survives in
//! the tests as a cross-check oracle.

use rug::Integer;

/// `p^-1 mod 2^n` for odd `p`, `n` a power of two.
///
/// Seeds with `2 - p mod 2^32` (exact to at least 2 bits since `p` is
/// odd) and runs the Newton step `y <- 2y - p*y^2 mod 2^n` for
/// `log2(n/2)` rounds, doubling the number of correct low bits each
/// round.
pub fn inverse_mod_2n(p: &Integer, n: usize) -> Integer {
    debug_assert!(p.is_odd());
    debug_assert!(n.is_power_of_two() && n >= 32);

    let mut y = Integer::from(2u32);
    y -= p;
    y.keep_bits_mut(32);

    let rounds = (n / 2).trailing_zeros();
    for _ in 0..rounds {
        let mut sq = y.clone();
        sq.square_mut();
        sq *= p;
        y <<= 1u32;
        y -= sq;
        y.keep_bits_mut(n as u32);
    }
    y
}
