//! Limb codec: big integer <-> fixed-length vector of `l`-bit limbs.
//!
//! Limb vectors are LSB-first in radix `2^l`. [`dechunk`] deliberately
//! tolerates limbs wider than `l` bits (the excess spills upward
//! arithmetically), which is what lets it decode raw convolution output
//! before any modular reduction has happened.

use rug::Integer;

use crate::error::{Error, Result};
use crate::params::RsaProfile;

fn check_len<P: RsaProfile>(v: &[u64]) -> Result<()> {
    if v.len() != P::LEN_POLY {
        return Err(Error::LengthMismatch {
            expected: P::LEN_POLY,
            got: v.len(),
        });
    }
    Ok(())
}

/// Splits `a` into `LEN_POLY` limbs of `LIMB_BITS` bits, least
/// significant limb first. `a` need not be reduced; bits beyond
/// `LEN_POLY * LIMB_BITS` are dropped.
pub fn chunk<P: RsaProfile>(a: &Integer) -> Vec<u64> {
    debug_assert!(a.cmp0() != std::cmp::Ordering::Less);
    let mask = (1u64 << P::LIMB_BITS) - 1;
    let mut rest = a.clone();
    let mut out = Vec::with_capacity(P::LEN_POLY);
    for _ in 0..P::LEN_POLY {
        out.push(rest.to_u64_wrapping() & mask);
        rest >>= P::LIMB_BITS as u32;
    }
    out
}

/// Reassembles the integer `sum(v[i] << (i * LIMB_BITS))`.
///
/// Limbs wider than `LIMB_BITS` are allowed and carry upward.
pub fn dechunk<P: RsaProfile>(v: &[u64]) -> Result<Integer> {
    check_len::<P>(v)?;
    let mut acc = Integer::new();
    for &limb in v.iter().rev() {
        acc <<= P::LIMB_BITS as u32;
        acc += limb;
    }
    Ok(acc)
}

/// Truncates a limb vector to the low `N` bits, returning a fresh vector
/// of properly narrowed limbs.
///
/// Carries are propagated first: after CRT reconstruction a limb may
/// exceed `LIMB_BITS` bits, so masking each limb in place would lose the
/// spill into the next position. The final partial limb is masked to the
/// remaining bit width and everything above it is zeroed.
pub fn lower<P: RsaProfile>(v: &[u64]) -> Result<Vec<u64>> {
    check_len::<P>(v)?;
    let mask = (1u64 << P::LIMB_BITS) - 1;
    let mut out = vec![0u64; P::LEN_POLY];
    let mut carry = 0u64;
    for (o, &x) in out.iter_mut().zip(v.iter()) {
        let s = x + carry;
        *o = s & mask;
        carry = s >> P::LIMB_BITS;
    }
    let full = P::N / P::LIMB_BITS;
    let rem = P::N % P::LIMB_BITS;
    let zero_from = if rem != 0 {
        out[full] &= (1u64 << rem) - 1;
        full + 1
    } else {
        full
    };
    for o in out[zero_from..].iter_mut() {
        *o = 0;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Rsa2048, Rsa4096};

    #[test]
    fn chunk_splits_lsb_first() {
        let v = chunk::<Rsa2048>(&Integer::from(0x12345678u64));
        // 11-bit limbs of 0x12345678 = 0b1_0010_0011_0100_0101_0110_0111_1000
        assert_eq!(v[0], 0x678);
        assert_eq!(v[1], (0x12345678u64 >> 11) & 0x7ff);
        assert_eq!(v[2], 0x12345678u64 >> 22);
        assert!(v[3..].iter().all(|&x| x == 0));
    }

    #[test]
    fn dechunk_tolerates_wide_limbs() {
        let mut v = vec![0u64; 384];
        v[0] = 0x1fff; // 13 bits: spills 2 bits into limb 1
        v[1] = 0x1fff;
        v[2] = 0x12;
        let expected =
            Integer::from(0x1fffu64) + (Integer::from(0x1fffu64) << 11u32) + (Integer::from(0x12u64) << 22u32);
        assert_eq!(dechunk::<Rsa2048>(&v).unwrap(), expected);
    }

    #[test]
    fn chunk_dechunk_roundtrip() {
        let mut a = Integer::from(1);
        a <<= 2047u32;
        a += 0x0123_4567_89ab_cdefu64;
        assert_eq!(dechunk::<Rsa2048>(&chunk::<Rsa2048>(&a)).unwrap(), a);

        let mut b = Integer::from(1);
        b <<= 4095u32;
        b -= 1;
        assert_eq!(dechunk::<Rsa4096>(&chunk::<Rsa4096>(&b)).unwrap(), b);
    }

    #[test]
    fn lower_propagates_carries() {
        let mut v = vec![0u64; 384];
        // Value 2^11 + 2^11*(2^11) expressed with an over-wide limb 0.
        v[0] = 1 << 12;
        let out = lower::<Rsa2048>(&v).unwrap();
        assert_eq!(out[0], 0);
        assert_eq!(out[1], 2);
        assert_eq!(
            dechunk::<Rsa2048>(&out).unwrap(),
            dechunk::<Rsa2048>(&v).unwrap()
        );
    }

    #[test]
    fn lower_truncates_to_n_bits() {
        let v = vec![(1u64 << 11) - 1; 384]; // all-ones, 4224 bits
        let out = lower::<Rsa2048>(&v).unwrap();
        let full = Integer::from(Integer::from(1) << 2048u32) - 1;
        assert_eq!(dechunk::<Rsa2048>(&out).unwrap(), full);
    }

    #[test]
    fn length_mismatch_rejected() {
        let v = vec![0u64; 100];
        assert_eq!(
            dechunk::<Rsa2048>(&v),
            Err(crate::Error::LengthMismatch {
                expected: 384,
                got: 100
            })
        );
        assert!(lower::<Rsa2048>(&v).is_err());
    }
}
