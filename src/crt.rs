//! CRT recombination of the two residue vectors.

use itertools::izip;

use crate::error::{Error, Result};
use crate::params::RsaProfile;

/// Reconstructs `z < q1*q2` with `z = x (mod Q1)` and `z = y (mod Q2)`,
/// using the precomputed `Q1^-1 mod Q2`.
#[inline(always)]
pub fn crt<P: RsaProfile>(x: u64, y: u64) -> u64 {
    debug_assert!(x < P::Q1 && y < P::Q2);
    let d = (y + P::Q2 - x % P::Q2) % P::Q2;
    x + d * P::Q1_INV_Q2 % P::Q2 * P::Q1
}

/// Element-wise [`crt`] over two residue vectors of length `LEN_POLY`.
pub fn crts<P: RsaProfile>(x: &[u64], y: &[u64]) -> Result<Vec<u64>> {
    for v in [x, y] {
        if v.len() != P::LEN_POLY {
            return Err(Error::LengthMismatch {
                expected: P::LEN_POLY,
                got: v.len(),
            });
        }
    }
    Ok(izip!(x, y).map(|(&a, &b)| crt::<P>(a, b)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Rsa2048, Rsa4096};

    fn exhaustive_edges<P: RsaProfile>() {
        for x in [0, 1, P::Q1 - 1, P::Q1 / 2] {
            for y in [0, 1, P::Q2 - 1, P::Q2 / 2] {
                let z = crt::<P>(x, y);
                assert!(z < P::Q1 * P::Q2);
                assert_eq!(z % P::Q1, x);
                assert_eq!(z % P::Q2, y);
            }
        }
    }

    #[test]
    fn reconstruction_edges() {
        exhaustive_edges::<Rsa2048>();
        exhaustive_edges::<Rsa4096>();
    }

    #[test]
    fn vector_form_and_length_check() {
        let x = vec![5u64; 384];
        let y = vec![7u64; 384];
        let z = crts::<Rsa2048>(&x, &y).unwrap();
        assert!(z.iter().all(|&v| v % 12289 == 5 && v % 65537 == 7));

        assert_eq!(
            crts::<Rsa2048>(&x[..10], &y),
            Err(Error::LengthMismatch {
                expected: 384,
                got: 10
            })
        );
    }
}
