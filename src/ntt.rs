//! Dual-modulus NTT engine and degree-3 ring-block multiplier.
//!
//! The transform length `LEN_POLY = NTT_LEN * 3` is not a power of two:
//! the radix-2 decomposition stops at a block distance of 3, because the
//! prime only supplies a root of unity of power-of-two order. A forward
//! transform therefore does not reach scalar evaluation points; it leaves
//! `NTT_LEN` blocks of 3 coefficients, block `g` holding the input
//! reduced modulo `x^3 - omega_g`. Multiplication of transformed vectors
//! is block-wise multiplication of degree-2 polynomials in those quotient
//! rings ([`NttTable::ring_multiply`]), which is what buys a
//! `LEN_POLY`-point wrapped convolution from an `NTT_LEN`-point NTT.
//!
//! Twiddle selection is table-driven: `zetas[j] = root^j` and a shared
//! bit-reversal table `ntt_index` map the butterfly group index of every
//! round to a twiddle exponent. The block moduli come out as
//! `omega_{2i} = root^ntt_index[i]` and `omega_{2i+1} = -omega_{2i}`
//! (the parity offset `NTT_LEN/2`, since `root^(NTT_LEN/2) = -1`).

use crate::error::{Error, Result};
use crate::params::RsaProfile;
use itertools::izip;

/// Per-modulus transform interface: one implementation per supported
/// bit-width geometry, selected at construction.
pub trait Transform {
    /// Forward transform of a limb vector (operates on a copy).
    fn forward(&self, a: &[u64]) -> Result<Vec<u64>>;
    /// Inverse transform, including the `1/NTT_LEN` normalisation.
    fn inverse(&self, a: &[u64]) -> Result<Vec<u64>>;
    /// Block-wise product of two transformed vectors.
    fn ring_multiply(&self, a: &[u64], b: &[u64]) -> Result<Vec<u64>>;
}

/// Precomputed twiddle schedule for one NTT modulus.
///
/// Two instances exist per engine, one for each prime of the profile.
/// Tables depend only on `(q, root)` and the profile geometry, never on
/// runtime input, and are read-only after construction.
pub struct NttTable {
    q: u64,
    len_poly: usize,
    ntt_len: usize,
    rounds: usize,
    /// `zetas[j] = root^j mod q`, length `ntt_len`.
    zetas: Vec<u64>,
    /// Bit-reversal of `i` over `log2(ntt_len/2)` bits, length `ntt_len/2`.
    ntt_index: Vec<usize>,
}

/// `x^e mod q` by square-and-multiply; `q` must fit in 32 bits.
pub fn modq_pow(x: u64, e: u64, q: u64) -> u64 {
    let mut base = x % q;
    let mut e = e;
    let mut acc = 1u64;
    while e != 0 {
        if e & 1 != 0 {
            acc = acc * base % q;
        }
        base = base * base % q;
        e >>= 1;
    }
    acc
}

#[inline(always)]
fn bitrev(i: usize, bits: u32) -> usize {
    i.reverse_bits() >> (usize::BITS - bits)
}

/// Exact division by 2 in `Z_q` for odd `q`.
#[inline(always)]
fn halve(x: u64, q: u64) -> u64 {
    if x & 1 == 0 {
        x >> 1
    } else {
        (x + q) >> 1
    }
}

impl NttTable {
    /// Builds the twiddle tables for modulus `q` with a primitive
    /// `NTT_LEN`-th root of unity `root`, using profile `P`'s geometry.
    pub fn new<P: RsaProfile>(q: u64, root: u64) -> Self {
        debug_assert_eq!(modq_pow(root, P::NTT_LEN as u64, q), 1);
        let mut zetas = Vec::with_capacity(P::NTT_LEN);
        let mut pow = 1u64;
        for _ in 0..P::NTT_LEN {
            zetas.push(pow);
            pow = pow * root % q;
        }

        let half = P::NTT_LEN / 2;
        let bits = half.trailing_zeros();
        let ntt_index = (0..half).map(|i| bitrev(i, bits)).collect();

        Self {
            q,
            len_poly: P::LEN_POLY,
            ntt_len: P::NTT_LEN,
            rounds: P::NTT_ROUND,
            zetas,
            ntt_index,
        }
    }

    pub fn modulus(&self) -> u64 {
        self.q
    }

    /// The shared bit-reversal table (`ntt_index[i] = bitrev(i)`).
    pub fn index_table(&self) -> &[usize] {
        &self.ntt_index
    }

    fn check_len(&self, v: &[u64]) -> Result<()> {
        if v.len() != self.len_poly {
            return Err(Error::LengthMismatch {
                expected: self.len_poly,
                got: v.len(),
            });
        }
        Ok(())
    }

    /// Block modulus `omega_g` of transformed group `g`: bit-reversal
    /// index for the pair, parity offset `NTT_LEN/2` for the odd half.
    #[inline(always)]
    fn block_omega(&self, g: usize) -> u64 {
        let e = self.ntt_index[g >> 1] + (g & 1) * (self.ntt_len / 2);
        self.zetas[e % self.ntt_len]
    }
}

impl Transform for NttTable {
    fn forward(&self, a: &[u64]) -> Result<Vec<u64>> {
        self.check_len(a)?;
        debug_assert!(a.iter().all(|&x| x < self.q));
        let q = self.q;
        let mut a = a.to_vec();
        let mut dist = self.len_poly / 2;
        for _ in 0..self.rounds {
            let groups = self.len_poly / (2 * dist);
            for g in 0..groups {
                // Cooley-Tukey: (a, b) -> (a + w*b, a - w*b).
                let w = self.zetas[self.ntt_index[g]];
                let base = g * 2 * dist;
                for j in base..base + dist {
                    let t = w * a[j + dist] % q;
                    a[j + dist] = (a[j] + q - t) % q;
                    a[j] = (a[j] + t) % q;
                }
            }
            dist /= 2;
        }
        Ok(a)
    }

    fn inverse(&self, a: &[u64]) -> Result<Vec<u64>> {
        self.check_len(a)?;
        debug_assert!(a.iter().all(|&x| x < self.q));
        let q = self.q;
        let mut a = a.to_vec();
        let mut dist = 3;
        for _ in 0..self.rounds {
            let groups = self.len_poly / (2 * dist);
            for g in 0..groups {
                // Gentleman-Sande with the mirrored twiddle index, each
                // output halved to fold in the 1/NTT_LEN normalisation.
                let w = self.zetas[(self.ntt_len - self.ntt_index[g]) % self.ntt_len];
                let base = g * 2 * dist;
                for j in base..base + dist {
                    let t = a[j];
                    let u = a[j + dist];
                    a[j] = halve((t + u) % q, q);
                    a[j + dist] = halve((t + q - u) * w % q, q);
                }
            }
            dist *= 2;
        }
        Ok(a)
    }

    fn ring_multiply(&self, a: &[u64], b: &[u64]) -> Result<Vec<u64>> {
        self.check_len(a)?;
        self.check_len(b)?;
        let q = self.q;
        let mut c = vec![0u64; self.len_poly];
        for (g, (a, b, c)) in
            izip!(a.chunks_exact(3), b.chunks_exact(3), c.chunks_exact_mut(3)).enumerate()
        {
            // (a0 + a1 x + a2 x^2)(b0 + b1 x + b2 x^2) mod (x^3 - w)
            let w = self.block_omega(g);
            c[0] = (a[0] * b[0] + w * ((a[2] * b[1] + a[1] * b[2]) % q)) % q;
            c[1] = (a[1] * b[0] + a[0] * b[1] + w * (a[2] * b[2] % q)) % q;
            c[2] = (a[2] * b[0] + a[1] * b[1] + a[0] * b[2]) % q;
        }
        Ok(c)
    }
}
