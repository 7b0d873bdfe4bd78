//! Montgomery context and transform-space REDC.
//!
//! A [`MontgomeryContext`] is built once per RSA modulus `p` and is an
//! immutable value: independent exponentiations against different
//! contexts share no mutable state. [`Engine::multiply`] and
//! [`Engine::square`] compute `a*b*R^-1 mod p` (`R = 2^N`) in three
//! passes through the transform pipeline, so no step ever divides a big
//! integer:
//!
//! 1. full product `t = a*b` (dual NTT, block multiply, inverse, CRT),
//! 2. `l = (t mod R) * p^-1 mod R`, against the precomputed transform of
//!    the 2-adic inverse of `p`,
//! 3. `lp = (l mod R) * p`, against the precomputed transform of `p`,
//!
//! then `high = (t >> N) - (lp >> N)`, plus `p` if negative. The low `N`
//! bits of `l*p` equal those of `t` by construction, so the subtraction
//! of the high parts is the exact quotient `(t - l*p) / R` in `(-p, p)`.
//! The 2-adic inverse is kept non-negated; the sign convention is pinned
//! down by the exponentiation round-trip tests.

use std::marker::PhantomData;

use rug::Integer;

use crate::crt::crts;
use crate::error::{Error, Result};
use crate::inv2k::inverse_mod_2n;
use crate::limb::{chunk, dechunk, lower};
use crate::ntt::{NttTable, Transform};
use crate::params::RsaProfile;

/// Per-modulus-`p` Montgomery state. Created by
/// [`Engine::build_context`]; immutable thereafter.
pub struct MontgomeryContext {
    pub(crate) p: Integer,
    /// Transforms of `chunk(p)` under q1 and q2.
    pub(crate) ph1: Vec<u64>,
    pub(crate) ph2: Vec<u64>,
    /// Transforms of `chunk(p^-1 mod 2^N)` under q1 and q2.
    pub(crate) pm1: Vec<u64>,
    pub(crate) pm2: Vec<u64>,
    /// `R mod p`, the Montgomery form of 1.
    pub(crate) r: Integer,
    /// `R^2 mod p`, the to-Montgomery conversion factor.
    pub(crate) rsqr: Integer,
}

impl MontgomeryContext {
    /// The configured modulus.
    pub fn modulus(&self) -> &Integer {
        &self.p
    }

    /// `2^N mod p` (Montgomery form of 1).
    pub fn r(&self) -> &Integer {
        &self.r
    }

    /// `2^(2N) mod p`.
    pub fn rsqr(&self) -> &Integer {
        &self.rsqr
    }
}

/// The transform pipeline for one parameter profile: the two per-prime
/// NTT instances and the glue that runs limb vectors through them.
pub struct Engine<P: RsaProfile> {
    t1: NttTable,
    t2: NttTable,
    _marker: PhantomData<P>,
}

impl<P: RsaProfile> Default for Engine<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: RsaProfile> Engine<P> {
    pub fn new() -> Self {
        Self {
            t1: NttTable::new::<P>(P::Q1, P::ROOT1),
            t2: NttTable::new::<P>(P::Q2, P::ROOT2),
            _marker: PhantomData,
        }
    }

    /// The per-prime transform instances `(mod q1, mod q2)`.
    pub fn tables(&self) -> (&NttTable, &NttTable) {
        (&self.t1, &self.t2)
    }

    /// Builds the Montgomery context for modulus `p`.
    ///
    /// Fails with [`Error::InvalidModulus`] if `p` is even, not
    /// positive, or wider than `N` bits.
    pub fn build_context(&self, p: &Integer) -> Result<MontgomeryContext> {
        if !p.is_odd() || p.cmp0() != std::cmp::Ordering::Greater || p.significant_bits() as usize > P::N {
            return Err(Error::InvalidModulus);
        }

        let p_inv = inverse_mod_2n(p, P::N);
        let pc = chunk::<P>(p);
        let pic = chunk::<P>(&p_inv);

        let r_mod = Integer::from(Integer::from(1) << P::N as u32) % p;
        let rsqr = Integer::from(&r_mod * &r_mod) % p;

        Ok(MontgomeryContext {
            p: p.clone(),
            ph1: self.t1.forward(&pc)?,
            ph2: self.t2.forward(&pc)?,
            pm1: self.t1.forward(&pic)?,
            pm2: self.t2.forward(&pic)?,
            r: r_mod,
            rsqr,
        })
    }

    /// Forward transform of one limb vector under both primes.
    fn forward_pair(&self, v: &[u64]) -> Result<(Vec<u64>, Vec<u64>)> {
        Ok((self.t1.forward(v)?, self.t2.forward(v)?))
    }

    /// Block-multiplies two transformed pairs, inverse-transforms, and
    /// CRT-merges into a single limb vector (coefficients `< q1*q2`).
    fn pointwise_merge(
        &self,
        a: (&[u64], &[u64]),
        b: (&[u64], &[u64]),
    ) -> Result<Vec<u64>> {
        let c1 = self.t1.inverse(&self.t1.ring_multiply(a.0, b.0)?)?;
        let c2 = self.t2.inverse(&self.t2.ring_multiply(a.1, b.1)?)?;
        crts::<P>(&c1, &c2)
    }

    /// REDC on the merged product limb vector: returns
    /// `dechunk(t) * R^-1 mod p`.
    fn reduce(&self, ctx: &MontgomeryContext, t_limbs: &[u64]) -> Result<Integer> {
        let t = dechunk::<P>(t_limbs)?;

        // l = (t mod R) * p^-1 mod R
        let tf = self.forward_pair(&lower::<P>(t_limbs)?)?;
        let l_limbs = self.pointwise_merge((&tf.0, &tf.1), (&ctx.pm1, &ctx.pm2))?;

        // lp = (l mod R) * p
        let lf = self.forward_pair(&lower::<P>(&l_limbs)?)?;
        let lp_limbs = self.pointwise_merge((&lf.0, &lf.1), (&ctx.ph1, &ctx.ph2))?;
        let lp = dechunk::<P>(&lp_limbs)?;

        let mut high = t >> P::N as u32;
        high -= lp >> P::N as u32;
        if high.cmp0() == std::cmp::Ordering::Less {
            high += &ctx.p;
        }
        Ok(high)
    }

    /// `a * b * R^-1 mod p` for `a`, `b` already in Montgomery form and
    /// reduced modulo `p`.
    pub fn multiply(&self, ctx: &MontgomeryContext, a: &Integer, b: &Integer) -> Result<Integer> {
        let af = self.forward_pair(&chunk::<P>(a))?;
        let bf = self.forward_pair(&chunk::<P>(b))?;
        let t = self.pointwise_merge((&af.0, &af.1), (&bf.0, &bf.1))?;
        self.reduce(ctx, &t)
    }

    /// `a^2 * R^-1 mod p`; reuses the forward transform of `a` for both
    /// operands.
    pub fn square(&self, ctx: &MontgomeryContext, a: &Integer) -> Result<Integer> {
        let af = self.forward_pair(&chunk::<P>(a))?;
        let t = self.pointwise_merge((&af.0, &af.1), (&af.0, &af.1))?;
        self.reduce(ctx, &t)
    }
}
