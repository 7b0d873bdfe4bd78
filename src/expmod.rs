//! Square-and-multiply exponentiation over a Montgomery context.

use rug::Integer;

use crate::error::{Error, Result};
use crate::montgomery::{Engine, MontgomeryContext};
use crate::params::RsaProfile;

impl<P: RsaProfile> Engine<P> {
    /// `a^e mod p` for a public exponent `0 <= e < 2^32`.
    ///
    /// `e = 0` short-circuits to 1. Fails with
    /// [`Error::ExponentOutOfRange`] otherwise outside the range.
    pub fn modexp_public(
        &self,
        ctx: &MontgomeryContext,
        a: &Integer,
        e: &Integer,
    ) -> Result<Integer> {
        if e.cmp0() == std::cmp::Ordering::Less || e.significant_bits() > 32 {
            return Err(Error::ExponentOutOfRange);
        }
        if e.cmp0() == std::cmp::Ordering::Equal {
            return Ok(Integer::from(1));
        }
        self.modexp_bits(ctx, a, e, 32)
    }

    /// `a^d mod p` for a private exponent up to the modulus width.
    ///
    /// Same state machine as [`modexp_public`](Self::modexp_public), but
    /// the loop always walks the full `N`-bit width of a modulus-sized
    /// exponent, so the iteration count does not depend on `d`.
    pub fn modexp_private(
        &self,
        ctx: &MontgomeryContext,
        a: &Integer,
        d: &Integer,
    ) -> Result<Integer> {
        if d.cmp0() == std::cmp::Ordering::Less || d.significant_bits() as usize > P::N {
            return Err(Error::ExponentOutOfRange);
        }
        if d.cmp0() == std::cmp::Ordering::Equal {
            return Ok(Integer::from(1));
        }
        self.modexp_bits(ctx, a, d, P::N as u32)
    }

    /// Left-to-right binary square-and-multiply over `nbits` exponent
    /// bits. The accumulator starts at `r` (Montgomery form of 1), the
    /// base is converted in via `rsqr`, and the result is converted back
    /// with a final multiply by 1.
    fn modexp_bits(
        &self,
        ctx: &MontgomeryContext,
        a: &Integer,
        e: &Integer,
        nbits: u32,
    ) -> Result<Integer> {
        let am = self.multiply(ctx, a, &ctx.rsqr)?;
        let mut acc = ctx.r.clone();
        for i in (0..nbits).rev() {
            acc = self.square(ctx, &acc)?;
            if e.get_bit(i) {
                acc = self.multiply(ctx, &acc, &am)?;
            }
        }
        self.multiply(ctx, &acc, &Integer::from(1))
    }
}
