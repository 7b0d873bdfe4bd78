//! Fixed parameter profiles for the supported RSA bit-widths.

/// Selects the transform geometry and NTT-friendly prime pair for one
/// supported RSA modulus width.
///
/// An integer is represented as [`LEN_POLY`] limbs of [`LIMB_BITS`] bits.
/// The transform length factors as `NTT_LEN * 3`: a radix-2
/// Cooley–Tukey/Gentleman–Sande decomposition runs for [`NTT_ROUND`]
/// rounds down to blocks of 3 coefficients, which are multiplied as
/// degree-2 polynomials modulo `x^3 - omega`. Multiplications are carried
/// out independently modulo [`Q1`] and [`Q2`] and recombined by CRT.
///
/// A conforming profile satisfies:
/// - `LEN_POLY * LIMB_BITS >= 2 * N`, so the full double-width product of
///   two chunked integers is representable;
/// - `2 * ceil(N / LIMB_BITS) - 1 <= LEN_POLY`, so products of chunked
///   N-bit integers never reach the cyclic wrap of the convolution;
/// - `ceil(N / LIMB_BITS) * (2^LIMB_BITS - 1)^2 < Q1 * Q2`, so every
///   convolution coefficient is reconstructed exactly by CRT;
/// - [`ROOT1`] and [`ROOT2`] have exact multiplicative order [`NTT_LEN`]
///   modulo their prime.
///
/// The roots and primes were discovered offline with a multiplicative
/// order search and are baked in as constants.
///
/// [`LEN_POLY`]: RsaProfile::LEN_POLY
/// [`LIMB_BITS`]: RsaProfile::LIMB_BITS
/// [`NTT_ROUND`]: RsaProfile::NTT_ROUND
/// [`Q1`]: RsaProfile::Q1
/// [`Q2`]: RsaProfile::Q2
/// [`ROOT1`]: RsaProfile::ROOT1
/// [`ROOT2`]: RsaProfile::ROOT2
/// [`NTT_LEN`]: RsaProfile::NTT_LEN
pub trait RsaProfile: Sized + Sync + Send + 'static {
    /// RSA modulus width in bits (2048 or 4096).
    const N: usize;

    /// Limb width `l` in bits.
    const LIMB_BITS: usize;

    /// Number of limbs per vector; equals `NTT_LEN * 3`.
    const LEN_POLY: usize;

    /// Number of degree-3 blocks, i.e. the power-of-two NTT length.
    const NTT_LEN: usize;

    /// Butterfly rounds: block distance `LEN_POLY/2` down to 3.
    const NTT_ROUND: usize;

    /// First NTT prime.
    const Q1: u64;

    /// Primitive `NTT_LEN`-th root of unity modulo [`Q1`](Self::Q1).
    const ROOT1: u64;

    /// Second NTT prime, coprime to `Q1`.
    const Q2: u64;

    /// Primitive `NTT_LEN`-th root of unity modulo [`Q2`](Self::Q2).
    const ROOT2: u64;

    /// `Q1^-1 mod Q2`, the CRT reconstruction constant.
    const Q1_INV_Q2: u64;
}

/// 2048-bit RSA profile: 384 = 128·3 limbs of 11 bits.
///
/// `q1 = 12289 = 3·2^12 + 1` with root 81 of order 128, and
/// `q2 = 65537 = 2^16 + 1` with root 13987 of order 128.
/// `q1·q2 ≈ 2^29.6` bounds convolution coefficients
/// (`187 · (2^11 - 1)^2 ≈ 2^29.5`).
pub struct Rsa2048;

impl RsaProfile for Rsa2048 {
    const N: usize = 2048;
    const LIMB_BITS: usize = 11;
    const LEN_POLY: usize = 384;
    const NTT_LEN: usize = 128;
    const NTT_ROUND: usize = 7;
    const Q1: u64 = 12289;
    const ROOT1: u64 = 81;
    const Q2: u64 = 65537;
    const ROOT2: u64 = 13987;
    const Q1_INV_Q2: u64 = 45373;
}

/// 4096-bit RSA profile: 768 = 256·3 limbs of 11 bits.
///
/// `q1 = 12289` with root 8340 of order 256, and
/// `q2 = 163841 = 5·2^15 + 1` with root 108858 of order 256.
pub struct Rsa4096;

impl RsaProfile for Rsa4096 {
    const N: usize = 4096;
    const LIMB_BITS: usize = 11;
    const LEN_POLY: usize = 768;
    const NTT_LEN: usize = 256;
    const NTT_ROUND: usize = 8;
    const Q1: u64 = 12289;
    const ROOT1: u64 = 8340;
    const Q2: u64 = 163841;
    const ROOT2: u64 = 108858;
    const Q1_INV_Q2: u64 = 128417;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ntt::modq_pow;

    fn check_profile<P: RsaProfile>() {
        assert_eq!(P::LEN_POLY, P::NTT_LEN * 3);
        assert_eq!(P::LEN_POLY >> P::NTT_ROUND, 3);
        assert!(P::LEN_POLY * P::LIMB_BITS >= 2 * P::N);

        // Products of two chunked N-bit integers must stay clear of the
        // cyclic wrap of the length-LEN_POLY convolution.
        let limbs = P::N.div_ceil(P::LIMB_BITS);
        assert!(2 * limbs - 1 <= P::LEN_POLY);

        // CRT range: worst-case convolution coefficient below q1*q2.
        let max_limb = (1u64 << P::LIMB_BITS) - 1;
        assert!((limbs as u64) * max_limb * max_limb < P::Q1 * P::Q2);

        // Exact root orders.
        for (q, root) in [(P::Q1, P::ROOT1), (P::Q2, P::ROOT2)] {
            assert_eq!(modq_pow(root, P::NTT_LEN as u64, q), 1);
            assert_ne!(modq_pow(root, (P::NTT_LEN / 2) as u64, q), 1);
        }

        assert_eq!(P::Q1 * P::Q1_INV_Q2 % P::Q2, 1);
    }

    #[test]
    fn profile_2048() {
        check_profile::<Rsa2048>();
    }

    #[test]
    fn profile_4096() {
        check_profile::<Rsa4096>();
    }
}
