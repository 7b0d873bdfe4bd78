//! RSA modular exponentiation accelerated by a dual-modulus NTT.
//!
//! The engine computes `a^e mod p` for 2048-bit and 4096-bit moduli on
//! top of Montgomery REDC, with every big-integer multiplication inside
//! the reduction performed in transform space:
//!
//! 1. the integer is split into 11-bit limbs ([`limb`]),
//! 2. the limb vector is transformed under two NTT-friendly primes
//!    ([`ntt`]), multiplied block-wise in a degree-3 quotient ring, and
//!    inverse-transformed,
//! 3. the two residue vectors are recombined by CRT ([`crt`]),
//! 4. REDC runs three such passes per modular multiplication
//!    ([`montgomery`]), never dividing a big integer,
//! 5. square-and-multiply drives the pipeline once per exponent bit
//!    ([`expmod`]).
//!
//! All per-bit-width constants (primes, roots, transform geometry) live
//! behind the [`RsaProfile`] trait; [`Rsa2048`] and [`Rsa4096`] are the
//! two supported profiles. A [`MontgomeryContext`] is an immutable value
//! derived once per RSA modulus and freely shareable across threads.
//!
//! ```
//! use ntt_rsa::{Engine, Rsa2048};
//! use rug::Integer;
//!
//! let engine = Engine::<Rsa2048>::new();
//! let p = (Integer::from(1) << 2047u32) | 0xee7u32;
//! let ctx = engine.build_context(&p).unwrap();
//! let x = Integer::from(0x1234_5678u64);
//! let y = engine
//!     .modexp_public(&ctx, &x, &Integer::from(65537))
//!     .unwrap();
//! assert_eq!(y, x.pow_mod(&Integer::from(65537), &p).unwrap());
//! ```

pub mod crt;
pub mod error;
pub mod expmod;
pub mod inv2k;
pub mod limb;
pub mod montgomery;
pub mod ntt;
pub mod params;
pub mod rsa;

pub use error::{Error, Result};
pub use montgomery::{Engine, MontgomeryContext};
pub use ntt::{NttTable, Transform};
pub use params::{Rsa2048, Rsa4096, RsaProfile};
pub use rsa::NttRsa;
