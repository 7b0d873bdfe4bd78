//! Validation errors of the engine API.
//!
//! Every error is a synchronous, non-retryable validation failure: pure
//! arithmetic has no transient failure mode, so callers should treat any
//! of these as a programming or configuration defect.

use std::fmt;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The RSA modulus is even, non-positive, or wider than the profile
    /// supports. An even modulus has no 2-adic inverse, which Montgomery
    /// reduction requires.
    InvalidModulus,
    /// A multiply/square/modexp was invoked before a modulus was
    /// configured.
    ContextNotConfigured,
    /// A limb vector does not have the profile's fixed length.
    LengthMismatch { expected: usize, got: usize },
    /// A public exponent outside `[0, 2^32)`, or a private exponent that
    /// is negative or wider than the modulus.
    ExponentOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidModulus => {
                write!(f, "modulus must be odd, positive and within the profile width")
            }
            Error::ContextNotConfigured => {
                write!(f, "no modulus configured: call set_modulus first")
            }
            Error::LengthMismatch { expected, got } => {
                write!(f, "limb vector length {got} != expected {expected}")
            }
            Error::ExponentOutOfRange => write!(f, "exponent out of supported range"),
        }
    }
}

impl std::error::Error for Error {}
