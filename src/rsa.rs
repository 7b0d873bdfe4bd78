//! Stateful front door over the value-level engine API.
//!
//! [`NttRsa`] bundles an [`Engine`] with an optional configured
//! [`MontgomeryContext`], mirroring a set-modulus-then-operate calling
//! style. Operations before [`NttRsa::set_modulus`] fail with
//! [`Error::ContextNotConfigured`]. Callers that juggle several keys
//! concurrently should use [`Engine`] directly and pass contexts as
//! values.

use rug::Integer;

use crate::error::{Error, Result};
use crate::montgomery::{Engine, MontgomeryContext};
use crate::params::RsaProfile;

pub struct NttRsa<P: RsaProfile> {
    engine: Engine<P>,
    ctx: Option<MontgomeryContext>,
}

impl<P: RsaProfile> Default for NttRsa<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: RsaProfile> NttRsa<P> {
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
            ctx: None,
        }
    }

    pub fn engine(&self) -> &Engine<P> {
        &self.engine
    }

    /// The configured context, if any.
    pub fn context(&self) -> Option<&MontgomeryContext> {
        self.ctx.as_ref()
    }

    /// Builds and installs the Montgomery context for modulus `p`,
    /// replacing any previous one.
    pub fn set_modulus(&mut self, p: &Integer) -> Result<()> {
        self.ctx = Some(self.engine.build_context(p)?);
        Ok(())
    }

    fn configured(&self) -> Result<&MontgomeryContext> {
        self.ctx.as_ref().ok_or(Error::ContextNotConfigured)
    }

    /// Montgomery product `a*b*R^-1 mod p`.
    pub fn multiply(&self, a: &Integer, b: &Integer) -> Result<Integer> {
        self.engine.multiply(self.configured()?, a, b)
    }

    /// Montgomery square `a^2*R^-1 mod p`.
    pub fn square(&self, a: &Integer) -> Result<Integer> {
        self.engine.square(self.configured()?, a)
    }

    /// `a^e mod p`, `e < 2^32`.
    pub fn modexp_public(&self, a: &Integer, e: &Integer) -> Result<Integer> {
        self.engine.modexp_public(self.configured()?, a, e)
    }

    /// `a^d mod p` for a modulus-sized private exponent.
    pub fn modexp_private(&self, a: &Integer, d: &Integer) -> Result<Integer> {
        self.engine.modexp_private(self.configured()?, a, d)
    }
}
