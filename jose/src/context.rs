//! JCA/provider context (spec §4.8, C9).
//!
//! A configuration bag threaded into every encrypt/decrypt/sign/verify
//! call. This engine has no pluggable-provider concept of its own (there is
//! one Rust implementation of each primitive, selected by algorithm), so
//! every field besides the RNG is inert — carried only so a caller porting
//! from a JCA-shaped API has somewhere to put its provider names, per spec
//! §4.8 "implementations on platforms without pluggable providers may
//! ignore all but the RNG".

use alloc::string::String;

use rand_core::{CryptoRng, RngCore};

/// A cryptographically secure RNG, object-safe so a [`ProviderContext`] can
/// hold one behind a `&mut dyn` reference.
///
/// `RngCore + CryptoRng` cannot be combined into a single trait object
/// directly (multiple non-auto traits); this trait exists purely to give
/// the pair of bounds one object-safe name. Blanket-implemented for every
/// type that already satisfies both.
pub trait SecureRandom: RngCore + CryptoRng {}

impl<T: RngCore + CryptoRng> SecureRandom for T {}

/// Per-operation provider configuration.
///
/// Randomness is mandatory: every code path that needs entropy (CEK
/// generation, IV/salt generation, ephemeral EC key generation) takes it
/// from `rng`, and spec §5 treats the *absence* of an RNG as the fatal
/// condition [`crate::Error::CryptoUnavailable`] rather than something a
/// default can silently paper over.
pub struct ProviderContext<'r> {
    rng: &'r mut dyn SecureRandom,

    /// Opaque provider name for key-encryption (RSA/ECDH/AES-KW/PBES2)
    /// operations. Unused by this engine; carried for API parity with JCA
    /// provider-name plumbing.
    pub key_encryption_provider: Option<String>,

    /// Opaque provider name for content-encryption (AES-CBC/AES-GCM)
    /// operations. Unused by this engine.
    pub content_encryption_provider: Option<String>,

    /// Opaque provider name for MAC (HMAC) operations. Unused by this
    /// engine.
    pub mac_provider: Option<String>,

    /// Opaque provider name for signature (RSA/ECDSA) operations. Unused
    /// by this engine.
    pub signature_provider: Option<String>,
}

impl<'r> ProviderContext<'r> {
    /// A context using `rng` and platform-default (i.e. absent) provider
    /// selection everywhere else.
    pub fn new(rng: &'r mut dyn SecureRandom) -> Self {
        Self {
            rng,
            key_encryption_provider: None,
            content_encryption_provider: None,
            mac_provider: None,
            signature_provider: None,
        }
    }

    /// Borrow the configured RNG.
    pub fn rng(&mut self) -> &mut dyn SecureRandom {
        self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_exposes_working_rng() {
        let mut os_rng = rand_core::OsRng;
        let mut ctx = ProviderContext::new(&mut os_rng);
        let mut buf = [0u8; 16];
        ctx.rng().fill_bytes(&mut buf);
        assert_ne!(buf, [0u8; 16]);
    }
}
