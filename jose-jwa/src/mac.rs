//! HMAC (spec §4.1 "HMAC").

use alloc::vec::Vec;

use hmac::{Hmac, Mac as _};
use sha2::{Sha256, Sha384, Sha512};

use crate::error::{Error, Result};

/// The three HMAC hash algorithms this engine supports, shared by JWS
/// `HS*` signing and the `AES_CBC_HMAC_SHA2` composite AEAD's MAC step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HmacAlg {
    /// HMAC-SHA-256 (32-byte tag).
    Hs256,
    /// HMAC-SHA-384 (48-byte tag).
    Hs384,
    /// HMAC-SHA-512 (64-byte tag).
    Hs512,
}

impl HmacAlg {
    /// The full (untruncated) output length of this HMAC, in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            HmacAlg::Hs256 => 32,
            HmacAlg::Hs384 => 48,
            HmacAlg::Hs512 => 64,
        }
    }
}

/// Compute `HMAC(key, message)`, selecting the hash by `alg`.
///
/// The output length always equals `alg.output_len()`; truncation (as used
/// by the composite CBC-HMAC AEAD) is the caller's responsibility.
pub fn hmac(alg: HmacAlg, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    Ok(match alg {
        HmacAlg::Hs256 => {
            let mut mac = <Hmac<Sha256> as hmac::Mac>::new_from_slice(key)
                .map_err(|_| Error::KeyLengthMismatch)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HmacAlg::Hs384 => {
            let mut mac = <Hmac<Sha384> as hmac::Mac>::new_from_slice(key)
                .map_err(|_| Error::KeyLengthMismatch)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        HmacAlg::Hs512 => {
            let mut mac = <Hmac<Sha512> as hmac::Mac>::new_from_slice(key)
                .map_err(|_| Error::KeyLengthMismatch)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    })
}

/// Verify `tag` against a freshly computed HMAC, in constant time. Folds
/// straight into [`Error::MacFail`] on mismatch, never revealing *how* a
/// tag was wrong.
pub fn verify(alg: HmacAlg, key: &[u8], message: &[u8], tag: &[u8]) -> Result<()> {
    let expected = hmac(alg, key, message)?;
    if crate::const_time::eq(&expected, tag) {
        Ok(())
    } else {
        Err(Error::MacFail)
    }
}
