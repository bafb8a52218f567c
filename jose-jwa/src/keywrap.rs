//! AES Key Wrap, RFC 3394 (spec §4.1 "AES Key Wrap").
//!
//! Used by `A128KW`/`A192KW`/`A256KW` directly, and as the second stage of
//! `PBES2-HS*+A*KW` and `ECDH-ES+A*KW`.

use alloc::vec::Vec;

use aes_kw::{KekAes128, KekAes192, KekAes256};
use digest::generic_array::GenericArray;

use crate::error::{Error, Result};

/// Wrap `cek` under `kek`.
///
/// `kek` must be 16, 24, or 32 bytes; `cek` must be a multiple of 8 bytes
/// and at least 16 bytes long (RFC 3394 §2).
pub fn wrap(kek: &[u8], cek: &[u8]) -> Result<Vec<u8>> {
    match kek.len() {
        16 => KekAes128::new(GenericArray::from_slice(kek))
            .wrap_vec(cek)
            .map_err(|_| Error::KeyLengthMismatch),
        24 => KekAes192::new(GenericArray::from_slice(kek))
            .wrap_vec(cek)
            .map_err(|_| Error::KeyLengthMismatch),
        32 => KekAes256::new(GenericArray::from_slice(kek))
            .wrap_vec(cek)
            .map_err(|_| Error::KeyLengthMismatch),
        _ => Err(Error::KeyLengthMismatch),
    }
}

/// Unwrap a key-wrapped `ciphertext` under `kek`.
///
/// Returns [`Error::MacFail`] — never a distinguishable error — if the
/// integrity check defined by RFC 3394 §2.2.3 fails, so that an unwrap
/// failure cannot be used as an oracle against the KEK.
pub fn unwrap(kek: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    match kek.len() {
        16 => KekAes128::new(GenericArray::from_slice(kek))
            .unwrap_vec(ciphertext)
            .map_err(|_| Error::MacFail),
        24 => KekAes192::new(GenericArray::from_slice(kek))
            .unwrap_vec(ciphertext)
            .map_err(|_| Error::MacFail),
        32 => KekAes256::new(GenericArray::from_slice(kek))
            .unwrap_vec(ciphertext)
            .map_err(|_| Error::MacFail),
        _ => Err(Error::KeyLengthMismatch),
    }
}
