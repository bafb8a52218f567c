//! AES-GCM AEAD (spec §4.1 "AES-GCM").

use alloc::vec::Vec;

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{AesGcm, Nonce};
use digest::consts::U12;

use crate::error::{Error, Result};

type Aes128Gcm = AesGcm<aes::Aes128, U12>;
type Aes192Gcm = AesGcm<aes::Aes192, U12>;
type Aes256Gcm = AesGcm<aes::Aes256, U12>;

/// IV length for GCM mode, in bytes (spec §3 "IV is ... 12 bytes for GCM",
/// spec §4.1 "IV 96 bits").
pub const IV_LEN: usize = 12;

/// Authentication tag length for GCM, in bytes (spec §3 "tag is exactly 16
/// bytes for GCM").
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under AES-GCM, returning `(ciphertext, tag)`.
///
/// `key` must be 16, 24, or 32 bytes; `iv` must be exactly [`IV_LEN`] bytes.
pub fn encrypt(
    key: &[u8],
    iv: &[u8; IV_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<(Vec<u8>, [u8; TAG_LEN])> {
    let nonce = Nonce::from_slice(iv);
    let payload = Payload { msg: plaintext, aad };
    let mut combined = match key.len() {
        16 => Aes128Gcm::new_from_slice(key)
            .map_err(|_| Error::KeyLengthMismatch)?
            .encrypt(nonce, payload)
            .map_err(|_| Error::MacFail)?,
        24 => Aes192Gcm::new_from_slice(key)
            .map_err(|_| Error::KeyLengthMismatch)?
            .encrypt(nonce, payload)
            .map_err(|_| Error::MacFail)?,
        32 => Aes256Gcm::new_from_slice(key)
            .map_err(|_| Error::KeyLengthMismatch)?
            .encrypt(nonce, payload)
            .map_err(|_| Error::MacFail)?,
        _ => return Err(Error::KeyLengthMismatch),
    };
    let tag_start = combined.len() - TAG_LEN;
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&combined[tag_start..]);
    combined.truncate(tag_start);
    Ok((combined, tag))
}

/// Decrypt `(ciphertext, tag)` produced by [`encrypt`] (or a JWE peer),
/// verifying the authentication tag.
///
/// Returns [`Error::MacFail`] — never a distinguishable "bad tag" variant —
/// on any authentication failure.
pub fn decrypt(
    key: &[u8],
    iv: &[u8; IV_LEN],
    ciphertext: &[u8],
    aad: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<Vec<u8>> {
    let nonce = Nonce::from_slice(iv);
    let mut combined = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    combined.extend_from_slice(ciphertext);
    combined.extend_from_slice(tag);
    let payload = Payload {
        msg: &combined,
        aad,
    };
    match key.len() {
        16 => Aes128Gcm::new_from_slice(key)
            .map_err(|_| Error::KeyLengthMismatch)?
            .decrypt(nonce, payload)
            .map_err(|_| Error::MacFail),
        24 => Aes192Gcm::new_from_slice(key)
            .map_err(|_| Error::KeyLengthMismatch)?
            .decrypt(nonce, payload)
            .map_err(|_| Error::MacFail),
        32 => Aes256Gcm::new_from_slice(key)
            .map_err(|_| Error::KeyLengthMismatch)?
            .decrypt(nonce, payload)
            .map_err(|_| Error::MacFail),
        _ => Err(Error::KeyLengthMismatch),
    }
}
