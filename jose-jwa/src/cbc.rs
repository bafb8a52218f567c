//! AES-CBC with PKCS#7 padding (spec §4.1 "AES-CBC with PKCS#7 padding").
//!
//! Block size is fixed at 16 bytes; the key size (128/192/256-bit) selects
//! the underlying AES variant. This module never surfaces *why* decryption
//! failed (bad padding vs. anything else) — callers treat any `Err` as
//! opaque, and the composite AEAD in [`crate::aead`] folds it into
//! [`crate::Error::MacFail`] regardless.

use alloc::vec::Vec;

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::error::{Error, Result};

/// Block size for all AES variants, in bytes.
pub const BLOCK_LEN: usize = 16;

/// Initialization vector length for CBC mode, in bytes (spec §3
/// "IV is 16 bytes for CBC").
pub const IV_LEN: usize = 16;

/// Encrypt `plaintext` under AES-CBC with PKCS#7 padding.
///
/// `key` must be 16, 24, or 32 bytes; `iv` must be exactly [`IV_LEN`] bytes.
pub fn encrypt(key: &[u8], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    match key.len() {
        16 => Ok(cbc::Encryptor::<Aes128>::new(key.into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        24 => Ok(cbc::Encryptor::<Aes192>::new(key.into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        32 => Ok(cbc::Encryptor::<Aes256>::new(key.into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        _ => Err(Error::KeyLengthMismatch),
    }
}

/// Decrypt `ciphertext` produced by [`encrypt`], verifying and stripping
/// PKCS#7 padding.
///
/// Returns [`Error::MacFail`] (not a distinct "bad padding" error — see
/// spec §4.2) if the ciphertext length isn't a multiple of the block size
/// or padding verification fails.
pub fn decrypt(key: &[u8], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let unpad = |r: core::result::Result<Vec<u8>, cbc::cipher::block_padding::UnpadError>| {
        r.map_err(|_| Error::MacFail)
    };
    match key.len() {
        16 => unpad(
            cbc::Decryptor::<Aes128>::new(key.into(), iv.into())
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        ),
        24 => unpad(
            cbc::Decryptor::<Aes192>::new(key.into(), iv.into())
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        ),
        32 => unpad(
            cbc::Decryptor::<Aes256>::new(key.into(), iv.into())
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        ),
        _ => Err(Error::KeyLengthMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_key_sizes() {
        for key_len in [16, 24, 32] {
            let key = alloc::vec![0x42u8; key_len];
            let iv = [0x24u8; IV_LEN];
            let plaintext = b"some plaintext that is not block aligned!";
            let ct = encrypt(&key, &iv, plaintext).unwrap();
            assert_eq!(ct.len() % BLOCK_LEN, 0);
            let pt = decrypt(&key, &iv, &ct).unwrap();
            assert_eq!(pt, plaintext);
        }
    }

    #[test]
    fn tampered_ciphertext_fails_closed() {
        let key = [0x11u8; 32];
        let iv = [0x22u8; IV_LEN];
        let mut ct = encrypt(&key, &iv, b"hello world").unwrap();
        *ct.last_mut().unwrap() ^= 0xff;
        assert_eq!(decrypt(&key, &iv, &ct), Err(Error::MacFail));
    }
}
