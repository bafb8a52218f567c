//! Content crypto dispatcher (spec §4.3, C3): maps `(enc, CEK)` to the
//! right primitive in [`jose_jwa`], validates CEK length, and generates
//! fresh CEKs.

use alloc::vec::Vec;

use jose_jwa::{aead, cbc, gcm};
use jose_jwk::EncryptionAlg;

use crate::context::SecureRandom;
use crate::error::{Error, Result};

/// A freshly content-encrypted payload: IV, ciphertext, and authentication
/// tag, each already the exact length the wire format requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encrypted {
    /// Content-encryption initialization vector.
    pub iv: Vec<u8>,
    /// Ciphertext bytes.
    pub ciphertext: Vec<u8>,
    /// Authentication tag.
    pub tag: Vec<u8>,
}

/// Generate a fresh CEK of the length `enc` mandates (spec §3 "CEK bit
/// length per `enc`").
pub fn generate_cek(enc: EncryptionAlg, rng: &mut dyn SecureRandom) -> Vec<u8> {
    let mut cek = alloc::vec![0u8; enc.cek_bits() / 8];
    rng.fill_bytes(&mut cek);
    cek
}

fn legacy_variant(enc: EncryptionAlg) -> Option<aead::legacy::LegacyVariant> {
    match enc {
        EncryptionAlg::Aes128CbcHs256Deprecated => Some(aead::legacy::LegacyVariant::Hs256),
        EncryptionAlg::Aes256CbcHs512Deprecated => Some(aead::legacy::LegacyVariant::Hs512),
        _ => None,
    }
}

fn cbc_hs_variant(enc: EncryptionAlg) -> Option<aead::Variant> {
    match enc {
        EncryptionAlg::Aes128CbcHs256 => Some(aead::Variant::Hs256),
        EncryptionAlg::Aes192CbcHs384 => Some(aead::Variant::Hs384),
        EncryptionAlg::Aes256CbcHs512 => Some(aead::Variant::Hs512),
        _ => None,
    }
}

fn check_cek_len(enc: EncryptionAlg, cek: &[u8]) -> Result<()> {
    if cek.len() * 8 != enc.cek_bits() {
        return Err(Error::KeyLengthMismatch);
    }
    Ok(())
}

/// Encrypt `plaintext` (already decompressed, if `zip` applies — see
/// [`crate::zip`]) under `enc`, generating a fresh random IV.
pub fn encrypt(
    enc: EncryptionAlg,
    cek: &[u8],
    plaintext: &[u8],
    aad: &[u8],
    rng: &mut dyn SecureRandom,
) -> Result<Encrypted> {
    check_cek_len(enc, cek)?;

    if enc.is_gcm() {
        let mut iv = [0u8; gcm::IV_LEN];
        rng.fill_bytes(&mut iv);
        let (ciphertext, tag) = gcm::encrypt(cek, &iv, plaintext, aad)?;
        return Ok(Encrypted {
            iv: iv.to_vec(),
            ciphertext,
            tag: tag.to_vec(),
        });
    }

    let mut iv = [0u8; cbc::IV_LEN];
    rng.fill_bytes(&mut iv);

    if let Some(variant) = cbc_hs_variant(enc) {
        let (ciphertext, tag) = aead::encrypt(variant, cek, &iv, plaintext, aad)?;
        return Ok(Encrypted {
            iv: iv.to_vec(),
            ciphertext,
            tag,
        });
    }

    if let Some(variant) = legacy_variant(enc) {
        let (ciphertext, tag) = aead::legacy::encrypt(variant, cek, &iv, plaintext, aad)?;
        return Ok(Encrypted {
            iv: iv.to_vec(),
            ciphertext,
            tag,
        });
    }

    unreachable!("EncryptionAlg is a closed, exhaustively matched set")
}

/// Decrypt content produced by [`encrypt`] (or a compliant peer).
pub fn decrypt(
    enc: EncryptionAlg,
    cek: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    check_cek_len(enc, cek)?;

    if enc.is_gcm() {
        let iv: &[u8; gcm::IV_LEN] = iv.try_into().map_err(|_| Error::KeyLengthMismatch)?;
        let tag: &[u8; gcm::TAG_LEN] = tag.try_into().map_err(|_| Error::MacFail)?;
        return Ok(gcm::decrypt(cek, iv, ciphertext, aad, tag)?);
    }

    let iv: &[u8; cbc::IV_LEN] = iv.try_into().map_err(|_| Error::KeyLengthMismatch)?;

    if let Some(variant) = cbc_hs_variant(enc) {
        return Ok(aead::decrypt(variant, cek, iv, ciphertext, aad, tag)?);
    }

    if let Some(variant) = legacy_variant(enc) {
        return Ok(aead::legacy::decrypt(variant, cek, iv, ciphertext, aad, tag)?);
    }

    unreachable!("EncryptionAlg is a closed, exhaustively matched set")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_cek_matches_mandated_length() {
        let mut rng = rand_core::OsRng;
        for enc in [
            EncryptionAlg::Aes128Gcm,
            EncryptionAlg::Aes192Gcm,
            EncryptionAlg::Aes256Gcm,
            EncryptionAlg::Aes128CbcHs256,
            EncryptionAlg::Aes192CbcHs384,
            EncryptionAlg::Aes256CbcHs512,
        ] {
            let cek = generate_cek(enc, &mut rng);
            assert_eq!(cek.len() * 8, enc.cek_bits());
        }
    }

    #[test]
    fn roundtrip_every_enc() {
        let mut rng = rand_core::OsRng;
        for enc in [
            EncryptionAlg::Aes128Gcm,
            EncryptionAlg::Aes192Gcm,
            EncryptionAlg::Aes256Gcm,
            EncryptionAlg::Aes128CbcHs256,
            EncryptionAlg::Aes192CbcHs384,
            EncryptionAlg::Aes256CbcHs512,
            EncryptionAlg::Aes128CbcHs256Deprecated,
            EncryptionAlg::Aes256CbcHs512Deprecated,
        ] {
            let cek = generate_cek(enc, &mut rng);
            let enc_out = encrypt(enc, &cek, b"hello jose", b"header-bytes", &mut rng).unwrap();
            let pt = decrypt(
                enc,
                &cek,
                &enc_out.iv,
                &enc_out.ciphertext,
                b"header-bytes",
                &enc_out.tag,
            )
            .unwrap();
            assert_eq!(pt, b"hello jose");
        }
    }

    #[test]
    fn wrong_cek_length_is_key_length_mismatch() {
        let mut rng = rand_core::OsRng;
        let short_cek = [0u8; 16];
        assert_eq!(
            encrypt(
                EncryptionAlg::Aes256CbcHs512,
                &short_cek,
                b"x",
                b"",
                &mut rng
            ),
            Err(Error::KeyLengthMismatch)
        );
    }

    #[test]
    fn tampered_ciphertext_fails_closed() {
        let mut rng = rand_core::OsRng;
        let cek = generate_cek(EncryptionAlg::Aes128Gcm, &mut rng);
        let mut out = encrypt(EncryptionAlg::Aes128Gcm, &cek, b"payload", b"aad", &mut rng).unwrap();
        out.ciphertext[0] ^= 1;
        assert_eq!(
            decrypt(
                EncryptionAlg::Aes128Gcm,
                &cek,
                &out.iv,
                &out.ciphertext,
                b"aad",
                &out.tag
            ),
            Err(Error::MacFail)
        );
    }
}
