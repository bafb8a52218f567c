//! RSA key management and signing (spec §4.1 "RSA").
//!
//! `rsa1_5_unwrap` implements the Bleichenbacher countermeasure from
//! RFC3218/RFC8017 §7.2.2: a PKCS#1 v1.5 decryption failure (bad padding,
//! wrong recovered length) never propagates as a distinct error. Instead a
//! freshly generated random CEK of the expected length is substituted, so
//! an attacker probing ciphertexts cannot tell "bad padding" from "good
//! padding, wrong CEK" from the unwrap outcome alone (spec §5 "RSA1_5
//! timing/oracle discipline").

use alloc::vec::Vec;

use rand_core::{CryptoRng, RngCore};
use rsa::signature::{RandomizedSigner, Signature as _, Verifier};
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::error::{Error, Result};

/// RSA-OAEP hash selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OaepHash {
    /// `RSA-OAEP`: SHA-1 (legacy, retained only for interop with existing
    /// tokens — spec §4.1 keeps it in the closed key-management set).
    Sha1,
    /// `RSA-OAEP-256`: SHA-256.
    Sha256,
}

/// RSASSA hash selection, shared by PKCS#1 v1.5 and PSS signing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RsaSigHash {
    /// `RS256`/`PS256`: SHA-256.
    Sha256,
    /// `RS384`/`PS384`: SHA-384.
    Sha384,
    /// `RS512`/`PS512`: SHA-512.
    Sha512,
}

/// Encrypt `cek` under `public_key` using RSAES-PKCS1-v1_5 (`RSA1_5`).
pub fn rsa1_5_wrap<R: RngCore + CryptoRng>(
    rng: &mut R,
    public_key: &RsaPublicKey,
    cek: &[u8],
) -> Result<Vec<u8>> {
    public_key
        .encrypt(rng, Pkcs1v15Encrypt, cek)
        .map_err(|_| Error::KeyTooShort)
}

/// Decrypt an `RSA1_5`-wrapped CEK, substituting a random CEK of
/// `expected_len` bytes on any failure (bad padding, wrong recovered
/// length, or a well-formed-but-wrong length) rather than returning an
/// error, per the Bleichenbacher countermeasure.
pub fn rsa1_5_unwrap<R: RngCore + CryptoRng>(
    rng: &mut R,
    private_key: &RsaPrivateKey,
    ciphertext: &[u8],
    expected_len: usize,
) -> Vec<u8> {
    match private_key.decrypt(Pkcs1v15Encrypt, ciphertext) {
        Ok(cek) if cek.len() == expected_len => cek,
        _ => {
            let mut random_cek = alloc::vec![0u8; expected_len];
            rng.fill_bytes(&mut random_cek);
            random_cek
        }
    }
}

/// Encrypt `cek` under `public_key` using RSAES-OAEP.
pub fn oaep_wrap<R: RngCore + CryptoRng>(
    rng: &mut R,
    hash: OaepHash,
    public_key: &RsaPublicKey,
    cek: &[u8],
) -> Result<Vec<u8>> {
    let result = match hash {
        OaepHash::Sha1 => public_key.encrypt(rng, Oaep::new::<Sha1>(), cek),
        OaepHash::Sha256 => public_key.encrypt(rng, Oaep::new::<Sha256>(), cek),
    };
    result.map_err(|_| Error::KeyTooShort)
}

/// Decrypt an OAEP-wrapped CEK. Unlike [`rsa1_5_unwrap`], OAEP decryption
/// failure is reported directly as [`Error::MacFail`] — OAEP's own padding
/// check does not suffer from Bleichenbacher's adaptive-oracle weakness the
/// way PKCS#1 v1.5 does, so no substitution is required (spec §4.1 "OAEP
/// decrypt failures may be reported directly").
pub fn oaep_unwrap(hash: OaepHash, private_key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let result = match hash {
        OaepHash::Sha1 => private_key.decrypt(Oaep::new::<Sha1>(), ciphertext),
        OaepHash::Sha256 => private_key.decrypt(Oaep::new::<Sha256>(), ciphertext),
    };
    result.map_err(|_| Error::MacFail)
}

/// Sign `message` using RSASSA-PKCS1-v1_5.
pub fn pkcs1v15_sign<R: RngCore + CryptoRng>(
    rng: &mut R,
    hash: RsaSigHash,
    private_key: &RsaPrivateKey,
    message: &[u8],
) -> Result<Vec<u8>> {
    let bytes = match hash {
        RsaSigHash::Sha256 => rsa::pkcs1v15::SigningKey::<Sha256>::new(private_key.clone())
            .sign_with_rng(rng, message)
            .as_bytes()
            .to_vec(),
        RsaSigHash::Sha384 => rsa::pkcs1v15::SigningKey::<Sha384>::new(private_key.clone())
            .sign_with_rng(rng, message)
            .as_bytes()
            .to_vec(),
        RsaSigHash::Sha512 => rsa::pkcs1v15::SigningKey::<Sha512>::new(private_key.clone())
            .sign_with_rng(rng, message)
            .as_bytes()
            .to_vec(),
    };
    Ok(bytes)
}

/// Verify an RSASSA-PKCS1-v1_5 signature.
pub fn pkcs1v15_verify(
    hash: RsaSigHash,
    public_key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    let sig = rsa::pkcs1v15::Signature::try_from(signature).map_err(|_| Error::MacFail)?;
    let verified = match hash {
        RsaSigHash::Sha256 => rsa::pkcs1v15::VerifyingKey::<Sha256>::new(public_key.clone())
            .verify(message, &sig),
        RsaSigHash::Sha384 => rsa::pkcs1v15::VerifyingKey::<Sha384>::new(public_key.clone())
            .verify(message, &sig),
        RsaSigHash::Sha512 => rsa::pkcs1v15::VerifyingKey::<Sha512>::new(public_key.clone())
            .verify(message, &sig),
    };
    verified.map_err(|_| Error::MacFail)
}

/// Sign `message` using RSASSA-PSS with a salt length equal to the hash's
/// output length, per RFC7518 §3.5.
pub fn pss_sign<R: RngCore + CryptoRng>(
    rng: &mut R,
    hash: RsaSigHash,
    private_key: &RsaPrivateKey,
    message: &[u8],
) -> Result<Vec<u8>> {
    let bytes = match hash {
        RsaSigHash::Sha256 => rsa::pss::SigningKey::<Sha256>::new(private_key.clone())
            .sign_with_rng(rng, message)
            .as_bytes()
            .to_vec(),
        RsaSigHash::Sha384 => rsa::pss::SigningKey::<Sha384>::new(private_key.clone())
            .sign_with_rng(rng, message)
            .as_bytes()
            .to_vec(),
        RsaSigHash::Sha512 => rsa::pss::SigningKey::<Sha512>::new(private_key.clone())
            .sign_with_rng(rng, message)
            .as_bytes()
            .to_vec(),
    };
    Ok(bytes)
}

/// Verify an RSASSA-PSS signature.
pub fn pss_verify(
    hash: RsaSigHash,
    public_key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<()> {
    let sig = rsa::pss::Signature::try_from(signature).map_err(|_| Error::MacFail)?;
    let verified = match hash {
        RsaSigHash::Sha256 => {
            rsa::pss::VerifyingKey::<Sha256>::new(public_key.clone()).verify(message, &sig)
        }
        RsaSigHash::Sha384 => {
            rsa::pss::VerifyingKey::<Sha384>::new(public_key.clone()).verify(message, &sig)
        }
        RsaSigHash::Sha512 => {
            rsa::pss::VerifyingKey::<Sha512>::new(public_key.clone()).verify(message, &sig)
        }
    };
    verified.map_err(|_| Error::MacFail)
}
