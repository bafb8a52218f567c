//! ECDSA sign/verify, with JOSE's fixed-length `R || S` signature encoding
//! (spec §4.1 "ECDSA"). RFC7518 §3.4 requires the raw, fixed-width
//! concatenation rather than the ASN.1 DER form the underlying `ecdsa`
//! crate produces internally, so every signature crosses a DER ↔ fixed-R‖S
//! boundary here.

use alloc::vec::Vec;

use ecdsa::signature::{Signer, Verifier};

use crate::error::{Error, Result};

/// The three NIST curves JWS `ES*` signing supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// `ES256` over P-256.
    P256,
    /// `ES384` over P-384.
    P384,
    /// `ES512` over P-521.
    P521,
}

impl EcdsaCurve {
    /// The fixed length of each of `R` and `S` for this curve, in bytes —
    /// also the signature's total length divided by two.
    pub const fn coordinate_len(self) -> usize {
        match self {
            EcdsaCurve::P256 => 32,
            EcdsaCurve::P384 => 48,
            EcdsaCurve::P521 => 66,
        }
    }
}

/// Sign `message` with a raw private scalar, returning the fixed-length
/// `R || S` signature JOSE expects.
pub fn sign(curve: EcdsaCurve, private_scalar: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    match curve {
        EcdsaCurve::P256 => sign_p256(private_scalar, message),
        EcdsaCurve::P384 => sign_p384(private_scalar, message),
        EcdsaCurve::P521 => sign_p521(private_scalar, message),
    }
}

/// Verify a fixed-length `R || S` signature against `message`.
pub fn verify(curve: EcdsaCurve, public_point: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
    if signature.len() != curve.coordinate_len() * 2 {
        return Err(Error::MacFail);
    }
    match curve {
        EcdsaCurve::P256 => verify_p256(public_point, message, signature),
        EcdsaCurve::P384 => verify_p384(public_point, message, signature),
        EcdsaCurve::P521 => verify_p521(public_point, message, signature),
    }
}

fn sign_p256(private_scalar: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let key = p256::ecdsa::SigningKey::from_slice(private_scalar)
        .map_err(|_| Error::KeyLengthMismatch)?;
    let sig: p256::ecdsa::Signature = key.try_sign(message).map_err(|_| Error::CryptoUnavailable)?;
    Ok(sig.to_bytes().to_vec())
}

fn verify_p256(public_point: &[u8], message: &[u8], fixed_sig: &[u8]) -> Result<()> {
    let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(public_point)
        .map_err(|_| Error::InvalidKeyType)?;
    let sig =
        p256::ecdsa::Signature::from_slice(fixed_sig).map_err(|_| Error::MacFail)?;
    key.verify(message, &sig).map_err(|_| Error::MacFail)
}

fn sign_p384(private_scalar: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let key = p384::ecdsa::SigningKey::from_slice(private_scalar)
        .map_err(|_| Error::KeyLengthMismatch)?;
    let sig: p384::ecdsa::Signature = key.try_sign(message).map_err(|_| Error::CryptoUnavailable)?;
    Ok(sig.to_bytes().to_vec())
}

fn verify_p384(public_point: &[u8], message: &[u8], fixed_sig: &[u8]) -> Result<()> {
    let key = p384::ecdsa::VerifyingKey::from_sec1_bytes(public_point)
        .map_err(|_| Error::InvalidKeyType)?;
    let sig =
        p384::ecdsa::Signature::from_slice(fixed_sig).map_err(|_| Error::MacFail)?;
    key.verify(message, &sig).map_err(|_| Error::MacFail)
}

fn sign_p521(private_scalar: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let key = p521::ecdsa::SigningKey::from_slice(private_scalar)
        .map_err(|_| Error::KeyLengthMismatch)?;
    let sig: p521::ecdsa::Signature = key.try_sign(message).map_err(|_| Error::CryptoUnavailable)?;
    Ok(sig.to_bytes().to_vec())
}

fn verify_p521(public_point: &[u8], message: &[u8], fixed_sig: &[u8]) -> Result<()> {
    let key = p521::ecdsa::VerifyingKey::from_sec1_bytes(public_point)
        .map_err(|_| Error::InvalidKeyType)?;
    let sig =
        p521::ecdsa::Signature::from_slice(fixed_sig).map_err(|_| Error::MacFail)?;
    key.verify(message, &sig).map_err(|_| Error::MacFail)
}
