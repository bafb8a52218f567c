//! JWS signer/verifier suites (spec §4.5, C6) and the JWS object state
//! machine (spec §4.6/§9, C7).
//!
//! Signing input is `ASCII(base64url(header)) || 0x2E ||
//! ASCII(base64url(payload))`; the signature is computed over exactly these
//! bytes, and `header` is always the [`jose_b64::Json`]-captured raw bytes,
//! never a re-derived encoding.

use alloc::string::String;
use alloc::vec::Vec;

use jose_b64::base64ct::{Base64UrlUnpadded, Encoding};
use jose_b64::Json;
use jose_jwa::{mac::HmacAlg, rsa, rsa_ops};
use jose_jwa::{ecdsa_ops::EcdsaCurve, mac};
use jose_jwk::{EcCurve, SigningAlg};

use crate::context::SecureRandom;
use crate::crit::CriticalHeaderPolicy;
use crate::error::{Error, Result};
use crate::header::JwsHeader;

/// Key material supplied to [`Jws::sign`], one variant per family.
pub enum SigningMaterial<'a> {
    /// Shared secret for `HS*`.
    Hmac(&'a [u8]),
    /// RSA private key for `RS*`/`PS*`.
    RsaPrivate(&'a rsa::RsaPrivateKey),
    /// EC private key for `ES*`: the curve and the raw private scalar.
    EcPrivate { curve: EcCurve, scalar: &'a [u8] },
}

/// Key material supplied to [`Jws::verify`], one variant per family.
pub enum VerifyingMaterial<'a> {
    /// Shared secret for `HS*`.
    Hmac(&'a [u8]),
    /// RSA public key for `RS*`/`PS*`.
    RsaPublic(&'a rsa::RsaPublicKey),
    /// EC public key for `ES*`: the curve and its uncompressed SEC1 point.
    EcPublic { curve: EcCurve, point: &'a [u8] },
}

/// Lifecycle position of a [`Jws`], per spec §4.6: `UNSIGNED → SIGNED →
/// VERIFIED`. Verification never moves backward — a failed verification
/// leaves the object at `Signed` and reports failure through the return
/// value, not this state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JwsState {
    /// Constructed via [`Jws::new`], not yet signed.
    Unsigned,
    /// Signed (via [`Jws::sign`]) or parsed (via [`Jws::parse`]) but not yet
    /// verified.
    Signed,
    /// Successfully verified via [`Jws::verify`].
    Verified,
}

/// A JSON Web Signature object moving through [`JwsState`].
pub struct Jws {
    header: Json<JwsHeader>,
    payload: Vec<u8>,
    signature: Vec<u8>,
    state: JwsState,
}

impl Jws {
    /// Construct a fresh, unsigned JWS from `header` and `payload`.
    pub fn new(header: JwsHeader, payload: Vec<u8>) -> Result<Self> {
        Ok(Self {
            header: Json::new(header)?,
            payload,
            signature: Vec::new(),
            state: JwsState::Unsigned,
        })
    }

    /// Parse a three-part compact JWS. The object starts in [`JwsState::Signed`]
    /// (it carries a signature, but verification hasn't run yet).
    pub fn parse(compact: &str) -> Result<Self> {
        let mut parts = compact.split('.');
        let header_b64 = parts.next().ok_or(Error::ParseError)?;
        let payload_b64 = parts.next().ok_or(Error::ParseError)?;
        let signature_b64 = parts.next().ok_or(Error::ParseError)?;
        if parts.next().is_some() {
            return Err(Error::ParseError);
        }

        let header_raw = Base64UrlUnpadded::decode_vec(header_b64).map_err(|_| Error::ParseError)?;
        let payload = Base64UrlUnpadded::decode_vec(payload_b64).map_err(|_| Error::ParseError)?;
        let signature = Base64UrlUnpadded::decode_vec(signature_b64).map_err(|_| Error::ParseError)?;

        Ok(Self {
            header: Json::from_raw(header_raw.into_boxed_slice())?,
            payload,
            signature,
            state: JwsState::Signed,
        })
    }

    /// The parsed/constructed header.
    pub fn header(&self) -> &JwsHeader {
        self.header.get()
    }

    /// The payload bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The current lifecycle state.
    pub fn state(&self) -> JwsState {
        self.state
    }

    /// Sign this object, moving `Unsigned → Signed`.
    ///
    /// Any other starting state is [`Error::IllegalState`] — signing twice,
    /// or signing a parsed-but-unverified object, is a programmer error
    /// rather than something to silently allow.
    pub fn sign(mut self, material: &SigningMaterial<'_>, rng: &mut dyn SecureRandom) -> Result<Self> {
        if self.state != JwsState::Unsigned {
            return Err(Error::IllegalState);
        }
        let input = signing_input(self.header.raw_bytes(), &self.payload);
        self.signature = sign_bytes(self.header.get().alg, &input, material, rng)?;
        self.state = JwsState::Signed;
        Ok(self)
    }

    /// Verify this object's signature.
    ///
    /// Runs [`CriticalHeaderPolicy::check`] first (C8; rejection is
    /// [`Error::UnsupportedCrit`], a real error, not a verification
    /// failure). On success, moves `Signed → Verified` and returns `(self,
    /// true)`. On signature mismatch, the object stays at `Signed` and this
    /// returns `(self, false)` — a normal, expected outcome, not an error.
    /// Calling this outside `Signed` (e.g. twice, or on an `Unsigned`
    /// object) is [`Error::IllegalState`].
    pub fn verify(
        mut self,
        material: &VerifyingMaterial<'_>,
        crit_policy: &CriticalHeaderPolicy,
    ) -> Result<(Self, bool)> {
        if self.state != JwsState::Signed {
            return Err(Error::IllegalState);
        }
        crit_policy.check(&self.header.get().crit)?;
        let input = signing_input(self.header.raw_bytes(), &self.payload);
        match verify_bytes(self.header.get().alg, &input, &self.signature, material) {
            Ok(()) => {
                self.state = JwsState::Verified;
                Ok((self, true))
            }
            Err(Error::MacFail) => Ok((self, false)),
            Err(e) => Err(e),
        }
    }

    /// Serialize to three-part compact form. Requires a signature to exist
    /// (`Signed` or `Verified`); an `Unsigned` object has none to emit.
    pub fn serialize(&self) -> Result<String> {
        if self.state == JwsState::Unsigned {
            return Err(Error::IllegalState);
        }
        let mut out = String::new();
        out.push_str(&Base64UrlUnpadded::encode_string(self.header.raw_bytes()));
        out.push('.');
        out.push_str(&Base64UrlUnpadded::encode_string(&self.payload));
        out.push('.');
        out.push_str(&Base64UrlUnpadded::encode_string(&self.signature));
        Ok(out)
    }
}

fn signing_input(header_raw: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(header_raw.len() * 4 / 3 + payload.len() * 4 / 3 + 2);
    input.extend_from_slice(Base64UrlUnpadded::encode_string(header_raw).as_bytes());
    input.push(b'.');
    input.extend_from_slice(Base64UrlUnpadded::encode_string(payload).as_bytes());
    input
}

fn hmac_alg(alg: SigningAlg) -> Option<HmacAlg> {
    match alg {
        SigningAlg::Hs256 => Some(HmacAlg::Hs256),
        SigningAlg::Hs384 => Some(HmacAlg::Hs384),
        SigningAlg::Hs512 => Some(HmacAlg::Hs512),
        _ => None,
    }
}

fn rsa_sig_hash(alg: SigningAlg) -> Option<(rsa_ops::RsaSigHash, bool)> {
    use rsa_ops::RsaSigHash::*;
    match alg {
        SigningAlg::Rs256 => Some((Sha256, false)),
        SigningAlg::Rs384 => Some((Sha384, false)),
        SigningAlg::Rs512 => Some((Sha512, false)),
        SigningAlg::Ps256 => Some((Sha256, true)),
        SigningAlg::Ps384 => Some((Sha384, true)),
        SigningAlg::Ps512 => Some((Sha512, true)),
        _ => None,
    }
}

fn ecdsa_curve(alg: SigningAlg) -> Option<(EcdsaCurve, EcCurve)> {
    match alg {
        SigningAlg::Es256 => Some((EcdsaCurve::P256, EcCurve::P256)),
        SigningAlg::Es384 => Some((EcdsaCurve::P384, EcCurve::P384)),
        SigningAlg::Es512 => Some((EcdsaCurve::P521, EcCurve::P521)),
        _ => None,
    }
}

fn sign_bytes(
    alg: SigningAlg,
    message: &[u8],
    material: &SigningMaterial<'_>,
    mut rng: &mut dyn SecureRandom,
) -> Result<Vec<u8>> {
    if let Some(hmac_alg) = hmac_alg(alg) {
        let SigningMaterial::Hmac(key) = material else {
            return Err(Error::InvalidKeyType);
        };
        if key.len() * 8 < hmac_alg.output_len() * 8 {
            return Err(Error::UnsupportedAlg);
        }
        return Ok(mac::hmac(hmac_alg, key, message)?);
    }

    if let Some((hash, is_pss)) = rsa_sig_hash(alg) {
        let SigningMaterial::RsaPrivate(private_key) = material else {
            return Err(Error::InvalidKeyType);
        };
        return Ok(if is_pss {
            rsa_ops::pss_sign(&mut rng, hash, private_key, message)?
        } else {
            rsa_ops::pkcs1v15_sign(&mut rng, hash, private_key, message)?
        });
    }

    if let Some((curve, required)) = ecdsa_curve(alg) {
        let SigningMaterial::EcPrivate { curve: material_curve, scalar } = material else {
            return Err(Error::InvalidKeyType);
        };
        if *material_curve != required {
            return Err(Error::InvalidKeyType);
        }
        return Ok(jose_jwa::ecdsa_ops::sign(curve, scalar, message)?);
    }

    unreachable!("SigningAlg is a closed, exhaustively matched set")
}

fn verify_bytes(
    alg: SigningAlg,
    message: &[u8],
    signature: &[u8],
    material: &VerifyingMaterial<'_>,
) -> Result<()> {
    if let Some(hmac_alg) = hmac_alg(alg) {
        let VerifyingMaterial::Hmac(key) = material else {
            return Err(Error::InvalidKeyType);
        };
        return Ok(mac::verify(hmac_alg, key, message, signature)?);
    }

    if let Some((hash, is_pss)) = rsa_sig_hash(alg) {
        let VerifyingMaterial::RsaPublic(public_key) = material else {
            return Err(Error::InvalidKeyType);
        };
        return Ok(if is_pss {
            rsa_ops::pss_verify(hash, public_key, message, signature)?
        } else {
            rsa_ops::pkcs1v15_verify(hash, public_key, message, signature)?
        });
    }

    if let Some((curve, required)) = ecdsa_curve(alg) {
        let VerifyingMaterial::EcPublic { curve: material_curve, point } = material else {
            return Err(Error::InvalidKeyType);
        };
        if *material_curve != required {
            return Err(Error::InvalidKeyType);
        }
        return Ok(jose_jwa::ecdsa_ops::verify(curve, point, message, signature)?);
    }

    unreachable!("SigningAlg is a closed, exhaustively matched set")
}
