//! The error taxonomy this engine reports across JWS and JWE operations.

use core::fmt;

/// Every way a JOSE operation in this engine can fail.
///
/// Deliberately coarse where RFC7518/RFC7519 security considerations call
/// for it: [`Error::MacFail`] covers every authentication failure (HMAC
/// mismatch, GCM tag mismatch, CBC padding failure, AES Key Wrap integrity
/// check failure, RSA-OAEP decrypt failure) so that no combination of these
/// outcomes is distinguishable from the outside.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The compact or JSON serialization could not be parsed.
    ParseError,
    /// The `alg`/`enc` header names an algorithm outside this engine's
    /// closed, supported set.
    UnsupportedAlg,
    /// The `crit` header named an extension this engine does not defer,
    /// or was present as an explicit JSON `null`.
    UnsupportedCrit,
    /// A key was the wrong length for the algorithm it was used with.
    KeyLengthMismatch,
    /// A key was present but too short to be used safely (e.g. an RSA
    /// modulus too small for the requested padding scheme).
    KeyTooShort,
    /// A `Jwk`'s `kty` does not match the algorithm that selected it.
    InvalidKeyType,
    /// An ECDH-ES ephemeral public key (`epk`) is not a valid point on the
    /// expected curve.
    InvalidEphemeralKey,
    /// A header parameter required by the selected algorithm (e.g. `p2s`/
    /// `p2c` for PBES2, `iv`/`tag` for `*GCMKW`) is absent.
    MissingHeaderParam,
    /// A MAC, AEAD tag, key-wrap integrity check, or signature did not
    /// verify.
    MacFail,
    /// The requested algorithm needs an optional cryptographic backend
    /// (e.g. the `crypto` feature's EC/RSA crates) that isn't compiled in.
    CryptoUnavailable,
    /// An operation was attempted from a JOSE object state that does not
    /// permit it (e.g. signing an already-signed [`crate::jws::Jws`]).
    IllegalState,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::ParseError => "malformed JOSE serialization",
            Error::UnsupportedAlg => "unsupported algorithm",
            Error::UnsupportedCrit => "unsupported or invalid crit header",
            Error::KeyLengthMismatch => "key has the wrong length for this algorithm",
            Error::KeyTooShort => "key is too short for this algorithm",
            Error::InvalidKeyType => "key type does not match the selected algorithm",
            Error::InvalidEphemeralKey => "ephemeral public key is not a valid curve point",
            Error::MissingHeaderParam => "a required header parameter is missing",
            Error::MacFail => "integrity or signature check failed",
            Error::CryptoUnavailable => "required cryptographic backend is not available",
            Error::IllegalState => "operation not permitted in the object's current state",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<jose_jwa::Error> for Error {
    fn from(e: jose_jwa::Error) -> Self {
        match e {
            jose_jwa::Error::KeyLengthMismatch => Error::KeyLengthMismatch,
            jose_jwa::Error::KeyTooShort => Error::KeyTooShort,
            jose_jwa::Error::InvalidKeyType => Error::InvalidKeyType,
            jose_jwa::Error::InvalidEphemeralKey => Error::InvalidEphemeralKey,
            jose_jwa::Error::MacFail => Error::MacFail,
            jose_jwa::Error::CryptoUnavailable => Error::CryptoUnavailable,
            _ => Error::CryptoUnavailable,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(_: serde_json::Error) -> Self {
        Error::ParseError
    }
}

/// A `Result` defaulting to this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
