use core::fmt;

/// Primitive-level failures, per spec §7's error taxonomy (the subset that
/// can be detected below the header/dispatch layer).
///
/// The `jose` crate's top-level `Error` wraps this type rather than
/// duplicating its variants.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A symmetric key, CEK, or HMAC secret had the wrong length for the
    /// requested algorithm.
    KeyLengthMismatch,
    /// An RSA modulus is too small to encode the payload under the chosen
    /// padding scheme.
    KeyTooShort,
    /// A key's algorithm/type does not match the operation requested of it.
    InvalidKeyType,
    /// An elliptic curve point (typically an ECDH `epk`) is not a valid
    /// point on the expected curve.
    InvalidEphemeralKey,
    /// Authenticated-encryption, HMAC, or key-unwrap integrity check
    /// failed. Padding errors are folded into this variant too — per spec
    /// §4.2/§5, CBC unpadding failure and MAC failure must be
    /// indistinguishable to the caller.
    MacFail,
    /// The requested primitive is not available (e.g. no RNG supplied).
    CryptoUnavailable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::KeyLengthMismatch => "key length incompatible with algorithm",
            Error::KeyTooShort => "RSA modulus too small for the requested operation",
            Error::InvalidKeyType => "key type does not match the requested operation",
            Error::InvalidEphemeralKey => "elliptic curve point is not on the expected curve",
            Error::MacFail => "authentication failed",
            Error::CryptoUnavailable => "required cryptographic primitive is unavailable",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Shorthand for primitive-level operation results.
pub type Result<T> = core::result::Result<T, Error>;
