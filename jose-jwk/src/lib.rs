#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

extern crate alloc;

mod algorithm;
mod key;

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use jose_b64::{Base64, B64Bytes};
use serde::{Deserialize, Serialize};

pub use algorithm::{Algorithm, EncryptionAlg, KeyMgmtAlg, SigningAlg};
pub use key::{Ec, EcCurve, Key, Oct, Rsa, RsaOtherPrimes};

/// A strongly typed JSON Web Key, as defined in [RFC7517].
///
/// [RFC7517]: https://www.rfc-editor.org/rfc/rfc7517
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Jwk {
    /// The key itself. This carries the important cryptographic material;
    /// every other field is metadata about how the key may be used.
    #[serde(flatten)]
    pub key: Key,

    #[serde(flatten)]
    pub params: Parameters,
}

impl Jwk {
    /// Create a new JWK from a key, using default (empty) parameters.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            params: Default::default(),
        }
    }
}

/// Metadata parameters for a [`Jwk`], common to all key types.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// The algorithm intended for use with this key.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alg: Option<Algorithm>,

    /// Identifier for this key.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kid: Option<String>,

    /// Intended use of this public key (named `use` in the RFC).
    #[serde(rename = "use")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub use_for: Option<UseFor>,

    /// Intended operations for this key.
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub key_ops: BTreeSet<Operations>,

    /// X.509 certificate metadata.
    #[serde(flatten)]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub x509: Option<Box<X509>>,
}

/// Additional X.509 options for a JWK.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct X509 {
    /// The X.509 certificate chain associated with this key (`x5c`).
    ///
    /// Note this is standard *padded* base64, not base64url — RFC7517
    /// carries `x5c` over from the pre-JOSE X.509 convention.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub x5c: Option<Vec<B64Bytes<Box<[u8]>, Base64>>>,

    /// SHA-1 X.509 certificate thumbprint (`x5t`).
    #[serde(skip_serializing_if = "Option::is_none", rename = "x5t", default)]
    pub x5t: Option<B64Bytes<[u8; 20]>>,

    /// SHA-256 X.509 certificate thumbprint (`x5t#S256`).
    #[serde(skip_serializing_if = "Option::is_none", rename = "x5t#S256", default)]
    pub x5t_s256: Option<B64Bytes<[u8; 32]>>,
}

/// A set of JSON Web Keys, as defined in [RFC7517 section 5].
///
/// [RFC7517 section 5]: https://datatracker.ietf.org/doc/html/rfc7517#section-5
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JwkSet {
    /// The keys in the set.
    pub keys: Vec<Jwk>,
}

/// Intended use of a key.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum UseFor {
    /// The key should be used for encryption.
    #[serde(rename = "enc")]
    Encryption,
    /// The key should be used for signing.
    #[serde(rename = "sig")]
    Signing,
}

/// Possible values for `key_ops`, as specified in RFC7517 section 4.3.
// Kept in lexicographical order: `Parameters::key_ops` is a `BTreeSet` and
// relies on derive(Ord) matching serialized order for deterministic output.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operations {
    /// Decrypt content and validate decryption, if applicable.
    Decrypt,
    /// Derive bits not to be used as a key.
    DeriveBits,
    /// Derive key.
    DeriveKey,
    /// Encrypt content.
    Encrypt,
    /// Compute digital signature or MAC.
    Sign,
    /// Decrypt key and validate decryption, if applicable.
    UnwrapKey,
    /// Verify digital signature or MAC.
    Verify,
    /// Encrypt key.
    WrapKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwk_defaults_have_no_params() {
        let jwk = Jwk::new(Key::Oct(Oct {
            k: jose_b64::B64Secret::new(jose_b64::Secret::new(
                alloc::vec![0u8; 32].into_boxed_slice(),
            )),
        }));
        let json = serde_json::to_value(&jwk).unwrap();
        assert_eq!(json["kty"], "oct");
        assert!(json.get("alg").is_none());
        assert!(json.get("key_ops").is_none());
    }
}
