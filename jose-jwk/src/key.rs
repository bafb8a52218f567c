use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use jose_b64::{B64Bytes, B64Secret};

/// A key type suitable for a JWK, tagged by the `kty` member per
/// [RFC7517 section 4.1].
///
/// [RFC7517 section 4.1]: https://www.rfc-editor.org/rfc/rfc7517#section-4.1
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", tag = "kty")]
pub enum Key {
    /// An elliptic curve key (public or private).
    Ec(Ec),
    /// An RSA key (public or private).
    Rsa(Rsa),
    /// A symmetric (octet sequence) key.
    #[serde(rename = "oct")]
    Oct(Oct),
}

impl From<Ec> for Key {
    fn from(key: Ec) -> Self {
        Self::Ec(key)
    }
}

impl From<Rsa> for Key {
    fn from(key: Rsa) -> Self {
        Self::Rsa(key)
    }
}

impl From<Oct> for Key {
    fn from(key: Oct) -> Self {
        Self::Oct(key)
    }
}

/// An elliptic curve key. Private key material (`d`) is optional: a JWK
/// containing only `crv`/`x`/`y` is a public key.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ec {
    /// DSS curve identifier.
    pub crv: EcCurve,

    /// X coordinate for the elliptic curve point, big-endian, zero-padded to
    /// the curve's coordinate length.
    pub x: B64Bytes,

    /// Y coordinate for the elliptic curve point, big-endian, zero-padded to
    /// the curve's coordinate length.
    pub y: B64Bytes,

    /// Private key value. Absent for a public key.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub d: Option<B64Secret>,
}

/// An elliptic curve DSS identifier.
///
/// Only the three NIST curves used by ES256/ES384/ES512 and ECDH-ES are
/// represented; `secp256k1` is outside the closed algorithm set this engine
/// implements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EcCurve {
    /// P-256, used with ES256 and ECDH-ES.
    #[serde(rename = "P-256")]
    P256,

    /// P-384, used with ES384 and ECDH-ES.
    #[serde(rename = "P-384")]
    P384,

    /// P-521, used with ES512 and ECDH-ES.
    #[serde(rename = "P-521")]
    P521,
}

impl EcCurve {
    /// The big-endian coordinate byte length mandated for this curve (spec
    /// §4.1: 32/48/66 for P-256/P-384/P-521).
    pub const fn coordinate_len(self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }
}

/// An RSA key. Private key material is optional: a JWK containing only
/// `n`/`e` is a public key.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rsa {
    /// RSA modulus parameter, big-endian.
    pub n: B64Bytes,

    /// RSA public exponent parameter, big-endian.
    pub e: B64Bytes,

    /// Private key exponent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub d: Option<B64Secret>,

    /// Private first prime factor.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub p: Option<B64Secret>,

    /// Private second prime factor.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub q: Option<B64Secret>,

    /// Private first factor CRT exponent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dp: Option<B64Secret>,

    /// Private second factor CRT exponent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dq: Option<B64Secret>,

    /// Private first CRT coefficient.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub qi: Option<B64Secret>,

    /// Additional RSA private primes, for keys with more than two factors.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub oth: Vec<RsaOtherPrimes>,
}

impl Rsa {
    /// `true` if this key carries private material (`d` is present).
    pub fn is_private(&self) -> bool {
        self.d.is_some()
    }
}

/// Additional RSA private primes, for keys with more than two prime factors.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RsaOtherPrimes {
    /// A private prime factor.
    pub r: B64Secret,

    /// A private factor CRT exponent.
    pub d: B64Secret,

    /// A private factor CRT coefficient.
    pub t: B64Secret,
}

/// A symmetric (octet sequence) key, used for HMAC and as a JWE `dir`/KW
/// shared key.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Oct {
    /// The symmetric key value.
    pub k: B64Secret,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ec_curve_coordinate_lengths() {
        assert_eq!(EcCurve::P256.coordinate_len(), 32);
        assert_eq!(EcCurve::P384.coordinate_len(), 48);
        assert_eq!(EcCurve::P521.coordinate_len(), 66);
    }

    #[test]
    fn key_roundtrips_through_json_by_kty() {
        let key = Key::Oct(Oct {
            k: B64Secret::new(jose_b64::Secret::new(alloc::vec![1, 2, 3, 4].into_boxed_slice())),
        });
        let json = serde_json::to_value(&key).unwrap();
        assert_eq!(json["kty"], "oct");
        let back: Key = serde_json::from_value(json).unwrap();
        assert_eq!(back, key);
    }
}
