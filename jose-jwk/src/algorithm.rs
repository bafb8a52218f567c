//! Algorithm identifiers for JWKs, JWS, and JWE.
//!
//! Technically these are defined in the JWA RFC ([RFC7518]), but it makes
//! more sense to keep them next to the key types they're paired with.
//!
//! Each enum here is a *closed* set: only the values exercised by this
//! engine are represented, matching spec §3's "Algorithm identifiers" data
//! model (a deliberately smaller surface than the full JWA registry).
//!
//! [RFC7518]: https://www.rfc-editor.org/rfc/rfc7518

use core::fmt;

use serde::{Deserialize, Serialize};

/// Any of the three algorithm families a JOSE header's `alg`/`enc`
/// parameter can name.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Algorithm {
    /// Algorithms for digital signatures and MACs (JWS `alg`).
    Signing(SigningAlg),
    /// Algorithms for key management (JWE `alg`).
    KeyManagement(KeyMgmtAlg),
    /// Algorithms for content encryption (JWE `enc`).
    Encryption(EncryptionAlg),
}

/// Algorithms used for digital signatures and MACs, as defined in
/// [RFC7518] section 3.1. Used for the JWS `alg` parameter.
///
/// [RFC7518]: https://www.rfc-editor.org/rfc/rfc7518
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SigningAlg {
    /// ECDSA using P-256 and SHA-256.
    Es256,
    /// ECDSA using P-384 and SHA-384.
    Es384,
    /// ECDSA using P-521 and SHA-512.
    Es512,
    /// HMAC using SHA-256.
    Hs256,
    /// HMAC using SHA-384.
    Hs384,
    /// HMAC using SHA-512.
    Hs512,
    /// RSASSA-PSS using SHA-256 and MGF1 with SHA-256.
    Ps256,
    /// RSASSA-PSS using SHA-384 and MGF1 with SHA-384.
    Ps384,
    /// RSASSA-PSS using SHA-512 and MGF1 with SHA-512.
    Ps512,
    /// RSASSA-PKCS1-v1_5 using SHA-256.
    Rs256,
    /// RSASSA-PKCS1-v1_5 using SHA-384.
    Rs384,
    /// RSASSA-PKCS1-v1_5 using SHA-512.
    Rs512,
}

impl SigningAlg {
    /// The wire name used for the JWS `alg` header parameter.
    pub const fn name(self) -> &'static str {
        match self {
            SigningAlg::Es256 => "ES256",
            SigningAlg::Es384 => "ES384",
            SigningAlg::Es512 => "ES512",
            SigningAlg::Hs256 => "HS256",
            SigningAlg::Hs384 => "HS384",
            SigningAlg::Hs512 => "HS512",
            SigningAlg::Ps256 => "PS256",
            SigningAlg::Ps384 => "PS384",
            SigningAlg::Ps512 => "PS512",
            SigningAlg::Rs256 => "RS256",
            SigningAlg::Rs384 => "RS384",
            SigningAlg::Rs512 => "RS512",
        }
    }
}

impl fmt::Display for SigningAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Algorithms used for key management, as defined in [RFC7518] section 4.1.
/// Used for the JWE `alg` parameter.
///
/// [RFC7518]: https://www.rfc-editor.org/rfc/rfc7518
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyMgmtAlg {
    /// RSAES-PKCS1-v1_5.
    #[serde(rename = "RSA1_5")]
    Rsa1_5,
    /// RSAES OAEP using default parameters (SHA-1).
    #[serde(rename = "RSA-OAEP")]
    RsaOaep,
    /// RSAES OAEP using SHA-256 and MGF1 with SHA-256.
    #[serde(rename = "RSA-OAEP-256")]
    RsaOaep256,
    /// AES Key Wrap using a 128-bit key.
    #[serde(rename = "A128KW")]
    Aes128Kw,
    /// AES Key Wrap using a 192-bit key.
    #[serde(rename = "A192KW")]
    Aes192Kw,
    /// AES Key Wrap using a 256-bit key.
    #[serde(rename = "A256KW")]
    Aes256Kw,
    /// Direct use of a shared symmetric key as the CEK.
    #[serde(rename = "dir")]
    Dir,
    /// Elliptic Curve Diffie-Hellman Ephemeral Static key agreement using
    /// Concat KDF, CEK derived directly.
    #[serde(rename = "ECDH-ES")]
    EcdhEs,
    /// ECDH-ES using Concat KDF and CEK wrapped with `A128KW`.
    #[serde(rename = "ECDH-ES+A128KW")]
    EcdhEsA128Kw,
    /// ECDH-ES using Concat KDF and CEK wrapped with `A192KW`.
    #[serde(rename = "ECDH-ES+A192KW")]
    EcdhEsA192Kw,
    /// ECDH-ES using Concat KDF and CEK wrapped with `A256KW`.
    #[serde(rename = "ECDH-ES+A256KW")]
    EcdhEsA256Kw,
    /// Key wrapping with AES-GCM using a 128-bit key.
    #[serde(rename = "A128GCMKW")]
    Aes128GcmKw,
    /// Key wrapping with AES-GCM using a 192-bit key.
    #[serde(rename = "A192GCMKW")]
    Aes192GcmKw,
    /// Key wrapping with AES-GCM using a 256-bit key.
    #[serde(rename = "A256GCMKW")]
    Aes256GcmKw,
    /// PBES2 with HMAC SHA-256 and `A128KW` wrapping.
    #[serde(rename = "PBES2-HS256+A128KW")]
    Pbes2Hs256A128Kw,
    /// PBES2 with HMAC SHA-384 and `A192KW` wrapping.
    #[serde(rename = "PBES2-HS384+A192KW")]
    Pbes2Hs384A192Kw,
    /// PBES2 with HMAC SHA-512 and `A256KW` wrapping.
    #[serde(rename = "PBES2-HS512+A256KW")]
    Pbes2Hs512A256Kw,
}

impl KeyMgmtAlg {
    /// The wire name used for the JWE `alg` header parameter.
    pub const fn name(self) -> &'static str {
        match self {
            KeyMgmtAlg::Rsa1_5 => "RSA1_5",
            KeyMgmtAlg::RsaOaep => "RSA-OAEP",
            KeyMgmtAlg::RsaOaep256 => "RSA-OAEP-256",
            KeyMgmtAlg::Aes128Kw => "A128KW",
            KeyMgmtAlg::Aes192Kw => "A192KW",
            KeyMgmtAlg::Aes256Kw => "A256KW",
            KeyMgmtAlg::Dir => "dir",
            KeyMgmtAlg::EcdhEs => "ECDH-ES",
            KeyMgmtAlg::EcdhEsA128Kw => "ECDH-ES+A128KW",
            KeyMgmtAlg::EcdhEsA192Kw => "ECDH-ES+A192KW",
            KeyMgmtAlg::EcdhEsA256Kw => "ECDH-ES+A256KW",
            KeyMgmtAlg::Aes128GcmKw => "A128GCMKW",
            KeyMgmtAlg::Aes192GcmKw => "A192GCMKW",
            KeyMgmtAlg::Aes256GcmKw => "A256GCMKW",
            KeyMgmtAlg::Pbes2Hs256A128Kw => "PBES2-HS256+A128KW",
            KeyMgmtAlg::Pbes2Hs384A192Kw => "PBES2-HS384+A192KW",
            KeyMgmtAlg::Pbes2Hs512A256Kw => "PBES2-HS512+A256KW",
        }
    }
}

impl fmt::Display for KeyMgmtAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Algorithms used for content encryption, as defined in [RFC7518] section
/// 5.1. Used for the JWE `enc` parameter.
///
/// [RFC7518]: https://www.rfc-editor.org/rfc/rfc7518
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionAlg {
    /// `AES_128_CBC_HMAC_SHA_256`, as defined in RFC7518 section 5.2.3.
    #[serde(rename = "A128CBC-HS256")]
    Aes128CbcHs256,
    /// `AES_192_CBC_HMAC_SHA_384`, as defined in RFC7518 section 5.2.4.
    #[serde(rename = "A192CBC-HS384")]
    Aes192CbcHs384,
    /// `AES_256_CBC_HMAC_SHA_512`, as defined in RFC7518 section 5.2.5.
    #[serde(rename = "A256CBC-HS512")]
    Aes256CbcHs512,
    /// AES-GCM using a 128-bit key.
    #[serde(rename = "A128GCM")]
    Aes128Gcm,
    /// AES-GCM using a 192-bit key.
    #[serde(rename = "A192GCM")]
    Aes192Gcm,
    /// AES-GCM using a 256-bit key.
    #[serde(rename = "A256GCM")]
    Aes256Gcm,
    /// Legacy, deprecated `AES_128_CBC_HMAC_SHA_256` variant keying CEK/CIK
    /// via Concat KDF instead of a single split key. New encryptions under
    /// this algorithm are discouraged; decryption support is retained for
    /// interop with older tokens.
    #[serde(rename = "A128CBC+HS256")]
    Aes128CbcHs256Deprecated,
    /// Legacy, deprecated `AES_256_CBC_HMAC_SHA_512` variant. See
    /// [`EncryptionAlg::Aes128CbcHs256Deprecated`].
    #[serde(rename = "A256CBC+HS512")]
    Aes256CbcHs512Deprecated,
}

impl EncryptionAlg {
    /// The wire name used for the JWE `enc` header parameter.
    pub const fn name(self) -> &'static str {
        match self {
            EncryptionAlg::Aes128CbcHs256 => "A128CBC-HS256",
            EncryptionAlg::Aes192CbcHs384 => "A192CBC-HS384",
            EncryptionAlg::Aes256CbcHs512 => "A256CBC-HS512",
            EncryptionAlg::Aes128Gcm => "A128GCM",
            EncryptionAlg::Aes192Gcm => "A192GCM",
            EncryptionAlg::Aes256Gcm => "A256GCM",
            EncryptionAlg::Aes128CbcHs256Deprecated => "A128CBC+HS256",
            EncryptionAlg::Aes256CbcHs512Deprecated => "A256CBC+HS512",
        }
    }

    /// The CEK bit length this `enc` value mandates (spec §3 "CEK bit
    /// length per `enc`").
    pub const fn cek_bits(self) -> usize {
        match self {
            EncryptionAlg::Aes128Gcm => 128,
            EncryptionAlg::Aes192Gcm => 192,
            EncryptionAlg::Aes256Gcm
            | EncryptionAlg::Aes128CbcHs256
            | EncryptionAlg::Aes128CbcHs256Deprecated => 256,
            EncryptionAlg::Aes192CbcHs384 => 384,
            EncryptionAlg::Aes256CbcHs512 | EncryptionAlg::Aes256CbcHs512Deprecated => 512,
        }
    }

    /// `true` for the AES-GCM family, `false` for AES-CBC-HMAC-SHA2
    /// (including the legacy ConcatKDF-derived variants).
    pub const fn is_gcm(self) -> bool {
        matches!(
            self,
            EncryptionAlg::Aes128Gcm | EncryptionAlg::Aes192Gcm | EncryptionAlg::Aes256Gcm
        )
    }
}

impl fmt::Display for EncryptionAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
