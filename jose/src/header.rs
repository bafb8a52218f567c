//! JWS/JWE header shapes (spec §3 "Header").
//!
//! Both headers are wrapped in [`jose_b64::Json`] wherever they cross a
//! signing-input or AAD boundary: the exact bytes a header was parsed from
//! (or serialized into) are what gets signed/authenticated, never a
//! re-derived encoding (spec §9 "Header AAD").

use alloc::collections::BTreeMap;
use alloc::collections::BTreeSet;
use alloc::string::String;

use jose_b64::B64Bytes;
use jose_jwk::{EncryptionAlg, Jwk, KeyMgmtAlg, SigningAlg};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outer `None` = `crit` absent (pass); `Some(None)` = `crit` present as a
/// JSON `null` (reject, spec §4.7 "`null` → reject"); `Some(Some(names))` =
/// `crit` present with a (possibly empty) set of names.
pub type Crit = Option<Option<BTreeSet<String>>>;

/// A parsed or to-be-serialized JWS header.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JwsHeader {
    /// The signing algorithm.
    pub alg: SigningAlg,

    /// Key identifier.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kid: Option<String>,

    /// Media type of the whole JWS.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub typ: Option<String>,

    /// Media type of the payload.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cty: Option<String>,

    /// Names of extensions the consumer must understand (see [`Crit`]).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub crit: Crit,

    /// An embedded public key used to verify the signature.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub jwk: Option<Jwk>,

    /// Any other header parameters, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl JwsHeader {
    /// A header with only `alg` set; every optional parameter absent.
    /// `#[non_exhaustive]` blocks struct-literal construction outside this
    /// crate, so this is the entry point for building one — set the
    /// remaining fields (they're all `pub`) after construction.
    pub fn new(alg: SigningAlg) -> Self {
        Self {
            alg,
            kid: None,
            typ: None,
            cty: None,
            crit: None,
            jwk: None,
            extra: BTreeMap::new(),
        }
    }
}

/// A parsed or to-be-serialized JWE header.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JweHeader {
    /// The key-management algorithm.
    pub alg: KeyMgmtAlg,

    /// The content-encryption method.
    pub enc: EncryptionAlg,

    /// Compression algorithm applied to the plaintext before encryption.
    /// The only value this engine recognizes is `"DEF"` (raw DEFLATE).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub zip: Option<String>,

    /// Key identifier.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub kid: Option<String>,

    /// Media type of the whole JWE.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub typ: Option<String>,

    /// Media type of the plaintext.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cty: Option<String>,

    /// Names of extensions the consumer must understand (see [`Crit`]).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub crit: Crit,

    /// An embedded public key, rarely used on the JWE side.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub jwk: Option<Jwk>,

    /// Ephemeral public key for ECDH-ES / ECDH-ES+A*KW. Never carries
    /// private material: key-management code must reject an `epk` that
    /// does.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub epk: Option<Jwk>,

    /// Agreement PartyUInfo for ECDH-ES key derivation.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub apu: Option<B64Bytes>,

    /// Agreement PartyVInfo for ECDH-ES key derivation.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub apv: Option<B64Bytes>,

    /// IV used by `A*GCMKW` to wrap the CEK (distinct from the content IV
    /// carried in the JWE's own `iv` segment).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iv: Option<B64Bytes>,

    /// Authentication tag produced by `A*GCMKW` when wrapping the CEK.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tag: Option<B64Bytes>,

    /// PBES2 salt input (combined with `alg` to form the effective salt).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub p2s: Option<B64Bytes>,

    /// PBES2 iteration count.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub p2c: Option<u32>,

    /// Any other header parameters, preserved verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl JweHeader {
    /// A header with only `alg`/`enc` set; every optional and
    /// algorithm-emitted parameter absent. See [`JwsHeader::new`] for why
    /// this exists.
    pub fn new(alg: KeyMgmtAlg, enc: EncryptionAlg) -> Self {
        Self {
            alg,
            enc,
            zip: None,
            kid: None,
            typ: None,
            cty: None,
            crit: None,
            jwk: None,
            epk: None,
            apu: None,
            apv: None,
            iv: None,
            tag: None,
            p2s: None,
            p2c: None,
            extra: BTreeMap::new(),
        }
    }
}
