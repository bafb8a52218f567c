use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::ops::Deref;

use base64ct::{Base64UrlUnpadded, Encoding};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A `T` paired with the exact JSON bytes it was built from (or serialized
/// into).
///
/// JOSE headers participate as authenticated data (the base64url-encoded
/// header *bytes*, not a semantic re-encoding of the header, are hashed or
/// MACed — see spec §6 "Header JSON"). Round-tripping through
/// `serde_json::Value`/`T` and re-serializing can reorder keys or change
/// whitespace, silently invalidating every signature and AEAD tag computed
/// over the original bytes. `Json<T>` makes that mistake structurally
/// unreachable: the raw bytes are captured once, at construction, and every
/// consumer that needs "the header as it appears on the wire" reads them
/// back verbatim via [`Json::raw_bytes`] / `AsRef<[u8]>`.
#[derive(Clone)]
pub struct Json<T> {
    raw: Box<[u8]>,
    value: T,
}

impl<T: Serialize> Json<T> {
    /// Serialize `value` to canonical JSON bytes and capture both.
    pub fn new(value: T) -> serde_json::Result<Self> {
        let raw = serde_json::to_vec(&value)?.into_boxed_slice();
        Ok(Self { raw, value })
    }

    /// Replace the wrapped value, re-deriving the raw bytes from it.
    ///
    /// Used when a header needs a field filled in after construction (e.g.
    /// stamping `alg` once the signing algorithm is chosen) while keeping
    /// the byte-exact invariant intact for *this* object's remaining
    /// lifetime — callers that already captured the previous raw bytes (for
    /// example as AAD) are unaffected, but retain their own copy rather than
    /// observing this one mutate out from under them.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) -> serde_json::Result<()> {
        f(&mut self.value);
        self.raw = serde_json::to_vec(&self.value)?.into_boxed_slice();
        Ok(())
    }
}

impl<T: DeserializeOwned> Json<T> {
    /// Parse `raw` into `T`, retaining `raw` verbatim for later re-use as
    /// authenticated data.
    pub fn from_raw(raw: impl Into<Box<[u8]>>) -> serde_json::Result<Self> {
        let raw = raw.into();
        let value = serde_json::from_slice(&raw)?;
        Ok(Self { raw, value })
    }
}

impl<T> Json<T> {
    /// The exact bytes this value was parsed from or serialized into.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Borrow the parsed value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Consume the wrapper, discarding the captured raw bytes.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> AsRef<[u8]> for Json<T> {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Json").field("value", &self.value).finish()
    }
}

impl<T> Serialize for Json<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&Base64UrlUnpadded::encode_string(&self.raw))
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Json<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let raw = Base64UrlUnpadded::decode_vec(&encoded)
            .map_err(|_| serde::de::Error::custom("invalid base64 encoding"))?;
        Self::from_raw(raw).map_err(serde::de::Error::custom)
    }
}
