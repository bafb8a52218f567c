use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use base64ct::{Base64UrlUnpadded, Encoding};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Conversion from a decoded byte buffer into the owning representation a
/// [`B64Bytes`] wraps (`Box<[u8]>`, `Vec<u8>`, or a fixed-size `[u8; N]`).
///
/// This exists instead of `TryFrom<Vec<u8>>` so all three representations can
/// be supported without colliding with the blanket `From`/`TryFrom` impls the
/// standard library already provides for some of them.
pub trait FromB64: Sized {
    /// Build `Self` from a freshly base64-decoded buffer, failing if the
    /// buffer's length is incompatible (e.g. a fixed-size array).
    fn from_b64_bytes(bytes: Vec<u8>) -> Option<Self>;
}

impl FromB64 for Box<[u8]> {
    fn from_b64_bytes(bytes: Vec<u8>) -> Option<Self> {
        Some(bytes.into_boxed_slice())
    }
}

impl FromB64 for Vec<u8> {
    fn from_b64_bytes(bytes: Vec<u8>) -> Option<Self> {
        Some(bytes)
    }
}

impl<const N: usize> FromB64 for [u8; N] {
    fn from_b64_bytes(bytes: Vec<u8>) -> Option<Self> {
        bytes.try_into().ok()
    }
}

/// A byte buffer that (de)serializes as a base64-encoded JSON string.
///
/// Generic over both the owning representation `T` (defaults to
/// `Box<[u8]>`) and the base64 alphabet/padding `E` (defaults to
/// unpadded base64url, the only alphabet used on the wire by JOSE itself;
/// `Base64` — padded, standard alphabet — is used for X.509 chain (`x5c`)
/// members, which predate JOSE's base64url convention).
pub struct B64Bytes<T = Box<[u8]>, E = Base64UrlUnpadded>(T, PhantomData<E>);

// Manual impls (rather than `#[derive(..)]`) so the unused alphabet marker
// `E` never spuriously requires `E: Clone + PartialEq + Eq` — `PhantomData<E>`
// implements all three unconditionally, but derive macros cannot see inside
// it and would otherwise demand bounds on `E` that `base64ct`'s marker types
// don't provide.
impl<T: Clone, E> Clone for B64Bytes<T, E> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T: PartialEq, E> PartialEq for B64Bytes<T, E> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq, E> Eq for B64Bytes<T, E> {}

impl<T, E> B64Bytes<T, E> {
    /// Wrap an already-decoded value.
    pub fn new(inner: T) -> Self {
        Self(inner, PhantomData)
    }

    /// Consume the wrapper, returning the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Borrow the inner value.
    pub fn inner(&self) -> &T {
        &self.0
    }
}

impl<T: AsRef<[u8]>, E> AsRef<[u8]> for B64Bytes<T, E> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<T, E> From<T> for B64Bytes<T, E> {
    fn from(inner: T) -> Self {
        Self::new(inner)
    }
}

// Bound on `T: fmt::Debug` (not `AsRef<[u8]>`) so that `B64Bytes<Secret<_>, _>`
// defers to `Secret`'s own redacting `Debug` impl instead of printing the
// raw key material.
impl<T: fmt::Debug, E> fmt::Debug for B64Bytes<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("B64Bytes").field(&self.0).finish()
    }
}

#[cfg(feature = "serde")]
impl<T: AsRef<[u8]>, E: Encoding> Serialize for B64Bytes<T, E> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&E::encode_string(self.0.as_ref()))
    }
}

#[cfg(feature = "serde")]
impl<'de, T: FromB64, E: Encoding> Deserialize<'de> for B64Bytes<T, E> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = alloc::string::String::deserialize(deserializer)?;
        let decoded = E::decode_vec(&encoded).map_err(|_| {
            de::Error::custom("invalid base64 encoding")
        })?;
        let inner = T::from_b64_bytes(decoded)
            .ok_or_else(|| de::Error::custom("base64-decoded value has the wrong length"))?;
        Ok(Self::new(inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[cfg(feature = "json")]
    #[test]
    fn round_trips_through_json() {
        let original: B64Bytes = vec![0xde, 0xad, 0xbe, 0xef].into_boxed_slice().into();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"3q2-7w\"");
        let back: B64Bytes = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_ref(), original.as_ref());
    }

    #[test]
    fn fixed_size_rejects_wrong_length() {
        let bad = vec![0u8; 31];
        assert!(<[u8; 32]>::from_b64_bytes(bad).is_none());
        let good = vec![0u8; 32];
        assert!(<[u8; 32]>::from_b64_bytes(good).is_some());
    }
}
