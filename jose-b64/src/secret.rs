use alloc::boxed::Box;
use core::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::bytes::{B64Bytes, FromB64};
use crate::Base64UrlUnpadded;

/// A byte buffer that is zeroized on drop and whose `Debug` impl never prints
/// its contents.
///
/// Used for private/symmetric key material (`d`, `k`, RSA CRT parameters)
/// that must not linger in memory, and must not leak into logs via a stray
/// `{:?}`.
pub struct Secret<T: Zeroize = Box<[u8]>>(T);

impl<T: Zeroize> Secret<T> {
    /// Wrap a value as a secret.
    pub fn new(inner: T) -> Self {
        Self(inner)
    }
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Zeroize + AsRef<[u8]>> AsRef<[u8]> for Secret<T> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<T: Zeroize + AsRef<[u8]>> PartialEq for Secret<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref().ct_eq(other.0.as_ref()).into()
    }
}

impl<T: Zeroize + AsRef<[u8]>> Eq for Secret<T> {}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}

impl<T: Zeroize> Drop for Secret<T> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl<T: Zeroize + FromB64> FromB64 for Secret<T> {
    fn from_b64_bytes(bytes: alloc::vec::Vec<u8>) -> Option<Self> {
        T::from_b64_bytes(bytes).map(Secret::new)
    }
}

/// A base64url-encoded secret octet string, zeroized on drop (e.g. JWK `k`,
/// `d`, and RSA CRT parameters).
pub type B64Secret<T = Box<[u8]>> = B64Bytes<Secret<T>, Base64UrlUnpadded>;
