//! The JWE `zip: "DEF"` content-encoding parameter (spec §4.3).
//!
//! `"DEF"` is the only compression algorithm this engine recognizes — raw
//! DEFLATE, RFC 1951, applied to the plaintext before content encryption
//! and reversed after content decryption.

use alloc::vec::Vec;

use crate::error::{Error, Result};

/// The only `zip` header value this engine understands.
pub const DEFLATE: &str = "DEF";

/// Compress `plaintext` with raw DEFLATE.
pub fn deflate(plaintext: &[u8]) -> Vec<u8> {
    miniz_oxide::deflate::compress_to_vec(plaintext, 6)
}

/// Decompress a raw-DEFLATE buffer produced by [`deflate`].
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    miniz_oxide::inflate::decompress_to_vec(compressed).map_err(|_| Error::ParseError)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let plaintext = b"the quick brown fox jumps over the lazy dog, repeated, repeated";
        let compressed = deflate(plaintext);
        let recovered = inflate(&compressed).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn garbage_fails_to_inflate() {
        assert_eq!(inflate(&[0xff, 0xff, 0xff]), Err(Error::ParseError));
    }
}
