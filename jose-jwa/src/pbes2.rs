//! PBES2 key derivation, RFC 7518 §4.8 (spec §4.1 "PBKDF2/PBES2").
//!
//! The effective PBKDF2 salt is `utf8(alg) || 0x00 || p2s`, binding the
//! derived KEK to the specific `alg` header value so a derived key cannot
//! be replayed under a different `PBES2-HS*+A*KW` combination.

use alloc::vec::Vec;

use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::{Sha256, Sha384, Sha512};

use crate::error::{Error, Result};

/// The three `PBES2-HS*+A*KW` hash/KEK-length combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PbesAlg {
    /// `PBES2-HS256+A128KW`: HMAC-SHA-256, 16-byte derived key.
    Hs256,
    /// `PBES2-HS384+A192KW`: HMAC-SHA-384, 24-byte derived key.
    Hs384,
    /// `PBES2-HS512+A256KW`: HMAC-SHA-512, 32-byte derived key.
    Hs512,
}

impl PbesAlg {
    /// The JOSE `alg` header value this variant corresponds to, used to
    /// build the effective salt.
    pub const fn header_name(self) -> &'static str {
        match self {
            PbesAlg::Hs256 => "PBES2-HS256+A128KW",
            PbesAlg::Hs384 => "PBES2-HS384+A192KW",
            PbesAlg::Hs512 => "PBES2-HS512+A256KW",
        }
    }

    /// Derived KEK length in bytes, matching the paired `A*KW` key size.
    pub const fn derived_key_len(self) -> usize {
        match self {
            PbesAlg::Hs256 => 16,
            PbesAlg::Hs384 => 24,
            PbesAlg::Hs512 => 32,
        }
    }
}

/// Minimum iteration count this engine will honor on decrypt, to bound the
/// cost an attacker-controlled `p2c` can impose before rejecting it
/// outright (spec §4.1 "implementations must impose a floor and ceiling on
/// `p2c` before deriving").
pub const MIN_ITERATIONS: u32 = 1_000;

/// Maximum iteration count this engine will honor on decrypt.
pub const MAX_ITERATIONS: u32 = 10_000_000;

/// Build the effective PBKDF2 salt: `utf8(alg) || 0x00 || p2s`.
pub fn effective_salt(alg: PbesAlg, p2s: &[u8]) -> Vec<u8> {
    let mut salt = Vec::with_capacity(alg.header_name().len() + 1 + p2s.len());
    salt.extend_from_slice(alg.header_name().as_bytes());
    salt.push(0x00);
    salt.extend_from_slice(p2s);
    salt
}

/// Derive a KEK from `password` (the shared secret, typically a
/// passphrase) using PBKDF2 with the effective salt and `p2c` iterations.
///
/// Rejects `p2c` outside `[MIN_ITERATIONS, MAX_ITERATIONS]`.
pub fn derive(alg: PbesAlg, password: &[u8], p2s: &[u8], p2c: u32) -> Result<Vec<u8>> {
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&p2c) {
        return Err(Error::CryptoUnavailable);
    }
    let salt = effective_salt(alg, p2s);
    let mut out = alloc::vec![0u8; alg.derived_key_len()];
    match alg {
        PbesAlg::Hs256 => {
            pbkdf2::<Hmac<Sha256>>(password, &salt, p2c, &mut out)
                .map_err(|_| Error::CryptoUnavailable)?;
        }
        PbesAlg::Hs384 => {
            pbkdf2::<Hmac<Sha384>>(password, &salt, p2c, &mut out)
                .map_err(|_| Error::CryptoUnavailable)?;
        }
        PbesAlg::Hs512 => {
            pbkdf2::<Hmac<Sha512>>(password, &salt, p2c, &mut out)
                .map_err(|_| Error::CryptoUnavailable)?;
        }
    }
    Ok(out)
}
