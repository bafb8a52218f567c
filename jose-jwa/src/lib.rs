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
#[cfg(feature = "std")]
extern crate std;

pub mod aead;
pub mod cbc;
pub mod concat_kdf;
pub mod const_time;
pub mod error;
pub mod gcm;
pub mod keywrap;
pub mod mac;
pub mod pbes2;

#[cfg(feature = "crypto")]
pub mod ecdh;
#[cfg(feature = "crypto")]
pub mod ecdsa_ops;
#[cfg(feature = "crypto")]
pub mod rsa_ops;

pub use error::{Error, Result};

// Re-exported so downstream crates can name key types (`RsaPrivateKey`,
// `p256::SecretKey`, ...) without taking their own direct dependency on
// these crates and risking a version skew with the one this crate uses.
#[cfg(feature = "crypto")]
pub use p256;
#[cfg(feature = "crypto")]
pub use p384;
#[cfg(feature = "crypto")]
pub use p521;
#[cfg(feature = "crypto")]
pub use rsa;
pub use rand_core;
