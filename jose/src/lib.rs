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

mod content;
mod context;
mod crit;
mod error;
mod header;
mod jwe;
mod jws;
mod keymgmt;
#[cfg(feature = "zip")]
mod zip;

pub use context::{ProviderContext, SecureRandom};
pub use crit::CriticalHeaderPolicy;
pub use error::{Error, Result};
pub use header::{Crit, JweHeader, JwsHeader};
pub use jwe::{Jwe, JweState};
pub use jws::{Jws, JwsState, SigningMaterial, VerifyingMaterial};
pub use keymgmt::{DecryptMaterial, EncryptMaterial};
