// SPDX-FileCopyrightText: 2022 Profian Inc. <opensource@profian.com>
// SPDX-License-Identifier: Apache-2.0 OR MIT

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

mod bytes;
#[cfg(feature = "json")]
mod json;
#[cfg(feature = "secret")]
mod secret;

pub use base64ct;
pub use base64ct::{Base64, Base64UrlUnpadded};

pub use bytes::{B64Bytes, FromB64};
#[cfg(feature = "json")]
pub use json::Json;
#[cfg(feature = "secret")]
pub use secret::{B64Secret, Secret};
