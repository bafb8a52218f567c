//! The JWE object state machine (spec §4.6/§9, C7), orchestrating
//! [`crate::keymgmt`] (C4) and [`crate::content`] (C3).
//!
//! Header AAD is the ASCII bytes of the base64url-encoded header — always
//! the [`jose_b64::Json`]-captured raw bytes a parsed object arrived with,
//! never a re-derived encoding (spec §9 "Header AAD").

use alloc::string::String;
use alloc::vec::Vec;

use jose_b64::base64ct::{Base64UrlUnpadded, Encoding};
use jose_b64::Json;

use crate::context::SecureRandom;
use crate::crit::CriticalHeaderPolicy;
use crate::error::{Error, Result};
use crate::header::JweHeader;
use crate::keymgmt::{self, DecryptMaterial, EncryptMaterial};
#[cfg(feature = "zip")]
use crate::zip;

/// Lifecycle position of a [`Jwe`], per spec §4.6: `UNENCRYPTED →
/// ENCRYPTED → DECRYPTED`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JweState {
    /// Constructed via [`Jwe::new`], not yet encrypted.
    Unencrypted,
    /// Encrypted (via [`Jwe::encrypt`]) or parsed (via [`Jwe::parse`]) but
    /// not yet decrypted.
    Encrypted,
    /// Successfully decrypted via [`Jwe::decrypt`].
    Decrypted,
}

/// A JSON Web Encryption object moving through [`JweState`].
pub struct Jwe {
    header: Json<JweHeader>,
    plaintext: Option<Vec<u8>>,
    encrypted_key: Vec<u8>,
    iv: Vec<u8>,
    ciphertext: Vec<u8>,
    tag: Vec<u8>,
    state: JweState,
}

impl Jwe {
    /// Construct a fresh, unencrypted JWE from `header` and `plaintext`.
    pub fn new(header: JweHeader, plaintext: Vec<u8>) -> Result<Self> {
        Ok(Self {
            header: Json::new(header)?,
            plaintext: Some(plaintext),
            encrypted_key: Vec::new(),
            iv: Vec::new(),
            ciphertext: Vec::new(),
            tag: Vec::new(),
            state: JweState::Unencrypted,
        })
    }

    /// Parse a five-part compact JWE. Stores the original header bytes
    /// verbatim (for use as AAD) and moves to [`JweState::Encrypted`].
    pub fn parse(compact: &str) -> Result<Self> {
        let mut parts = compact.split('.');
        let header_b64 = parts.next().ok_or(Error::ParseError)?;
        let encrypted_key_b64 = parts.next().ok_or(Error::ParseError)?;
        let iv_b64 = parts.next().ok_or(Error::ParseError)?;
        let ciphertext_b64 = parts.next().ok_or(Error::ParseError)?;
        let tag_b64 = parts.next().ok_or(Error::ParseError)?;
        if parts.next().is_some() {
            return Err(Error::ParseError);
        }

        let header_raw = Base64UrlUnpadded::decode_vec(header_b64).map_err(|_| Error::ParseError)?;
        let encrypted_key =
            Base64UrlUnpadded::decode_vec(encrypted_key_b64).map_err(|_| Error::ParseError)?;
        let iv = Base64UrlUnpadded::decode_vec(iv_b64).map_err(|_| Error::ParseError)?;
        let ciphertext = Base64UrlUnpadded::decode_vec(ciphertext_b64).map_err(|_| Error::ParseError)?;
        let tag = Base64UrlUnpadded::decode_vec(tag_b64).map_err(|_| Error::ParseError)?;

        Ok(Self {
            header: Json::from_raw(header_raw.into_boxed_slice())?,
            plaintext: None,
            encrypted_key,
            iv,
            ciphertext,
            tag,
            state: JweState::Encrypted,
        })
    }

    /// The parsed/constructed header.
    pub fn header(&self) -> &JweHeader {
        self.header.get()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> JweState {
        self.state
    }

    /// The recovered plaintext, if [`JweState::Decrypted`].
    pub fn plaintext(&self) -> Option<&[u8]> {
        self.plaintext.as_deref()
    }

    /// Encrypt this object, moving `Unencrypted → Encrypted`.
    ///
    /// Runs [`keymgmt::encrypt_key`] (C4) then [`crate::content::encrypt`]
    /// (C3), applying `zip` compression first if the header names it.
    /// Any other starting state is [`Error::IllegalState`].
    pub fn encrypt(mut self, material: &EncryptMaterial<'_>, rng: &mut dyn SecureRandom) -> Result<Self> {
        if self.state != JweState::Unencrypted {
            return Err(Error::IllegalState);
        }
        let plaintext = self.plaintext.take().ok_or(Error::IllegalState)?;
        let header = self.header.get().clone();

        let to_encrypt = match header.zip.as_deref() {
            #[cfg(feature = "zip")]
            Some(zip::DEFLATE) => zip::deflate(&plaintext),
            Some(_) => return Err(Error::UnsupportedAlg),
            None => plaintext,
        };

        let key_out = keymgmt::encrypt_key(header.alg, header.enc, material, &header, rng)?;

        let mut header = header;
        header.epk = key_out.header.epk;
        if let Some(iv) = key_out.header.iv {
            header.iv = Some(iv.into_boxed_slice().into());
        }
        if let Some(tag) = key_out.header.tag {
            header.tag = Some(tag.into_boxed_slice().into());
        }
        header.p2s = key_out.header.p2s.map(|p2s| p2s.into_boxed_slice().into());
        header.p2c = key_out.header.p2c;
        self.header.update(|h| *h = header)?;

        let encrypted = crate::content::encrypt(
            self.header.get().enc,
            &key_out.cek,
            &to_encrypt,
            header_aad(&self.header).as_bytes(),
            rng,
        )?;

        self.encrypted_key = key_out.encrypted_key;
        self.iv = encrypted.iv;
        self.ciphertext = encrypted.ciphertext;
        self.tag = encrypted.tag;
        self.plaintext = None;
        self.state = JweState::Encrypted;
        Ok(self)
    }

    /// Decrypt this object, moving `Encrypted → Decrypted`.
    ///
    /// Runs [`CriticalHeaderPolicy::check`] first (C8; rejection is
    /// [`Error::UnsupportedCrit`]), then [`keymgmt::decrypt_key`] (C4) and
    /// [`crate::content::decrypt`] (C3), reversing `zip` last. Any other
    /// starting state is [`Error::IllegalState`].
    pub fn decrypt(
        mut self,
        material: &DecryptMaterial<'_>,
        crit_policy: &CriticalHeaderPolicy,
        rng: &mut dyn SecureRandom,
    ) -> Result<Self> {
        if self.state != JweState::Encrypted {
            return Err(Error::IllegalState);
        }
        crit_policy.check(&self.header.get().crit)?;

        let header = self.header.get().clone();
        let cek = keymgmt::decrypt_key(
            header.alg,
            header.enc,
            material,
            &header,
            &self.encrypted_key,
            rng,
        )?;
        let decrypted = crate::content::decrypt(
            header.enc,
            &cek,
            &self.iv,
            &self.ciphertext,
            header_aad(&self.header).as_bytes(),
            &self.tag,
        )?;

        let plaintext = match header.zip.as_deref() {
            #[cfg(feature = "zip")]
            Some(zip::DEFLATE) => zip::inflate(&decrypted)?,
            Some(_) => return Err(Error::UnsupportedAlg),
            None => decrypted,
        };

        self.plaintext = Some(plaintext);
        self.state = JweState::Decrypted;
        Ok(self)
    }

    /// Serialize to five-part compact form, using the original header bytes
    /// for a parsed object or the freshly serialized header for a created
    /// one. Requires `Encrypted` or `Decrypted` (an `Unencrypted` object has
    /// no ciphertext to emit).
    pub fn serialize(&self) -> Result<String> {
        if self.state == JweState::Unencrypted {
            return Err(Error::IllegalState);
        }
        let mut out = String::new();
        out.push_str(&Base64UrlUnpadded::encode_string(self.header.raw_bytes()));
        out.push('.');
        out.push_str(&Base64UrlUnpadded::encode_string(&self.encrypted_key));
        out.push('.');
        out.push_str(&Base64UrlUnpadded::encode_string(&self.iv));
        out.push('.');
        out.push_str(&Base64UrlUnpadded::encode_string(&self.ciphertext));
        out.push('.');
        out.push_str(&Base64UrlUnpadded::encode_string(&self.tag));
        Ok(out)
    }
}

/// The JWE AAD: the ASCII bytes of the base64url-encoded header (RFC7516
/// §5.1 step 14), not the raw header JSON — spec glossary "AAD".
fn header_aad(header: &Json<JweHeader>) -> String {
    Base64UrlUnpadded::encode_string(header.raw_bytes())
}
