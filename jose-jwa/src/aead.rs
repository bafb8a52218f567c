//! `AES_CBC_HMAC_SHA2` composite authenticated encryption, RFC7518 §5.2
//! (spec §4.2).

use alloc::vec::Vec;

use crate::cbc;
use crate::const_time;
use crate::error::{Error, Result};
use crate::mac::{self, HmacAlg};

/// One of the three `AES_CBC_HMAC_SHA2` variants. `L` (the MAC/ENC key
/// length in bytes) is half the CEK length: 16/24/32 for
/// HS256/HS384/HS512.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// `A128CBC-HS256`: L = 16, full CEK = 32 bytes, tag truncated to 16.
    Hs256,
    /// `A192CBC-HS384`: L = 24, full CEK = 48 bytes, tag truncated to 24.
    Hs384,
    /// `A256CBC-HS512`: L = 32, full CEK = 64 bytes, tag truncated to 32.
    Hs512,
}

impl Variant {
    /// `L`: the length, in bytes, of each of the MAC key and the ENC key.
    pub const fn key_half_len(self) -> usize {
        match self {
            Variant::Hs256 => 16,
            Variant::Hs384 => 24,
            Variant::Hs512 => 32,
        }
    }

    /// The full CEK length this variant requires (`2 * L`).
    pub const fn cek_len(self) -> usize {
        self.key_half_len() * 2
    }

    fn hmac_alg(self) -> HmacAlg {
        match self {
            Variant::Hs256 => HmacAlg::Hs256,
            Variant::Hs384 => HmacAlg::Hs384,
            Variant::Hs512 => HmacAlg::Hs512,
        }
    }
}

/// Split a CEK into `(mac_key, enc_key)` per spec §4.2: "MAC_KEY = first L
/// bytes, ENC_KEY = last L bytes".
fn split_cek(variant: Variant, cek: &[u8]) -> Result<(&[u8], &[u8])> {
    if cek.len() != variant.cek_len() {
        return Err(Error::KeyLengthMismatch);
    }
    let l = variant.key_half_len();
    Ok((&cek[..l], &cek[l..]))
}

/// 64-bit big-endian bit-length of `aad`, computed without truncating
/// through a 32-bit intermediate (spec §4.2 "Integer-overflow guard").
fn al(aad: &[u8]) -> [u8; 8] {
    let bits = (aad.len() as u64) * 8;
    bits.to_be_bytes()
}

fn mac_input(aad: &[u8], iv: &[u8], ciphertext: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(aad.len() + iv.len() + ciphertext.len() + 8);
    input.extend_from_slice(aad);
    input.extend_from_slice(iv);
    input.extend_from_slice(ciphertext);
    input.extend_from_slice(&al(aad));
    input
}

/// Encrypt `plaintext` under `AES_CBC_HMAC_SHA2`, returning
/// `(ciphertext, tag)` with `tag.len() == variant.key_half_len()`.
pub fn encrypt(
    variant: Variant,
    cek: &[u8],
    iv: &[u8; cbc::IV_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<(Vec<u8>, Vec<u8>)> {
    let (mac_key, enc_key) = split_cek(variant, cek)?;
    let ciphertext = cbc::encrypt(enc_key, iv, plaintext)?;
    let full_tag = mac::hmac(variant.hmac_alg(), mac_key, &mac_input(aad, iv, &ciphertext))?;
    let l = variant.key_half_len();
    Ok((ciphertext, full_tag[..l].to_vec()))
}

/// Decrypt `(ciphertext, tag)` produced by [`encrypt`].
///
/// The MAC is checked in constant time *before* CBC unpadding runs, and a
/// padding failure is reported identically to a MAC failure
/// ([`Error::MacFail`]) — this collapse is load-bearing against the CBC
/// padding oracle (spec §9 "Timing discipline").
pub fn decrypt(
    variant: Variant,
    cek: &[u8],
    iv: &[u8; cbc::IV_LEN],
    ciphertext: &[u8],
    aad: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    let (mac_key, enc_key) = split_cek(variant, cek)?;
    let full_tag = mac::hmac(variant.hmac_alg(), mac_key, &mac_input(aad, iv, ciphertext))?;
    let l = variant.key_half_len();
    if tag.len() != l || !const_time::eq(&full_tag[..l], tag) {
        return Err(Error::MacFail);
    }
    cbc::decrypt(enc_key, iv, ciphertext)
}

/// The legacy, deprecated `A128CBC+HS256`/`A256CBC+HS512` `enc` methods
/// (spec §9 Open Question (b)): CEK and CIK are derived independently from
/// a shared CMK via [`crate::concat_kdf::legacy_derive_cek_cik`], and the
/// authentication tag is the *untruncated* HMAC output.
pub mod legacy {
    use super::*;
    use crate::concat_kdf;

    /// `A128CBC+HS256`/`A256CBC+HS512` selection. `enc_bits`/`mac_bits` are
    /// the independently-derived key sizes (AES key size and full HMAC key
    /// size, respectively); unlike [`super::Variant`] these are not tied by
    /// a single CEK split.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum LegacyVariant {
        /// `A128CBC+HS256`: 128-bit AES key, HMAC-SHA-256 (untruncated, 32-byte tag).
        Hs256,
        /// `A256CBC+HS512`: 256-bit AES key, HMAC-SHA-512 (untruncated, 64-byte tag).
        Hs512,
    }

    impl LegacyVariant {
        fn enc_bits(self) -> usize {
            match self {
                LegacyVariant::Hs256 => 128,
                LegacyVariant::Hs512 => 256,
            }
        }

        fn hmac_alg(self) -> HmacAlg {
            match self {
                LegacyVariant::Hs256 => HmacAlg::Hs256,
                LegacyVariant::Hs512 => HmacAlg::Hs512,
            }
        }

        fn mac_bits(self) -> usize {
            self.hmac_alg().output_len() * 8
        }

        /// The shared-CMK length this variant expects (spec: legacy `enc`
        /// CEK bit lengths match their non-legacy counterparts: 256/512).
        pub fn cmk_len(self) -> usize {
            match self {
                LegacyVariant::Hs256 => 32,
                LegacyVariant::Hs512 => 64,
            }
        }
    }

    /// Encrypt under a legacy variant, given the shared CMK.
    pub fn encrypt(
        variant: LegacyVariant,
        cmk: &[u8],
        iv: &[u8; cbc::IV_LEN],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>)> {
        if cmk.len() != variant.cmk_len() {
            return Err(Error::KeyLengthMismatch);
        }
        let (enc_key, mac_key) =
            concat_kdf::legacy_derive_cek_cik(cmk, variant.enc_bits(), variant.mac_bits());
        let ciphertext = cbc::encrypt(&enc_key, iv, plaintext)?;
        let tag = mac::hmac(variant.hmac_alg(), &mac_key, &mac_input(aad, iv, &ciphertext))?;
        Ok((ciphertext, tag))
    }

    /// Decrypt a legacy-variant ciphertext.
    pub fn decrypt(
        variant: LegacyVariant,
        cmk: &[u8],
        iv: &[u8; cbc::IV_LEN],
        ciphertext: &[u8],
        aad: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>> {
        if cmk.len() != variant.cmk_len() {
            return Err(Error::KeyLengthMismatch);
        }
        let (enc_key, mac_key) =
            concat_kdf::legacy_derive_cek_cik(cmk, variant.enc_bits(), variant.mac_bits());
        let expected = mac::hmac(variant.hmac_alg(), &mac_key, &mac_input(aad, iv, ciphertext))?;
        if !const_time::eq(&expected, tag) {
            return Err(Error::MacFail);
        }
        cbc::decrypt(&enc_key, iv, ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for variant in [Variant::Hs256, Variant::Hs384, Variant::Hs512] {
            let cek = alloc::vec![0x5cu8; variant.cek_len()];
            let iv = [0x01u8; cbc::IV_LEN];
            let aad = b"protected header bytes";
            let (ct, tag) = encrypt(variant, &cek, &iv, b"plaintext message", aad).unwrap();
            assert_eq!(tag.len(), variant.key_half_len());
            let pt = decrypt(variant, &cek, &iv, &ct, aad, &tag).unwrap();
            assert_eq!(pt, b"plaintext message");
        }
    }

    #[test]
    fn wrong_cek_length_is_rejected() {
        let cek = alloc::vec![0u8; 31];
        let iv = [0u8; cbc::IV_LEN];
        assert_eq!(
            encrypt(Variant::Hs512, &cek, &iv, b"x", b"").unwrap_err(),
            Error::KeyLengthMismatch
        );
    }

    #[test]
    fn tampered_tag_fails_closed() {
        let cek = [0x22u8; 32];
        let iv = [0x33u8; cbc::IV_LEN];
        let (ct, mut tag) = encrypt(Variant::Hs256, &cek, &iv, b"secret", b"aad").unwrap();
        tag[0] ^= 1;
        assert_eq!(
            decrypt(Variant::Hs256, &cek, &iv, &ct, b"aad", &tag),
            Err(Error::MacFail)
        );
    }

    /// spec §4.2 "Integer-overflow guard" / §8 scenario 9: a byte split
    /// that would make `newAad.len() * 8 == oldAad.len() * 8 (mod 2^32)`
    /// while actually differing must still be rejected, because `al` is
    /// computed as a genuine 64-bit quantity rather than wrapping through a
    /// 32-bit field.
    #[test]
    fn al_does_not_wrap_at_32_bits() {
        let short_aad = [0u8; 8];
        let long_aad_bit_len_mod_2_32 = ((short_aad.len() as u64) * 8) + (1u64 << 32);
        assert_ne!(
            al(&short_aad),
            (long_aad_bit_len_mod_2_32 % (1u64 << 32)).to_be_bytes()
        );
        // The actual 64-bit encodings differ even though their low 32 bits match.
        let low32_only = (long_aad_bit_len_mod_2_32 as u32) as u64;
        assert_eq!(low32_only, (short_aad.len() as u64) * 8);
        assert_ne!(al(&short_aad).to_vec(), long_aad_bit_len_mod_2_32.to_be_bytes().to_vec());
    }

    #[test]
    fn legacy_roundtrip() {
        use legacy::{decrypt, encrypt, LegacyVariant};

        for variant in [LegacyVariant::Hs256, LegacyVariant::Hs512] {
            let cmk = alloc::vec![0x77u8; variant.cmk_len()];
            let iv = [0x09u8; cbc::IV_LEN];
            let (ct, tag) = encrypt(variant, &cmk, &iv, b"legacy payload", b"aad").unwrap();
            let pt = decrypt(variant, &cmk, &iv, &ct, b"aad", &tag).unwrap();
            assert_eq!(pt, b"legacy payload");
        }
    }
}
