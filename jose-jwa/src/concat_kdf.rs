//! Concat KDF, NIST SP 800-56A §5.8.1 (spec §4.1 "ConcatKDF").
//!
//! Used to derive the CEK (and, for `ECDH-ES+A*KW`, the KEK) from an ECDH
//! shared secret, and — in the legacy `A*CBC+HS*` `enc` variants — to
//! derive both the content-encryption and content-integrity keys from a
//! single shared CMK.
//!
//! Hash is fixed to SHA-256, matching every derivation this engine performs
//! (spec §4.1: "Hash is SHA-256 for all ECDH derivations required here").

use alloc::vec::Vec;

use sha2::{Digest, Sha256};

const HASH_LEN: usize = 32;

/// Build `otherInfo = AlgorithmID || PartyUInfo || PartyVInfo || SuppPubInfo
/// || SuppPrivInfo`, where `AlgorithmID`/`PartyUInfo`/`PartyVInfo` are
/// length-prefixed (4-byte big-endian length, then the bytes) and
/// `SuppPubInfo` is the fixed 32-bit big-endian `keydatalen_bits`.
/// `SuppPrivInfo` is always empty for the derivations this engine performs.
pub fn other_info(algorithm_id: &[u8], party_u_info: &[u8], party_v_info: &[u8], keydatalen_bits: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(12 + algorithm_id.len() + party_u_info.len() + party_v_info.len() + 4);
    push_length_prefixed(&mut out, algorithm_id);
    push_length_prefixed(&mut out, party_u_info);
    push_length_prefixed(&mut out, party_v_info);
    out.extend_from_slice(&keydatalen_bits.to_be_bytes());
    out
}

fn push_length_prefixed(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(data);
}

/// Derive `keydatalen_bits` bits of key material from shared secret `z` and
/// `other_info`, iterating `H(counter || Z || otherInfo)` with a 4-byte
/// big-endian counter starting at 1.
pub fn derive(z: &[u8], keydatalen_bits: usize, other_info: &[u8]) -> Vec<u8> {
    let out_len = (keydatalen_bits + 7) / 8;
    let iterations = (out_len + HASH_LEN - 1) / HASH_LEN;

    let mut output = Vec::with_capacity(iterations * HASH_LEN);
    for counter in 1..=iterations as u32 {
        let mut hasher = Sha256::new();
        hasher.update(counter.to_be_bytes());
        hasher.update(z);
        hasher.update(other_info);
        output.extend_from_slice(&hasher.finalize());
    }
    output.truncate(out_len);
    output
}

/// Legacy key derivation for the deprecated `A*CBC+HS*` `enc` methods
/// (spec §4.1 "Legacy ConcatKDF"): derive the content-encryption key and
/// content-integrity key from the same shared CMK, using the labels
/// `"Encryption"` and `"Integrity"` as `AlgorithmID`.
///
/// Returns `(cek, cik)`.
pub fn legacy_derive_cek_cik(cmk: &[u8], enc_key_bits: usize, mac_key_bits: usize) -> (Vec<u8>, Vec<u8>) {
    let cek = derive(
        cmk,
        enc_key_bits,
        &other_info(b"Encryption", &[], &[], enc_key_bits as u32),
    );
    let cik = derive(
        cmk,
        mac_key_bits,
        &other_info(b"Integrity", &[], &[], mac_key_bits as u32),
    );
    (cek, cik)
}
