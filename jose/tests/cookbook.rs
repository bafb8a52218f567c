//! Cross-crate, cookbook-shaped scenarios (spec §8), exercised through the
//! full `Jws`/`Jwe` object lifecycle rather than any one crate's internals.
//!
//! The oct key material below is the literal `k` value from RFC 7520 §3.5
//! (HMAC) and §3.6 (AES-GCM), the same fixtures
//! `examples/iotaledger-identity.rs/libjose/tests/cookbook.rs` asserts
//! against. RSA and EC key pairs are generated fresh per test rather than
//! reconstructed from the cookbook's literal moduli/scalars: this exercise
//! has no way to confirm a hand-transcribed multi-hundred-digit RSA modulus
//! against its source without running the toolchain, so round-trip
//! properties stand in for byte-exact RFC vectors here, matching spec §8's
//! own emphasis on round-trip invariants.

use std::collections::BTreeSet;

use jose::{
    CriticalHeaderPolicy, DecryptMaterial, EncryptMaterial, Jwe, JweHeader, Jws, JwsHeader,
    SigningMaterial, VerifyingMaterial,
};
use jose_b64::base64ct::{Base64UrlUnpadded, Encoding};
use jose_jwk::{EcCurve, EncryptionAlg, KeyMgmtAlg, SigningAlg};
use rand_core::OsRng;

fn b64(s: &str) -> Vec<u8> {
    Base64UrlUnpadded::decode_vec(s).unwrap()
}

// RFC 7520 §3.5, "Symmetric Key (MAC Computation)".
fn cookbook_hmac_key() -> Vec<u8> {
    b64("hJtXIZ2uSN5kbQfbtTNWbpdmhkV8FJG-Onbc6mxCcYg")
}

// RFC 7520 §3.6, "Symmetric Key (Encryption)".
fn cookbook_gcm_key() -> Vec<u8> {
    b64("AAPapAv4LbFbiVawEjagUBluYqN5rhna-8nuldDvOx8")
}

fn jws_header(alg: SigningAlg) -> JwsHeader {
    JwsHeader::new(alg)
}

fn jwe_header(alg: KeyMgmtAlg, enc: EncryptionAlg) -> JweHeader {
    JweHeader::new(alg, enc)
}

#[test]
fn hs256_signs_and_verifies_the_cookbook_mac_key() {
    let mut rng = OsRng;
    let key = cookbook_hmac_key();
    let payload = b"It\xe2\x80\x99s a dangerous business, Frodo, going out your door.".to_vec();

    let compact = Jws::new(jws_header(SigningAlg::Hs256), payload.clone())
        .unwrap()
        .sign(&SigningMaterial::Hmac(&key), &mut rng)
        .unwrap()
        .serialize()
        .unwrap();

    let (verified, ok) = Jws::parse(&compact)
        .unwrap()
        .verify(&VerifyingMaterial::Hmac(&key), &CriticalHeaderPolicy::new())
        .unwrap();
    assert!(ok);
    assert_eq!(verified.payload(), &payload[..]);
}

#[test]
fn rs256_sign_verify_roundtrip() {
    let mut rng = OsRng;
    let sk = jose_jwa::rsa::RsaPrivateKey::new(&mut rng, 2048).unwrap();
    let pk = jose_jwa::rsa::RsaPublicKey::from(&sk);

    let compact = Jws::new(jws_header(SigningAlg::Rs256), b"payload".to_vec())
        .unwrap()
        .sign(&SigningMaterial::RsaPrivate(&sk), &mut rng)
        .unwrap()
        .serialize()
        .unwrap();

    let (_, ok) = Jws::parse(&compact)
        .unwrap()
        .verify(&VerifyingMaterial::RsaPublic(&pk), &CriticalHeaderPolicy::new())
        .unwrap();
    assert!(ok);
}

#[test]
fn ps384_sign_verify_roundtrip() {
    let mut rng = OsRng;
    let sk = jose_jwa::rsa::RsaPrivateKey::new(&mut rng, 2048).unwrap();
    let pk = jose_jwa::rsa::RsaPublicKey::from(&sk);

    let compact = Jws::new(jws_header(SigningAlg::Ps384), b"payload".to_vec())
        .unwrap()
        .sign(&SigningMaterial::RsaPrivate(&sk), &mut rng)
        .unwrap()
        .serialize()
        .unwrap();

    let (_, ok) = Jws::parse(&compact)
        .unwrap()
        .verify(&VerifyingMaterial::RsaPublic(&pk), &CriticalHeaderPolicy::new())
        .unwrap();
    assert!(ok);
}

#[test]
fn es512_sign_verify_roundtrip() {
    use jose_jwa::p521::elliptic_curve::sec1::ToEncodedPoint;

    let mut rng = OsRng;
    let sk = jose_jwa::p521::SecretKey::random(&mut rng);
    let scalar = sk.to_bytes();
    let point = sk.public_key().to_encoded_point(false).as_bytes().to_vec();

    let compact = Jws::new(jws_header(SigningAlg::Es512), b"hello hobbiton".to_vec())
        .unwrap()
        .sign(
            &SigningMaterial::EcPrivate {
                curve: EcCurve::P521,
                scalar: &scalar,
            },
            &mut rng,
        )
        .unwrap()
        .serialize()
        .unwrap();

    let (_, ok) = Jws::parse(&compact)
        .unwrap()
        .verify(
            &VerifyingMaterial::EcPublic {
                curve: EcCurve::P521,
                point: &point,
            },
            &CriticalHeaderPolicy::new(),
        )
        .unwrap();
    assert!(ok);
}

#[test]
fn dir_a256gcm_jwe_uses_the_cookbook_encryption_key_directly() {
    let mut rng = OsRng;
    let key = cookbook_gcm_key();
    let plaintext = b"You can trust us to stick with you through thick and thin".to_vec();

    let compact = Jwe::new(
        jwe_header(KeyMgmtAlg::Dir, EncryptionAlg::Aes256Gcm),
        plaintext.clone(),
    )
    .unwrap()
    .encrypt(&EncryptMaterial::Symmetric(&key), &mut rng)
    .unwrap()
    .serialize()
    .unwrap();

    let decrypted = Jwe::parse(&compact)
        .unwrap()
        .decrypt(&DecryptMaterial::Symmetric(&key), &CriticalHeaderPolicy::new(), &mut rng)
        .unwrap();
    assert_eq!(decrypted.plaintext(), Some(&plaintext[..]));
}

#[test]
fn rsa_oaep_256_a128cbc_hs256_roundtrip() {
    let mut rng = OsRng;
    let sk = jose_jwa::rsa::RsaPrivateKey::new(&mut rng, 2048).unwrap();
    let pk = jose_jwa::rsa::RsaPublicKey::from(&sk);
    let plaintext = b"Four score and seven years ago our fathers brought forth".to_vec();

    let compact = Jwe::new(
        jwe_header(KeyMgmtAlg::RsaOaep256, EncryptionAlg::Aes128CbcHs256),
        plaintext.clone(),
    )
    .unwrap()
    .encrypt(&EncryptMaterial::RsaPublic(&pk), &mut rng)
    .unwrap()
    .serialize()
    .unwrap();

    let decrypted = Jwe::parse(&compact)
        .unwrap()
        .decrypt(&DecryptMaterial::RsaPrivate(&sk), &CriticalHeaderPolicy::new(), &mut rng)
        .unwrap();
    assert_eq!(decrypted.plaintext(), Some(&plaintext[..]));
}

#[test]
fn ecdh_es_a128kw_roundtrip() {
    use jose_jwa::p256::elliptic_curve::sec1::ToEncodedPoint;

    let mut rng = OsRng;
    let recipient = jose_jwa::p256::SecretKey::random(&mut rng);
    let recipient_point = recipient.public_key().to_encoded_point(false).as_bytes().to_vec();
    let recipient_scalar = recipient.to_bytes();
    let plaintext = b"a fellowship of nine".to_vec();

    let compact = Jwe::new(
        jwe_header(KeyMgmtAlg::EcdhEsA128Kw, EncryptionAlg::Aes128Gcm),
        plaintext.clone(),
    )
    .unwrap()
    .encrypt(
        &EncryptMaterial::EcRecipientPublic {
            curve: EcCurve::P256,
            point: &recipient_point,
        },
        &mut rng,
    )
    .unwrap()
    .serialize()
    .unwrap();

    let decrypted = Jwe::parse(&compact)
        .unwrap()
        .decrypt(
            &DecryptMaterial::EcPrivate {
                curve: EcCurve::P256,
                scalar: &recipient_scalar,
            },
            &CriticalHeaderPolicy::new(),
            &mut rng,
        )
        .unwrap();
    assert_eq!(decrypted.plaintext(), Some(&plaintext[..]));
}

#[test]
fn ecdh_es_a256kw_roundtrip_p521() {
    use jose_jwa::p521::elliptic_curve::sec1::ToEncodedPoint;

    let mut rng = OsRng;
    let recipient = jose_jwa::p521::SecretKey::random(&mut rng);
    let recipient_point = recipient.public_key().to_encoded_point(false).as_bytes().to_vec();
    let recipient_scalar = recipient.to_bytes();
    let plaintext = b"over the misty mountains cold".to_vec();

    let compact = Jwe::new(
        jwe_header(KeyMgmtAlg::EcdhEsA256Kw, EncryptionAlg::Aes256Gcm),
        plaintext.clone(),
    )
    .unwrap()
    .encrypt(
        &EncryptMaterial::EcRecipientPublic {
            curve: EcCurve::P521,
            point: &recipient_point,
        },
        &mut rng,
    )
    .unwrap()
    .serialize()
    .unwrap();

    let decrypted = Jwe::parse(&compact)
        .unwrap()
        .decrypt(
            &DecryptMaterial::EcPrivate {
                curve: EcCurve::P521,
                scalar: &recipient_scalar,
            },
            &CriticalHeaderPolicy::new(),
            &mut rng,
        )
        .unwrap();
    assert_eq!(decrypted.plaintext(), Some(&plaintext[..]));
}

#[test]
fn pbes2_password_roundtrip() {
    let mut rng = OsRng;
    let password = b"correct horse battery staple".to_vec();
    let plaintext = b"the password to the tower door".to_vec();

    let compact = Jwe::new(
        jwe_header(KeyMgmtAlg::Pbes2Hs256A128Kw, EncryptionAlg::Aes128Gcm),
        plaintext.clone(),
    )
    .unwrap()
    .encrypt(&EncryptMaterial::Symmetric(&password), &mut rng)
    .unwrap()
    .serialize()
    .unwrap();

    let decrypted = Jwe::parse(&compact)
        .unwrap()
        .decrypt(
            &DecryptMaterial::Symmetric(&password),
            &CriticalHeaderPolicy::new(),
            &mut rng,
        )
        .unwrap();
    assert_eq!(decrypted.plaintext(), Some(&plaintext[..]));
}

#[test]
fn critical_header_rejection_and_deferral() {
    let mut rng = OsRng;
    let key = [0x42u8; 32];
    let mut h = jwe_header(KeyMgmtAlg::Dir, EncryptionAlg::Aes256Gcm);
    h.crit = Some(Some(BTreeSet::from(["exp".to_string()])));

    let compact = Jwe::new(h, b"secret".to_vec())
        .unwrap()
        .encrypt(&EncryptMaterial::Symmetric(&key), &mut rng)
        .unwrap()
        .serialize()
        .unwrap();

    let rejected = Jwe::parse(&compact)
        .unwrap()
        .decrypt(&DecryptMaterial::Symmetric(&key), &CriticalHeaderPolicy::new(), &mut rng);
    assert_eq!(rejected.unwrap_err(), jose::Error::UnsupportedCrit);

    let accepted = Jwe::parse(&compact)
        .unwrap()
        .decrypt(
            &DecryptMaterial::Symmetric(&key),
            &CriticalHeaderPolicy::deferring(["exp"]),
            &mut rng,
        )
        .unwrap();
    assert_eq!(accepted.plaintext(), Some(&b"secret"[..]));
}

/// RFC 7518 §5.2.2.1 defines `AES_256_CBC_HMAC_SHA_512` as: split the CEK
/// into `MAC_KEY = CEK[..32]` / `ENC_KEY = CEK[32..]`; CBC-encrypt under
/// `ENC_KEY`; compute `HMAC-SHA-512(MAC_KEY, AAD || IV || ciphertext ||
/// AL)` where `AL` is the AAD bit length as a big-endian 64-bit integer;
/// truncate the tag to the leftmost 32 bytes. This test recomputes that
/// construction by hand, directly against `jose_jwa::cbc`/`jose_jwa::mac`,
/// and checks it against `jose_jwa::aead::encrypt`'s output byte-for-byte —
/// pinning `aead::encrypt` to the published algorithm steps (key-split
/// order, AAD/AL placement, truncation length) rather than only checking
/// that its own `encrypt` and `decrypt` invert each other. RFC 7518
/// Appendix B.3 publishes a full literal ciphertext for this combination,
/// but its ~180 bytes of ciphertext/tag are not something this exercise can
/// safely hand-transcribe from memory without a compiler to check the
/// transcription against, the same reasoning that kept the RSA/EC cookbook
/// fixtures above to round-trip properties rather than literal byte
/// reconstruction.
#[test]
fn a256cbc_hs512_matches_the_published_construction_steps() {
    let cek: Vec<u8> = (0u8..64).collect();
    let mac_key = &cek[..32];
    let enc_key = &cek[32..];
    let iv = [0x42u8; 16];
    let aad = b"The second principle of cryptographic design";
    let plaintext = b"A cipher system must not be required to be secret, \
and it must be able to fall into the hands of the enemy without inconvenience";

    let (ciphertext, tag) =
        jose_jwa::aead::encrypt(jose_jwa::aead::Variant::Hs512, &cek, &iv, plaintext, aad).unwrap();

    let expected_ciphertext = jose_jwa::cbc::encrypt(enc_key, &iv, plaintext).unwrap();
    assert_eq!(ciphertext, expected_ciphertext);

    let al = ((aad.len() as u64) * 8).to_be_bytes();
    let mut mac_input = Vec::new();
    mac_input.extend_from_slice(aad);
    mac_input.extend_from_slice(&iv);
    mac_input.extend_from_slice(&ciphertext);
    mac_input.extend_from_slice(&al);
    let full_tag = jose_jwa::mac::hmac(jose_jwa::mac::HmacAlg::Hs512, mac_key, &mac_input).unwrap();
    assert_eq!(tag, full_tag[..32].to_vec());

    let decrypted = jose_jwa::aead::decrypt(
        jose_jwa::aead::Variant::Hs512,
        &cek,
        &iv,
        &ciphertext,
        aad,
        &tag,
    )
    .unwrap();
    assert_eq!(decrypted, plaintext.to_vec());
}

/// RFC 3394 §4.1 known-answer vector: 128-bit KEK wrapping 128 bits of key
/// data. Exercised directly against `jose-jwa`'s key-wrap primitive (C4's
/// `A128KW` is a thin dispatch over the same function), since this is the
/// one piece of the suite with a literal byte vector safe to hand-transcribe.
#[test]
fn aes_key_wrap_matches_rfc3394_known_answer_vector() {
    let kek = hex_literal::hex!("000102030405060708090A0B0C0D0E0F");
    let key_data = hex_literal::hex!("00112233445566778899AABBCCDDEEFF");
    let expected = hex_literal::hex!("1FA68B0A8112B447AEF34BD8FB5A7B829D3E862371D2CFE5");

    let wrapped = jose_jwa::keywrap::wrap(&kek, &key_data).unwrap();
    assert_eq!(wrapped, expected.to_vec());

    let unwrapped = jose_jwa::keywrap::unwrap(&kek, &wrapped).unwrap();
    assert_eq!(unwrapped, key_data.to_vec());
}
