//! Key-management dispatcher and algorithm suites (spec §4.4, C4+C5).
//!
//! One function pair per `alg` family, selected by [`KeyMgmtAlg`]. Each
//! `encrypt_key` call produces a CEK, an `encrypted_key` segment (empty for
//! `dir`/`ECDH-ES`), and any header parameters the algorithm must emit
//! (`epk`, `iv`/`tag`, `p2s`/`p2c`). Each `decrypt_key` call recovers the CEK
//! from `encrypted_key` and the header.

use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use jose_jwa::{ecdh::EcdhCurve, keywrap, pbes2, rsa, rsa_ops};
use jose_jwk::{Ec, EcCurve, EncryptionAlg, Jwk, Key, KeyMgmtAlg};

use crate::context::SecureRandom;
use crate::error::{Error, Result};
use crate::header::JweHeader;

/// Key material supplied to [`encrypt_key`], one variant per family.
pub enum EncryptMaterial<'a> {
    /// Shared symmetric key: `dir`'s CEK, or the KEK for `A*KW`/`A*GCMKW`,
    /// or the PBES2 password (treated as UTF-8 octets).
    Symmetric(&'a [u8]),
    /// RSA public key for `RSA1_5`/`RSA-OAEP`/`RSA-OAEP-256`.
    RsaPublic(&'a rsa::RsaPublicKey),
    /// Recipient EC public key for `ECDH-ES`/`ECDH-ES+A*KW`: the curve and
    /// its uncompressed SEC1 point (`0x04 || x || y`).
    EcRecipientPublic { curve: EcCurve, point: &'a [u8] },
}

/// Key material supplied to [`decrypt_key`], one variant per family.
pub enum DecryptMaterial<'a> {
    /// Shared symmetric key, KEK, or PBES2 password.
    Symmetric(&'a [u8]),
    /// RSA private key for `RSA1_5`/`RSA-OAEP`/`RSA-OAEP-256`.
    RsaPrivate(&'a rsa::RsaPrivateKey),
    /// This recipient's EC private key for `ECDH-ES`/`ECDH-ES+A*KW`: the
    /// curve and the raw private scalar.
    EcPrivate { curve: EcCurve, scalar: &'a [u8] },
}

/// Header parameters an encrypt call must stamp into the JWE header before
/// serialization.
#[derive(Clone, Debug, Default)]
pub struct HeaderUpdates {
    /// Ephemeral public key, for ECDH-ES family algorithms.
    pub epk: Option<Jwk>,
    /// Key-wrap IV, for `A*GCMKW`.
    pub iv: Option<Vec<u8>>,
    /// Key-wrap authentication tag, for `A*GCMKW`.
    pub tag: Option<Vec<u8>>,
    /// PBES2 salt input.
    pub p2s: Option<Vec<u8>>,
    /// PBES2 iteration count.
    pub p2c: Option<u32>,
}

/// The result of a successful [`encrypt_key`] call.
pub struct KeyMgmtOutput {
    /// The content-encryption key.
    pub cek: Vec<u8>,
    /// The JWE `encrypted_key` segment (empty for `dir`/`ECDH-ES`).
    pub encrypted_key: Vec<u8>,
    /// Header parameters to stamp in before serialization.
    pub header: HeaderUpdates,
}

/// Default PBES2 iteration count used by this engine when *creating* a new
/// JWE. Well above [`pbes2::MIN_ITERATIONS`]; decryption honors whatever
/// `p2c` the header carries, subject to `pbes2`'s floor/ceiling.
const DEFAULT_PBES2_ITERATIONS: u32 = 10_000;

/// Minimum PBES2 salt length this engine generates, per spec §4.4 ("generate
/// random salt `p2s` (≥ 8 bytes)").
const PBES2_SALT_LEN: usize = 16;

fn akw_bits(alg: KeyMgmtAlg) -> Option<usize> {
    match alg {
        KeyMgmtAlg::Aes128Kw | KeyMgmtAlg::Aes128GcmKw | KeyMgmtAlg::EcdhEsA128Kw => Some(128),
        KeyMgmtAlg::Aes192Kw | KeyMgmtAlg::Aes192GcmKw | KeyMgmtAlg::EcdhEsA192Kw => Some(192),
        KeyMgmtAlg::Aes256Kw | KeyMgmtAlg::Aes256GcmKw | KeyMgmtAlg::EcdhEsA256Kw => Some(256),
        _ => None,
    }
}

fn pbes_alg(alg: KeyMgmtAlg) -> Option<pbes2::PbesAlg> {
    match alg {
        KeyMgmtAlg::Pbes2Hs256A128Kw => Some(pbes2::PbesAlg::Hs256),
        KeyMgmtAlg::Pbes2Hs384A192Kw => Some(pbes2::PbesAlg::Hs384),
        KeyMgmtAlg::Pbes2Hs512A256Kw => Some(pbes2::PbesAlg::Hs512),
        _ => None,
    }
}

fn oaep_hash(alg: KeyMgmtAlg) -> Option<rsa_ops::OaepHash> {
    match alg {
        KeyMgmtAlg::RsaOaep => Some(rsa_ops::OaepHash::Sha1),
        KeyMgmtAlg::RsaOaep256 => Some(rsa_ops::OaepHash::Sha256),
        _ => None,
    }
}

fn ec_to_ecdh_curve(curve: EcCurve) -> EcdhCurve {
    match curve {
        EcCurve::P256 => EcdhCurve::P256,
        EcCurve::P384 => EcdhCurve::P384,
        EcCurve::P521 => EcdhCurve::P521,
    }
}

fn ec_point(ec: &Ec) -> Vec<u8> {
    let mut point = Vec::with_capacity(1 + ec.x.as_ref().len() + ec.y.as_ref().len());
    point.push(0x04);
    point.extend_from_slice(ec.x.as_ref());
    point.extend_from_slice(ec.y.as_ref());
    point
}

fn ec_from_point(curve: EcCurve, point: &[u8]) -> Result<Ec> {
    let coord = curve.coordinate_len();
    if point.len() != 1 + 2 * coord || point[0] != 0x04 {
        return Err(Error::InvalidEphemeralKey);
    }
    let x = point[1..1 + coord].to_vec().into_boxed_slice();
    let y = point[1 + coord..].to_vec().into_boxed_slice();
    Ok(Ec {
        crv: curve,
        x: x.into(),
        y: y.into(),
        d: None,
    })
}

fn ecdh_other_info(algorithm_id: &[u8], header: &JweHeader, keydatalen_bits: u32) -> Vec<u8> {
    let apu = header.apu.as_ref().map(|b| b.as_ref()).unwrap_or(&[]);
    let apv = header.apv.as_ref().map(|b| b.as_ref()).unwrap_or(&[]);
    jose_jwa::concat_kdf::other_info(algorithm_id, apu, apv, keydatalen_bits)
}

/// Produce a CEK, `encrypted_key`, and any header parameters to emit, for
/// `alg` given `material`.
pub fn encrypt_key(
    alg: KeyMgmtAlg,
    enc: EncryptionAlg,
    material: &EncryptMaterial<'_>,
    header: &JweHeader,
    mut rng: &mut dyn SecureRandom,
) -> Result<KeyMgmtOutput> {
    match alg {
        KeyMgmtAlg::Dir => {
            let EncryptMaterial::Symmetric(key) = material else {
                return Err(Error::InvalidKeyType);
            };
            if key.len() * 8 != enc.cek_bits() {
                return Err(Error::KeyLengthMismatch);
            }
            Ok(KeyMgmtOutput {
                cek: key.to_vec(),
                encrypted_key: Vec::new(),
                header: HeaderUpdates::default(),
            })
        }

        KeyMgmtAlg::Rsa1_5 | KeyMgmtAlg::RsaOaep | KeyMgmtAlg::RsaOaep256 => {
            let EncryptMaterial::RsaPublic(public_key) = material else {
                return Err(Error::InvalidKeyType);
            };
            let cek = crate::content::generate_cek(enc, rng);
            let encrypted_key = if alg == KeyMgmtAlg::Rsa1_5 {
                rsa_ops::rsa1_5_wrap(&mut rng, public_key, &cek)?
            } else {
                rsa_ops::oaep_wrap(&mut rng, oaep_hash(alg).expect("oaep alg"), public_key, &cek)?
            };
            Ok(KeyMgmtOutput {
                cek,
                encrypted_key,
                header: HeaderUpdates::default(),
            })
        }

        KeyMgmtAlg::Aes128Kw | KeyMgmtAlg::Aes192Kw | KeyMgmtAlg::Aes256Kw => {
            let EncryptMaterial::Symmetric(kek) = material else {
                return Err(Error::InvalidKeyType);
            };
            let cek = crate::content::generate_cek(enc, rng);
            let encrypted_key = keywrap::wrap(kek, &cek)?;
            Ok(KeyMgmtOutput {
                cek,
                encrypted_key,
                header: HeaderUpdates::default(),
            })
        }

        KeyMgmtAlg::Aes128GcmKw | KeyMgmtAlg::Aes192GcmKw | KeyMgmtAlg::Aes256GcmKw => {
            let EncryptMaterial::Symmetric(kek) = material else {
                return Err(Error::InvalidKeyType);
            };
            let cek = crate::content::generate_cek(enc, rng);
            let mut iv = [0u8; jose_jwa::gcm::IV_LEN];
            rng.fill_bytes(&mut iv);
            let (encrypted_key, tag) = jose_jwa::gcm::encrypt(kek, &iv, &cek, &[])?;
            Ok(KeyMgmtOutput {
                cek,
                encrypted_key,
                header: HeaderUpdates {
                    iv: Some(iv.to_vec()),
                    tag: Some(tag.to_vec()),
                    ..Default::default()
                },
            })
        }

        KeyMgmtAlg::Pbes2Hs256A128Kw | KeyMgmtAlg::Pbes2Hs384A192Kw | KeyMgmtAlg::Pbes2Hs512A256Kw => {
            let EncryptMaterial::Symmetric(password) = material else {
                return Err(Error::InvalidKeyType);
            };
            let pbes = pbes_alg(alg).expect("pbes2 alg");
            let mut p2s = alloc::vec![0u8; PBES2_SALT_LEN];
            rng.fill_bytes(&mut p2s);
            let p2c = DEFAULT_PBES2_ITERATIONS;
            let kek = pbes2::derive(pbes, password, &p2s, p2c)?;
            let cek = crate::content::generate_cek(enc, rng);
            let encrypted_key = keywrap::wrap(&kek, &cek)?;
            Ok(KeyMgmtOutput {
                cek,
                encrypted_key,
                header: HeaderUpdates {
                    p2s: Some(p2s),
                    p2c: Some(p2c),
                    ..Default::default()
                },
            })
        }

        KeyMgmtAlg::EcdhEs
        | KeyMgmtAlg::EcdhEsA128Kw
        | KeyMgmtAlg::EcdhEsA192Kw
        | KeyMgmtAlg::EcdhEsA256Kw => {
            let EncryptMaterial::EcRecipientPublic { curve, point } = material else {
                return Err(Error::InvalidKeyType);
            };
            let ecdh_curve = ec_to_ecdh_curve(*curve);
            let (ephemeral_scalar, ephemeral_point) = generate_ephemeral(ecdh_curve, rng)?;
            let z = ecdh_curve.shared_secret(&ephemeral_scalar, point)?;
            let epk = ec_from_point(*curve, &ephemeral_point)?;

            if alg == KeyMgmtAlg::EcdhEs {
                let keydatalen = enc.cek_bits() as u32;
                let other_info = ecdh_other_info(enc.name().as_bytes(), header, keydatalen);
                let cek = jose_jwa::concat_kdf::derive(&z, keydatalen as usize, &other_info);
                Ok(KeyMgmtOutput {
                    cek,
                    encrypted_key: Vec::new(),
                    header: HeaderUpdates {
                        epk: Some(Jwk::new(Key::Ec(epk))),
                        ..Default::default()
                    },
                })
            } else {
                let keydatalen = akw_bits(alg).expect("ecdh+kw alg") as u32;
                let other_info = ecdh_other_info(alg.name().as_bytes(), header, keydatalen);
                let kek = jose_jwa::concat_kdf::derive(&z, keydatalen as usize, &other_info);
                let cek = crate::content::generate_cek(enc, rng);
                let encrypted_key = keywrap::wrap(&kek, &cek)?;
                Ok(KeyMgmtOutput {
                    cek,
                    encrypted_key,
                    header: HeaderUpdates {
                        epk: Some(Jwk::new(Key::Ec(epk))),
                        ..Default::default()
                    },
                })
            }
        }
    }
}

/// Recover the CEK for `alg` given `material`, `header`, and the JWE's
/// `encrypted_key` segment.
pub fn decrypt_key(
    alg: KeyMgmtAlg,
    enc: EncryptionAlg,
    material: &DecryptMaterial<'_>,
    header: &JweHeader,
    encrypted_key: &[u8],
    mut rng: &mut dyn SecureRandom,
) -> Result<Vec<u8>> {
    match alg {
        KeyMgmtAlg::Dir => {
            let DecryptMaterial::Symmetric(key) = material else {
                return Err(Error::InvalidKeyType);
            };
            if key.len() * 8 != enc.cek_bits() {
                return Err(Error::KeyLengthMismatch);
            }
            Ok(key.to_vec())
        }

        KeyMgmtAlg::Rsa1_5 | KeyMgmtAlg::RsaOaep | KeyMgmtAlg::RsaOaep256 => {
            let DecryptMaterial::RsaPrivate(private_key) = material else {
                return Err(Error::InvalidKeyType);
            };
            let expected_len = enc.cek_bits() / 8;
            if alg == KeyMgmtAlg::Rsa1_5 {
                Ok(rsa_ops::rsa1_5_unwrap(&mut rng, private_key, encrypted_key, expected_len))
            } else {
                Ok(rsa_ops::oaep_unwrap(
                    oaep_hash(alg).expect("oaep alg"),
                    private_key,
                    encrypted_key,
                )?)
            }
        }

        KeyMgmtAlg::Aes128Kw | KeyMgmtAlg::Aes192Kw | KeyMgmtAlg::Aes256Kw => {
            let DecryptMaterial::Symmetric(kek) = material else {
                return Err(Error::InvalidKeyType);
            };
            Ok(keywrap::unwrap(kek, encrypted_key)?)
        }

        KeyMgmtAlg::Aes128GcmKw | KeyMgmtAlg::Aes192GcmKw | KeyMgmtAlg::Aes256GcmKw => {
            let DecryptMaterial::Symmetric(kek) = material else {
                return Err(Error::InvalidKeyType);
            };
            let iv = header.iv.as_ref().ok_or(Error::MissingHeaderParam)?;
            let tag = header.tag.as_ref().ok_or(Error::MissingHeaderParam)?;
            let iv: &[u8; jose_jwa::gcm::IV_LEN] =
                iv.as_ref().try_into().map_err(|_| Error::MissingHeaderParam)?;
            let tag: &[u8; jose_jwa::gcm::TAG_LEN] =
                tag.as_ref().try_into().map_err(|_| Error::MissingHeaderParam)?;
            Ok(jose_jwa::gcm::decrypt(kek, iv, encrypted_key, &[], tag)?)
        }

        KeyMgmtAlg::Pbes2Hs256A128Kw | KeyMgmtAlg::Pbes2Hs384A192Kw | KeyMgmtAlg::Pbes2Hs512A256Kw => {
            let DecryptMaterial::Symmetric(password) = material else {
                return Err(Error::InvalidKeyType);
            };
            let pbes = pbes_alg(alg).expect("pbes2 alg");
            let p2s = header.p2s.as_ref().ok_or(Error::MissingHeaderParam)?;
            let p2c = header.p2c.ok_or(Error::MissingHeaderParam)?;
            let kek = pbes2::derive(pbes, password, p2s.as_ref(), p2c)?;
            Ok(keywrap::unwrap(&kek, encrypted_key)?)
        }

        KeyMgmtAlg::EcdhEs
        | KeyMgmtAlg::EcdhEsA128Kw
        | KeyMgmtAlg::EcdhEsA192Kw
        | KeyMgmtAlg::EcdhEsA256Kw => {
            let DecryptMaterial::EcPrivate { curve, scalar } = material else {
                return Err(Error::InvalidKeyType);
            };
            let epk_jwk = header.epk.as_ref().ok_or(Error::MissingHeaderParam)?;
            let Key::Ec(epk) = &epk_jwk.key else {
                return Err(Error::InvalidKeyType);
            };
            if epk.crv as u8 != *curve as u8 {
                return Err(Error::InvalidKeyType);
            }
            if epk.d.is_some() {
                return Err(Error::InvalidEphemeralKey);
            }
            let ecdh_curve = ec_to_ecdh_curve(*curve);
            let point = ec_point(epk);
            let z = ecdh_curve.shared_secret(scalar, &point)?;

            if alg == KeyMgmtAlg::EcdhEs {
                let keydatalen = enc.cek_bits() as u32;
                let other_info = ecdh_other_info(enc.name().as_bytes(), header, keydatalen);
                Ok(jose_jwa::concat_kdf::derive(&z, keydatalen as usize, &other_info))
            } else {
                let keydatalen = akw_bits(alg).expect("ecdh+kw alg") as u32;
                let other_info = ecdh_other_info(alg.name().as_bytes(), header, keydatalen);
                let kek = jose_jwa::concat_kdf::derive(&z, keydatalen as usize, &other_info);
                Ok(keywrap::unwrap(&kek, encrypted_key)?)
            }
        }
    }
}

/// Generate an ephemeral EC key pair on `curve`, returning `(private
/// scalar, uncompressed public point)`.
///
/// Delegates to the curve crate's own `SecretKey::random`, which performs
/// proper rejection sampling against the group order. A hand-rolled
/// uniform draw over the full coordinate width is *not* a safe substitute:
/// P-521's order sits well below 2^528, so a uniform 66-byte scalar lands
/// in range only about 1 time in 128.
fn generate_ephemeral(curve: EcdhCurve, mut rng: &mut dyn SecureRandom) -> Result<(Vec<u8>, Vec<u8>)> {
    use jose_jwa::p256::elliptic_curve::sec1::ToEncodedPoint;

    let (scalar, point) = match curve {
        EcdhCurve::P256 => {
            let sk = jose_jwa::p256::SecretKey::random(&mut rng);
            let point = sk.public_key().to_encoded_point(false).as_bytes().to_vec();
            (sk.to_bytes().to_vec(), point)
        }
        EcdhCurve::P384 => {
            let sk = jose_jwa::p384::SecretKey::random(&mut rng);
            let point = sk.public_key().to_encoded_point(false).as_bytes().to_vec();
            (sk.to_bytes().to_vec(), point)
        }
        EcdhCurve::P521 => {
            let sk = jose_jwa::p521::SecretKey::random(&mut rng);
            let point = sk.public_key().to_encoded_point(false).as_bytes().to_vec();
            (sk.to_bytes().to_vec(), point)
        }
    };
    Ok((scalar, point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jose_jwk::EcCurve;
    use rand_core::OsRng;

    fn header(alg: KeyMgmtAlg, enc: EncryptionAlg) -> JweHeader {
        JweHeader {
            alg,
            enc,
            zip: None,
            kid: None,
            typ: None,
            cty: None,
            crit: None,
            jwk: None,
            epk: None,
            apu: None,
            apv: None,
            iv: None,
            tag: None,
            p2s: None,
            p2c: None,
            extra: Default::default(),
        }
    }

    #[test]
    fn dir_roundtrip() {
        let mut rng = OsRng;
        let key = [0x11u8; 32];
        let h = header(KeyMgmtAlg::Dir, EncryptionAlg::Aes256Gcm);
        let out = encrypt_key(
            KeyMgmtAlg::Dir,
            EncryptionAlg::Aes256Gcm,
            &EncryptMaterial::Symmetric(&key),
            &h,
            &mut rng,
        )
        .unwrap();
        assert!(out.encrypted_key.is_empty());
        let cek = decrypt_key(
            KeyMgmtAlg::Dir,
            EncryptionAlg::Aes256Gcm,
            &DecryptMaterial::Symmetric(&key),
            &h,
            &out.encrypted_key,
            &mut rng,
        )
        .unwrap();
        assert_eq!(cek, out.cek);
    }

    #[test]
    fn aes_kw_roundtrip() {
        let mut rng = OsRng;
        let kek = [0x22u8; 16];
        let h = header(KeyMgmtAlg::Aes128Kw, EncryptionAlg::Aes128Gcm);
        let out = encrypt_key(
            KeyMgmtAlg::Aes128Kw,
            EncryptionAlg::Aes128Gcm,
            &EncryptMaterial::Symmetric(&kek),
            &h,
            &mut rng,
        )
        .unwrap();
        let cek = decrypt_key(
            KeyMgmtAlg::Aes128Kw,
            EncryptionAlg::Aes128Gcm,
            &DecryptMaterial::Symmetric(&kek),
            &h,
            &out.encrypted_key,
            &mut rng,
        )
        .unwrap();
        assert_eq!(cek, out.cek);
    }

    #[test]
    fn gcm_kw_roundtrip_and_emits_header() {
        let mut rng = OsRng;
        let kek = [0x33u8; 32];
        let h = header(KeyMgmtAlg::Aes256GcmKw, EncryptionAlg::Aes256Gcm);
        let out = encrypt_key(
            KeyMgmtAlg::Aes256GcmKw,
            EncryptionAlg::Aes256Gcm,
            &EncryptMaterial::Symmetric(&kek),
            &h,
            &mut rng,
        )
        .unwrap();
        assert!(out.header.iv.is_some());
        assert!(out.header.tag.is_some());
        let mut h2 = h;
        h2.iv = out.header.iv.clone();
        h2.tag = out.header.tag.clone();
        let cek = decrypt_key(
            KeyMgmtAlg::Aes256GcmKw,
            EncryptionAlg::Aes256Gcm,
            &DecryptMaterial::Symmetric(&kek),
            &h2,
            &out.encrypted_key,
            &mut rng,
        )
        .unwrap();
        assert_eq!(cek, out.cek);
    }

    #[test]
    fn gcm_kw_missing_iv_is_missing_header_param() {
        let mut rng = OsRng;
        let kek = [0x33u8; 16];
        let h = header(KeyMgmtAlg::Aes128GcmKw, EncryptionAlg::Aes128Gcm);
        assert_eq!(
            decrypt_key(
                KeyMgmtAlg::Aes128GcmKw,
                EncryptionAlg::Aes128Gcm,
                &DecryptMaterial::Symmetric(&kek),
                &h,
                &[0u8; 16],
                &mut rng,
            ),
            Err(Error::MissingHeaderParam)
        );
    }

    #[test]
    fn pbes2_roundtrip() {
        let mut rng = OsRng;
        let password = b"correct horse battery staple";
        let h = header(KeyMgmtAlg::Pbes2Hs256A128Kw, EncryptionAlg::Aes128Gcm);
        let out = encrypt_key(
            KeyMgmtAlg::Pbes2Hs256A128Kw,
            EncryptionAlg::Aes128Gcm,
            &EncryptMaterial::Symmetric(password),
            &h,
            &mut rng,
        )
        .unwrap();
        let mut h2 = h;
        h2.p2s = out.header.p2s.clone();
        h2.p2c = out.header.p2c;
        let cek = decrypt_key(
            KeyMgmtAlg::Pbes2Hs256A128Kw,
            EncryptionAlg::Aes128Gcm,
            &DecryptMaterial::Symmetric(password),
            &h2,
            &out.encrypted_key,
            &mut rng,
        )
        .unwrap();
        assert_eq!(cek, out.cek);
    }

    #[test]
    fn ecdh_es_direct_roundtrip() {
        use jose_jwa::p256::elliptic_curve::sec1::ToEncodedPoint;

        let mut rng = OsRng;
        let recipient = jose_jwa::p256::SecretKey::random(&mut rng);
        let recipient_point = recipient.public_key().to_encoded_point(false);

        let h = header(KeyMgmtAlg::EcdhEs, EncryptionAlg::Aes128Gcm);
        let out = encrypt_key(
            KeyMgmtAlg::EcdhEs,
            EncryptionAlg::Aes128Gcm,
            &EncryptMaterial::EcRecipientPublic {
                curve: EcCurve::P256,
                point: recipient_point.as_bytes(),
            },
            &h,
            &mut rng,
        )
        .unwrap();
        assert!(out.encrypted_key.is_empty());
        assert!(out.header.epk.is_some());

        let mut h2 = h;
        h2.epk = out.header.epk.clone();
        let cek = decrypt_key(
            KeyMgmtAlg::EcdhEs,
            EncryptionAlg::Aes128Gcm,
            &DecryptMaterial::EcPrivate {
                curve: EcCurve::P256,
                scalar: &recipient.to_bytes(),
            },
            &h2,
            &out.encrypted_key,
            &mut rng,
        )
        .unwrap();
        assert_eq!(cek, out.cek);
    }

    #[test]
    fn ecdh_es_kw_roundtrip() {
        use jose_jwa::p256::elliptic_curve::sec1::ToEncodedPoint;

        let mut rng = OsRng;
        let recipient = jose_jwa::p384::SecretKey::random(&mut rng);
        let recipient_point = recipient.public_key().to_encoded_point(false);

        let h = header(KeyMgmtAlg::EcdhEsA192Kw, EncryptionAlg::Aes192Gcm);
        let out = encrypt_key(
            KeyMgmtAlg::EcdhEsA192Kw,
            EncryptionAlg::Aes192Gcm,
            &EncryptMaterial::EcRecipientPublic {
                curve: EcCurve::P384,
                point: recipient_point.as_bytes(),
            },
            &h,
            &mut rng,
        )
        .unwrap();
        assert!(!out.encrypted_key.is_empty());

        let mut h2 = h;
        h2.epk = out.header.epk.clone();
        let cek = decrypt_key(
            KeyMgmtAlg::EcdhEsA192Kw,
            EncryptionAlg::Aes192Gcm,
            &DecryptMaterial::EcPrivate {
                curve: EcCurve::P384,
                scalar: &recipient.to_bytes(),
            },
            &h2,
            &out.encrypted_key,
            &mut rng,
        )
        .unwrap();
        assert_eq!(cek, out.cek);
    }

    #[test]
    fn ecdh_es_kw_roundtrip_p521() {
        use jose_jwa::p256::elliptic_curve::sec1::ToEncodedPoint;

        let mut rng = OsRng;
        let recipient = jose_jwa::p521::SecretKey::random(&mut rng);
        let recipient_point = recipient.public_key().to_encoded_point(false);

        let h = header(KeyMgmtAlg::EcdhEsA256Kw, EncryptionAlg::Aes256Gcm);
        let out = encrypt_key(
            KeyMgmtAlg::EcdhEsA256Kw,
            EncryptionAlg::Aes256Gcm,
            &EncryptMaterial::EcRecipientPublic {
                curve: EcCurve::P521,
                point: recipient_point.as_bytes(),
            },
            &h,
            &mut rng,
        )
        .unwrap();
        assert!(!out.encrypted_key.is_empty());

        let mut h2 = h;
        h2.epk = out.header.epk.clone();
        let cek = decrypt_key(
            KeyMgmtAlg::EcdhEsA256Kw,
            EncryptionAlg::Aes256Gcm,
            &DecryptMaterial::EcPrivate {
                curve: EcCurve::P521,
                scalar: &recipient.to_bytes(),
            },
            &h2,
            &out.encrypted_key,
            &mut rng,
        )
        .unwrap();
        assert_eq!(cek, out.cek);
    }
}
