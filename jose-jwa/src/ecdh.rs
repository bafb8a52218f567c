//! ECDH-ES key agreement (spec §4.1 "ECDH-ES").
//!
//! `EcdhCurve::shared_secret` rejects ephemeral public keys that are not
//! valid points on the expected curve — the `elliptic-curve` crate's
//! `PublicKey::from_sec1_bytes` performs this validation as part of point
//! decoding, so an invalid `epk` never reaches the scalar multiplication
//! (spec §9 Open Question (c): "EC point validation is made mandatory,
//! not optional").

use alloc::vec::Vec;

use crate::error::{Error, Result};

/// The three NIST curves this engine supports for ECDH-ES and ECDSA.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EcdhCurve {
    /// P-256 / secp256r1, 32-byte coordinates.
    P256,
    /// P-384 / secp384r1, 48-byte coordinates.
    P384,
    /// P-521 / secp521r1, 66-byte coordinates.
    P521,
}

impl EcdhCurve {
    /// The coordinate (and shared-secret) length for this curve, in bytes.
    pub const fn coordinate_len(self) -> usize {
        match self {
            EcdhCurve::P256 => 32,
            EcdhCurve::P384 => 48,
            EcdhCurve::P521 => 66,
        }
    }

    /// Compute the ECDH shared secret (the raw x-coordinate of
    /// `private * public`) given an uncompressed SEC1 public key point and
    /// a raw private scalar.
    ///
    /// Returns [`Error::InvalidEphemeralKey`] if `public_point` does not
    /// decode to a valid point on this curve.
    pub fn shared_secret(
        self,
        private_scalar: &[u8],
        public_point: &[u8],
    ) -> Result<Vec<u8>> {
        match self {
            EcdhCurve::P256 => diffie_hellman_p256(private_scalar, public_point),
            EcdhCurve::P384 => diffie_hellman_p384(private_scalar, public_point),
            EcdhCurve::P521 => diffie_hellman_p521(private_scalar, public_point),
        }
    }
}

fn diffie_hellman_p256(private_scalar: &[u8], public_point: &[u8]) -> Result<Vec<u8>> {
    use p256::{PublicKey, SecretKey};

    let secret = SecretKey::from_slice(private_scalar).map_err(|_| Error::KeyLengthMismatch)?;
    let public =
        PublicKey::from_sec1_bytes(public_point).map_err(|_| Error::InvalidEphemeralKey)?;
    let shared = elliptic_curve::ecdh::diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
    Ok(shared.raw_secret_bytes().to_vec())
}

fn diffie_hellman_p384(private_scalar: &[u8], public_point: &[u8]) -> Result<Vec<u8>> {
    use p384::{PublicKey, SecretKey};

    let secret = SecretKey::from_slice(private_scalar).map_err(|_| Error::KeyLengthMismatch)?;
    let public =
        PublicKey::from_sec1_bytes(public_point).map_err(|_| Error::InvalidEphemeralKey)?;
    let shared = elliptic_curve::ecdh::diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
    Ok(shared.raw_secret_bytes().to_vec())
}

fn diffie_hellman_p521(private_scalar: &[u8], public_point: &[u8]) -> Result<Vec<u8>> {
    use p521::{PublicKey, SecretKey};

    let secret = SecretKey::from_slice(private_scalar).map_err(|_| Error::KeyLengthMismatch)?;
    let public =
        PublicKey::from_sec1_bytes(public_point).map_err(|_| Error::InvalidEphemeralKey)?;
    let shared = elliptic_curve::ecdh::diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
    Ok(shared.raw_secret_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use elliptic_curve::sec1::ToEncodedPoint;

    #[test]
    fn p256_shared_secret_matches_both_directions() {
        let alice = p256::SecretKey::random(&mut rand_core::OsRng);
        let bob = p256::SecretKey::random(&mut rand_core::OsRng);

        let alice_pub = alice.public_key().to_encoded_point(false);
        let bob_pub = bob.public_key().to_encoded_point(false);

        let z_alice = EcdhCurve::P256
            .shared_secret(&alice.to_bytes(), bob_pub.as_bytes())
            .unwrap();
        let z_bob = EcdhCurve::P256
            .shared_secret(&bob.to_bytes(), alice_pub.as_bytes())
            .unwrap();
        assert_eq!(z_alice, z_bob);
        assert_eq!(z_alice.len(), EcdhCurve::P256.coordinate_len());
    }

    #[test]
    fn invalid_point_is_rejected() {
        let alice = p256::SecretKey::random(&mut rand_core::OsRng);
        let garbage = [0x04u8; 65];
        assert_eq!(
            EcdhCurve::P256.shared_secret(&alice.to_bytes(), &garbage),
            Err(Error::InvalidEphemeralKey)
        );
    }
}
