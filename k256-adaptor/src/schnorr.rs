//! Taproot Schnorr signatures as defined in [BIP340], and the keys and
//! tagged hashes shared with [`adaptor`] pre-signatures.
//!
//! [BIP340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki

pub mod adaptor;

use crate::{AffinePoint, Error, FieldBytes, FieldElement, Result, Scalar};
use elliptic_curve::{
    subtle::{Choice, ConditionallySelectable},
    zeroize::Zeroizing,
};
use rand_core::CryptoRngCore;
use sha2::{Digest, Sha256};
use tracing::{debug, error, trace};

/// Tag hiding the secret key inside the auxiliary randomness.
pub const AUX_TAG: &[u8] = b"BIP0340/aux";

/// Tag for nonce derivation.
pub const NONCE_TAG: &[u8] = b"BIP0340/nonce";

/// Tag for the Fiat-Shamir challenge.
pub const CHALLENGE_TAG: &[u8] = b"BIP0340/challenge";

/// Size of a BIP340 signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// `SHA256(SHA256(tag) ‖ SHA256(tag) ‖ msg)`.
///
/// Each tag defines an independent hash domain.
pub fn tagged_hash(tag: &[u8], msg: &[u8]) -> FieldBytes {
    tagged_hasher(tag).chain_update(msg).finalize()
}

/// A SHA-256 state that has already absorbed the tag prefix.
pub(crate) fn tagged_hasher(tag: &[u8]) -> Sha256 {
    let tag_hash = Sha256::digest(tag);
    let mut digest = Sha256::new();
    digest.update(&tag_hash);
    digest.update(&tag_hash);
    digest
}

/// Challenge `e = H_challenge(x(R) ‖ x(P) ‖ msg) mod n`.
pub(crate) fn challenge(r_x: &FieldBytes, p_x: &FieldBytes, msg: &[u8; 32]) -> Scalar {
    let hash = tagged_hasher(CHALLENGE_TAG)
        .chain_update(r_x)
        .chain_update(p_x)
        .chain_update(msg)
        .finalize();
    Scalar::from_bytes_reduced(&hash)
}

#[inline]
fn xor(a: &FieldBytes, b: &FieldBytes) -> [u8; 32] {
    let mut res = [0u8; 32];

    for i in 0..32 {
        res[i] = a[i] ^ b[i];
    }

    res
}

/// Derive the x-only public key for a 32-byte secret key.
pub fn pubkey_gen(seckey: &[u8]) -> Result<FieldBytes> {
    Ok(SigningKey::from_bytes(seckey)?.verifying_key().to_bytes())
}

/// Taproot Schnorr signature as defined in [BIP340].
///
/// [BIP340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    bytes: [u8; SIGNATURE_SIZE],
    s: Scalar,
}

impl Signature {
    /// Parse signature from big endian-encoded bytes.
    ///
    /// Rejects `r >= p` and `s >= n`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; SIGNATURE_SIZE] =
            bytes.try_into().map_err(|_| Error::InvalidSignatureLength {
                expected: SIGNATURE_SIZE,
                len: bytes.len(),
            })?;

        if bool::from(FieldElement::from_bytes(FieldBytes::from_slice(&bytes[..32])).is_none()) {
            return Err(Error::FieldElementOutOfRange);
        }
        let s = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from_slice(&bytes[32..])))
            .ok_or(Error::ScalarOutOfRange)?;

        Ok(Self { bytes, s })
    }

    /// Borrow the serialized signature as bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.bytes
    }

    /// Get the `r` component: the x-coordinate of the nonce point.
    pub fn r(&self) -> &FieldBytes {
        FieldBytes::from_slice(&self.bytes[..32])
    }

    /// Get the `s` component.
    pub fn s(&self) -> Scalar {
        self.s
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

/// Taproot Schnorr signing key.
///
/// The secret scalar is stored already negated if needed so that it
/// corresponds to the even-y public point.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret key material
    secret_key: Scalar,

    /// Verifying key
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Parse signing key from big endian-encoded bytes.
    ///
    /// The key must be 32 bytes encoding an integer in `1..=n-1`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidSecretKey);
        }

        let trial_secret_key =
            Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from_slice(bytes)))
                .ok_or(Error::InvalidSecretKey)?;
        if bool::from(trial_secret_key.is_zero()) {
            return Err(Error::InvalidSecretKey);
        }

        let trial_public_key = AffinePoint::GENERATOR * &trial_secret_key;
        let even = trial_public_key.has_even_y();

        let secret_key = Scalar::conditional_select(
            &trial_secret_key.negate(),
            &trial_secret_key,
            Choice::from(even as u8),
        );
        let public_key = if even {
            trial_public_key
        } else {
            trial_public_key.negate()
        };

        Ok(Self {
            secret_key,
            verifying_key: VerifyingKey::from_affine(public_key)?,
        })
    }

    /// Get the [`VerifyingKey`] that corresponds to this signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Compute a BIP340 Schnorr signature over a 32-byte message digest.
    pub fn sign_raw_digest(
        &self,
        msg_digest: &[u8; 32],
        aux_rand: &[u8; 32],
    ) -> Result<Signature> {
        let k0 = self.derive_nonce(aux_rand, None, msg_digest)?;
        let r_point = AffinePoint::GENERATOR * &k0;
        let k = Scalar::conditional_select(
            &k0.negate(),
            &k0,
            Choice::from(r_point.has_even_y() as u8),
        );

        let r = r_point.x_bytes()?;
        let e = challenge(&r, &self.verifying_key.to_bytes(), msg_digest);

        let mut bytes = [0u8; SIGNATURE_SIZE];
        bytes[..32].copy_from_slice(&r);
        bytes[32..].copy_from_slice(&(k + e * self.secret_key).to_bytes());
        let sig = Signature::from_bytes(&bytes)?;

        if let Err(err) = self.verifying_key.verify_raw_digest(msg_digest, &sig) {
            error!(?err, "created signature does not pass verification");
            return Err(Error::SelfVerificationFailed);
        }

        Ok(sig)
    }

    /// Compute a BIP340 Schnorr signature, drawing the auxiliary randomness
    /// from `rng`.
    pub fn sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg_digest: &[u8; 32],
    ) -> Result<Signature> {
        let mut aux_rand = [0u8; 32];
        rng.fill_bytes(&mut aux_rand);
        self.sign_raw_digest(msg_digest, &aux_rand)
    }

    /// `k0 = H_nonce(d ⊕ H_aux(aux_rand) ‖ [x(T)] ‖ x(P) ‖ msg) mod n`.
    ///
    /// The adaptor x-coordinate is only hashed in for pre-signatures.
    pub(crate) fn derive_nonce(
        &self,
        aux_rand: &[u8; 32],
        adaptor_x: Option<&FieldBytes>,
        msg_digest: &[u8; 32],
    ) -> Result<Scalar> {
        let t = Zeroizing::new(xor(
            &self.secret_key.to_bytes(),
            &tagged_hash(AUX_TAG, aux_rand),
        ));

        let mut hasher = tagged_hasher(NONCE_TAG);
        hasher.update(&t[..]);
        if let Some(adaptor_x) = adaptor_x {
            hasher.update(adaptor_x);
        }
        hasher.update(self.verifying_key.to_bytes());
        hasher.update(msg_digest);

        let k0 = Scalar::from_bytes_reduced(&hasher.finalize());
        if bool::from(k0.is_zero()) {
            return Err(Error::NonceIsZero);
        }

        Ok(k0)
    }
}

/// Taproot Schnorr verifying key: an x-only public key whose point has
/// even y.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    /// Inner public point, finite with even y
    inner: AffinePoint,

    /// Serialized x-coordinate
    bytes: FieldBytes,
}

impl VerifyingKey {
    fn from_affine(point: AffinePoint) -> Result<Self> {
        let bytes = point.x_bytes()?;
        Ok(Self {
            inner: point,
            bytes,
        })
    }

    /// Parse verifying key from big endian-encoded x-coordinate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidPublicKeyLength { len: bytes.len() });
        }

        Self::from_affine(AffinePoint::lift_x(FieldBytes::from_slice(bytes))?)
    }

    /// Borrow the inner [`AffinePoint`] this type wraps.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.inner
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> FieldBytes {
        self.bytes
    }

    /// Verify a BIP340 Schnorr signature over a 32-byte message digest.
    pub fn verify_raw_digest(&self, msg_digest: &[u8; 32], sig: &Signature) -> Result<()> {
        let e = challenge(sig.r(), &self.bytes, msg_digest);
        let r_point = AffinePoint::GENERATOR * sig.s() - &(self.inner * e);

        if !r_point.has_even_y() {
            debug!(identity = r_point.is_identity(), "R is infinite or has odd y");
            return Err(Error::VerificationFailed);
        }

        if r_point.x_bytes()? != *sig.r() {
            debug!("x(R) does not match r");
            return Err(Error::VerificationFailed);
        }

        trace!(r = ?r_point.x(), "signature verified");
        Ok(())
    }
}

impl From<VerifyingKey> for AffinePoint {
    fn from(vk: VerifyingKey) -> AffinePoint {
        vk.inner
    }
}

impl From<&VerifyingKey> for AffinePoint {
    fn from(vk: &VerifyingKey) -> AffinePoint {
        vk.inner
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        pubkey_gen, tagged_hash, Signature, SigningKey, VerifyingKey, AUX_TAG, CHALLENGE_TAG,
        NONCE_TAG,
    };
    use crate::{
        test_vectors::{BIP340_SIGN_VECTORS, BIP340_VERIFY_VECTORS},
        AffinePoint, Error, Scalar,
    };
    use hex_literal::hex;
    use sha2::{Digest, Sha256};

    #[test]
    fn bip340_sign_vectors() {
        for vector in BIP340_SIGN_VECTORS {
            let sk = SigningKey::from_bytes(&vector.secret_key).unwrap();
            assert_eq!(sk.verifying_key().to_bytes().as_slice(), &vector.public_key);

            let sig = sk
                .sign_raw_digest(&vector.message, &vector.aux_rand)
                .expect("low-level Schnorr signing failure");

            assert_eq!(&vector.signature, sig.as_bytes());
        }
    }

    #[test]
    fn bip340_verify_vectors() {
        for vector in BIP340_VERIFY_VECTORS {
            let maybe_pk = VerifyingKey::from_bytes(&vector.public_key);
            let maybe_sig = Signature::from_bytes(&vector.signature);
            let verification = match (maybe_pk, maybe_sig) {
                (Ok(pk), Ok(sig)) => pk.verify_raw_digest(&vector.message, &sig).is_ok(),
                _ => false,
            };

            assert_eq!(vector.valid, verification, "incorrect validation for index {}", vector.index);
        }
    }

    #[test]
    fn tagged_hash_matches_definition() {
        let msg = [0x5a; 32];
        let tag_hash = Sha256::digest(CHALLENGE_TAG);
        let expected = Sha256::new()
            .chain_update(&tag_hash)
            .chain_update(&tag_hash)
            .chain_update(msg)
            .finalize();
        assert_eq!(tagged_hash(CHALLENGE_TAG, &msg), expected);
    }

    #[test]
    fn tags_separate_domains() {
        let msg = [0x01; 32];
        let aux = tagged_hash(AUX_TAG, &msg);
        let nonce = tagged_hash(NONCE_TAG, &msg);
        let challenge = tagged_hash(CHALLENGE_TAG, &msg);
        assert_ne!(aux, nonce);
        assert_ne!(nonce, challenge);
        assert_ne!(aux, challenge);
    }

    #[test]
    fn pubkey_gen_is_deterministic() {
        let seckey = hex!("B7E151628AED2A6ABF7158809CF4F3C762E7160F38B4DA56A784D9045190CFEF");
        let first = pubkey_gen(&seckey).unwrap();
        assert_eq!(first, pubkey_gen(&seckey).unwrap());
        assert_eq!(
            first.as_slice(),
            &hex!("DFF1D77F2A671C5F36183726DB2341BE58FEAE1DA2DECED843240F7B502BA659")
        );
    }

    #[test]
    fn odd_public_point_yields_same_x_only_key() {
        // 6G has odd y; n - 6 yields -6G with the same x and even y
        let six = hex!("0000000000000000000000000000000000000000000000000000000000000006");
        let minus_six = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD036413B");
        let a = SigningKey::from_bytes(&six).unwrap();
        let b = SigningKey::from_bytes(&minus_six).unwrap();
        assert_eq!(a.verifying_key(), b.verifying_key());
        assert!(a.verifying_key().as_affine().has_even_y());

        let six_g = AffinePoint::GENERATOR * Scalar::from_u64(6);
        assert!(!six_g.has_even_y());
        assert_eq!(*a.verifying_key().as_affine(), -six_g);
    }

    #[test]
    fn secret_key_range_is_checked() {
        let zero = [0u8; 32];
        let order = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");
        assert!(matches!(SigningKey::from_bytes(&zero), Err(Error::InvalidSecretKey)));
        assert!(matches!(SigningKey::from_bytes(&order), Err(Error::InvalidSecretKey)));
        assert!(matches!(SigningKey::from_bytes(&[1u8; 31]), Err(Error::InvalidSecretKey)));
        assert_eq!(pubkey_gen(&zero), Err(Error::InvalidSecretKey));
    }

    #[test]
    fn verifying_key_length_is_checked() {
        assert_eq!(
            VerifyingKey::from_bytes(&[0x02; 33]),
            Err(Error::InvalidPublicKeyLength { len: 33 })
        );
    }

    #[test]
    fn signature_length_is_checked() {
        assert_eq!(
            Signature::from_bytes(&[0u8; 63]),
            Err(Error::InvalidSignatureLength {
                expected: 64,
                len: 63
            })
        );
    }

    #[test]
    fn sign_with_rng_round_trip() {
        let sk = SigningKey::from_bytes(&[0x11; 32]).unwrap();
        let msg = [0xaa; 32];
        let sig = sk.sign_with_rng(&mut rand_core::OsRng, &msg).unwrap();
        sk.verifying_key().verify_raw_digest(&msg, &sig).unwrap();
        assert!(sk.verifying_key().verify_raw_digest(&[0xbb; 32], &sig).is_err());
    }
}
