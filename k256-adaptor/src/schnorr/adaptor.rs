//! Schnorr adaptor pre-signatures.
//!
//! A pre-signature commits to the nonce point `R0 = R + T`, where `R` is the
//! signer's BIP340 nonce point and `T` the adaptor point, and serializes as
//! `parity(R0) ‖ x(R0) ‖ s'` (65 bytes).
//!
//! `s'` satisfies `s'·G - e·P = ±R0 ∓ T`: the signer negates its nonce when
//! `R` has odd y, which flips the relation. Completion with the witness `t`
//! yields `s = s' ± t` and a nonce point `±R0` accordingly.

use super::{challenge, Signature, SigningKey, VerifyingKey};
use crate::{AffinePoint, Error, FieldBytes, Parity, Result, Scalar};
use elliptic_curve::subtle::{Choice, ConditionallySelectable};
use rand_core::CryptoRngCore;
use tracing::{debug, error, trace};

/// Size of a serialized adaptor pre-signature or completed signature.
pub const ADAPTOR_SIGNATURE_SIZE: usize = 65;

/// Pre-sign a 32-byte message digest for the adaptor point `T`.
///
/// Inputs are checked in order: `msg` length, `seckey`, `aux_rand` length.
pub fn pre_sign(
    msg: &[u8],
    seckey: &[u8],
    aux_rand: &[u8],
    adaptor_point: &AffinePoint,
) -> Result<AdaptorSignature> {
    let msg_digest: &[u8; 32] = msg
        .try_into()
        .map_err(|_| Error::InvalidMessageLength { len: msg.len() })?;
    let signing_key = SigningKey::from_bytes(seckey)?;
    let aux_rand: &[u8; 32] = aux_rand
        .try_into()
        .map_err(|_| Error::InvalidAuxRandLength { len: aux_rand.len() })?;

    signing_key.pre_sign_raw_digest(msg_digest, aux_rand, adaptor_point)
}

/// Pre-sign with 32 bytes of auxiliary randomness drawn from `rng`.
pub fn pre_sign_with_rng(
    msg: &[u8],
    seckey: &[u8],
    adaptor_point: &AffinePoint,
    rng: &mut impl CryptoRngCore,
) -> Result<AdaptorSignature> {
    let mut aux_rand = [0u8; 32];
    rng.fill_bytes(&mut aux_rand);
    pre_sign(msg, seckey, &aux_rand, adaptor_point)
}

/// Check a serialized pre-signature against the adaptor point `T` and an
/// x-only public key.
pub fn pre_verify(msg: &[u8], adaptor_point: &AffinePoint, pubkey: &[u8], sig: &[u8]) -> bool {
    match try_pre_verify(msg, adaptor_point, pubkey, sig) {
        Ok(()) => true,
        Err(err) => {
            debug!(?err, "pre-signature rejected");
            false
        }
    }
}

fn try_pre_verify(
    msg: &[u8],
    adaptor_point: &AffinePoint,
    pubkey: &[u8],
    sig: &[u8],
) -> Result<()> {
    let msg_digest: &[u8; 32] = msg
        .try_into()
        .map_err(|_| Error::InvalidMessageLength { len: msg.len() })?;
    let verifying_key = VerifyingKey::from_bytes(pubkey)?;
    AdaptorSignature::from_bytes(sig)?.verify(&verifying_key, msg_digest, adaptor_point)
}

fn check_adaptor_point(adaptor_point: &AffinePoint) -> Result<()> {
    if adaptor_point.is_identity() {
        return Err(Error::PointAtInfinity);
    }
    if !adaptor_point.is_on_curve() {
        return Err(Error::NotOnCurve);
    }
    Ok(())
}

/// How `s'·G - e·P` relates to `R0 - T`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum NonceSign {
    /// The signer's `R` had even y: `s'·G - e·P = R0 - T`.
    Positive,
    /// The signer negated its nonce: `s'·G - e·P = T - R0`.
    Negated,
}

/// `parity ‖ x ‖ s` with the nonce point already lifted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Encoded {
    bytes: [u8; ADAPTOR_SIGNATURE_SIZE],
    parity: Parity,
    nonce_point: AffinePoint,
    s: Scalar,
}

impl Encoded {
    fn new(nonce_point: AffinePoint, s: Scalar) -> Result<Self> {
        let parity = nonce_point.parity().ok_or(Error::PointAtInfinity)?;

        let mut bytes = [0u8; ADAPTOR_SIGNATURE_SIZE];
        bytes[0] = parity.to_tag();
        bytes[1..33].copy_from_slice(&nonce_point.x_bytes()?);
        bytes[33..].copy_from_slice(&s.to_bytes());

        Ok(Self {
            bytes,
            parity,
            nonce_point,
            s,
        })
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; ADAPTOR_SIGNATURE_SIZE] =
            bytes.try_into().map_err(|_| Error::InvalidSignatureLength {
                expected: ADAPTOR_SIGNATURE_SIZE,
                len: bytes.len(),
            })?;

        let parity = Parity::from_tag(bytes[0])?;
        let nonce_point =
            AffinePoint::lift_x_with_parity(FieldBytes::from_slice(&bytes[1..33]), parity)?;
        let s = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::from_slice(&bytes[33..])))
            .ok_or(Error::ScalarOutOfRange)?;

        Ok(Self {
            bytes,
            parity,
            nonce_point,
            s,
        })
    }

    fn x(&self) -> &FieldBytes {
        FieldBytes::from_slice(&self.bytes[1..33])
    }
}

/// Adaptor pre-signature: `parity(R0) ‖ x(R0) ‖ s'`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AdaptorSignature(Encoded);

impl AdaptorSignature {
    /// Parse a pre-signature.
    ///
    /// Rejects unknown parity tags, `x(R0) >= p`, x-coordinates with no
    /// curve point and `s' >= n`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Encoded::from_bytes(bytes).map(Self)
    }

    /// Borrow the serialized pre-signature.
    pub fn as_bytes(&self) -> &[u8; ADAPTOR_SIGNATURE_SIZE] {
        &self.0.bytes
    }

    /// Parity of `R0`'s y-coordinate.
    pub fn parity(&self) -> Parity {
        self.0.parity
    }

    /// The adaptor-shifted nonce point `R0`.
    pub fn nonce_point(&self) -> &AffinePoint {
        &self.0.nonce_point
    }

    /// The `s'` component.
    pub fn s(&self) -> Scalar {
        self.0.s
    }

    /// Verify this pre-signature for `msg_digest` under `verifying_key` and
    /// the adaptor point `T`.
    ///
    /// Accepts iff `R' = s'·G - e·P` is finite with even y and either
    /// `R' + T = R0` or `-R' + T = R0`.
    pub fn verify(
        &self,
        verifying_key: &VerifyingKey,
        msg_digest: &[u8; 32],
        adaptor_point: &AffinePoint,
    ) -> Result<()> {
        self.nonce_sign(verifying_key, msg_digest, adaptor_point)?;
        Ok(())
    }

    fn nonce_sign(
        &self,
        verifying_key: &VerifyingKey,
        msg_digest: &[u8; 32],
        adaptor_point: &AffinePoint,
    ) -> Result<NonceSign> {
        check_adaptor_point(adaptor_point)?;

        let e = challenge(self.0.x(), &verifying_key.to_bytes(), msg_digest);
        let r_prime = AffinePoint::GENERATOR * &self.0.s - &(*verifying_key.as_affine() * &e);

        if !r_prime.has_even_y() {
            debug!(
                identity = r_prime.is_identity(),
                "s'G - eP is infinite or has odd y"
            );
            return Err(Error::VerificationFailed);
        }

        if r_prime + adaptor_point == self.0.nonce_point {
            Ok(NonceSign::Positive)
        } else if -r_prime + adaptor_point == self.0.nonce_point {
            Ok(NonceSign::Negated)
        } else {
            debug!("R0 does not match s'G - eP shifted by T");
            Err(Error::VerificationFailed)
        }
    }

    /// Complete the pre-signature with the witness `t` of `T = t·G`.
    pub fn complete(
        &self,
        verifying_key: &VerifyingKey,
        msg_digest: &[u8; 32],
        adaptor_point: &AffinePoint,
        witness: &Scalar,
    ) -> Result<CompletedSignature> {
        if AffinePoint::GENERATOR * witness != *adaptor_point {
            return Err(Error::WitnessMismatch);
        }

        let (nonce_point, s) = match self.nonce_sign(verifying_key, msg_digest, adaptor_point)? {
            NonceSign::Positive => (self.0.nonce_point, self.0.s + witness),
            NonceSign::Negated => (-self.0.nonce_point, self.0.s - witness),
        };

        Encoded::new(nonce_point, s).map(CompletedSignature)
    }

    /// Recover the witness `t` from this pre-signature and its completion.
    pub fn extract_witness(
        &self,
        completed: &CompletedSignature,
        adaptor_point: &AffinePoint,
    ) -> Result<Scalar> {
        if completed.0.x() != self.0.x() {
            debug!("completed signature commits to a different nonce point");
            return Err(Error::WitnessMismatch);
        }

        // The completion flipped the parity iff the nonce was negated.
        let witness = if completed.parity() == self.parity() {
            completed.s() - self.0.s
        } else {
            self.0.s - completed.s()
        };

        if AffinePoint::GENERATOR * &witness != *adaptor_point {
            return Err(Error::WitnessMismatch);
        }

        Ok(witness)
    }
}

impl AsRef<[u8]> for AdaptorSignature {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for AdaptorSignature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

/// A completed adaptor signature: `parity(R) ‖ x(R) ‖ s` with
/// `s·G = R + e·P`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompletedSignature(Encoded);

impl CompletedSignature {
    /// Parse a completed signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Encoded::from_bytes(bytes).map(Self)
    }

    /// Borrow the serialized signature.
    pub fn as_bytes(&self) -> &[u8; ADAPTOR_SIGNATURE_SIZE] {
        &self.0.bytes
    }

    /// Parity of the nonce point.
    pub fn parity(&self) -> Parity {
        self.0.parity
    }

    /// The `s` component.
    pub fn s(&self) -> Scalar {
        self.0.s
    }

    /// Verify `s·G - e·P = R` for `msg_digest`.
    pub fn verify(&self, verifying_key: &VerifyingKey, msg_digest: &[u8; 32]) -> Result<()> {
        let e = challenge(self.0.x(), &verifying_key.to_bytes(), msg_digest);
        let r_point = AffinePoint::GENERATOR * &self.0.s - &(*verifying_key.as_affine() * &e);

        if r_point != self.0.nonce_point {
            debug!("completed signature does not verify");
            return Err(Error::VerificationFailed);
        }

        Ok(())
    }

    /// The plain BIP340 signature `x(R) ‖ s`, if `R` has even y.
    pub fn to_bip340(&self) -> Option<Signature> {
        match self.0.parity {
            Parity::Even => Signature::from_bytes(&self.0.bytes[1..]).ok(),
            Parity::Odd => None,
        }
    }
}

impl AsRef<[u8]> for CompletedSignature {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<&[u8]> for CompletedSignature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl SigningKey {
    /// Compute an adaptor pre-signature over a 32-byte message digest.
    ///
    /// The adaptor point must be finite and on the curve. The result always
    /// passes [`AdaptorSignature::verify`].
    pub fn pre_sign_raw_digest(
        &self,
        msg_digest: &[u8; 32],
        aux_rand: &[u8; 32],
        adaptor_point: &AffinePoint,
    ) -> Result<AdaptorSignature> {
        check_adaptor_point(adaptor_point)?;

        let k0 = self.derive_nonce(aux_rand, Some(&adaptor_point.x_bytes()?), msg_digest)?;
        let r_point = AffinePoint::GENERATOR * &k0;
        let k = Scalar::conditional_select(
            &k0.negate(),
            &k0,
            Choice::from(r_point.has_even_y() as u8),
        );

        let nonce_point = r_point + adaptor_point;
        if nonce_point.is_identity() {
            return Err(Error::PointAtInfinity);
        }

        let verifying_key = self.verifying_key;
        let e = challenge(&nonce_point.x_bytes()?, &verifying_key.to_bytes(), msg_digest);
        trace!(
            pubkey = ?verifying_key.as_affine().x(),
            r0 = ?nonce_point.x(),
            parity = ?nonce_point.parity(),
            "derived adaptor nonce point"
        );

        let pre_sig = AdaptorSignature(Encoded::new(nonce_point, k + e * self.secret_key)?);

        if let Err(err) = pre_sig.verify(&verifying_key, msg_digest, adaptor_point) {
            error!(?err, "created pre-signature does not pass verification");
            return Err(Error::SelfVerificationFailed);
        }

        Ok(pre_sig)
    }

    /// Compute an adaptor pre-signature, drawing the auxiliary randomness
    /// from `rng`.
    pub fn pre_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg_digest: &[u8; 32],
        adaptor_point: &AffinePoint,
    ) -> Result<AdaptorSignature> {
        let mut aux_rand = [0u8; 32];
        rng.fill_bytes(&mut aux_rand);
        self.pre_sign_raw_digest(msg_digest, &aux_rand, adaptor_point)
    }
}

#[cfg(test)]
mod tests {
    use super::{pre_sign, pre_sign_with_rng, pre_verify, AdaptorSignature, CompletedSignature};
    use crate::{
        schnorr::{pubkey_gen, SigningKey, VerifyingKey},
        test_vectors::{ADAPTOR_VECTORS, MSG_TEST},
        AffinePoint, Error, FieldElement, Parity, Scalar,
    };
    use hex_literal::hex;

    const SECKEY_ONE: [u8; 32] =
        hex!("0000000000000000000000000000000000000000000000000000000000000001");
    const AUX_ONE: [u8; 32] =
        hex!("0000000000000000000000000000000000000000000000000000000000000001");

    fn point(witness: u64) -> AffinePoint {
        AffinePoint::GENERATOR * Scalar::from_u64(witness)
    }

    #[test]
    fn adaptor_vectors() {
        for vector in ADAPTOR_VECTORS {
            let t = Scalar::from_u64(vector.witness);
            let adaptor_point = point(vector.witness);
            assert_eq!(
                pubkey_gen(&vector.secret_key).unwrap().as_slice(),
                &vector.public_key
            );

            let pre_sig = pre_sign(
                &vector.message,
                &vector.secret_key,
                &vector.aux_rand,
                &adaptor_point,
            )
            .unwrap();
            assert_eq!(pre_sig.as_bytes(), &vector.pre_signature);
            assert!(pre_verify(
                &vector.message,
                &adaptor_point,
                &vector.public_key,
                &vector.pre_signature
            ));

            let vk = VerifyingKey::from_bytes(&vector.public_key).unwrap();
            let completed = pre_sig
                .complete(&vk, &vector.message, &adaptor_point, &t)
                .unwrap();
            assert_eq!(completed.as_bytes(), &vector.completed);
            completed.verify(&vk, &vector.message).unwrap();

            match completed.to_bip340() {
                Some(sig) => {
                    assert!(vector.completes_to_bip340);
                    vk.verify_raw_digest(&vector.message, &sig).unwrap();
                }
                None => assert!(!vector.completes_to_bip340),
            }

            assert_eq!(
                pre_sig.extract_witness(&completed, &adaptor_point),
                Ok(t)
            );
        }
    }

    #[test]
    fn pre_signature_is_not_a_signature() {
        let vector = &ADAPTOR_VECTORS[0];
        let vk = VerifyingKey::from_bytes(&vector.public_key).unwrap();
        let pre_sig = AdaptorSignature::from_bytes(&vector.pre_signature).unwrap();
        let as_completed = CompletedSignature::from_bytes(pre_sig.as_bytes()).unwrap();
        assert_eq!(
            as_completed.verify(&vk, &vector.message),
            Err(Error::VerificationFailed)
        );
    }

    #[test]
    fn output_layout() {
        for witness in [2, 3, 5, 7] {
            let sig = pre_sign(&MSG_TEST, &SECKEY_ONE, &AUX_ONE, &point(witness)).unwrap();
            assert_eq!(sig.as_bytes().len(), 65);
            assert!(matches!(sig.as_bytes()[0], 0x02 | 0x03));
            assert_eq!(sig.parity(), sig.nonce_point().parity().unwrap());
            assert_eq!(
                &sig.as_bytes()[1..33],
                sig.nonce_point().x_bytes().unwrap().as_slice()
            );
        }
    }

    #[test]
    fn flipped_bits_are_rejected() {
        let vector = &ADAPTOR_VECTORS[0];
        let adaptor_point = point(vector.witness);

        for (byte, mask) in [(64, 0x01), (40, 0x80), (32, 0x01), (1, 0x40)] {
            let mut sig = vector.pre_signature;
            sig[byte] ^= mask;
            assert!(
                !pre_verify(&vector.message, &adaptor_point, &vector.public_key, &sig),
                "flip of byte {} accepted",
                byte
            );
        }
    }

    #[test]
    fn adaptor_point_changes_nonce_but_not_key() {
        let two = &ADAPTOR_VECTORS[0];
        let three = &ADAPTOR_VECTORS[1];
        assert_eq!(two.public_key, three.public_key);
        assert_ne!(two.pre_signature[1..33], three.pre_signature[1..33]);
        assert_ne!(two.pre_signature[33..], three.pre_signature[33..]);
    }

    #[test]
    fn seckey_and_msg_change_s() {
        let golden = &ADAPTOR_VECTORS[0];
        for other in &ADAPTOR_VECTORS[2..] {
            assert_ne!(golden.pre_signature[33..], other.pre_signature[33..]);
            assert!(matches!(other.pre_signature[0], 0x02 | 0x03));
        }
    }

    #[test]
    fn wrong_context_is_rejected() {
        let vector = &ADAPTOR_VECTORS[0];
        let adaptor_point = point(vector.witness);
        let sig = &vector.pre_signature;

        assert!(!pre_verify(&vector.message, &point(3), &vector.public_key, sig));
        assert!(!pre_verify(&[0u8; 32], &adaptor_point, &vector.public_key, sig));
        assert!(!pre_verify(
            &vector.message,
            &adaptor_point,
            &ADAPTOR_VECTORS[2].public_key,
            sig
        ));
        assert!(!pre_verify(&vector.message, &AffinePoint::IDENTITY, &vector.public_key, sig));
        assert!(!pre_verify(&vector.message[..31], &adaptor_point, &vector.public_key, sig));
        assert!(!pre_verify(&vector.message, &adaptor_point, &vector.public_key, &sig[..64]));
    }

    #[test]
    fn input_errors() {
        let t = point(2);
        assert_eq!(
            pre_sign(&[0u8; 31], &SECKEY_ONE, &AUX_ONE, &t),
            Err(Error::InvalidMessageLength { len: 31 })
        );
        assert_eq!(
            pre_sign(&MSG_TEST, &[0u8; 32], &AUX_ONE, &t),
            Err(Error::InvalidSecretKey)
        );
        assert_eq!(
            pre_sign(&MSG_TEST, &SECKEY_ONE, &[0u8; 33], &t),
            Err(Error::InvalidAuxRandLength { len: 33 })
        );
        // message length is checked before the secret key
        assert_eq!(
            pre_sign(&[], &[], &[], &t),
            Err(Error::InvalidMessageLength { len: 0 })
        );
        assert_eq!(
            pre_sign(&MSG_TEST, &SECKEY_ONE, &AUX_ONE, &AffinePoint::IDENTITY),
            Err(Error::PointAtInfinity)
        );

        let off_curve = AffinePoint::Affine {
            x: FieldElement::ONE,
            y: FieldElement::ONE,
        };
        assert_eq!(
            pre_sign(&MSG_TEST, &SECKEY_ONE, &AUX_ONE, &off_curve),
            Err(Error::NotOnCurve)
        );
    }

    #[test]
    fn parse_errors() {
        let mut sig = ADAPTOR_VECTORS[0].pre_signature;
        sig[0] = 0x04;
        assert_eq!(
            AdaptorSignature::from_bytes(&sig),
            Err(Error::InvalidParity(0x04))
        );

        let mut sig = ADAPTOR_VECTORS[0].pre_signature;
        sig[1..33].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            AdaptorSignature::from_bytes(&sig),
            Err(Error::FieldElementOutOfRange)
        );

        let mut sig = ADAPTOR_VECTORS[0].pre_signature;
        sig[33..].copy_from_slice(&[0xff; 32]);
        assert_eq!(
            AdaptorSignature::from_bytes(&sig),
            Err(Error::ScalarOutOfRange)
        );

        let mut sig = ADAPTOR_VECTORS[0].pre_signature;
        sig[1..33].copy_from_slice(&[0u8; 32]);
        assert_eq!(AdaptorSignature::from_bytes(&sig), Err(Error::NotOnCurve));

        assert_eq!(
            AdaptorSignature::from_bytes(&[0x02; 64]),
            Err(Error::InvalidSignatureLength {
                expected: 65,
                len: 64
            })
        );
    }

    #[test]
    fn completion_requires_matching_witness() {
        let vector = &ADAPTOR_VECTORS[0];
        let vk = VerifyingKey::from_bytes(&vector.public_key).unwrap();
        let pre_sig = AdaptorSignature::from_bytes(&vector.pre_signature).unwrap();

        assert_eq!(
            pre_sig.complete(&vk, &vector.message, &point(2), &Scalar::from_u64(3)),
            Err(Error::WitnessMismatch)
        );
        assert_eq!(
            pre_sig.complete(&vk, &[0u8; 32], &point(2), &Scalar::from_u64(2)),
            Err(Error::VerificationFailed)
        );

        let completed = pre_sig
            .complete(&vk, &vector.message, &point(2), &Scalar::from_u64(2))
            .unwrap();
        assert_eq!(
            pre_sig.extract_witness(&completed, &point(3)),
            Err(Error::WitnessMismatch)
        );
        assert!(completed.verify(&vk, &[0u8; 32]).is_err());
    }

    #[test]
    fn parity_flips_only_for_negated_nonce() {
        // Vector 0 keeps the parity of R0, vector 1 flips it.
        let kept = CompletedSignature::from_bytes(&ADAPTOR_VECTORS[0].completed).unwrap();
        let flipped = CompletedSignature::from_bytes(&ADAPTOR_VECTORS[1].completed).unwrap();
        assert_eq!(kept.parity(), Parity::Odd);
        assert_eq!(flipped.parity(), Parity::Even);
        assert_eq!(
            AdaptorSignature::from_bytes(&ADAPTOR_VECTORS[1].pre_signature)
                .unwrap()
                .parity(),
            Parity::Odd
        );
    }

    #[test]
    fn rng_round_trip() {
        let seckey = [0x5c; 32];
        let msg = [0x17; 32];
        let witness = Scalar::from_u64(0xdead_beef);
        let adaptor_point = AffinePoint::GENERATOR * &witness;

        let pre_sig =
            pre_sign_with_rng(&msg, &seckey, &adaptor_point, &mut rand_core::OsRng).unwrap();
        let pubkey = pubkey_gen(&seckey).unwrap();
        assert!(pre_verify(&msg, &adaptor_point, &pubkey, pre_sig.as_bytes()));

        let signing_key = SigningKey::from_bytes(&seckey).unwrap();
        let vk = signing_key.verifying_key();
        let again = signing_key
            .pre_sign_with_rng(&mut rand_core::OsRng, &msg, &adaptor_point)
            .unwrap();
        again.verify(&vk, &msg, &adaptor_point).unwrap();

        let completed = again.complete(&vk, &msg, &adaptor_point, &witness).unwrap();
        completed.verify(&vk, &msg).unwrap();
        assert_eq!(again.extract_witness(&completed, &adaptor_point), Ok(witness));
    }
}
