//! Pure Rust implementation of [secp256k1] (K-256) field and curve
//! arithmetic, [BIP340] Schnorr signatures, and Schnorr *adaptor*
//! pre-signatures built on top of them.
//!
//! ## About adaptor pre-signatures
//!
//! A pre-signature is a Schnorr signature whose nonce point has been shifted
//! by an adaptor point `T = t·G`. It can be checked against `T` by anyone,
//! but only turns into a usable signature once the witness `t` is known.
//! Publishing the completed signature in turn reveals `t` to whoever holds
//! the pre-signature.
//!
//! ```
//! use k256_adaptor::{schnorr::adaptor, AffinePoint, Scalar};
//! use hex_literal::hex;
//!
//! let seckey = hex!("0000000000000000000000000000000000000000000000000000000000000001");
//! let msg = [0x42u8; 32];
//! let aux_rand = [0u8; 32];
//! let witness = Scalar::from_u64(2);
//! let adaptor_point = AffinePoint::GENERATOR * &witness;
//!
//! let pre_sig = adaptor::pre_sign(&msg, &seckey, &aux_rand, &adaptor_point)?;
//! let pubkey = k256_adaptor::schnorr::pubkey_gen(&seckey)?;
//! assert!(adaptor::pre_verify(&msg, &adaptor_point, &pubkey, pre_sig.as_bytes()));
//! # Ok::<(), k256_adaptor::Error>(())
//! ```
//!
//! ## ⚠️ Security Warning
//!
//! The curve arithmetic in this crate uses textbook affine formulas with a
//! modular inversion per group operation. Scalar multiplication always runs
//! 256 iterations, but the individual additions are **not** constant time.
//!
//! USE AT YOUR OWN RISK!
//!
//! ## Minimum Supported Rust Version
//!
//! Rust **1.65** or higher.
//!
//! [secp256k1]: https://en.bitcoin.it/wiki/Secp256k1
//! [BIP340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/k256-adaptor/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

#[cfg(feature = "std")]
extern crate std;

mod arithmetic;
mod error;

pub mod schnorr;

#[cfg(any(feature = "test-vectors", test))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-vectors")))]
pub mod test_vectors;

pub use arithmetic::{
    affine::{AffinePoint, Parity},
    field::FieldElement,
    scalar::Scalar,
};
pub use error::{Error, Result};

pub use elliptic_curve::{self, bigint::U256};

use elliptic_curve::generic_array::{typenum::U32, GenericArray};

/// K-256 (secp256k1) elliptic curve.
///
/// Specified in Certicom's SECG in "SEC 2: Recommended Elliptic Curve Domain Parameters":
///
/// <https://www.secg.org/sec2-v2.pdf>
///
/// The curve's equation is `y² = x³ + 7` over a ~256-bit prime field.
#[derive(Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Secp256k1;

impl Secp256k1 {
    /// Order of the base field: `p = 2^256 - 2^32 - 977`.
    pub const FIELD_MODULUS: U256 = arithmetic::field::MODULUS;

    /// Order of the group generated by [`AffinePoint::GENERATOR`].
    pub const ORDER: U256 = arithmetic::scalar::ORDER;
}

/// secp256k1 (K-256) field element serialized as bytes.
///
/// Byte array containing a serialized field element value (base field or scalar).
pub type FieldBytes = GenericArray<u8, U32>;
