//! Error types.

use core::fmt;

/// Result type with the `k256-adaptor` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by key handling, signing and verification.
///
/// Input validation failures name the violated precondition so callers can
/// branch on them. [`Error::NonceIsZero`] and [`Error::PointAtInfinity`] only
/// occur with negligible probability and may be retried with fresh auxiliary
/// randomness. [`Error::SelfVerificationFailed`] indicates a bug.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Message digest is not 32 bytes.
    InvalidMessageLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// Auxiliary randomness is not 32 bytes.
    InvalidAuxRandLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// Secret key is not 32 bytes or not in `1..=n-1`.
    InvalidSecretKey,
    /// x-only public key is not 32 bytes.
    InvalidPublicKeyLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// Signature has the wrong length for its kind.
    InvalidSignatureLength {
        /// Expected length.
        expected: usize,
        /// Length of the rejected input.
        len: usize,
    },
    /// Integer is not below the field modulus `p`.
    FieldElementOutOfRange,
    /// Integer is not below the group order `n`.
    ScalarOutOfRange,
    /// `x³ + 7` is not a square: no curve point has this x-coordinate.
    NotOnCurve,
    /// Parity tag is neither `0x02` nor `0x03`.
    InvalidParity(u8),
    /// A finite point was required but the identity was given or computed.
    PointAtInfinity,
    /// Derived nonce reduced to zero.
    NonceIsZero,
    /// Adaptor witness does not match the adaptor point.
    WitnessMismatch,
    /// Signature does not verify.
    VerificationFailed,
    /// A freshly produced signature failed its own verification.
    SelfVerificationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMessageLength { len } => {
                write!(f, "message must be 32 bytes, got {len}")
            }
            Self::InvalidAuxRandLength { len } => {
                write!(f, "aux_rand must be 32 bytes, got {len}")
            }
            Self::InvalidSecretKey => {
                f.write_str("secret key must be a 32-byte integer in the range 1..n-1")
            }
            Self::InvalidPublicKeyLength { len } => {
                write!(f, "x-only public key must be 32 bytes, got {len}")
            }
            Self::InvalidSignatureLength { expected, len } => {
                write!(f, "signature must be {expected} bytes, got {len}")
            }
            Self::FieldElementOutOfRange => f.write_str("field element is not below p"),
            Self::ScalarOutOfRange => f.write_str("scalar is not below the curve order"),
            Self::NotOnCurve => f.write_str("x-coordinate is not on the curve"),
            Self::InvalidParity(tag) => write!(f, "invalid parity tag {tag:#04x}"),
            Self::PointAtInfinity => f.write_str("point is at infinity"),
            Self::NonceIsZero => {
                f.write_str("derived nonce is zero; this happens only with negligible probability")
            }
            Self::WitnessMismatch => f.write_str("witness does not match the adaptor point"),
            Self::VerificationFailed => f.write_str("signature verification failed"),
            Self::SelfVerificationFailed => {
                f.write_str("the created signature does not pass verification")
            }
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}
