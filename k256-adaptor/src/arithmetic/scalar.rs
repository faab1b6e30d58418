//! Scalar arithmetic modulo the secp256k1 group order `n`.

use crate::FieldBytes;
use core::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};
use elliptic_curve::{
    bigint::{impl_modulus, modular::constant_mod::Residue, Encoding, U256},
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
};

impl_modulus!(
    OrderModulus,
    U256,
    "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
);

type ResidueType = Residue<OrderModulus, { U256::LIMBS }>;

/// The group order `n`.
pub(crate) const ORDER: U256 =
    U256::from_be_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

const ORDER_MINUS_TWO: U256 =
    U256::from_be_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd036413f");

/// Scalars are elements in the finite field modulo `n`.
///
/// Secret keys, nonces and challenges live here. Values are always fully
/// reduced into `[0, n)`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Scalar(ResidueType);

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self(ResidueType::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self(ResidueType::ONE);

    /// Create a scalar from a small integer.
    pub const fn from_u64(w: u64) -> Self {
        Self(ResidueType::new(&U256::from_u64(w)))
    }

    /// Create a scalar from an integer, failing if it is `>= n`.
    pub fn from_uint(uint: &U256) -> CtOption<Self> {
        let is_canonical = Choice::from((*uint < ORDER) as u8);
        CtOption::new(Self(ResidueType::new(uint)), is_canonical)
    }

    /// Decode a big-endian scalar, failing if it is `>= n`.
    pub fn from_repr(bytes: &FieldBytes) -> CtOption<Self> {
        Self::from_uint(&U256::from_be_slice(bytes))
    }

    /// Interpret 32 big-endian bytes (typically a hash output) as an integer
    /// and reduce it modulo `n`.
    ///
    /// Any 256-bit integer is below `2n`, so a single conditional subtraction
    /// suffices.
    pub fn from_bytes_reduced(bytes: &FieldBytes) -> Self {
        let uint = U256::from_be_slice(bytes);
        let reduced = U256::conditional_select(
            &uint,
            &uint.wrapping_sub(&ORDER),
            Choice::from((uint >= ORDER) as u8),
        );
        Self(ResidueType::new(&reduced))
    }

    /// The canonical integer in `[0, n)` this scalar represents.
    pub fn to_uint(&self) -> U256 {
        self.0.retrieve()
    }

    /// Big-endian encoding.
    pub fn to_bytes(&self) -> FieldBytes {
        FieldBytes::from(self.to_uint().to_be_bytes())
    }

    /// Is this scalar zero?
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Returns `self + rhs mod n`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self(ResidueType::add(&self.0, &rhs.0))
    }

    /// Returns `self - rhs mod n`.
    pub fn sub(&self, rhs: &Self) -> Self {
        Self(ResidueType::sub(&self.0, &rhs.0))
    }

    /// Returns `self * rhs mod n`.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self(ResidueType::mul(&self.0, &rhs.0))
    }

    /// Returns `n - self`, or zero for zero.
    pub fn negate(&self) -> Self {
        Self(ResidueType::neg(&self.0))
    }

    /// Multiplicative inverse via Fermat's little theorem, `self^(n-2)`.
    ///
    /// Returns none for zero.
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(
            Self(ResidueType::pow(&self.0, &ORDER_MINUS_TWO)),
            !self.is_zero(),
        )
    }

    /// Bit `i` of the canonical representative, least significant first.
    pub(crate) fn bit(bytes: &FieldBytes, i: usize) -> Choice {
        Choice::from((bytes[31 - i / 8] >> (i % 8)) & 1)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(ResidueType::new(&U256::conditional_select(
            &a.to_uint(),
            &b.to_uint(),
            choice,
        )))
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_uint().ct_eq(&other.to_uint())
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::ZERO
    }
}

// Scalars may be secret; keep them out of debug output.
impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar(...)")
    }
}

impl Add<&Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, rhs: &Scalar) -> Scalar {
        Scalar::add(&self, rhs)
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        Scalar::add(&self, &rhs)
    }
}

impl Sub<&Scalar> for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: &Scalar) -> Scalar {
        Scalar::sub(&self, rhs)
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar::sub(&self, &rhs)
    }
}

impl Mul<&Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &Scalar) -> Scalar {
        Scalar::mul(&self, rhs)
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar::mul(&self, &rhs)
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        self.negate()
    }
}
