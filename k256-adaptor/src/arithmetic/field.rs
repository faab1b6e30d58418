//! Field arithmetic modulo `p = 2^256 - 2^32 - 977`.

use crate::FieldBytes;
use core::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::{
    bigint::{impl_modulus, modular::constant_mod::Residue, Encoding, U256},
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
};

impl_modulus!(
    FieldModulus,
    U256,
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"
);

type ResidueType = Residue<FieldModulus, { U256::LIMBS }>;

/// The field modulus `p`.
pub(crate) const MODULUS: U256 =
    U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");

/// `p - 2`, the Fermat inversion exponent.
const MODULUS_MINUS_TWO: U256 =
    U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2d");

/// `(p + 1) / 4`. Since `p ≡ 3 (mod 4)`, `a^((p+1)/4)` is a square root of
/// `a` whenever one exists.
const SQRT_EXPONENT: U256 =
    U256::from_be_hex("3fffffffffffffffffffffffffffffffffffffffffffffffffffffffbfffff0c");

/// An element of the secp256k1 base field, always fully reduced into `[0, p)`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct FieldElement(ResidueType);

impl FieldElement {
    /// Additive identity.
    pub const ZERO: Self = Self(ResidueType::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self(ResidueType::ONE);

    /// Create a field element from a small integer.
    pub const fn from_u64(w: u64) -> Self {
        Self(ResidueType::new(&U256::from_u64(w)))
    }

    /// Parse a big-endian hex constant. The value must already be below `p`.
    pub(crate) const fn from_hex(hex: &str) -> Self {
        Self(ResidueType::new(&U256::from_be_hex(hex)))
    }

    /// Create a field element from an integer, failing if it is `>= p`.
    pub fn from_uint(uint: &U256) -> CtOption<Self> {
        let is_canonical = Choice::from((*uint < MODULUS) as u8);
        CtOption::new(Self(ResidueType::new(uint)), is_canonical)
    }

    /// Decode a big-endian field element, failing if it is `>= p`.
    pub fn from_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        Self::from_uint(&U256::from_be_slice(bytes))
    }

    /// The canonical integer in `[0, p)` this element represents.
    pub fn to_uint(&self) -> U256 {
        self.0.retrieve()
    }

    /// Big-endian encoding of the canonical representative.
    pub fn to_bytes(&self) -> FieldBytes {
        FieldBytes::from(self.to_uint().to_be_bytes())
    }

    /// Is this element zero?
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Is the canonical representative odd?
    pub fn is_odd(&self) -> Choice {
        Choice::from(self.to_uint().to_be_bytes()[31] & 1)
    }

    /// Is the canonical representative even?
    pub fn is_even(&self) -> Choice {
        !self.is_odd()
    }

    /// Returns `self + rhs mod p`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self(ResidueType::add(&self.0, &rhs.0))
    }

    /// Returns `self - rhs mod p`.
    pub fn sub(&self, rhs: &Self) -> Self {
        Self(ResidueType::sub(&self.0, &rhs.0))
    }

    /// Returns `self * rhs mod p`.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self(ResidueType::mul(&self.0, &rhs.0))
    }

    /// Returns `self * self mod p`.
    pub fn square(&self) -> Self {
        Self(ResidueType::square(&self.0))
    }

    /// Returns `p - self`, or zero for zero.
    pub fn negate(&self) -> Self {
        Self(ResidueType::neg(&self.0))
    }

    /// Raise to a 256-bit power.
    pub fn pow(&self, exp: &U256) -> Self {
        Self(ResidueType::pow(&self.0, exp))
    }

    /// Multiplicative inverse via Fermat's little theorem, `self^(p-2)`.
    ///
    /// Returns none for zero.
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.pow(&MODULUS_MINUS_TWO), !self.is_zero())
    }

    /// Square root, if `self` is a quadratic residue.
    pub fn sqrt(&self) -> CtOption<Self> {
        let candidate = self.pow(&SQRT_EXPONENT);
        CtOption::new(candidate, candidate.square().ct_eq(self))
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(ResidueType::new(&U256::conditional_select(
            &a.to_uint(),
            &b.to_uint(),
            choice,
        )))
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_uint().ct_eq(&other.to_uint())
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{:x})", self)
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Add<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &FieldElement) -> FieldElement {
        FieldElement::add(&self, rhs)
    }
}

impl Add for FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: FieldElement) -> FieldElement {
        FieldElement::add(&self, &rhs)
    }
}

impl AddAssign<&FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &FieldElement) {
        *self = FieldElement::add(self, rhs);
    }
}

impl Sub<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &FieldElement) -> FieldElement {
        FieldElement::sub(&self, rhs)
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: FieldElement) -> FieldElement {
        FieldElement::sub(&self, &rhs)
    }
}

impl SubAssign<&FieldElement> for FieldElement {
    fn sub_assign(&mut self, rhs: &FieldElement) {
        *self = FieldElement::sub(self, rhs);
    }
}

impl Mul<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &FieldElement) -> FieldElement {
        FieldElement::mul(&self, rhs)
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: FieldElement) -> FieldElement {
        FieldElement::mul(&self, &rhs)
    }
}

impl MulAssign<&FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &FieldElement) {
        *self = FieldElement::mul(self, rhs);
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldElement, MODULUS};
    use crate::FieldBytes;
    use elliptic_curve::bigint::{Encoding, U256};
    use hex_literal::hex;
    use proptest::prelude::*;

    fn field_element() -> impl Strategy<Value = FieldElement> {
        any::<[u8; 32]>().prop_map(|bytes| {
            let mut uint = U256::from_be_bytes(bytes);
            if uint >= MODULUS {
                uint = uint.wrapping_sub(&MODULUS);
            }
            FieldElement::from_uint(&uint).unwrap()
        })
    }

    #[test]
    fn zero_is_additive_identity() {
        let a = FieldElement::from_u64(42);
        assert_eq!(a + FieldElement::ZERO, a);
        assert_eq!(a - a, FieldElement::ZERO);
    }

    #[test]
    fn from_bytes_rejects_modulus() {
        let p = FieldBytes::from(MODULUS.to_be_bytes());
        assert!(bool::from(FieldElement::from_bytes(&p).is_none()));

        let p_minus_one = FieldBytes::from(hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2e"
        ));
        let max = FieldElement::from_bytes(&p_minus_one).unwrap();
        assert_eq!(max.to_bytes(), p_minus_one);
        assert_eq!(max + FieldElement::ONE, FieldElement::ZERO);
    }

    #[test]
    fn negation_wraps_around_p() {
        let one = FieldElement::ONE;
        assert_eq!(
            one.negate().to_bytes().as_slice(),
            &hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2e")
        );
        assert_eq!(FieldElement::ZERO.negate(), FieldElement::ZERO);
    }

    #[test]
    fn zero_has_no_inverse() {
        assert!(bool::from(FieldElement::ZERO.invert().is_none()));
    }

    #[test]
    fn parity_of_small_values() {
        assert!(bool::from(FieldElement::from_u64(3).is_odd()));
        assert!(bool::from(FieldElement::from_u64(4).is_even()));
        // p - 1 is even
        assert!(bool::from(FieldElement::ONE.negate().is_even()));
    }

    #[test]
    fn sqrt_of_non_residue() {
        // 7 is not a quadratic residue mod p, which is why (0, y) is never on the curve
        assert!(bool::from(FieldElement::from_u64(7).sqrt().is_none()));
        let four = FieldElement::from_u64(4);
        let root = four.sqrt().unwrap();
        assert_eq!(root.square(), four);
    }

    proptest! {
        #[test]
        fn invert(a in field_element()) {
            prop_assume!(!bool::from(a.is_zero()));
            prop_assert_eq!(a * a.invert().unwrap(), FieldElement::ONE);
        }

        #[test]
        fn sqrt_of_square(a in field_element()) {
            let root = a.square().sqrt().unwrap();
            prop_assert!(root == a || root == -a);
        }

        #[test]
        fn bytes_round_trip(a in field_element()) {
            prop_assert_eq!(FieldElement::from_bytes(&a.to_bytes()).unwrap(), a);
        }

        #[test]
        fn distributive(a in field_element(), b in field_element(), c in field_element()) {
            prop_assert_eq!(a * (b + c), a * b + a * c);
        }
    }
}
