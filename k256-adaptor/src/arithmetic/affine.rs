//! Affine points

use super::{FieldElement, CURVE_EQUATION_B};
use crate::{Error, FieldBytes, Result, Scalar};
use core::ops::{Add, Mul, Neg, Sub};
use elliptic_curve::subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// A point on the secp256k1 curve in affine coordinates.
///
/// The identity is its own variant rather than a reserved coordinate pair:
/// `(0, 0)` does not satisfy the curve equation and is never produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AffinePoint {
    /// The point at infinity, neutral element of the group.
    Identity,
    /// A finite point satisfying `y² = x³ + 7`.
    #[allow(missing_docs)]
    Affine { x: FieldElement, y: FieldElement },
}

/// Parity of a point's y-coordinate, encoded as in SEC1 compressed points.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Parity {
    /// Even y-coordinate, tag `0x02`.
    Even = 0x02,
    /// Odd y-coordinate, tag `0x03`.
    Odd = 0x03,
}

impl Parity {
    /// Decode a parity tag, accepting only `0x02` and `0x03`.
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0x02 => Ok(Self::Even),
            0x03 => Ok(Self::Odd),
            _ => Err(Error::InvalidParity(tag)),
        }
    }

    /// The one-byte tag for this parity.
    pub fn to_tag(self) -> u8 {
        self as u8
    }

    /// The opposite parity.
    pub fn flip(self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }

    fn from_odd(is_odd: Choice) -> Self {
        if is_odd.into() {
            Self::Odd
        } else {
            Self::Even
        }
    }
}

impl TryFrom<u8> for Parity {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        Self::from_tag(tag)
    }
}

impl AffinePoint {
    /// Returns the identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self::Identity;

    /// Base point of secp256k1.
    ///
    /// ```text
    /// Gₓ = 79be667e f9dcbbac 55a06295 ce870b07 029bfcdb 2dce28d9 59f2815b 16f81798
    /// Gᵧ = 483ada77 26a3c465 5da4fbfc 0e1108a8 fd17b448 a6855419 9c47d08f fb10d4b8
    /// ```
    pub const GENERATOR: Self = Self::Affine {
        x: FieldElement::from_hex(
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        ),
        y: FieldElement::from_hex(
            "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        ),
    };

    /// Build a finite point, checking the curve equation.
    pub fn from_coordinates(x: FieldElement, y: FieldElement) -> Result<Self> {
        let point = Self::Affine { x, y };
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::NotOnCurve)
        }
    }

    /// Lift an x-coordinate to the curve point with even y, per BIP340.
    pub fn lift_x(x_bytes: &FieldBytes) -> Result<Self> {
        Self::lift_x_with_parity(x_bytes, Parity::Even)
    }

    /// Lift an x-coordinate to the curve point whose y has the requested
    /// parity.
    ///
    /// Fails with [`Error::FieldElementOutOfRange`] if `x >= p` and with
    /// [`Error::NotOnCurve`] if `x³ + 7` has no square root.
    pub fn lift_x_with_parity(x_bytes: &FieldBytes, parity: Parity) -> Result<Self> {
        let x = Option::<FieldElement>::from(FieldElement::from_bytes(x_bytes))
            .ok_or(Error::FieldElementOutOfRange)?;
        let alpha = x.square() * &x + &CURVE_EQUATION_B;
        let beta = Option::<FieldElement>::from(alpha.sqrt()).ok_or(Error::NotOnCurve)?;

        let want_odd = Choice::from((parity == Parity::Odd) as u8);
        let y = FieldElement::conditional_select(
            &beta.negate(),
            &beta,
            beta.is_odd().ct_eq(&want_odd),
        );

        Ok(Self::Affine { x, y })
    }

    /// Is this point the identity point?
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Does this point satisfy the curve equation? The identity does.
    pub fn is_on_curve(&self) -> bool {
        match self {
            Self::Identity => true,
            Self::Affine { x, y } => y.square() == x.square() * x + &CURVE_EQUATION_B,
        }
    }

    /// The x-coordinate, or none for the identity.
    pub fn x(&self) -> Option<FieldElement> {
        match self {
            Self::Identity => None,
            Self::Affine { x, .. } => Some(*x),
        }
    }

    /// The y-coordinate, or none for the identity.
    pub fn y(&self) -> Option<FieldElement> {
        match self {
            Self::Identity => None,
            Self::Affine { y, .. } => Some(*y),
        }
    }

    /// Big-endian x-coordinate, the BIP340 `bytes(P)` encoding.
    pub fn x_bytes(&self) -> Result<FieldBytes> {
        self.x().map(|x| x.to_bytes()).ok_or(Error::PointAtInfinity)
    }

    /// Parity of the y-coordinate, or none for the identity.
    pub fn parity(&self) -> Option<Parity> {
        self.y().map(|y| Parity::from_odd(y.is_odd()))
    }

    /// Does this point have an even y-coordinate? False for the identity.
    pub fn has_even_y(&self) -> bool {
        self.parity() == Some(Parity::Even)
    }

    /// Returns `-self`, flipping `y` to `p - y`.
    pub fn negate(&self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Affine { x, y } => Self::Affine {
                x: *x,
                y: y.negate(),
            },
        }
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Group addition.
    pub fn add(&self, other: &Self) -> Self {
        let (x1, y1, x2, y2) = match (*self, *other) {
            (Self::Identity, _) => return *other,
            (_, Self::Identity) => return *self,
            (Self::Affine { x: x1, y: y1 }, Self::Affine { x: x2, y: y2 }) => (x1, y1, x2, y2),
        };

        if x1 == x2 && y1 != y2 {
            return Self::Identity;
        }

        let (numerator, denominator) = if x1 == x2 {
            // λ = 3x² / 2y
            (x1.square() * &FieldElement::from_u64(3), y1 + &y1)
        } else {
            // λ = (y2 - y1) / (x2 - x1)
            (y2 - &y1, x2 - &x1)
        };

        // No point of order two exists on secp256k1, so the denominator is
        // only zero for the cases already handled above.
        let lambda = match Option::<FieldElement>::from(denominator.invert()) {
            Some(inv) => numerator * &inv,
            None => return Self::Identity,
        };

        let x3 = lambda.square() - &x1 - &x2;
        let y3 = lambda * &(x1 - &x3) - &y1;
        Self::Affine { x: x3, y: y3 }
    }

    /// Scalar multiplication by double-and-add.
    ///
    /// Always walks all 256 bits of `k`, least significant first.
    pub fn mul(&self, k: &Scalar) -> Self {
        let bits = k.to_bytes();
        let mut result = Self::Identity;
        let mut addend = *self;

        for i in 0..256 {
            if Scalar::bit(&bits, i).into() {
                result = AffinePoint::add(&result, &addend);
            }
            addend = addend.double();
        }

        result
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add<&AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: &AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, other)
    }
}

impl Add for AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, &other)
    }
}

impl Sub<&AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn sub(self, other: &AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, &other.negate())
    }
}

impl Sub for AffinePoint {
    type Output = AffinePoint;

    fn sub(self, other: AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, &other.negate())
    }
}

impl Mul<Scalar> for AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: Scalar) -> AffinePoint {
        AffinePoint::mul(&self, &scalar)
    }
}

impl Mul<&Scalar> for AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: &Scalar) -> AffinePoint {
        AffinePoint::mul(&self, scalar)
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        self.negate()
    }
}
