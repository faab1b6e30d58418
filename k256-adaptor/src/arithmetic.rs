//! Field, scalar and curve point arithmetic.

pub(crate) mod affine;
pub(crate) mod field;
pub(crate) mod scalar;

use field::FieldElement;

/// `b` in the curve equation `y² = x³ + b`.
pub(crate) const CURVE_EQUATION_B: FieldElement = FieldElement::from_u64(7);
