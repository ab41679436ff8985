//! Common numeric types and tolerances used across the qumoreductions library.

use serde::{Deserialize, Serialize};

/// Absolute tolerance for floating-point comparisons.
const FLOAT_ABS_TOL: f64 = 1e-12;
/// Relative tolerance for floating-point comparisons.
const FLOAT_REL_TOL: f64 = 1e-12;

/// Approximate comparison, parameterised per numeric type.
///
/// Every `≈ 0` and `≈ v` test in the transforms goes through this trait,
/// so the tolerance choice lives in one place. Integers compare exactly;
/// floats use a relative-plus-absolute epsilon.
pub trait Tolerance {
    /// Whether this value is indistinguishable from zero.
    fn approx_zero(&self) -> bool;

    /// Whether two values are indistinguishable.
    fn approx_eq(&self, other: &Self) -> bool;
}

macro_rules! exact_tolerance {
    ($($t:ty),*) => {
        $(impl Tolerance for $t {
            fn approx_zero(&self) -> bool {
                *self == 0
            }
            fn approx_eq(&self, other: &Self) -> bool {
                self == other
            }
        })*
    };
}

exact_tolerance!(i8, i16, i32, i64, i128, isize);

macro_rules! float_tolerance {
    ($($t:ty),*) => {
        $(impl Tolerance for $t {
            fn approx_zero(&self) -> bool {
                self.abs() <= FLOAT_ABS_TOL as $t
            }
            fn approx_eq(&self, other: &Self) -> bool {
                let scale = self.abs().max(other.abs());
                (self - other).abs() <= (FLOAT_ABS_TOL as $t).max(FLOAT_REL_TOL as $t * scale)
            }
        })*
    };
}

float_tolerance!(f32, f64);

/// Bound for the scalar type threaded through models, envelopes and markets.
///
/// Signed arithmetic, an order, integer injection and a tolerance are all the
/// transforms need. `f64` is the workhorse; exact integer types work wherever
/// no division is involved.
pub trait Scalar:
    Clone
    + Default
    + PartialOrd
    + std::fmt::Debug
    + std::fmt::Display
    + num_traits::Num
    + num_traits::Signed
    + num_traits::FromPrimitive
    + std::ops::AddAssign
    + std::ops::SubAssign
    + Tolerance
    + 'static
{
}

impl<T> Scalar for T where
    T: Clone
        + Default
        + PartialOrd
        + std::fmt::Debug
        + std::fmt::Display
        + num_traits::Num
        + num_traits::Signed
        + num_traits::FromPrimitive
        + std::ops::AddAssign
        + std::ops::SubAssign
        + Tolerance
        + 'static
{
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Maximize the objective value.
    Maximize,
    /// Minimize the objective value.
    Minimize,
}

#[cfg(test)]
#[path = "unit_tests/types.rs"]
mod tests;
