//! Interval arithmetic over the feasible range of a linear expression.
//!
//! An [`Envelope`] is the three-valued description of what an expression
//! can evaluate to: provably empty, provably a single value, or a closed
//! box. Affine scalar transforms and refinement against a constraint set
//! are the only operations; `Infeasible` absorbs everything.

use crate::error::{Error, Result};
use crate::model::ConstraintSet;
use crate::types::Scalar;
use serde::{Deserialize, Serialize};

/// Feasible range of an expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Envelope<T> {
    /// No value is feasible.
    Infeasible,
    /// Exactly one value is feasible.
    Constant(T),
    /// Every value in `[lower, upper]` is feasible. `lower == upper` is a
    /// tight interval, which is distinct from `Constant`.
    Box { lower: T, upper: T },
}

impl<T: Scalar> Envelope<T> {
    /// A box envelope.
    ///
    /// # Panics
    /// Panics if `lower > upper`.
    pub fn interval(lower: T, upper: T) -> Self {
        assert!(lower <= upper, "envelope requires lower <= upper");
        Envelope::Box { lower, upper }
    }

    /// Divide by a scalar; division by (approximately) zero is an error,
    /// except that `Infeasible` absorbs it like every other operation.
    pub fn div(self, scalar: T) -> Result<Self> {
        Ok(match self {
            Envelope::Infeasible => Envelope::Infeasible,
            _ if scalar.approx_zero() => return Err(Error::DivisionByZero),
            Envelope::Constant(v) => Envelope::Constant(v / scalar),
            Envelope::Box { lower, upper } => {
                if scalar > T::zero() {
                    Envelope::Box {
                        lower: lower / scalar.clone(),
                        upper: upper / scalar,
                    }
                } else {
                    Envelope::Box {
                        lower: upper / scalar.clone(),
                        upper: lower / scalar,
                    }
                }
            }
        })
    }

    /// Refine this envelope against a constraint set.
    ///
    /// Returns the sub-envelope of values that also satisfy `set`; the
    /// result never admits a point the input excluded. `Semiinteger` and
    /// `Semicontinuous` sets are rejected.
    pub fn refine(self, set: &ConstraintSet<T>) -> Result<Self> {
        let refined = match (self, set) {
            (Envelope::Infeasible, _) => Envelope::Infeasible,

            (Envelope::Constant(v), ConstraintSet::GreaterThan(a)) => {
                if v >= *a {
                    Envelope::Constant(v)
                } else {
                    Envelope::Infeasible
                }
            }
            (Envelope::Box { lower, upper }, ConstraintSet::GreaterThan(a)) => {
                if lower > *a {
                    Envelope::Box { lower, upper }
                } else if upper < *a {
                    Envelope::Infeasible
                } else {
                    Envelope::Box {
                        lower: a.clone(),
                        upper,
                    }
                }
            }

            (Envelope::Constant(v), ConstraintSet::LessThan(b)) => {
                if v <= *b {
                    Envelope::Constant(v)
                } else {
                    Envelope::Infeasible
                }
            }
            (Envelope::Box { lower, upper }, ConstraintSet::LessThan(b)) => {
                if upper <= *b {
                    Envelope::Box { lower, upper }
                } else if *b < lower {
                    Envelope::Infeasible
                } else {
                    Envelope::Box {
                        lower,
                        upper: b.clone(),
                    }
                }
            }

            (Envelope::Constant(v), ConstraintSet::EqualTo(c)) => {
                if v.approx_eq(c) {
                    Envelope::Constant(v)
                } else {
                    Envelope::Infeasible
                }
            }
            (Envelope::Box { lower, upper }, ConstraintSet::EqualTo(c)) => {
                if lower <= *c && *c <= upper {
                    Envelope::Constant(c.clone())
                } else {
                    Envelope::Infeasible
                }
            }

            (envelope, ConstraintSet::Interval { lower: a, upper: b }) => {
                if a > b {
                    // Empty set: nothing satisfies it.
                    Envelope::Infeasible
                } else {
                    match envelope {
                        Envelope::Infeasible => Envelope::Infeasible,
                        Envelope::Constant(v) => {
                            if *a <= v && v <= *b {
                                Envelope::Constant(v)
                            } else {
                                Envelope::Infeasible
                            }
                        }
                        Envelope::Box { lower, upper } => {
                            if lower >= *a && upper <= *b {
                                Envelope::Box { lower, upper }
                            } else if upper < *a || lower > *b {
                                Envelope::Infeasible
                            } else {
                                Envelope::Box {
                                    lower: if lower >= *a { lower } else { a.clone() },
                                    upper: if upper <= *b { upper } else { b.clone() },
                                }
                            }
                        }
                    }
                }
            }

            (_, ConstraintSet::Semiinteger { .. }) | (_, ConstraintSet::Semicontinuous { .. }) => {
                return Err(Error::UnsupportedConstraint(format!(
                    "{} sets cannot be refined",
                    set.kind()
                )))
            }
        };
        Ok(refined)
    }
}

impl<T: Scalar> std::ops::Add<T> for Envelope<T> {
    type Output = Envelope<T>;

    fn add(self, scalar: T) -> Envelope<T> {
        match self {
            Envelope::Infeasible => Envelope::Infeasible,
            Envelope::Constant(v) => Envelope::Constant(v + scalar),
            Envelope::Box { lower, upper } => Envelope::Box {
                lower: lower + scalar.clone(),
                upper: upper + scalar,
            },
        }
    }
}

impl<T: Scalar> std::ops::Sub<T> for Envelope<T> {
    type Output = Envelope<T>;

    fn sub(self, scalar: T) -> Envelope<T> {
        match self {
            Envelope::Infeasible => Envelope::Infeasible,
            Envelope::Constant(v) => Envelope::Constant(v - scalar),
            Envelope::Box { lower, upper } => Envelope::Box {
                lower: lower - scalar.clone(),
                upper: upper - scalar,
            },
        }
    }
}

impl<T: Scalar> std::ops::Mul<T> for Envelope<T> {
    type Output = Envelope<T>;

    fn mul(self, scalar: T) -> Envelope<T> {
        match self {
            Envelope::Infeasible => Envelope::Infeasible,
            _ if scalar.approx_zero() => Envelope::Constant(T::zero()),
            Envelope::Constant(v) => Envelope::Constant(v * scalar),
            Envelope::Box { lower, upper } => {
                if scalar > T::zero() {
                    Envelope::Box {
                        lower: lower * scalar.clone(),
                        upper: upper * scalar,
                    }
                } else {
                    Envelope::Box {
                        lower: upper * scalar.clone(),
                        upper: lower * scalar,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../unit_tests/reduce/envelope.rs"]
mod tests;
