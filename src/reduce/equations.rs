//! Interval-to-equality conversion via slack variables.

use crate::error::{Error, Result};
use crate::model::{ConstraintSet, Model};
use crate::types::Scalar;

/// Collapse every boxified interval constraint into a single equality.
///
/// A constraint `l ≤ f(x) ≤ u` with `u − l = 1` gains a fresh slack
/// `δ ∈ [0, 1]` and becomes `f(x) + δ = u`. Writing both one-sided forms
/// `f − δ_l = l` and `f + δ_u = u` forces `δ_l + δ_u = 1`, so one of the
/// two equations is redundant; the upper form is the one retained.
///
/// Equality constraints pass through unchanged. Any other shape is a
/// programming error at this stage and fails with
/// [`Error::UnsupportedConstraint`].
pub fn to_equations<T: Scalar>(model: &mut Model<T>) -> Result<()> {
    let mut slack_ordinal = 0usize;

    for id in model.constraint_ids() {
        let (name, upper) = {
            let constraint = model
                .constraint(id)
                .expect("constraint ids snapshot is live");
            match &constraint.set {
                ConstraintSet::EqualTo(_) => continue,
                ConstraintSet::Interval { lower, upper } => {
                    let range = upper.clone() - lower.clone();
                    let unit_defect = range - T::one();
                    if !unit_defect.approx_zero() {
                        return Err(Error::UnsupportedConstraint(format!(
                            "constraint `{}` reached equation conversion with a non-unit interval",
                            constraint.name
                        )));
                    }
                    (constraint.name.clone(), upper.clone())
                }
                other => {
                    return Err(Error::UnsupportedConstraint(format!(
                        "constraint `{}` reached equation conversion in {} form",
                        constraint.name,
                        other.kind()
                    )))
                }
            }
        };

        slack_ordinal += 1;
        let slack = model.add_variable(
            format!("slack[{slack_ordinal}]"),
            Some(T::zero()),
            Some(T::one()),
        );

        let mut constraint = model
            .remove_constraint(id)
            .expect("constraint ids snapshot is live");
        constraint.func.add_term(slack, T::one());
        model.add_constraint(name, constraint.func, ConstraintSet::EqualTo(upper));
    }
    Ok(())
}

/// Cloning variant of [`to_equations`].
pub fn with_equations<T: Scalar>(model: &Model<T>) -> Result<Model<T>> {
    let mut converted = model.clone();
    to_equations(&mut converted)?;
    Ok(converted)
}

#[cfg(test)]
#[path = "../unit_tests/reduce/equations.rs"]
mod tests;
