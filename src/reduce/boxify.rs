//! Box-normalisation of linear constraints.
//!
//! After this pass every non-equality constraint has the canonical form
//! `l ≤ f(x) ≤ u` with `u − l = 1` and a constant-free `f`; equality
//! constraints have a constant-free left-hand side with the constant
//! folded into the right-hand side. The equation converter requires
//! exactly this shape.

use crate::error::{Error, Result};
use crate::model::{ConstraintSet, Model};
use crate::reduce::{infer_limits, Envelope};
use crate::types::Scalar;

/// Rewrite every constraint of `model` into canonical boxed form, in place.
///
/// For each constraint `(f, S)` the envelope `refine(infer_limits(f), S)`
/// decides the rewrite:
///
/// - `Infeasible` fails with [`Error::ModelInfeasible`] naming the
///   constraint.
/// - `Constant(v)` (the expression is provably pinned, or `S` was an
///   equality) becomes `f.terms · x = v − f.constant`.
/// - `Box(l, u)` is shifted by the constant and scaled by the range so the
///   new interval has unit width and the expression no constant. A
///   degenerate range is routed to the constant case.
///
/// Rewrites delete the old constraint and re-add it under the same name.
pub fn boxify<T: Scalar>(model: &mut Model<T>) -> Result<()> {
    for id in model.constraint_ids() {
        let envelope = {
            let constraint = model
                .constraint(id)
                .expect("constraint ids snapshot is live");
            infer_limits(model, &constraint.func)?.refine(&constraint.set)?
        };

        match envelope {
            Envelope::Infeasible => {
                let constraint = model
                    .constraint(id)
                    .expect("constraint ids snapshot is live");
                return Err(Error::ModelInfeasible(format!(
                    "constraint `{}` admits no value",
                    constraint.name
                )));
            }
            Envelope::Constant(v) => {
                let mut constraint = model
                    .remove_constraint(id)
                    .expect("constraint ids snapshot is live");
                let shift = constraint.func.take_constant();
                constraint.set = ConstraintSet::EqualTo(v - shift);
                log::debug!("boxify: `{}` pinned to a constant", constraint.name);
                model.add_constraint(constraint.name, constraint.func, constraint.set);
            }
            Envelope::Box { lower, upper } => {
                let mut constraint = model
                    .remove_constraint(id)
                    .expect("constraint ids snapshot is live");
                let shift = constraint.func.take_constant();
                let lower = lower - shift.clone();
                let upper = upper - shift;
                let range = upper.clone() - lower.clone();

                if range.approx_zero() {
                    // Tight interval: the expression is provably constant,
                    // which is the constant case above.
                    constraint.set = ConstraintSet::EqualTo(lower);
                    model.add_constraint(constraint.name, constraint.func, constraint.set);
                    continue;
                }
                assert!(range > T::zero(), "boxified range must be positive");

                constraint.func.divide_by(&range);
                constraint.set = ConstraintSet::Interval {
                    lower: lower / range.clone(),
                    upper: upper / range,
                };
                model.add_constraint(constraint.name, constraint.func, constraint.set);
            }
        }
    }
    Ok(())
}

/// Cloning variant of [`boxify`].
pub fn boxified<T: Scalar>(model: &Model<T>) -> Result<Model<T>> {
    let mut boxed = model.clone();
    boxify(&mut boxed)?;
    Ok(boxed)
}

#[cfg(test)]
#[path = "../unit_tests/reduce/boxify.rs"]
mod tests;
