//! Penalty substitution: equalities become squared-residual objective terms.

use crate::error::{Error, Result};
use crate::model::{AffineExpr, ConstraintSet, Model, QuadExpr};
use crate::types::{Direction, Scalar};

/// Replace every equality constraint by a penalty term on the objective.
///
/// For each constraint `f(x) = c` the term `σλ · (f − c)²` is folded into
/// the objective, where `σ` is `−1` for a maximising model and `+1` for a
/// minimising one, so that violations always hurt. Accumulation folds left
/// over the model's constraint iteration order. After folding, all
/// constraints are deleted.
///
/// A negative `weight` fails with [`Error::InvalidPenalty`]. A weight that
/// is numerically zero deletes the constraints without touching the
/// objective and logs a warning: the relaxation is almost certainly not
/// what the caller wants.
///
/// Precondition: every remaining constraint is an equality (the output of
/// [`crate::reduce::to_equations`]); anything else fails with
/// [`Error::UnsupportedConstraint`].
pub fn to_penalties<T: Scalar>(model: &mut Model<T>, weight: T) -> Result<()> {
    if weight < T::zero() {
        return Err(Error::InvalidPenalty(weight.to_string()));
    }

    if weight.approx_zero() {
        log::warn!(
            "penalty weight {weight} is numerically zero; constraints are dropped without penalising the objective"
        );
        for id in model.constraint_ids() {
            model.remove_constraint(id);
        }
        return Ok(());
    }

    let signed = match model.direction() {
        Direction::Maximize => -weight,
        Direction::Minimize => weight,
    };

    for id in model.constraint_ids() {
        let constraint = model
            .remove_constraint(id)
            .expect("constraint ids snapshot is live");
        let rhs = match constraint.set {
            ConstraintSet::EqualTo(rhs) => rhs,
            other => {
                return Err(Error::UnsupportedConstraint(format!(
                    "constraint `{}` reached penalty substitution in {} form",
                    constraint.name,
                    other.kind()
                )))
            }
        };

        let mut residual = constraint.func;
        residual.add_constant(-rhs);
        accumulate_square(model.objective_mut(), &residual, &signed);
    }
    Ok(())
}

/// Cloning variant of [`to_penalties`].
pub fn with_penalties<T: Scalar>(model: &Model<T>, weight: T) -> Result<Model<T>> {
    let mut penalised = model.clone();
    to_penalties(&mut penalised, weight)?;
    Ok(penalised)
}

/// Fold `weight · residual²` into `objective`.
///
/// `(k + Σ cᵢxᵢ)² = k² + 2k·Σ cᵢxᵢ + Σᵢⱼ cᵢcⱼ xᵢxⱼ`; the cross terms
/// appear twice, the squares once.
fn accumulate_square<T: Scalar>(objective: &mut QuadExpr<T>, residual: &AffineExpr<T>, weight: &T) {
    let two = T::one() + T::one();
    let k = residual.constant().clone();

    objective.add_constant(weight.clone() * k.clone() * k.clone());
    for (var, coef) in residual.terms() {
        objective.add_linear_term(
            *var,
            weight.clone() * two.clone() * k.clone() * coef.clone(),
        );
    }

    let terms = residual.terms();
    for (i, (vi, ci)) in terms.iter().enumerate() {
        for (vj, cj) in &terms[i..] {
            let product = ci.clone() * cj.clone();
            let coef = if vi == vj {
                weight.clone() * product
            } else {
                weight.clone() * two.clone() * product
            };
            objective.add_quadratic_term(*vi, *vj, coef);
        }
    }
}

#[cfg(test)]
#[path = "../unit_tests/reduce/penalties.rs"]
mod tests;
