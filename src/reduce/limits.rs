//! Limit inference: the envelope of an affine expression.

use crate::error::{Error, Result};
use crate::model::{AffineExpr, Model};
use crate::reduce::Envelope;
use crate::types::Scalar;

/// Compute an envelope for `func` from the per-variable capabilities.
///
/// Each term contributes `coef · value` to the two ends of the range:
/// a fixed variable contributes its pinned value to both ends, a binary
/// variable contributes `coef` to one end and nothing to the other, and a
/// two-sided bounded variable contributes the sign-paired bound products.
/// A variable with none of these capabilities makes the expression
/// unbounded, which is an error.
///
/// The result is always a `Box` (possibly degenerate); callers usually
/// refine it against a constraint set next.
pub fn infer_limits<T: Scalar>(model: &Model<T>, func: &AffineExpr<T>) -> Result<Envelope<T>> {
    let mut min = func.constant().clone();
    let mut max = func.constant().clone();

    for (id, coef) in func.terms() {
        if coef.approx_zero() {
            continue;
        }
        let var = model.variable(*id);
        if let Some(value) = var.fix_value() {
            let contribution = coef.clone() * value.clone();
            min += contribution.clone();
            max += contribution;
        } else if var.is_binary() {
            if *coef > T::zero() {
                max += coef.clone();
            } else {
                min += coef.clone();
            }
        } else {
            match (var.lower_bound(), var.upper_bound()) {
                (Some(lo), Some(hi)) => {
                    if *coef > T::zero() {
                        min += coef.clone() * lo.clone();
                        max += coef.clone() * hi.clone();
                    } else {
                        min += coef.clone() * hi.clone();
                        max += coef.clone() * lo.clone();
                    }
                }
                _ => {
                    return Err(Error::UnboundedExpression(format!(
                        "variable `{}` in `{}` has neither fix, binary flag, nor two-sided bounds",
                        var.name(),
                        describe_affine(model, func),
                    )))
                }
            }
        }
    }

    Ok(Envelope::interval(min, max))
}

/// Render an affine expression with variable names, for error messages.
pub(crate) fn describe_affine<T: Scalar>(model: &Model<T>, func: &AffineExpr<T>) -> String {
    let mut out = String::new();
    for (id, coef) in func.terms() {
        if !out.is_empty() {
            out.push_str(" + ");
        }
        out.push_str(&format!("{}·{}", coef, model.variable(*id).name()));
    }
    if !func.constant().approx_zero() || out.is_empty() {
        if !out.is_empty() {
            out.push_str(" + ");
        }
        out.push_str(&format!("{}", func.constant()));
    }
    out
}

#[cfg(test)]
#[path = "../unit_tests/reduce/limits.rs"]
mod tests;
