//! Lowering an unconstrained quadratic model to the canonical QUMO tuple.

use crate::error::Result;
use crate::model::Model;
use crate::types::Scalar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Quadratic Unconstrained Mixed Optimization instance.
///
/// The objective is `½ xᵀ Q x + cᵀ x + k`, where the coordinates listed
/// in `binaries` take values in `{0, 1}` and all others lie in `[0, 1]`.
/// `Q` is stored as coordinate triples sorted row-major with duplicates
/// already summed. Indices are 0-based positions in the model's variable
/// table (a 1-based [`crate::model::VariableId`] maps via `id − 1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qumo<T> {
    num_vars: usize,
    matrix: Vec<(usize, usize, T)>,
    linear: Vec<T>,
    constant: T,
    binaries: Vec<usize>,
    names: Vec<String>,
}

impl<T: Scalar> Qumo<T> {
    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// The sparse symmetric matrix `Q`, as sorted row-major triples.
    pub fn matrix(&self) -> &[(usize, usize, T)] {
        &self.matrix
    }

    /// The dense linear coefficient vector `c`.
    pub fn linear(&self) -> &[T] {
        &self.linear
    }

    /// The scalar offset `k`.
    pub fn constant(&self) -> &T {
        &self.constant
    }

    /// Sorted 0-based indices of the binary coordinates.
    pub fn binaries(&self) -> &[usize] {
        &self.binaries
    }

    /// Display names of the variables, in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Evaluate `½ xᵀ Q x + cᵀ x + k` at an assignment.
    pub fn evaluate(&self, assignment: &[T]) -> T {
        let two = T::one() + T::one();
        let mut quadratic = T::zero();
        for (i, j, q) in &self.matrix {
            quadratic += q.clone() * assignment[*i].clone() * assignment[*j].clone();
        }
        let mut value = quadratic / two;
        for (c, x) in self.linear.iter().zip(assignment) {
            value += c.clone() * x.clone();
        }
        value + self.constant.clone()
    }
}

/// Lower an unconstrained model to its QUMO tuple.
///
/// The affine objective lands in `c` and `k`. Quadratic terms dispatch on
/// shape: a squared *binary* variable is linear on `{0, 1}` and folds into
/// `c`; every other term emits the symmetric pair `(i, j, q)`, `(j, i, q)`,
/// which for a continuous diagonal doubles the entry so the `½` convention
/// recovers the original `q x²`. Duplicates are summed during assembly.
///
/// # Panics
/// Panics if the model still has constraints; run the transform pipeline
/// first.
pub fn extract_qumo<T: Scalar>(model: &Model<T>) -> Result<Qumo<T>> {
    assert_eq!(
        model.num_constraints(),
        0,
        "QUMO extraction requires an unconstrained model"
    );

    let n = model.num_variables();
    let objective = model.objective();

    let mut linear = vec![T::zero(); n];
    for (var, coef) in objective.affine().terms() {
        linear[var.index()] += coef.clone();
    }

    let mut entries: BTreeMap<(usize, usize), T> = BTreeMap::new();
    for ((a, b), coef) in objective.quadratic() {
        let (i, j) = (a.index(), b.index());
        if i == j && model.variable(*a).is_binary() {
            // x² = x on {0, 1}: the term is linear.
            linear[i] += coef.clone();
        } else {
            *entries.entry((i, j)).or_insert_with(T::zero) += coef.clone();
            *entries.entry((j, i)).or_insert_with(T::zero) += coef.clone();
        }
    }

    let binaries = model
        .variables()
        .filter(|(_, v)| v.is_binary())
        .map(|(id, _)| id.index())
        .collect();

    Ok(Qumo {
        num_vars: n,
        matrix: entries.into_iter().map(|((i, j), q)| (i, j, q)).collect(),
        linear,
        constant: objective.affine().constant().clone(),
        binaries,
        names: model.variable_names(),
    })
}

#[cfg(test)]
#[path = "../unit_tests/reduce/qumo.rs"]
mod tests;
