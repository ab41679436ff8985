//! Sparse affine and quadratic expressions.
//!
//! Terms are kept in insertion order so that every transform downstream
//! (slack numbering, penalty folding, coefficient-vector assembly) is
//! deterministic. Adding a term for a variable that is already present
//! folds into the existing slot without moving it.

use crate::model::VariableId;
use crate::types::Scalar;
use serde::{Deserialize, Serialize};

/// An affine expression: a constant plus a sparse linear combination.
///
/// Variables absent from the term list have coefficient zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffineExpr<T> {
    constant: T,
    terms: Vec<(VariableId, T)>,
}

impl<T: Scalar> Default for AffineExpr<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> AffineExpr<T> {
    /// The zero expression.
    pub fn new() -> Self {
        Self {
            constant: T::zero(),
            terms: Vec::new(),
        }
    }

    /// A constant expression with no variable terms.
    pub fn with_constant(constant: T) -> Self {
        Self {
            constant,
            terms: Vec::new(),
        }
    }

    /// The constant part.
    pub fn constant(&self) -> &T {
        &self.constant
    }

    /// Overwrite the constant part.
    pub fn set_constant(&mut self, constant: T) {
        self.constant = constant;
    }

    /// Remove and return the constant part, leaving zero behind.
    pub fn take_constant(&mut self) -> T {
        std::mem::replace(&mut self.constant, T::zero())
    }

    /// Add `constant` to the constant part.
    pub fn add_constant(&mut self, constant: T) {
        self.constant += constant;
    }

    /// The variable terms, in insertion order.
    pub fn terms(&self) -> &[(VariableId, T)] {
        &self.terms
    }

    /// The coefficient of `var` (zero if absent).
    pub fn coefficient(&self, var: VariableId) -> T {
        self.terms
            .iter()
            .find(|(v, _)| *v == var)
            .map(|(_, c)| c.clone())
            .unwrap_or_else(T::zero)
    }

    /// Add `coef · var`, folding into an existing slot if present.
    pub fn add_term(&mut self, var: VariableId, coef: T) {
        match self.terms.iter_mut().find(|(v, _)| *v == var) {
            Some((_, existing)) => *existing += coef,
            None => self.terms.push((var, coef)),
        }
    }

    /// True if there are no variable terms.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Divide every coefficient and the constant by `divisor`.
    pub fn divide_by(&mut self, divisor: &T) {
        self.constant = self.constant.clone() / divisor.clone();
        for (_, coef) in &mut self.terms {
            *coef = coef.clone() / divisor.clone();
        }
    }

    /// Evaluate at an assignment indexed by variable position.
    pub fn evaluate(&self, assignment: &[T]) -> T {
        let mut value = self.constant.clone();
        for (var, coef) in &self.terms {
            value += coef.clone() * assignment[var.index()].clone();
        }
        value
    }
}

/// A quadratic expression: an affine part plus unordered-pair terms.
///
/// Pair keys are normalised so the smaller variable comes first; `i = j`
/// (a squared variable) is permitted. Like the affine part, pair terms
/// keep insertion order and fold duplicates in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadExpr<T> {
    affine: AffineExpr<T>,
    quadratic: Vec<((VariableId, VariableId), T)>,
}

impl<T: Scalar> Default for QuadExpr<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> From<AffineExpr<T>> for QuadExpr<T> {
    fn from(affine: AffineExpr<T>) -> Self {
        Self {
            affine,
            quadratic: Vec::new(),
        }
    }
}

impl<T: Scalar> QuadExpr<T> {
    /// The zero expression.
    pub fn new() -> Self {
        Self {
            affine: AffineExpr::new(),
            quadratic: Vec::new(),
        }
    }

    /// The affine part.
    pub fn affine(&self) -> &AffineExpr<T> {
        &self.affine
    }

    /// Mutable access to the affine part.
    pub fn affine_mut(&mut self) -> &mut AffineExpr<T> {
        &mut self.affine
    }

    /// The pair terms, in insertion order with normalised keys.
    pub fn quadratic(&self) -> &[((VariableId, VariableId), T)] {
        &self.quadratic
    }

    /// True if there are no pair terms.
    pub fn is_linear(&self) -> bool {
        self.quadratic.is_empty()
    }

    /// Add `coef · xa · xb`, folding into an existing slot if present.
    pub fn add_quadratic_term(&mut self, a: VariableId, b: VariableId, coef: T) {
        let key = if a <= b { (a, b) } else { (b, a) };
        match self.quadratic.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing += coef,
            None => self.quadratic.push((key, coef)),
        }
    }

    /// Add `coef · var` to the affine part.
    pub fn add_linear_term(&mut self, var: VariableId, coef: T) {
        self.affine.add_term(var, coef);
    }

    /// Add `constant` to the affine part.
    pub fn add_constant(&mut self, constant: T) {
        self.affine.add_constant(constant);
    }

    /// Evaluate at an assignment indexed by variable position.
    pub fn evaluate(&self, assignment: &[T]) -> T {
        let mut value = self.affine.evaluate(assignment);
        for ((a, b), coef) in &self.quadratic {
            value += coef.clone() * assignment[a.index()].clone() * assignment[b.index()].clone();
        }
        value
    }
}

#[cfg(test)]
#[path = "../unit_tests/expr.rs"]
mod tests;
