//! Mixed-variable optimization model.
//!
//! A [`Model`] owns a variable table, a constraint table with stable
//! handles, and a quadratic objective. Constraints are removed by leaving
//! a tombstone in their slot, so handles issued earlier stay valid and
//! iteration order remains insertion order — the transforms in
//! [`crate::reduce`] rely on both.

mod expr;

pub use expr::{AffineExpr, QuadExpr};

use crate::types::{Direction, Scalar};
use serde::{Deserialize, Serialize};

/// Identifier of a variable: a dense 1-based index into the model's
/// variable table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VariableId(usize);

impl VariableId {
    pub(crate) const fn new(id: usize) -> Self {
        debug_assert!(id >= 1);
        Self(id)
    }

    /// The 1-based identifier.
    pub fn get(self) -> usize {
        self.0
    }

    /// The 0-based position in the variable table.
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

/// Handle of a constraint. Stays valid until the constraint is removed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ConstraintId(usize);

/// A decision variable and its capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable<T> {
    name: String,
    lower: Option<T>,
    upper: Option<T>,
    fixed: Option<T>,
    binary: bool,
}

impl<T: Scalar> Variable<T> {
    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the variable is pinned to a single value.
    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    /// The pinned value, if any.
    pub fn fix_value(&self) -> Option<&T> {
        self.fixed.as_ref()
    }

    /// Whether the variable is binary.
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    pub fn has_lower_bound(&self) -> bool {
        self.lower.is_some()
    }

    pub fn lower_bound(&self) -> Option<&T> {
        self.lower.as_ref()
    }

    pub fn has_upper_bound(&self) -> bool {
        self.upper.is_some()
    }

    pub fn upper_bound(&self) -> Option<&T> {
        self.upper.as_ref()
    }
}

/// The feasible set attached to one scalar constraint.
///
/// `Semiinteger` and `Semicontinuous` exist only so upstream models can
/// be represented faithfully; every transform rejects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConstraintSet<T> {
    /// `f(x) ≥ lower`.
    GreaterThan(T),
    /// `f(x) ≤ upper`.
    LessThan(T),
    /// `f(x) = value`.
    EqualTo(T),
    /// `lower ≤ f(x) ≤ upper`. Emptiness (`lower > upper`) is not checked
    /// here; refinement detects it.
    Interval { lower: T, upper: T },
    /// Either zero or an integer in `[lower, upper]`. Rejected.
    Semiinteger { lower: T, upper: T },
    /// Either zero or a real in `[lower, upper]`. Rejected.
    Semicontinuous { lower: T, upper: T },
}

impl<T> ConstraintSet<T> {
    /// Short name of the set shape, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConstraintSet::GreaterThan(_) => "GreaterThan",
            ConstraintSet::LessThan(_) => "LessThan",
            ConstraintSet::EqualTo(_) => "EqualTo",
            ConstraintSet::Interval { .. } => "Interval",
            ConstraintSet::Semiinteger { .. } => "Semiinteger",
            ConstraintSet::Semicontinuous { .. } => "Semicontinuous",
        }
    }
}

/// A named scalar constraint: `func(x) ∈ set`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint<T> {
    /// Display name, preserved across rewrites.
    pub name: String,
    /// The affine left-hand side.
    pub func: AffineExpr<T>,
    /// The feasible set.
    pub set: ConstraintSet<T>,
}

/// A mixed-variable optimization model.
///
/// # Example
///
/// ```
/// use qumoreductions::model::{AffineExpr, ConstraintSet, Model};
/// use qumoreductions::types::Direction;
///
/// // maximize x + y subject to x + y <= 1, x binary, y in [0, 1]
/// let mut model = Model::<f64>::new(Direction::Maximize);
/// let x = model.add_binary_variable("x");
/// let y = model.add_variable("y", Some(0.0), Some(1.0));
/// let mut f = AffineExpr::new();
/// f.add_term(x, 1.0);
/// f.add_term(y, 1.0);
/// model.add_constraint("budget", f.clone(), ConstraintSet::LessThan(1.0));
/// model.set_objective(f.into());
///
/// assert_eq!(model.num_variables(), 2);
/// assert_eq!(model.num_constraints(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model<T> {
    variables: Vec<Variable<T>>,
    constraints: Vec<Option<Constraint<T>>>,
    objective: QuadExpr<T>,
    direction: Direction,
}

impl<T: Scalar> Model<T> {
    /// Create an empty model optimizing in `direction`.
    pub fn new(direction: Direction) -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: QuadExpr::new(),
            direction,
        }
    }

    /// The optimization direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Add a continuous variable with optional bounds.
    ///
    /// # Panics
    /// Panics if both bounds are present and `lower > upper`.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        lower: Option<T>,
        upper: Option<T>,
    ) -> VariableId {
        if let (Some(lo), Some(hi)) = (&lower, &upper) {
            assert!(lo <= hi, "variable bounds must satisfy lower <= upper");
        }
        self.variables.push(Variable {
            name: name.into(),
            lower,
            upper,
            fixed: None,
            binary: false,
        });
        VariableId::new(self.variables.len())
    }

    /// Add a binary variable (bounds `[0, 1]`, binary flag set).
    pub fn add_binary_variable(&mut self, name: impl Into<String>) -> VariableId {
        self.variables.push(Variable {
            name: name.into(),
            lower: Some(T::zero()),
            upper: Some(T::one()),
            fixed: None,
            binary: true,
        });
        VariableId::new(self.variables.len())
    }

    /// Pin a variable to a single value.
    pub fn fix_variable(&mut self, var: VariableId, value: T) {
        self.variables[var.index()].fixed = Some(value);
    }

    /// Look up a variable by id.
    ///
    /// # Panics
    /// Panics if the id does not belong to this model.
    pub fn variable(&self, var: VariableId) -> &Variable<T> {
        &self.variables[var.index()]
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Iterate variables with their ids, in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable<T>)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, v)| (VariableId::new(i + 1), v))
    }

    /// Display names of all variables, in table order.
    pub fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    /// Add a constraint, returning its handle.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        func: AffineExpr<T>,
        set: ConstraintSet<T>,
    ) -> ConstraintId {
        self.constraints.push(Some(Constraint {
            name: name.into(),
            func,
            set,
        }));
        ConstraintId(self.constraints.len() - 1)
    }

    /// Remove a constraint by handle, returning it if it was still present.
    pub fn remove_constraint(&mut self, id: ConstraintId) -> Option<Constraint<T>> {
        self.constraints.get_mut(id.0).and_then(Option::take)
    }

    /// Look up a live constraint by handle.
    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint<T>> {
        self.constraints.get(id.0).and_then(Option::as_ref)
    }

    /// Iterate live constraints with their handles, in insertion order.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint<T>)> {
        self.constraints
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| (ConstraintId(i), c)))
    }

    /// Handles of all live constraints, in insertion order.
    pub fn constraint_ids(&self) -> Vec<ConstraintId> {
        self.constraints().map(|(id, _)| id).collect()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.iter().filter(|c| c.is_some()).count()
    }

    /// The objective expression.
    pub fn objective(&self) -> &QuadExpr<T> {
        &self.objective
    }

    /// Mutable access to the objective expression.
    pub fn objective_mut(&mut self) -> &mut QuadExpr<T> {
        &mut self.objective
    }

    /// Replace the objective expression.
    pub fn set_objective(&mut self, objective: QuadExpr<T>) {
        self.objective = objective;
    }
}

#[cfg(test)]
#[path = "../unit_tests/model.rs"]
mod tests;
