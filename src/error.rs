//! Error types for the qumoreductions library.

use thiserror::Error;

/// Errors that can occur in the qumoreductions library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A constraint's feasible range collapsed, or a settlement solution
    /// leaves a participant with a negative balance.
    #[error("model is infeasible: {0}")]
    ModelInfeasible(String),

    /// Limit inference reached a variable with neither fix, binary flag,
    /// nor two-sided bounds.
    #[error("expression has no finite bounds: {0}")]
    UnboundedExpression(String),

    /// Negative penalty weight.
    #[error("penalty weight must be non-negative, got {0}")]
    InvalidPenalty(String),

    /// A scenario element violates its local invariants.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// A constraint set the transforms refuse to handle.
    #[error("unsupported constraint: {0}")]
    UnsupportedConstraint(String),

    /// The solver backend terminated without an optimal solution.
    #[error("solver failed: {0}")]
    SolverFailure(String),

    /// A settlement solution is feasible but not maximal.
    #[error("solution is not maximal: {0}")]
    NotMaximal(String),

    /// Dividing an envelope by zero.
    #[error("division of an envelope by zero")]
    DivisionByZero,

    /// File I/O failure.
    #[error("io error: {0}")]
    Io(String),

    /// Text or JSON input that does not parse.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type alias for qumoreductions operations.
pub type Result<T> = std::result::Result<T, Error>;
