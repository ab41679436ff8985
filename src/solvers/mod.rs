//! Solver backends.

#[cfg(feature = "milp-solver")]
mod milp;

#[cfg(feature = "milp-solver")]
pub use milp::MilpSolver;
