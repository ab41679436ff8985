//! # QUMO Reductions
//!
//! A Rust library for rewriting mixed-variable optimization models into
//! Quadratic Unconstrained Mixed Optimization (QUMO) instances, and for
//! formulating maximum-throughput DvP settlement programs.
//!
//! ## Features
//!
//! - **QUMO pipeline**: envelope algebra, constraint box-normalisation,
//!   slack introduction, penalty substitution, and extraction of the
//!   canonical `½ xᵀQx + cᵀx + k` tuple
//! - **Settlement formulation**: typed market scenarios, sparse
//!   participant×transaction assembly, and the non-negativity integer
//!   program with executor, validator, and admissibility checker
//! - **Solvers**: MILP backends via good_lp (HiGHS by default)
//!
//! ## Example
//!
//! ```rust
//! use qumoreductions::model::{AffineExpr, ConstraintSet, Model};
//! use qumoreductions::reduce::reduce_to_qumo;
//! use qumoreductions::types::Direction;
//!
//! // minimize x + y subject to x + y >= 1, both binary
//! let mut model = Model::<f64>::new(Direction::Minimize);
//! let x = model.add_binary_variable("x");
//! let y = model.add_binary_variable("y");
//! let mut cover = AffineExpr::new();
//! cover.add_term(x, 1.0);
//! cover.add_term(y, 1.0);
//! model.set_objective(cover.clone().into());
//! model.add_constraint("cover", cover, ConstraintSet::GreaterThan(1.0));
//!
//! let reduction = reduce_to_qumo(&model, 10.0).unwrap();
//! // one slack variable was introduced
//! assert_eq!(reduction.target().num_vars(), 3);
//! ```
//!
//! The two cores compose: a settlement program built by
//! [`market::SettlementProgram`] is an ordinary [`model::Model`] and can
//! be fed through [`reduce::reduce_to_qumo`].

pub mod error;
pub mod io;
pub mod market;
pub mod model;
pub mod reduce;
pub mod solvers;
pub mod testing;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::market::{
        admissible_transactions, parse_from_file, parse_scenario, validate_solution, Market,
        MarketState, PartyId, Scenario, SettlementProgram, TransactionId,
    };
    pub use crate::model::{AffineExpr, ConstraintSet, Model, QuadExpr, VariableId};
    pub use crate::reduce::{
        boxified, boxify, extract_qumo, infer_limits, reduce_to_qumo, reduce_to_qumo_in_place,
        to_equations, to_penalties, with_equations, with_penalties, Envelope, Qumo, QumoReduction,
    };
    #[cfg(feature = "milp-solver")]
    pub use crate::solvers::MilpSolver;
    pub use crate::types::{Direction, Scalar, Tolerance};
}

// Re-export commonly used items at crate root
pub use error::{Error, Result};
pub use types::{Direction, Scalar, Tolerance};
