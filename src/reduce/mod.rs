//! The QUMO reduction pipeline.
//!
//! A mixed-variable model goes through four stages: box-normalisation
//! ([`boxify`]), interval-to-equality conversion ([`to_equations`]),
//! penalty substitution ([`to_penalties`]), and extraction of the
//! canonical tuple ([`extract_qumo`]). Each stage has an in-place and a
//! cloning variant; [`reduce_to_qumo`] chains all four.

mod boxify;
mod envelope;
mod equations;
mod limits;
mod penalties;
mod qumo;

pub use boxify::{boxified, boxify};
pub use envelope::Envelope;
pub use equations::{to_equations, with_equations};
pub use limits::infer_limits;
pub use penalties::{to_penalties, with_penalties};
pub use qumo::{extract_qumo, Qumo};

use crate::error::Result;
use crate::model::Model;
use crate::types::Scalar;

/// Result of reducing a model to QUMO.
///
/// Keeps the source variable count so solutions over the target (which
/// has one extra slack coordinate per interval constraint) can be mapped
/// back to the source variable space.
#[derive(Debug, Clone, PartialEq)]
pub struct QumoReduction<T> {
    target: Qumo<T>,
    num_source_vars: usize,
}

impl<T: Scalar> QumoReduction<T> {
    /// The QUMO instance.
    pub fn target(&self) -> &Qumo<T> {
        &self.target
    }

    /// Consume the reduction, keeping only the QUMO instance.
    pub fn into_target(self) -> Qumo<T> {
        self.target
    }

    /// Number of variables in the source model.
    pub fn num_source_vars(&self) -> usize {
        self.num_source_vars
    }

    /// Project a target assignment back onto the source variables,
    /// discarding the slack coordinates.
    pub fn extract_solution(&self, target_assignment: &[T]) -> Vec<T> {
        target_assignment[..self.num_source_vars].to_vec()
    }
}

/// Run the full pipeline in place, consuming the model's constraints.
pub fn reduce_to_qumo_in_place<T: Scalar>(
    model: &mut Model<T>,
    penalty: T,
) -> Result<QumoReduction<T>> {
    let num_source_vars = model.num_variables();
    boxify(model)?;
    to_equations(model)?;
    to_penalties(model, penalty)?;
    let target = extract_qumo(model)?;
    log::debug!(
        "reduced model with {} source variables to QUMO over {} variables",
        num_source_vars,
        target.num_vars()
    );
    Ok(QumoReduction {
        target,
        num_source_vars,
    })
}

/// Cloning variant of [`reduce_to_qumo_in_place`].
pub fn reduce_to_qumo<T: Scalar>(model: &Model<T>, penalty: T) -> Result<QumoReduction<T>> {
    let mut working = model.clone();
    reduce_to_qumo_in_place(&mut working, penalty)
}
