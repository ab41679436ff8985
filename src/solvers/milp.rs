//! MILP solver backed by good_lp.
//!
//! The concrete backend is chosen by cargo feature (`milp-highs` by
//! default); `good_lp::default_solver` resolves to whichever one is
//! enabled.

use crate::error::{Error, Result};
use crate::model::{ConstraintSet, Model};
use good_lp::{default_solver, variable, Expression, ProblemVariables, Solution, SolverModel, Variable};

/// A MILP solver over `Model<f64>`.
///
/// # Example
///
/// ```rust,ignore
/// use qumoreductions::market::{parse_from_file, SettlementProgram};
/// use qumoreductions::solvers::MilpSolver;
///
/// let market = parse_from_file::<f64>("scenario.csv")?;
/// let program = SettlementProgram::build(&market);
/// let solution = program.solve(&MilpSolver::new())?;
/// println!("executed: {:?}", solution.executed);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MilpSolver {
    /// Time limit in seconds (None = no limit).
    pub time_limit: Option<f64>,
    /// Suppress backend output.
    pub silent: bool,
}

impl MilpSolver {
    /// Create a solver with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with a time limit.
    pub fn with_time_limit(seconds: f64) -> Self {
        Self {
            time_limit: Some(seconds),
            silent: false,
        }
    }

    /// Solve a model with a linear objective, returning the optimal value
    /// of every variable in table order.
    ///
    /// Quadratic objectives are rejected; the settlement IP and every
    /// stage of the reduction pipeline before penalty substitution are
    /// linear. Any non-optimal termination is an error.
    pub fn solve(&self, model: &Model<f64>) -> Result<Vec<f64>> {
        if !model.objective().is_linear() {
            return Err(Error::UnsupportedConstraint(
                "the MILP backend only handles linear objectives".into(),
            ));
        }
        if model.num_variables() == 0 {
            return Ok(vec![]);
        }

        let mut vars_builder = ProblemVariables::new();
        let vars: Vec<Variable> = model
            .variables()
            .map(|(_, v)| {
                let mut def = variable();
                if v.is_binary() {
                    def = def.binary();
                } else {
                    if let Some(lo) = v.lower_bound() {
                        def = def.min(*lo);
                    }
                    if let Some(hi) = v.upper_bound() {
                        def = def.max(*hi);
                    }
                }
                if let Some(value) = v.fix_value() {
                    def = def.min(*value).max(*value);
                }
                vars_builder.add(def)
            })
            .collect();

        let mut objective: Expression = model
            .objective()
            .affine()
            .terms()
            .iter()
            .map(|&(var, coef)| coef * vars[var.index()])
            .sum();
        objective += *model.objective().affine().constant();

        let unsolved = match model.direction() {
            crate::types::Direction::Maximize => vars_builder.maximise(&objective),
            crate::types::Direction::Minimize => vars_builder.minimise(&objective),
        };
        let mut problem = unsolved.using(default_solver);

        for (_, constraint) in model.constraints() {
            let mut lhs: Expression = constraint
                .func
                .terms()
                .iter()
                .map(|&(var, coef)| coef * vars[var.index()])
                .sum();
            lhs += *constraint.func.constant();

            match &constraint.set {
                ConstraintSet::GreaterThan(bound) => {
                    problem = problem.with(lhs.geq(*bound));
                }
                ConstraintSet::LessThan(bound) => {
                    problem = problem.with(lhs.leq(*bound));
                }
                ConstraintSet::EqualTo(value) => {
                    problem = problem.with(lhs.eq(*value));
                }
                ConstraintSet::Interval { lower, upper } => {
                    problem = problem.with(lhs.clone().geq(*lower));
                    problem = problem.with(lhs.leq(*upper));
                }
                other => {
                    return Err(Error::UnsupportedConstraint(format!(
                        "constraint `{}` has a {} set, which the MILP backend cannot express",
                        constraint.name,
                        other.kind()
                    )))
                }
            }
        }

        let solution = problem
            .solve()
            .map_err(|e| Error::SolverFailure(e.to_string()))?;

        Ok(vars.iter().map(|v| solution.value(*v)).collect())
    }
}

#[cfg(test)]
#[path = "../unit_tests/solvers/milp.rs"]
mod tests;
