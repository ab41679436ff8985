//! The maximum-throughput settlement integer program.
//!
//! Decision variable `x[T<t>] ∈ {0, 1}` per requested transaction.
//! For every participant, post-trade security holdings must stay
//! non-negative, and so must post-trade wealth: cash plus what the
//! participant's conversion rule can raise from its securities. The
//! objective maximises the number of executed transactions.

use crate::error::{Error, Result};
use crate::market::{Market, MarketState, TransactionId};
use crate::model::{AffineExpr, Model, QuadExpr, VariableId};
use crate::types::{Direction, Scalar};

#[cfg(feature = "milp-solver")]
use crate::solvers::MilpSolver;
#[cfg(feature = "milp-solver")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "milp-solver")]
use std::collections::BTreeMap;

/// The settlement IP over a [`Model`], with the transaction variables
/// remembered in id order.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementProgram<T> {
    model: Model<T>,
    transaction_vars: Vec<VariableId>,
}

impl<T: Scalar> SettlementProgram<T> {
    /// Build the integer program for a market.
    ///
    /// Constraints are added in canonical order and naming: first
    /// `security[P<p>]` for every participant, then `currency[P<p>]`
    /// carrying the conversion-augmented cash expression.
    pub fn build(market: &Market<T>) -> Self {
        let num_parties = market.num_parties();
        let num_transactions = market.num_transactions();
        let setup = market.setup();
        let deltas = market.deltas();

        let mut model = Model::new(Direction::Maximize);
        let transaction_vars: Vec<VariableId> = (1..=num_transactions)
            .map(|t| model.add_binary_variable(format!("x[T{t}]")))
            .collect();

        // security[p]: security0[p] + Σ_t security[p,t]·x_t ≥ 0
        let mut security_rows: Vec<AffineExpr<T>> = setup
            .security
            .iter()
            .map(|s| AffineExpr::with_constant(s.clone()))
            .collect();
        for (t, &var) in transaction_vars.iter().enumerate() {
            for (row, delta) in deltas.security.column(t) {
                security_rows[*row].add_term(var, delta.clone());
            }
        }

        // currency[p]: currency0[p] + Σ_t currency[p,t]·x_t
        //            + conversion[p]·(security0[p] + Σ_t security[p,t]·x_t) ≥ 0
        let mut currency_rows: Vec<AffineExpr<T>> = (0..num_parties)
            .map(|p| {
                AffineExpr::with_constant(
                    setup.currency[p].clone()
                        + setup.conversion[p].clone() * setup.security[p].clone(),
                )
            })
            .collect();
        for (t, &var) in transaction_vars.iter().enumerate() {
            for (row, delta) in deltas.currency.column(t) {
                currency_rows[*row].add_term(var, delta.clone());
            }
            for (row, delta) in deltas.security.column(t) {
                let conversion = &setup.conversion[*row];
                if !conversion.approx_zero() {
                    currency_rows[*row].add_term(var, conversion.clone() * delta.clone());
                }
            }
        }

        for (p, row) in security_rows.into_iter().enumerate() {
            model.add_constraint(
                format!("security[P{}]", p + 1),
                row,
                crate::model::ConstraintSet::GreaterThan(T::zero()),
            );
        }
        for (p, row) in currency_rows.into_iter().enumerate() {
            model.add_constraint(
                format!("currency[P{}]", p + 1),
                row,
                crate::model::ConstraintSet::GreaterThan(T::zero()),
            );
        }

        let mut objective = AffineExpr::new();
        for &var in &transaction_vars {
            objective.add_term(var, T::one());
        }
        model.set_objective(QuadExpr::from(objective));

        log::debug!(
            "settlement program: {num_transactions} transactions, {} constraints",
            model.num_constraints()
        );
        Self {
            model,
            transaction_vars,
        }
    }

    /// The underlying model.
    pub fn model(&self) -> &Model<T> {
        &self.model
    }

    /// Consume the program, keeping the model (e.g. to feed it through
    /// the QUMO reduction pipeline).
    pub fn into_model(self) -> Model<T> {
        self.model
    }

    /// The `x` variables, in transaction id order.
    pub fn transaction_vars(&self) -> &[VariableId] {
        &self.transaction_vars
    }
}

/// A solved settlement program.
#[cfg(feature = "milp-solver")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementSolution {
    /// Executed transactions, sorted by id.
    pub executed: Vec<TransactionId>,
    /// Optimal values of any non-`x` variables, by name. Empty when the
    /// model is purely binary.
    pub continuous: BTreeMap<String, f64>,
}

#[cfg(feature = "milp-solver")]
impl SettlementProgram<f64> {
    /// Solve with the MILP backend and map the assignment back to
    /// transaction ids.
    pub fn solve(&self, solver: &MilpSolver) -> Result<SettlementSolution> {
        let assignment = solver.solve(&self.model)?;

        let mut executed = Vec::new();
        for (t, var) in self.transaction_vars.iter().enumerate() {
            if assignment[var.index()].round() as i64 == 1 {
                executed.push(TransactionId::new(t as u32 + 1));
            }
        }

        let mut continuous = BTreeMap::new();
        for (id, var) in self.model.variables() {
            if !self.transaction_vars.contains(&id) {
                continuous.insert(var.name().to_string(), assignment[id.index()]);
            }
        }

        Ok(SettlementSolution {
            executed,
            continuous,
        })
    }
}

/// Transactions outside `executed` that could still be applied to
/// `state` without driving any participant's security holdings or
/// conversion-augmented wealth negative.
///
/// A correct (maximal) solution has an empty admissible set.
pub fn admissible_transactions<T: Scalar>(
    market: &Market<T>,
    state: &MarketState<T>,
    executed: &[TransactionId],
) -> Vec<TransactionId> {
    let deltas = market.deltas();
    let conversion = &market.setup().conversion;
    let mut admissible = Vec::new();

    for t in 0..market.num_transactions() {
        let id = TransactionId::new(t as u32 + 1);
        if executed.contains(&id) {
            continue;
        }

        let mut currency = state.currency.clone();
        let mut security = state.security.clone();
        for (row, delta) in deltas.currency.column(t) {
            currency[*row] += delta.clone();
        }
        for (row, delta) in deltas.security.column(t) {
            security[*row] += delta.clone();
        }

        let feasible = (0..market.num_parties()).all(|p| {
            security[p] >= T::zero()
                && currency[p].clone() + conversion[p].clone() * security[p].clone() >= T::zero()
        });
        if feasible {
            admissible.push(id);
        }
    }
    admissible
}

/// Execute `executed` and check the result is feasible — and, when
/// `check_admissible` is set, maximal.
///
/// Feasibility requires non-negative security holdings and non-negative
/// conversion-augmented wealth for every participant; every offending
/// participant is reported in the error, not just the first. Maximality
/// requires that no unexecuted transaction is still admissible.
pub fn validate_solution<T: Scalar>(
    market: &Market<T>,
    executed: &[TransactionId],
    check_admissible: bool,
) -> Result<MarketState<T>> {
    let state = market.execute(executed);

    let mut offenders = Vec::new();
    for p in 0..market.num_parties() {
        if state.security[p] < T::zero() {
            offenders.push(format!(
                "P{} holds {} securities",
                p + 1,
                state.security[p]
            ));
        }
        if state.after_conversion[p] < T::zero() {
            offenders.push(format!(
                "P{} holds {} after conversion",
                p + 1,
                state.after_conversion[p]
            ));
        }
    }
    if !offenders.is_empty() {
        return Err(Error::ModelInfeasible(offenders.join("; ")));
    }

    if check_admissible {
        let admissible = admissible_transactions(market, &state, executed);
        if !admissible.is_empty() {
            let listed: Vec<String> = admissible.iter().map(ToString::to_string).collect();
            return Err(Error::NotMaximal(format!(
                "transactions {} are still admissible",
                listed.join(", ")
            )));
        }
    }

    Ok(state)
}

#[cfg(test)]
#[path = "../unit_tests/market/formulate.rs"]
mod tests;
