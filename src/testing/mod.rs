//! Instance generators for tests and benchmarks.

use crate::market::{
    ExchangeFactor, PartyId, PartyInfo, Scenario, TransactionId, TransactionInfo,
};
use crate::model::{AffineExpr, ConstraintSet, Model, QuadExpr};
use crate::reduce::{infer_limits, Envelope};
use crate::types::Direction;
use rand::{Rng, RngExt};

/// Generate a valid random scenario: dense ids, positive amounts,
/// DvP-shaped transactions, and an exchange factor on roughly a third of
/// the participants.
///
/// # Panics
/// Panics if `num_parties < 2` and transactions are requested.
pub fn random_scenario<R: Rng>(
    rng: &mut R,
    num_parties: usize,
    num_transactions: usize,
) -> Scenario {
    assert!(
        num_parties >= 2 || num_transactions == 0,
        "transactions need at least two parties"
    );

    let parties = (1..=num_parties)
        .map(|p| PartyInfo {
            id: PartyId::new(p as u32),
            security_balance: rng.random_range(0..=50),
            currency_balance: rng.random_range(0..=50),
            exchange_factor: if rng.random_bool(0.34) {
                Some(ExchangeFactor {
                    security: rng.random_range(1..=4),
                    currency: rng.random_range(1..=4),
                })
            } else {
                None
            },
        })
        .collect();

    let transactions = (1..=num_transactions)
        .map(|t| {
            let security_from = rng.random_range(1..=num_parties) as u32;
            let mut security_to = rng.random_range(1..=num_parties) as u32;
            while security_to == security_from {
                security_to = rng.random_range(1..=num_parties) as u32;
            }
            TransactionInfo {
                id: TransactionId::new(t as u32),
                security_from: PartyId::new(security_from),
                security_to: PartyId::new(security_to),
                security_amount: rng.random_range(1..=10),
                cash_from: PartyId::new(security_to),
                cash_to: PartyId::new(security_from),
                cash_amount: rng.random_range(1..=10),
            }
        })
        .collect();

    Scenario::new(parties, transactions).expect("generated scenario is valid")
}

/// Generate a feasible random model over binary and bounded continuous
/// variables: every constraint's range is sampled inside the envelope of
/// its expression, so the reduction pipeline never reports
/// infeasibility.
pub fn random_bounded_model<R: Rng>(
    rng: &mut R,
    num_binary: usize,
    num_continuous: usize,
    num_constraints: usize,
) -> Model<f64> {
    let mut model = Model::new(Direction::Minimize);
    let mut vars = Vec::new();
    for i in 1..=num_binary {
        vars.push(model.add_binary_variable(format!("b{i}")));
    }
    for i in 1..=num_continuous {
        let lo = rng.random_range(-5.0..0.0);
        let hi = rng.random_range(0.0..5.0);
        vars.push(model.add_variable(format!("c{i}"), Some(lo), Some(hi)));
    }

    for k in 1..=num_constraints {
        let mut func = AffineExpr::new();
        let arity = rng.random_range(2..=3.min(vars.len()));
        for _ in 0..arity {
            let var = vars[rng.random_range(0..vars.len())];
            let magnitude = rng.random_range(1..=3) as f64;
            let coef = if rng.random_bool(0.5) {
                magnitude
            } else {
                -magnitude
            };
            func.add_term(var, coef);
        }
        func.add_constant(rng.random_range(-2.0..2.0));

        let (min, max) = match infer_limits(&model, &func).expect("all variables are bounded") {
            Envelope::Box { lower, upper } => (lower, upper),
            _ => unreachable!("limit inference always returns a box"),
        };
        let span = max - min;
        let lower = min + rng.random_range(0.0..0.4) * span;
        let upper = lower + rng.random_range(0.2..0.5) * span;
        let set = match k % 3 {
            0 => ConstraintSet::GreaterThan(lower),
            1 => ConstraintSet::LessThan(upper),
            _ => ConstraintSet::Interval { lower, upper },
        };
        model.add_constraint(format!("r{k}"), func, set);
    }

    let mut objective = QuadExpr::new();
    for &var in &vars {
        objective.add_linear_term(var, rng.random_range(-2.0..2.0));
    }
    for _ in 0..vars.len() / 2 {
        let a = vars[rng.random_range(0..vars.len())];
        let b = vars[rng.random_range(0..vars.len())];
        objective.add_quadratic_term(a, b, rng.random_range(-1.0..1.0));
    }
    model.set_objective(objective);
    model
}

#[cfg(test)]
#[path = "../unit_tests/testing.rs"]
mod tests;
