use super::*;
use crate::error::Error;
use crate::market::{
    ExchangeFactor, Market, PartyId, PartyInfo, Scenario, TransactionId, TransactionInfo,
};
use crate::model::ConstraintSet;
use crate::types::Direction;

fn party(id: u32, security: u64, currency: u64) -> PartyInfo {
    PartyInfo {
        id: PartyId::new(id),
        security_balance: security,
        currency_balance: currency,
        exchange_factor: None,
    }
}

fn dvp(id: u32, from: u32, to: u32, security: u64, cash: u64) -> TransactionInfo {
    TransactionInfo {
        id: TransactionId::new(id),
        security_from: PartyId::new(from),
        security_to: PartyId::new(to),
        security_amount: security,
        cash_from: PartyId::new(to),
        cash_to: PartyId::new(from),
        cash_amount: cash,
    }
}

/// P1 holds one security, P2 one unit of cash; T1 swaps them.
fn swap_market() -> Market<f64> {
    let scenario = Scenario::new(
        vec![party(1, 1, 0), party(2, 0, 1)],
        vec![dvp(1, 1, 2, 1, 1)],
    )
    .unwrap();
    Market::from_scenario(&scenario).unwrap()
}

/// The conversion-unlock pair: T2 returns the security against 2 cash,
/// which P1 can only afford once its exchange factor raises cash from
/// the returned security.
fn unlock_scenario(with_conversion: bool) -> Market<f64> {
    let mut p1 = party(1, 1, 0);
    if with_conversion {
        p1.exchange_factor = Some(ExchangeFactor {
            security: 1,
            currency: 2,
        });
    }
    let scenario = Scenario::new(
        vec![p1, party(2, 0, 1)],
        vec![dvp(1, 1, 2, 1, 1), dvp(2, 2, 1, 1, 2)],
    )
    .unwrap();
    Market::from_scenario(&scenario).unwrap()
}

#[test]
fn test_program_shape() {
    let market = unlock_scenario(true);
    let program = SettlementProgram::build(&market);
    let model = program.model();

    assert_eq!(model.direction(), Direction::Maximize);
    assert_eq!(model.num_variables(), 2);
    assert_eq!(program.transaction_vars().len(), 2);
    for (_, var) in model.variables() {
        assert!(var.is_binary());
    }

    let names: Vec<&str> = model.constraints().map(|(_, c)| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["security[P1]", "security[P2]", "currency[P1]", "currency[P2]"]
    );
    for (_, constraint) in model.constraints() {
        assert_eq!(constraint.set, ConstraintSet::GreaterThan(0.0));
    }
}

#[test]
fn test_security_constraint_coefficients() {
    let market = unlock_scenario(true);
    let program = SettlementProgram::build(&market);
    let model = program.model();
    let [x1, x2] = program.transaction_vars() else {
        panic!("expected two transaction variables")
    };

    let (_, security_p1) = model
        .constraints()
        .find(|(_, c)| c.name == "security[P1]")
        .unwrap();
    assert_eq!(*security_p1.func.constant(), 1.0);
    assert_eq!(security_p1.func.coefficient(*x1), -1.0);
    assert_eq!(security_p1.func.coefficient(*x2), 1.0);
}

#[test]
fn test_currency_constraint_carries_conversion() {
    let market = unlock_scenario(true);
    let program = SettlementProgram::build(&market);
    let model = program.model();
    let [x1, x2] = program.transaction_vars() else {
        panic!("expected two transaction variables")
    };

    // currency[P1] = 0 + 1·x1 − 2·x2 + 2·(1 − 1·x1 + 1·x2) ≥ 0
    let (_, currency_p1) = model
        .constraints()
        .find(|(_, c)| c.name == "currency[P1]")
        .unwrap();
    assert_eq!(*currency_p1.func.constant(), 2.0);
    assert_eq!(currency_p1.func.coefficient(*x1), -1.0);
    assert_eq!(currency_p1.func.coefficient(*x2), 0.0);
}

#[test]
fn test_objective_counts_transactions() {
    let market = unlock_scenario(false);
    let program = SettlementProgram::build(&market);
    let objective = program.model().objective();
    assert!(objective.is_linear());
    for &var in program.transaction_vars() {
        assert_eq!(objective.affine().coefficient(var), 1.0);
    }
}

#[test]
fn test_validator_accepts_the_swap() {
    let market = swap_market();
    let state = validate_solution(&market, &[TransactionId::new(1)], true).unwrap();
    assert_eq!(state.security, vec![0.0, 1.0]);
    assert_eq!(state.currency, vec![1.0, 0.0]);
}

#[test]
fn test_validator_reports_every_offender() {
    // executing only T2 drives P2's securities and P1's wealth negative
    let market = unlock_scenario(false);
    match validate_solution(&market, &[TransactionId::new(2)], false) {
        Err(Error::ModelInfeasible(detail)) => {
            assert!(detail.contains("P2"), "missing security offender: {detail}");
            assert!(detail.contains("P1"), "missing wealth offender: {detail}");
        }
        other => panic!("expected ModelInfeasible, got {other:?}"),
    }
}

#[test]
fn test_conversion_unlocks_the_second_transaction() {
    let t1 = [TransactionId::new(1)];

    // without conversion, nothing more is admissible after T1
    let market = unlock_scenario(false);
    let state = market.execute(&t1);
    assert_eq!(admissible_transactions(&market, &state, &t1), vec![]);

    // with conversion, T2 becomes admissible
    let market = unlock_scenario(true);
    let state = market.execute(&t1);
    assert_eq!(
        admissible_transactions(&market, &state, &t1),
        vec![TransactionId::new(2)]
    );
}

#[test]
fn test_validator_flags_non_maximal_solutions() {
    let market = unlock_scenario(true);
    match validate_solution(&market, &[TransactionId::new(1)], true) {
        Err(Error::NotMaximal(detail)) => {
            assert!(detail.contains("T2"), "should list the admissible id: {detail}");
        }
        other => panic!("expected NotMaximal, got {other:?}"),
    }
}

#[test]
fn test_validator_accepts_the_full_unlock() {
    let market = unlock_scenario(true);
    let executed = [TransactionId::new(1), TransactionId::new(2)];
    let state = validate_solution(&market, &executed, true).unwrap();
    assert_eq!(state.security, vec![1.0, 0.0]);
    assert_eq!(state.currency, vec![-1.0, 2.0]);
    assert_eq!(state.after_conversion, vec![1.0, 2.0]);
}

#[test]
fn test_program_feeds_the_qumo_pipeline() {
    // the settlement IP is an ordinary model: Core A consumes it
    let market = swap_market();
    let model = SettlementProgram::build(&market).into_model();
    let reduction = crate::reduce::reduce_to_qumo(&model, 10.0).unwrap();
    assert_eq!(reduction.num_source_vars(), 1);
    assert!(reduction.target().num_vars() >= 1);
}

#[cfg(feature = "milp-solver")]
mod with_solver {
    use super::*;
    use crate::solvers::MilpSolver;

    #[test]
    fn test_solve_executes_the_swap() {
        let market = swap_market();
        let program = SettlementProgram::build(&market);
        let solution = program.solve(&MilpSolver::new()).unwrap();

        assert_eq!(solution.executed, vec![TransactionId::new(1)]);
        assert!(solution.continuous.is_empty());
        validate_solution(&market, &solution.executed, true).unwrap();
    }

    #[test]
    fn test_solve_without_conversion_settles_one_transaction() {
        let market = unlock_scenario(false);
        let program = SettlementProgram::build(&market);
        let solution = program.solve(&MilpSolver::new()).unwrap();

        assert_eq!(solution.executed, vec![TransactionId::new(1)]);
        validate_solution(&market, &solution.executed, true).unwrap();
    }

    #[test]
    fn test_solve_with_conversion_settles_both() {
        let market = unlock_scenario(true);
        let program = SettlementProgram::build(&market);
        let solution = program.solve(&MilpSolver::new()).unwrap();

        assert_eq!(
            solution.executed,
            vec![TransactionId::new(1), TransactionId::new(2)]
        );
        validate_solution(&market, &solution.executed, true).unwrap();
    }
}
