use super::*;
use crate::error::Error;
use crate::model::{AffineExpr, ConstraintSet, Model, QuadExpr};
use crate::types::Direction;

fn knapsack_pair() -> (Model<f64>, Vec<crate::model::VariableId>) {
    // maximize x0 + 2·x1 subject to x0 + x1 ≤ 1, both binary
    let mut model = Model::new(Direction::Maximize);
    let x0 = model.add_binary_variable("x0");
    let x1 = model.add_binary_variable("x1");
    let mut cap = AffineExpr::new();
    cap.add_term(x0, 1.0);
    cap.add_term(x1, 1.0);
    model.add_constraint("cap", cap, ConstraintSet::LessThan(1.0));
    let mut objective = AffineExpr::new();
    objective.add_term(x0, 1.0);
    objective.add_term(x1, 2.0);
    model.set_objective(QuadExpr::from(objective));
    (model, vec![x0, x1])
}

#[test]
fn test_solve_binary_maximisation() {
    let (model, vars) = knapsack_pair();
    let assignment = MilpSolver::new().solve(&model).unwrap();
    assert_eq!(assignment[vars[0].index()].round(), 0.0);
    assert_eq!(assignment[vars[1].index()].round(), 1.0);
}

#[test]
fn test_solve_respects_equalities_and_intervals() {
    // minimize y subject to x + y = 2 and y ∈ [0.5, 1.5], x ∈ [0, 2]
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", Some(0.0), Some(2.0));
    let y = model.add_variable("y", Some(0.0), Some(2.0));
    let mut sum = AffineExpr::new();
    sum.add_term(x, 1.0);
    sum.add_term(y, 1.0);
    model.add_constraint("total", sum, ConstraintSet::EqualTo(2.0));
    let mut band = AffineExpr::new();
    band.add_term(y, 1.0);
    model.add_constraint(
        "band",
        band,
        ConstraintSet::Interval { lower: 0.5, upper: 1.5 },
    );
    let mut objective = AffineExpr::new();
    objective.add_term(y, 1.0);
    model.set_objective(QuadExpr::from(objective));

    let assignment = MilpSolver::new().solve(&model).unwrap();
    assert!((assignment[y.index()] - 0.5).abs() < 1e-6);
    assert!((assignment[x.index()] - 1.5).abs() < 1e-6);
}

#[test]
fn test_solve_honours_fixed_variables() {
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_variable("x", Some(0.0), Some(10.0));
    model.fix_variable(x, 3.0);
    let mut objective = AffineExpr::new();
    objective.add_term(x, 1.0);
    model.set_objective(QuadExpr::from(objective));

    let assignment = MilpSolver::new().solve(&model).unwrap();
    assert!((assignment[x.index()] - 3.0).abs() < 1e-6);
}

#[test]
fn test_infeasible_model_is_a_solver_failure() {
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_binary_variable("x");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    model.add_constraint("impossible", f, ConstraintSet::GreaterThan(2.0));

    assert!(matches!(
        MilpSolver::new().solve(&model),
        Err(Error::SolverFailure(_))
    ));
}

#[test]
fn test_quadratic_objective_is_rejected() {
    let mut model = Model::<f64>::new(Direction::Minimize);
    let x = model.add_binary_variable("x");
    let mut objective = QuadExpr::new();
    objective.add_quadratic_term(x, x, 1.0);
    model.set_objective(objective);

    assert!(matches!(
        MilpSolver::new().solve(&model),
        Err(Error::UnsupportedConstraint(_))
    ));
}

#[test]
fn test_semiinteger_is_rejected() {
    let mut model = Model::<f64>::new(Direction::Minimize);
    let x = model.add_variable("x", Some(0.0), Some(5.0));
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    model.add_constraint(
        "semi",
        f,
        ConstraintSet::Semiinteger { lower: 1.0, upper: 5.0 },
    );

    assert!(matches!(
        MilpSolver::new().solve(&model),
        Err(Error::UnsupportedConstraint(_))
    ));
}

#[test]
fn test_empty_model_solves_trivially() {
    let model = Model::<f64>::new(Direction::Minimize);
    let assignment = MilpSolver::new().solve(&model).unwrap();
    assert!(assignment.is_empty());
}
