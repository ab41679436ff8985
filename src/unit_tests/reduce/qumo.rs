use super::*;
use crate::model::{AffineExpr, ConstraintSet, Model, QuadExpr};
use crate::reduce::{reduce_to_qumo, QumoReduction};
use crate::types::{Direction, Tolerance};

#[test]
fn test_binary_diagonal_folds_into_linear_vector() {
    // 3x₁² + 2x₁x₂ over binaries: x₁² = x₁, so c = [3, 0] and Q holds
    // only the symmetric cross pair.
    let mut model = Model::new(Direction::Minimize);
    let x1 = model.add_binary_variable("x1");
    let x2 = model.add_binary_variable("x2");
    let mut objective = QuadExpr::new();
    objective.add_quadratic_term(x1, x1, 3.0);
    objective.add_quadratic_term(x1, x2, 2.0);
    model.set_objective(objective);

    let qumo = extract_qumo(&model).unwrap();
    assert_eq!(qumo.linear(), &[3.0, 0.0]);
    assert_eq!(qumo.matrix(), &[(0, 1, 2.0), (1, 0, 2.0)]);
}

#[test]
fn test_continuous_diagonal_doubles_under_half_convention() {
    // x² with x continuous in [0, 1]: Q gets the pair twice, so the
    // diagonal reads 2 and ½·2·x² recovers x².
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", Some(0.0), Some(1.0));
    let mut objective = QuadExpr::new();
    objective.add_quadratic_term(x, x, 1.0);
    model.set_objective(objective);

    let qumo = extract_qumo(&model).unwrap();
    assert_eq!(qumo.matrix(), &[(0, 0, 2.0)]);
    assert!(qumo.evaluate(&[0.5]).approx_eq(&0.25));
}

#[test]
fn test_linear_and_constant_parts() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_binary_variable("x");
    let y = model.add_variable("y", Some(0.0), Some(1.0));
    let mut objective = QuadExpr::new();
    objective.add_linear_term(y, -1.5);
    objective.add_linear_term(x, 2.0);
    objective.add_constant(4.0);
    model.set_objective(objective);

    let qumo = extract_qumo(&model).unwrap();
    assert_eq!(qumo.num_vars(), 2);
    assert_eq!(qumo.linear(), &[2.0, -1.5]);
    assert_eq!(*qumo.constant(), 4.0);
    assert!(qumo.matrix().is_empty());
}

#[test]
fn test_binaries_are_sorted_and_names_ordered() {
    let mut model = Model::new(Direction::Minimize);
    model.add_variable("a", Some(0.0), Some(1.0));
    model.add_binary_variable("b");
    model.add_variable("c", Some(0.0), Some(1.0));
    model.add_binary_variable("d");

    let qumo = extract_qumo(&model).unwrap();
    assert_eq!(qumo.binaries(), &[1, 3]);
    assert_eq!(qumo.names(), &["a", "b", "c", "d"]);
}

#[test]
fn test_duplicate_entries_are_summed() {
    // x·y added twice lands in one normalised slot and one symmetric pair
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", Some(0.0), Some(1.0));
    let y = model.add_variable("y", Some(0.0), Some(1.0));
    let mut objective = QuadExpr::new();
    objective.add_quadratic_term(x, y, 1.0);
    objective.add_quadratic_term(y, x, 2.0);
    model.set_objective(objective);

    let qumo = extract_qumo(&model).unwrap();
    assert_eq!(qumo.matrix(), &[(0, 1, 3.0), (1, 0, 3.0)]);
}

#[test]
fn test_evaluation_recovers_the_quadratic_objective() {
    // mixed binary/continuous objective; ½xᵀQx + cᵀx + k must agree with
    // the model objective on arbitrary continuous assignments
    let mut model = Model::new(Direction::Minimize);
    let b = model.add_binary_variable("b");
    let u = model.add_variable("u", Some(0.0), Some(1.0));
    let v = model.add_variable("v", Some(0.0), Some(1.0));
    let mut objective = QuadExpr::new();
    objective.add_linear_term(b, 1.5);
    objective.add_linear_term(v, -0.5);
    objective.add_quadratic_term(u, u, 2.0);
    objective.add_quadratic_term(u, v, -1.0);
    objective.add_quadratic_term(b, v, 0.75);
    objective.add_constant(0.25);
    model.set_objective(objective.clone());

    let qumo = extract_qumo(&model).unwrap();
    for assignment in [
        [0.0, 0.0, 0.0],
        [1.0, 0.5, 0.25],
        [0.0, 1.0, 1.0],
        [1.0, 0.125, 0.875],
    ] {
        assert!(
            qumo.evaluate(&assignment).approx_eq(&objective.evaluate(&assignment)),
            "mismatch at {assignment:?}"
        );
    }
}

#[test]
fn test_binary_diagonal_linearisation_preserves_values() {
    // 3x² over a binary x agrees with the extracted instance on both
    // points of {0, 1}
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_binary_variable("x");
    let mut objective = QuadExpr::new();
    objective.add_quadratic_term(x, x, 3.0);
    model.set_objective(objective.clone());

    let qumo = extract_qumo(&model).unwrap();
    for point in [0.0, 1.0] {
        assert!(qumo.evaluate(&[point]).approx_eq(&objective.evaluate(&[point])));
    }
}

#[test]
#[should_panic(expected = "unconstrained")]
fn test_extraction_requires_an_unconstrained_model() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_binary_variable("x");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    model.add_constraint("left", f, ConstraintSet::LessThan(1.0));
    let _ = extract_qumo(&model);
}

#[test]
fn test_pipeline_strips_slack_coordinates() {
    // maximize x + y subject to x + y ≤ 1 introduces one slack; the
    // reduction projects target assignments back to the two source vars.
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_binary_variable("x");
    let y = model.add_binary_variable("y");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    f.add_term(y, 1.0);
    model.set_objective(QuadExpr::from(f.clone()));
    model.add_constraint("cap", f, ConstraintSet::LessThan(1.0));

    let reduction: QumoReduction<f64> = reduce_to_qumo(&model, 5.0).unwrap();
    assert_eq!(reduction.num_source_vars(), 2);
    assert_eq!(reduction.target().num_vars(), 3);
    assert_eq!(reduction.target().binaries(), &[0, 1]);
    assert_eq!(
        reduction.extract_solution(&[1.0, 0.0, 0.0]),
        vec![1.0, 0.0]
    );

    // the original model still has its constraint
    assert_eq!(model.num_constraints(), 1);
}

#[test]
fn test_pipeline_penalises_violations() {
    // after the full pipeline the penalised objective prefers feasible
    // points of x + y ≤ 1 over the violating corner
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_binary_variable("x");
    let y = model.add_binary_variable("y");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    f.add_term(y, 1.0);
    model.set_objective(QuadExpr::from(f.clone()));
    model.add_constraint("cap", f, ConstraintSet::LessThan(1.0));

    let qumo = reduce_to_qumo(&model, 10.0).unwrap().into_target();
    // slack = 0 makes [1, 1, 0] violate x + y + δ = 1 by 1
    let violating = qumo.evaluate(&[1.0, 1.0, 0.0]);
    let feasible = qumo.evaluate(&[1.0, 0.0, 0.0]);
    assert!(feasible > violating);
}
