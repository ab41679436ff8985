use super::*;
use crate::error::Error;
use crate::model::{AffineExpr, ConstraintSet, Model, QuadExpr};
use crate::types::{Direction, Tolerance};

/// maximize 2x + y subject to x + y = 1, both binary.
fn equality_model() -> Model<f64> {
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_binary_variable("x");
    let y = model.add_binary_variable("y");
    let mut objective = QuadExpr::new();
    objective.add_linear_term(x, 2.0);
    objective.add_linear_term(y, 1.0);
    model.set_objective(objective);
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    f.add_term(y, 1.0);
    model.add_constraint("pick", f, ConstraintSet::EqualTo(1.0));
    model
}

#[test]
fn test_negative_weight_is_rejected() {
    let mut model = equality_model();
    assert!(matches!(
        to_penalties(&mut model, -1.0),
        Err(Error::InvalidPenalty(_))
    ));
}

#[test]
fn test_zero_weight_drops_constraints_and_keeps_objective() {
    let mut model = equality_model();
    let objective_before = model.objective().clone();
    to_penalties(&mut model, 0.0).unwrap();
    assert_eq!(model.num_constraints(), 0);
    assert_eq!(model.objective(), &objective_before);
}

#[test]
fn test_penalised_objective_agrees_at_feasible_points() {
    let model = equality_model();
    let penalised = with_penalties(&model, 3.0).unwrap();
    assert_eq!(penalised.num_constraints(), 0);

    // feasible points of x + y = 1
    for assignment in [[1.0, 0.0], [0.0, 1.0]] {
        assert!(model
            .objective()
            .evaluate(&assignment)
            .approx_eq(&penalised.objective().evaluate(&assignment)));
    }
}

#[test]
fn test_violations_hurt_a_maximising_objective() {
    let model = equality_model();
    let penalised = with_penalties(&model, 3.0).unwrap();

    // x + y = 2 violates the constraint by 1, so 3·1² is subtracted
    let violated = [1.0, 1.0];
    let clean = model.objective().evaluate(&violated);
    assert!(penalised
        .objective()
        .evaluate(&violated)
        .approx_eq(&(clean - 3.0)));
}

#[test]
fn test_violations_hurt_a_minimising_objective() {
    let mut model = equality_model();
    // same constraints, but flip the sense
    let rebuilt = {
        let mut m = Model::new(Direction::Minimize);
        let x = m.add_binary_variable("x");
        let y = m.add_binary_variable("y");
        m.set_objective(model.objective().clone());
        let mut f = AffineExpr::new();
        f.add_term(x, 1.0);
        f.add_term(y, 1.0);
        m.add_constraint("pick", f, ConstraintSet::EqualTo(1.0));
        m
    };
    model = rebuilt;

    to_penalties(&mut model, 3.0).unwrap();
    // minimisation penalises upward: +3·1² at the violated point
    assert!(model
        .objective()
        .evaluate(&[1.0, 1.0])
        .approx_eq(&(3.0 + 3.0)));
}

#[test]
fn test_residual_square_expansion() {
    // single constraint x + 2y = 3, weight 1, minimising:
    // (x + 2y − 3)² = x² + 4xy + 4y² − 6x − 12y + 9
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_binary_variable("x");
    let y = model.add_binary_variable("y");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    f.add_term(y, 2.0);
    model.add_constraint("mix", f, ConstraintSet::EqualTo(3.0));

    to_penalties(&mut model, 1.0).unwrap();
    let objective = model.objective();
    assert!(objective.affine().constant().approx_eq(&9.0));
    assert!(objective.affine().coefficient(x).approx_eq(&-6.0));
    assert!(objective.affine().coefficient(y).approx_eq(&-12.0));

    let quad = objective.quadratic();
    assert_eq!(quad.len(), 3);
    assert_eq!(quad[0], ((x, x), 1.0));
    assert_eq!(quad[1], ((x, y), 4.0));
    assert_eq!(quad[2], ((y, y), 4.0));
}

#[test]
fn test_folding_preserves_constraint_order() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_binary_variable("x");
    let y = model.add_binary_variable("y");
    let mut fx = AffineExpr::new();
    fx.add_term(x, 1.0);
    let mut fy = AffineExpr::new();
    fy.add_term(y, 1.0);
    model.add_constraint("first", fy, ConstraintSet::EqualTo(1.0));
    model.add_constraint("second", fx, ConstraintSet::EqualTo(1.0));

    to_penalties(&mut model, 2.0).unwrap();
    // diagonal terms appear in constraint order: y² before x²
    let keys: Vec<_> = model.objective().quadratic().iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![(y, y), (x, x)]);
}

#[test]
fn test_non_equality_shapes_are_a_hard_error() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_binary_variable("x");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    model.add_constraint("loose", f, ConstraintSet::LessThan(1.0));

    assert!(matches!(
        to_penalties(&mut model, 1.0),
        Err(Error::UnsupportedConstraint(_))
    ));
}
