use super::*;
use crate::error::Error;
use crate::model::{AffineExpr, ConstraintSet, Model};
use crate::testing::random_bounded_model;
use crate::types::{Direction, Tolerance};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_boxify_bounded_inequality() {
    // x ∈ [0, 10], y ∈ [−2, 4], constraint 2x − y + 1 ≤ 5.
    // Envelope of the expression: [−3, 23], clamped to [−3, 5].
    // Shifting out the constant gives [−4, 4], range 8.
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", Some(0.0), Some(10.0));
    let y = model.add_variable("y", Some(-2.0), Some(4.0));
    let mut f = AffineExpr::with_constant(1.0);
    f.add_term(x, 2.0);
    f.add_term(y, -1.0);
    model.add_constraint("cap", f, ConstraintSet::LessThan(5.0));

    boxify(&mut model).unwrap();

    let (_, constraint) = model.constraints().next().unwrap();
    assert_eq!(constraint.name, "cap");
    assert!(constraint.func.constant().approx_zero());
    assert!(constraint.func.coefficient(x).approx_eq(&0.25));
    assert!(constraint.func.coefficient(y).approx_eq(&-0.125));
    match &constraint.set {
        ConstraintSet::Interval { lower, upper } => {
            assert!(lower.approx_eq(&-0.5));
            assert!(upper.approx_eq(&0.5));
        }
        other => panic!("expected an interval, got {}", other.kind()),
    }
}

#[test]
fn test_boxify_unit_range_postcondition() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut model = random_bounded_model(&mut rng, 4, 4, 8);
    boxify(&mut model).unwrap();

    for (_, constraint) in model.constraints() {
        assert!(constraint.func.constant().approx_zero());
        match &constraint.set {
            ConstraintSet::EqualTo(_) => {}
            ConstraintSet::Interval { lower, upper } => {
                let range: f64 = upper - lower;
                assert!(range.approx_eq(&1.0), "range was {range}");
            }
            other => panic!("unexpected shape {} after boxify", other.kind()),
        }
    }
}

#[test]
fn test_boxify_detects_infeasibility() {
    // x ∈ [0, 1], constraint x ≥ 2.
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", Some(0.0), Some(1.0));
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    model.add_constraint("reach", f, ConstraintSet::GreaterThan(2.0));

    match boxify(&mut model) {
        Err(Error::ModelInfeasible(detail)) => {
            assert!(detail.contains("reach"), "error should name the constraint: {detail}");
        }
        other => panic!("expected ModelInfeasible, got {other:?}"),
    }
}

#[test]
fn test_boxify_equality_folds_constant_into_rhs() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", Some(0.0), Some(10.0));
    let mut f = AffineExpr::with_constant(3.0);
    f.add_term(x, 2.0);
    model.add_constraint("pin", f, ConstraintSet::EqualTo(7.0));

    boxify(&mut model).unwrap();

    let (_, constraint) = model.constraints().next().unwrap();
    assert_eq!(constraint.name, "pin");
    assert!(constraint.func.constant().approx_zero());
    assert_eq!(constraint.func.coefficient(x), 2.0);
    assert_eq!(constraint.set, ConstraintSet::EqualTo(4.0));
}

#[test]
fn test_boxify_pinned_expression_keeps_its_terms() {
    // Every variable fixed: the expression is provably constant. The
    // variable terms survive; only the constant moves to the right.
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", None, None);
    model.fix_variable(x, 2.0);
    let mut f = AffineExpr::with_constant(1.0);
    f.add_term(x, 3.0);
    model.add_constraint("frozen", f, ConstraintSet::LessThan(10.0));

    boxify(&mut model).unwrap();

    let (_, constraint) = model.constraints().next().unwrap();
    assert_eq!(constraint.func.coefficient(x), 3.0);
    assert!(constraint.func.constant().approx_zero());
    // envelope is the single point 7; minus the constant 1 gives rhs 6
    assert_eq!(constraint.set, ConstraintSet::EqualTo(6.0));
}

#[test]
fn test_boxify_rejects_semicontinuous() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", Some(0.0), Some(1.0));
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    model.add_constraint(
        "semi",
        f,
        ConstraintSet::Semicontinuous { lower: 1.0, upper: 2.0 },
    );

    assert!(matches!(
        boxify(&mut model),
        Err(Error::UnsupportedConstraint(_))
    ));
}

#[test]
fn test_boxified_leaves_the_original_untouched() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", Some(0.0), Some(1.0));
    let mut f = AffineExpr::new();
    f.add_term(x, 2.0);
    model.add_constraint("c", f, ConstraintSet::LessThan(1.0));

    let boxed = boxified(&model).unwrap();
    assert_ne!(boxed, model);
    let (_, original) = model.constraints().next().unwrap();
    assert_eq!(original.set, ConstraintSet::LessThan(1.0));
}
