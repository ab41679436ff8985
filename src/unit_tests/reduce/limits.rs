use super::*;
use crate::error::Error;
use crate::model::{AffineExpr, Model};
use crate::reduce::Envelope;
use crate::types::Direction;

#[test]
fn test_bounded_variables_pair_by_sign() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", Some(0.0), Some(10.0));
    let y = model.add_variable("y", Some(-2.0), Some(4.0));

    let mut f = AffineExpr::with_constant(1.0);
    f.add_term(x, 2.0);
    f.add_term(y, -1.0);

    // 2x ∈ [0, 20], −y ∈ [−4, 2], +1
    assert_eq!(
        infer_limits(&model, &f).unwrap(),
        Envelope::Box { lower: -3.0, upper: 23.0 }
    );
}

#[test]
fn test_binary_contributes_coefficient_to_one_side() {
    let mut model = Model::new(Direction::Minimize);
    let a = model.add_binary_variable("a");
    let b = model.add_binary_variable("b");

    let mut f = AffineExpr::new();
    f.add_term(a, 3.0);
    f.add_term(b, -2.0);

    assert_eq!(
        infer_limits(&model, &f).unwrap(),
        Envelope::Box { lower: -2.0, upper: 3.0 }
    );
}

#[test]
fn test_fixed_variable_contributes_to_both_sides() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("x", None, None);
    model.fix_variable(x, 2.5);

    let mut f = AffineExpr::new();
    f.add_term(x, 2.0);

    assert_eq!(
        infer_limits(&model, &f).unwrap(),
        Envelope::Box { lower: 5.0, upper: 5.0 }
    );
}

#[test]
fn test_zero_coefficient_ignores_unbounded_variable() {
    let mut model = Model::new(Direction::Minimize);
    let free = model.add_variable("free", None, None);
    let mut f = AffineExpr::with_constant(1.0);
    f.add_term(free, 0.0);

    assert_eq!(
        infer_limits(&model, &f).unwrap(),
        Envelope::Box { lower: 1.0, upper: 1.0 }
    );
}

#[test]
fn test_one_sided_bound_is_unbounded() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_variable("loose", Some(0.0), None);
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);

    match infer_limits(&model, &f) {
        Err(Error::UnboundedExpression(detail)) => {
            assert!(detail.contains("loose"), "error should name the variable: {detail}");
        }
        other => panic!("expected UnboundedExpression, got {other:?}"),
    }
}

#[test]
fn test_constant_expression_yields_degenerate_box() {
    let model = Model::<f64>::new(Direction::Minimize);
    let f = AffineExpr::with_constant(7.0);
    assert_eq!(
        infer_limits(&model, &f).unwrap(),
        Envelope::Box { lower: 7.0, upper: 7.0 }
    );
}
