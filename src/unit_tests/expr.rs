use super::*;
use crate::model::{Model, VariableId};
use crate::types::Direction;

fn three_vars() -> (Model<f64>, VariableId, VariableId, VariableId) {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_binary_variable("x");
    let y = model.add_binary_variable("y");
    let z = model.add_binary_variable("z");
    (model, x, y, z)
}

#[test]
fn test_affine_terms_keep_insertion_order() {
    let (_, x, y, z) = three_vars();
    let mut f = AffineExpr::new();
    f.add_term(z, 1.0);
    f.add_term(x, 2.0);
    f.add_term(y, 3.0);

    let order: Vec<VariableId> = f.terms().iter().map(|(v, _)| *v).collect();
    assert_eq!(order, vec![z, x, y]);
}

#[test]
fn test_affine_duplicate_add_folds_in_place() {
    let (_, x, y, _) = three_vars();
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    f.add_term(y, 1.0);
    f.add_term(x, 2.5);

    assert_eq!(f.terms().len(), 2);
    assert_eq!(f.coefficient(x), 3.5);
    assert_eq!(f.terms()[0].0, x, "folding must not move the slot");
}

#[test]
fn test_affine_absent_coefficient_is_zero() {
    let (_, x, y, _) = three_vars();
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    assert_eq!(f.coefficient(y), 0.0);
}

#[test]
fn test_affine_divide_by() {
    let (_, x, _, _) = three_vars();
    let mut f = AffineExpr::with_constant(4.0);
    f.add_term(x, 2.0);
    f.divide_by(&2.0);
    assert_eq!(*f.constant(), 2.0);
    assert_eq!(f.coefficient(x), 1.0);
}

#[test]
fn test_affine_evaluate() {
    let (_, x, y, _) = three_vars();
    let mut f = AffineExpr::with_constant(1.0);
    f.add_term(x, 2.0);
    f.add_term(y, -1.0);
    assert_eq!(f.evaluate(&[1.0, 1.0, 0.0]), 2.0);
}

#[test]
fn test_quadratic_pair_keys_are_normalised() {
    let (_, x, y, _) = three_vars();
    let mut q = QuadExpr::new();
    q.add_quadratic_term(y, x, 2.0);
    q.add_quadratic_term(x, y, 3.0);

    assert_eq!(q.quadratic().len(), 1);
    let ((a, b), coef) = &q.quadratic()[0];
    assert_eq!((*a, *b), (x, y));
    assert_eq!(*coef, 5.0);
}

#[test]
fn test_quadratic_diagonal_is_permitted() {
    let (_, x, _, _) = three_vars();
    let mut q = QuadExpr::new();
    q.add_quadratic_term(x, x, 4.0);
    assert_eq!(q.quadratic()[0].0, (x, x));
}

#[test]
fn test_quadratic_evaluate() {
    let (_, x, y, _) = three_vars();
    let mut q = QuadExpr::new();
    q.add_linear_term(x, 1.0);
    q.add_quadratic_term(x, y, 2.0);
    q.add_constant(0.5);
    // 1·2 + 2·2·3 + 0.5
    assert_eq!(q.evaluate(&[2.0, 3.0, 0.0]), 14.5);
}
