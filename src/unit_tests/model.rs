use super::*;
use crate::types::Direction;

fn toy_model() -> Model<f64> {
    Model::new(Direction::Maximize)
}

#[test]
fn test_variable_ids_are_dense_and_one_based() {
    let mut model = toy_model();
    let x = model.add_binary_variable("x");
    let y = model.add_variable("y", Some(0.0), Some(2.0));
    assert_eq!(x.get(), 1);
    assert_eq!(y.get(), 2);
    assert_eq!(y.index(), 1);
    assert_eq!(model.num_variables(), 2);
}

#[test]
fn test_variable_capabilities() {
    let mut model = toy_model();
    let x = model.add_binary_variable("x");
    let y = model.add_variable("y", Some(-1.0), None);
    model.fix_variable(y, 0.5);

    assert!(model.variable(x).is_binary());
    assert!(!model.variable(x).is_fixed());
    assert!(model.variable(y).is_fixed());
    assert_eq!(model.variable(y).fix_value(), Some(&0.5));
    assert!(model.variable(y).has_lower_bound());
    assert!(!model.variable(y).has_upper_bound());
    assert_eq!(model.variable(y).name(), "y");
}

#[test]
#[should_panic(expected = "lower <= upper")]
fn test_inverted_bounds_are_rejected() {
    let mut model = toy_model();
    model.add_variable("bad", Some(2.0), Some(1.0));
}

#[test]
fn test_constraint_handles_survive_removal() {
    let mut model = toy_model();
    let x = model.add_binary_variable("x");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);

    let a = model.add_constraint("a", f.clone(), ConstraintSet::LessThan(1.0));
    let b = model.add_constraint("b", f.clone(), ConstraintSet::GreaterThan(0.0));
    let c = model.add_constraint("c", f, ConstraintSet::EqualTo(1.0));

    let removed = model.remove_constraint(b).unwrap();
    assert_eq!(removed.name, "b");
    assert!(model.remove_constraint(b).is_none(), "double removal is a no-op");
    assert!(model.constraint(a).is_some());
    assert!(model.constraint(c).is_some());
    assert_eq!(model.num_constraints(), 2);
}

#[test]
fn test_constraint_iteration_is_insertion_ordered() {
    let mut model = toy_model();
    let x = model.add_binary_variable("x");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);

    model.add_constraint("first", f.clone(), ConstraintSet::LessThan(1.0));
    let middle = model.add_constraint("second", f.clone(), ConstraintSet::LessThan(2.0));
    model.add_constraint("third", f.clone(), ConstraintSet::LessThan(3.0));
    model.remove_constraint(middle);
    model.add_constraint("fourth", f, ConstraintSet::LessThan(4.0));

    let names: Vec<&str> = model.constraints().map(|(_, c)| c.name.as_str()).collect();
    assert_eq!(names, vec!["first", "third", "fourth"]);
}

#[test]
fn test_constraint_set_kinds() {
    assert_eq!(ConstraintSet::GreaterThan(0.0).kind(), "GreaterThan");
    assert_eq!(
        ConstraintSet::Semicontinuous {
            lower: 1.0,
            upper: 2.0
        }
        .kind(),
        "Semicontinuous"
    );
}

#[test]
fn test_objective_replacement() {
    let mut model = toy_model();
    let x = model.add_binary_variable("x");
    let mut objective = QuadExpr::new();
    objective.add_linear_term(x, 3.0);
    model.set_objective(objective);
    assert_eq!(model.objective().affine().coefficient(x), 3.0);
}
