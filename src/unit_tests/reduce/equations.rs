use super::*;
use crate::error::Error;
use crate::model::{AffineExpr, ConstraintSet, Model};
use crate::reduce::boxify;
use crate::types::{Direction, Tolerance};

fn boxed_model() -> Model<f64> {
    // x + y ≤ 1 and x − y = 0 over binaries.
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_binary_variable("x");
    let y = model.add_binary_variable("y");
    let mut sum = AffineExpr::new();
    sum.add_term(x, 1.0);
    sum.add_term(y, 1.0);
    model.add_constraint("cap", sum, ConstraintSet::LessThan(1.0));
    let mut diff = AffineExpr::new();
    diff.add_term(x, 1.0);
    diff.add_term(y, -1.0);
    model.add_constraint("tie", diff, ConstraintSet::EqualTo(0.0));
    boxify(&mut model).unwrap();
    model
}

#[test]
fn test_slack_has_unit_bounds_and_unit_coefficient() {
    let mut model = boxed_model();
    let vars_before = model.num_variables();
    to_equations(&mut model).unwrap();

    assert_eq!(model.num_variables(), vars_before + 1);
    let (slack_id, slack) = model
        .variables()
        .find(|(_, v)| v.name().starts_with("slack"))
        .unwrap();
    assert_eq!(slack.name(), "slack[1]");
    assert_eq!(slack.lower_bound(), Some(&0.0));
    assert_eq!(slack.upper_bound(), Some(&1.0));
    assert!(!slack.is_binary());

    // the slack appears with coefficient +1 in exactly one equality
    let carriers: Vec<_> = model
        .constraints()
        .filter(|(_, c)| !c.func.coefficient(slack_id).approx_zero())
        .collect();
    assert_eq!(carriers.len(), 1);
    let (_, carrier) = carriers[0];
    assert_eq!(carrier.name, "cap");
    assert_eq!(carrier.func.coefficient(slack_id), 1.0);
    assert!(matches!(carrier.set, ConstraintSet::EqualTo(_)));
}

#[test]
fn test_every_constraint_becomes_an_equality() {
    let mut model = boxed_model();
    to_equations(&mut model).unwrap();
    for (_, constraint) in model.constraints() {
        assert!(
            matches!(constraint.set, ConstraintSet::EqualTo(_)),
            "`{}` is still {}",
            constraint.name,
            constraint.set.kind()
        );
    }
}

#[test]
fn test_interval_collapses_to_upper_form() {
    // x ∈ [0, 1], boxified x ∈ [0, 1] gains δ with x + δ = 1.
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_binary_variable("x");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    model.add_constraint(
        "band",
        f,
        ConstraintSet::Interval { lower: 0.0, upper: 1.0 },
    );

    to_equations(&mut model).unwrap();
    let (_, constraint) = model.constraints().next().unwrap();
    assert_eq!(constraint.set, ConstraintSet::EqualTo(1.0));
}

#[test]
fn test_equalities_pass_through_untouched() {
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_binary_variable("x");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    model.add_constraint("pin", f.clone(), ConstraintSet::EqualTo(1.0));

    to_equations(&mut model).unwrap();
    assert_eq!(model.num_variables(), 1, "no slack for an equality");
    let (_, constraint) = model.constraints().next().unwrap();
    assert_eq!(constraint.func, f);
}

#[test]
fn test_unboxed_shapes_are_a_hard_error() {
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_binary_variable("x");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    model.add_constraint("raw", f, ConstraintSet::GreaterThan(0.0));

    assert!(matches!(
        to_equations(&mut model),
        Err(Error::UnsupportedConstraint(_))
    ));
}

#[test]
fn test_non_unit_interval_is_a_hard_error() {
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_binary_variable("x");
    let mut f = AffineExpr::new();
    f.add_term(x, 1.0);
    model.add_constraint(
        "wide",
        f,
        ConstraintSet::Interval { lower: 0.0, upper: 2.0 },
    );

    assert!(matches!(
        to_equations(&mut model),
        Err(Error::UnsupportedConstraint(_))
    ));
}

#[test]
fn test_slack_numbering_follows_iteration_order() {
    let mut model = Model::new(Direction::Maximize);
    let x = model.add_binary_variable("x");
    let y = model.add_binary_variable("y");
    for (i, var) in [x, y].into_iter().enumerate() {
        let mut f = AffineExpr::new();
        f.add_term(var, 1.0);
        model.add_constraint(
            format!("band{}", i + 1),
            f,
            ConstraintSet::Interval { lower: 0.0, upper: 1.0 },
        );
    }

    to_equations(&mut model).unwrap();
    let names: Vec<String> = model
        .variables()
        .filter(|(_, v)| v.name().starts_with("slack"))
        .map(|(_, v)| v.name().to_string())
        .collect();
    assert_eq!(names, vec!["slack[1]", "slack[2]"]);
}
