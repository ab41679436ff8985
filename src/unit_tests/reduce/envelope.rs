use super::*;
use crate::error::Error;
use crate::model::ConstraintSet;
use proptest::prelude::*;

#[test]
fn test_add_and_sub_shift_both_endpoints() {
    let env = Envelope::interval(1.0, 3.0);
    assert_eq!(env + 2.0, Envelope::Box { lower: 3.0, upper: 5.0 });
    let env = Envelope::interval(1.0, 3.0);
    assert_eq!(env - 2.0, Envelope::Box { lower: -1.0, upper: 1.0 });
    assert_eq!(Envelope::Constant(2.0) + 1.0, Envelope::Constant(3.0));
}

#[test]
fn test_mul_by_zero_collapses_to_constant() {
    assert_eq!(Envelope::interval(1.0, 3.0) * 0.0, Envelope::Constant(0.0));
    assert_eq!(Envelope::Constant(7.0) * 0.0, Envelope::Constant(0.0));
}

#[test]
fn test_mul_by_negative_swaps_endpoints() {
    assert_eq!(
        Envelope::interval(1.0, 3.0) * -2.0,
        Envelope::Box { lower: -6.0, upper: -2.0 }
    );
}

#[test]
fn test_infeasible_absorbs_every_operation() {
    let inf = Envelope::<f64>::Infeasible;
    assert_eq!(inf.clone() + 1.0, Envelope::Infeasible);
    assert_eq!(inf.clone() - 1.0, Envelope::Infeasible);
    assert_eq!(inf.clone() * 0.0, Envelope::Infeasible);
    assert_eq!(inf.clone() * -3.0, Envelope::Infeasible);
    assert_eq!(inf.clone().div(2.0).unwrap(), Envelope::Infeasible);
    // absorption beats the division-by-zero check
    assert_eq!(inf.div(0.0).unwrap(), Envelope::Infeasible);
}

#[test]
fn test_div_by_zero_is_an_error() {
    let env = Envelope::interval(1.0, 3.0);
    assert_eq!(env.div(0.0), Err(Error::DivisionByZero));
}

#[test]
fn test_div_by_negative_swaps_endpoints() {
    let env = Envelope::interval(2.0, 4.0);
    assert_eq!(
        env.div(-2.0).unwrap(),
        Envelope::Box { lower: -2.0, upper: -1.0 }
    );
}

#[test]
#[should_panic(expected = "lower <= upper")]
fn test_inverted_interval_construction_panics() {
    Envelope::interval(2.0, 1.0);
}

#[test]
fn test_degenerate_interval_is_allowed_and_distinct_from_constant() {
    let tight = Envelope::interval(2.0, 2.0);
    assert_eq!(tight, Envelope::Box { lower: 2.0, upper: 2.0 });
    assert_ne!(tight, Envelope::Constant(2.0));
}

#[test]
fn test_refine_greater_than() {
    let set = ConstraintSet::GreaterThan(2.0);
    assert_eq!(
        Envelope::Constant(3.0).refine(&set).unwrap(),
        Envelope::Constant(3.0)
    );
    assert_eq!(
        Envelope::Constant(1.0).refine(&set).unwrap(),
        Envelope::Infeasible
    );
    assert_eq!(
        Envelope::interval(3.0, 5.0).refine(&set).unwrap(),
        Envelope::Box { lower: 3.0, upper: 5.0 }
    );
    assert_eq!(
        Envelope::interval(0.0, 1.0).refine(&set).unwrap(),
        Envelope::Infeasible
    );
    assert_eq!(
        Envelope::interval(0.0, 5.0).refine(&set).unwrap(),
        Envelope::Box { lower: 2.0, upper: 5.0 }
    );
}

#[test]
fn test_refine_less_than() {
    let set = ConstraintSet::LessThan(2.0);
    // The constant arm compares against the upper bound.
    assert_eq!(
        Envelope::Constant(2.0).refine(&set).unwrap(),
        Envelope::Constant(2.0)
    );
    assert_eq!(
        Envelope::Constant(3.0).refine(&set).unwrap(),
        Envelope::Infeasible
    );
    assert_eq!(
        Envelope::interval(0.0, 2.0).refine(&set).unwrap(),
        Envelope::Box { lower: 0.0, upper: 2.0 }
    );
    assert_eq!(
        Envelope::interval(3.0, 4.0).refine(&set).unwrap(),
        Envelope::Infeasible
    );
    assert_eq!(
        Envelope::interval(0.0, 5.0).refine(&set).unwrap(),
        Envelope::Box { lower: 0.0, upper: 2.0 }
    );
}

#[test]
fn test_refine_equal_to() {
    let set = ConstraintSet::EqualTo(2.0);
    assert_eq!(
        Envelope::Constant(2.0).refine(&set).unwrap(),
        Envelope::Constant(2.0)
    );
    assert_eq!(
        Envelope::Constant(2.5).refine(&set).unwrap(),
        Envelope::Infeasible
    );
    assert_eq!(
        Envelope::interval(0.0, 5.0).refine(&set).unwrap(),
        Envelope::Constant(2.0)
    );
    assert_eq!(
        Envelope::interval(3.0, 5.0).refine(&set).unwrap(),
        Envelope::Infeasible
    );
}

#[test]
fn test_refine_interval() {
    let set = ConstraintSet::Interval { lower: 1.0, upper: 4.0 };
    assert_eq!(
        Envelope::interval(2.0, 3.0).refine(&set).unwrap(),
        Envelope::Box { lower: 2.0, upper: 3.0 }
    );
    assert_eq!(
        Envelope::interval(5.0, 6.0).refine(&set).unwrap(),
        Envelope::Infeasible
    );
    assert_eq!(
        Envelope::interval(0.0, 6.0).refine(&set).unwrap(),
        Envelope::Box { lower: 1.0, upper: 4.0 }
    );
    assert_eq!(
        Envelope::interval(0.0, 2.0).refine(&set).unwrap(),
        Envelope::Box { lower: 1.0, upper: 2.0 }
    );
    assert_eq!(
        Envelope::Constant(2.0).refine(&set).unwrap(),
        Envelope::Constant(2.0)
    );
    assert_eq!(
        Envelope::Constant(0.0).refine(&set).unwrap(),
        Envelope::Infeasible
    );
}

#[test]
fn test_refine_empty_interval_is_infeasible() {
    let set = ConstraintSet::Interval { lower: 3.0, upper: 1.0 };
    assert_eq!(
        Envelope::interval(0.0, 5.0).refine(&set).unwrap(),
        Envelope::Infeasible
    );
    assert_eq!(
        Envelope::Constant(2.0).refine(&set).unwrap(),
        Envelope::Infeasible
    );
}

#[test]
fn test_refine_semi_sets_are_rejected() {
    let semi = ConstraintSet::Semiinteger { lower: 0.0, upper: 5.0 };
    assert!(matches!(
        Envelope::interval(0.0, 1.0).refine(&semi),
        Err(Error::UnsupportedConstraint(_))
    ));
    let semi = ConstraintSet::Semicontinuous { lower: 0.0, upper: 5.0 };
    assert!(matches!(
        Envelope::Constant(1.0).refine(&semi),
        Err(Error::UnsupportedConstraint(_))
    ));
}

// Strategies over integer-valued floats keep every operation exact, so the
// algebraic laws can be checked with plain equality.

fn scalar() -> impl Strategy<Value = f64> {
    (-50i32..=50).prop_map(f64::from)
}

fn envelope() -> impl Strategy<Value = Envelope<f64>> {
    prop_oneof![
        Just(Envelope::Infeasible),
        scalar().prop_map(Envelope::Constant),
        (scalar(), scalar()).prop_map(|(a, b)| {
            if a <= b {
                Envelope::interval(a, b)
            } else {
                Envelope::interval(b, a)
            }
        }),
    ]
}

fn constraint_set() -> impl Strategy<Value = ConstraintSet<f64>> {
    prop_oneof![
        scalar().prop_map(ConstraintSet::GreaterThan),
        scalar().prop_map(ConstraintSet::LessThan),
        scalar().prop_map(ConstraintSet::EqualTo),
        (scalar(), scalar()).prop_map(|(a, b)| ConstraintSet::Interval {
            lower: a.min(b),
            upper: a.max(b),
        }),
    ]
}

/// Points admitted by an envelope, for the subset law.
fn contains(env: &Envelope<f64>, point: f64) -> bool {
    match env {
        Envelope::Infeasible => false,
        Envelope::Constant(v) => *v == point,
        Envelope::Box { lower, upper } => *lower <= point && point <= *upper,
    }
}

proptest! {
    #[test]
    fn prop_shift_composes(env in envelope(), a in scalar(), b in scalar()) {
        prop_assert_eq!((env.clone() + a) + b, env + (a + b));
    }

    #[test]
    fn prop_scale_composes(env in envelope(), a in scalar(), b in scalar()) {
        prop_assert_eq!((env.clone() * a) * b, env * (a * b));
    }

    #[test]
    fn prop_scale_by_zero_is_constant_zero(env in envelope()) {
        let expected = match env {
            Envelope::Infeasible => Envelope::Infeasible,
            _ => Envelope::Constant(0.0),
        };
        prop_assert_eq!(env * 0.0, expected);
    }

    #[test]
    fn prop_refine_is_idempotent(env in envelope(), set in constraint_set()) {
        let once = env.refine(&set).unwrap();
        let twice = once.clone().refine(&set).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_refine_admits_no_new_points(env in envelope(), set in constraint_set(), point in scalar()) {
        let refined = env.clone().refine(&set).unwrap();
        if contains(&refined, point) {
            prop_assert!(contains(&env, point), "refinement admitted a new point");
        }
    }
}
