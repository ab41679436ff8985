use super::*;

#[test]
fn test_integer_tolerance_is_exact() {
    assert!(0i64.approx_zero());
    assert!(!1i64.approx_zero());
    assert!(5i32.approx_eq(&5));
    assert!(!5i32.approx_eq(&6));
}

#[test]
fn test_float_tolerance_absolute() {
    assert!(0.0f64.approx_zero());
    assert!(1e-13f64.approx_zero());
    assert!(!1e-6f64.approx_zero());
}

#[test]
fn test_float_tolerance_relative() {
    let a = 1e9f64;
    let b = a * (1.0 + 1e-13);
    assert!(a.approx_eq(&b));
    assert!(!1.0f64.approx_eq(&1.0001));
}

#[test]
fn test_direction_roundtrips_through_serde() {
    let json = serde_json::to_string(&Direction::Maximize).unwrap();
    let back: Direction = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Direction::Maximize);
}
