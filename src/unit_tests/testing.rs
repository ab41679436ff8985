use super::*;
use crate::market::Market;
use crate::reduce::reduce_to_qumo;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_generated_scenarios_validate_and_assemble() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        let scenario = random_scenario(&mut rng, 5, 8);
        assert!(scenario.validate().is_ok());
        let market = Market::<f64>::from_scenario(&scenario).unwrap();
        assert_eq!(market.num_parties(), 5);
        assert_eq!(market.num_transactions(), 8);
    }
}

#[test]
fn test_generated_models_reduce_without_errors() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..10 {
        let model = random_bounded_model(&mut rng, 3, 3, 6);
        let reduction = reduce_to_qumo(&model, 5.0).unwrap();
        assert_eq!(reduction.num_source_vars(), 6);
    }
}

#[test]
fn test_generation_is_deterministic_per_seed() {
    let a = random_scenario(&mut StdRng::seed_from_u64(9), 3, 4);
    let b = random_scenario(&mut StdRng::seed_from_u64(9), 3, 4);
    assert_eq!(a, b);
}
