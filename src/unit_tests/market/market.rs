use super::*;
use crate::market::{ExchangeFactor, PartyId, PartyInfo, Scenario, TransactionId, TransactionInfo};
use crate::testing::random_scenario;
use crate::types::Tolerance;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn swap_scenario() -> Scenario {
    // P1 holds the security, P2 holds the cash; T1 swaps them.
    Scenario::new(
        vec![
            PartyInfo {
                id: PartyId::new(1),
                security_balance: 1,
                currency_balance: 0,
                exchange_factor: None,
            },
            PartyInfo {
                id: PartyId::new(2),
                security_balance: 0,
                currency_balance: 1,
                exchange_factor: None,
            },
        ],
        vec![TransactionInfo {
            id: TransactionId::new(1),
            security_from: PartyId::new(1),
            security_to: PartyId::new(2),
            security_amount: 1,
            cash_from: PartyId::new(2),
            cash_to: PartyId::new(1),
            cash_amount: 1,
        }],
    )
    .unwrap()
}

#[test]
fn test_assembly_fills_setup_vectors() {
    let mut scenario = swap_scenario();
    scenario.parties[0].exchange_factor = Some(ExchangeFactor {
        security: 2,
        currency: 3,
    });
    let market = Market::<f64>::from_scenario(&scenario).unwrap();

    assert_eq!(market.num_parties(), 2);
    assert_eq!(market.num_transactions(), 1);
    assert_eq!(market.setup().security, vec![1.0, 0.0]);
    assert_eq!(market.setup().currency, vec![0.0, 1.0]);
    assert_eq!(market.setup().conversion, vec![1.5, 0.0]);
}

#[test]
fn test_assembly_contributes_four_nonzeros_per_transaction() {
    let market = Market::<f64>::from_scenario(&swap_scenario()).unwrap();
    let deltas = market.deltas();

    assert_eq!(deltas.security.get(0, 0), -1.0);
    assert_eq!(deltas.security.get(1, 0), 1.0);
    assert_eq!(deltas.currency.get(1, 0), -1.0);
    assert_eq!(deltas.currency.get(0, 0), 1.0);
    assert_eq!(deltas.security.nnz() + deltas.currency.nnz(), 4);
}

#[test]
fn test_assembly_rejects_invalid_scenarios() {
    let mut scenario = swap_scenario();
    scenario.transactions[0].security_amount = 0;
    assert!(Market::<f64>::from_scenario(&scenario).is_err());
}

#[test]
fn test_executor_swaps_balances() {
    let market = Market::<f64>::from_scenario(&swap_scenario()).unwrap();
    let state = market.execute(&[TransactionId::new(1)]);

    assert_eq!(state.security, vec![0.0, 1.0]);
    assert_eq!(state.currency, vec![1.0, 0.0]);
    assert_eq!(state.after_conversion, vec![1.0, 0.0]);
}

#[test]
fn test_executor_empty_sequence_is_the_setup() {
    let market = Market::<f64>::from_scenario(&swap_scenario()).unwrap();
    let state = market.execute(&[]);
    assert_eq!(state.security, market.setup().security);
    assert_eq!(state.currency, market.setup().currency);
}

#[test]
fn test_after_conversion_uses_the_ratio() {
    let mut scenario = swap_scenario();
    scenario.parties[0].exchange_factor = Some(ExchangeFactor {
        security: 1,
        currency: 2,
    });
    let market = Market::<f64>::from_scenario(&scenario).unwrap();
    let state = market.execute(&[]);
    // P1: 0 cash + 2·1 security
    assert_eq!(state.after_conversion, vec![2.0, 1.0]);
}

proptest! {
    #[test]
    fn prop_execution_conserves_totals(seed in 0u64..500, mask in 0usize..64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let scenario = random_scenario(&mut rng, 4, 6);
        let market = Market::<f64>::from_scenario(&scenario).unwrap();

        let executed: Vec<TransactionId> = (0..6)
            .filter(|t| mask & (1 << t) != 0)
            .map(|t| TransactionId::new(t as u32 + 1))
            .collect();
        let state = market.execute(&executed);

        let total = |v: &[f64]| v.iter().sum::<f64>();
        prop_assert!(total(&state.currency).approx_eq(&total(&market.setup().currency)));
        prop_assert!(total(&state.security).approx_eq(&total(&market.setup().security)));
    }
}
