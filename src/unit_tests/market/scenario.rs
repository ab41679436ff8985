use super::*;
use crate::error::Error;

fn party(id: u32, security: u64, currency: u64) -> PartyInfo {
    PartyInfo {
        id: PartyId::new(id),
        security_balance: security,
        currency_balance: currency,
        exchange_factor: None,
    }
}

fn dvp(id: u32, from: u32, to: u32, security: u64, cash: u64) -> TransactionInfo {
    TransactionInfo {
        id: TransactionId::new(id),
        security_from: PartyId::new(from),
        security_to: PartyId::new(to),
        security_amount: security,
        cash_from: PartyId::new(to),
        cash_to: PartyId::new(from),
        cash_amount: cash,
    }
}

#[test]
fn test_ids_display_with_prefixes() {
    assert_eq!(PartyId::new(3).to_string(), "P3");
    assert_eq!(TransactionId::new(12).to_string(), "T12");
}

#[test]
fn test_valid_scenario_passes() {
    let scenario = Scenario::new(
        vec![party(1, 1, 0), party(2, 0, 1)],
        vec![dvp(1, 1, 2, 1, 1)],
    );
    assert!(scenario.is_ok());
}

#[test]
fn test_duplicate_party_id_is_rejected() {
    let result = Scenario::new(vec![party(1, 0, 0), party(1, 0, 0)], vec![]);
    assert!(matches!(result, Err(Error::InvalidScenario(_))));
}

#[test]
fn test_party_ids_must_be_dense() {
    // ids {1, 3} with two parties: 3 is out of range
    let result = Scenario::new(vec![party(1, 0, 0), party(3, 0, 0)], vec![]);
    assert!(matches!(result, Err(Error::InvalidScenario(_))));
}

#[test]
fn test_party_ids_may_come_in_any_order() {
    let scenario = Scenario::new(vec![party(2, 0, 0), party(1, 0, 0)], vec![]);
    assert!(scenario.is_ok());
}

#[test]
fn test_zero_party_id_is_rejected() {
    let result = Scenario::new(vec![party(0, 0, 0)], vec![]);
    assert!(matches!(result, Err(Error::InvalidScenario(_))));
}

#[test]
fn test_exchange_factor_sides_must_be_positive() {
    let mut bad = party(1, 0, 0);
    bad.exchange_factor = Some(ExchangeFactor {
        security: 0,
        currency: 2,
    });
    let result = Scenario::new(vec![bad, party(2, 0, 0)], vec![]);
    assert!(matches!(result, Err(Error::InvalidScenario(_))));
}

#[test]
fn test_zero_amounts_are_rejected() {
    let result = Scenario::new(
        vec![party(1, 1, 0), party(2, 0, 1)],
        vec![dvp(1, 1, 2, 0, 1)],
    );
    assert!(matches!(result, Err(Error::InvalidScenario(_))));
}

#[test]
fn test_self_transfer_is_rejected() {
    let result = Scenario::new(
        vec![party(1, 1, 1), party(2, 0, 0)],
        vec![dvp(1, 1, 1, 1, 1)],
    );
    assert!(matches!(result, Err(Error::InvalidScenario(_))));
}

#[test]
fn test_dvp_invariant_is_enforced() {
    // cash leg runs the same way as the security leg: not DvP
    let broken = TransactionInfo {
        id: TransactionId::new(1),
        security_from: PartyId::new(1),
        security_to: PartyId::new(2),
        security_amount: 1,
        cash_from: PartyId::new(1),
        cash_to: PartyId::new(2),
        cash_amount: 1,
    };
    let result = Scenario::new(vec![party(1, 1, 1), party(2, 1, 1)], vec![broken]);
    assert!(matches!(result, Err(Error::InvalidScenario(_))));
}

#[test]
fn test_unknown_party_reference_is_rejected() {
    let result = Scenario::new(
        vec![party(1, 1, 0), party(2, 0, 1)],
        vec![dvp(1, 1, 3, 1, 1)],
    );
    assert!(matches!(result, Err(Error::InvalidScenario(_))));
}

#[test]
fn test_duplicate_transaction_id_is_rejected() {
    let result = Scenario::new(
        vec![party(1, 5, 5), party(2, 5, 5)],
        vec![dvp(1, 1, 2, 1, 1), dvp(1, 2, 1, 1, 1)],
    );
    assert!(matches!(result, Err(Error::InvalidScenario(_))));
}
