//! Typed market scenario: participants, balances, and DvP transactions.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a market participant. Positive, displayed as `P<id>`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PartyId(u32);

impl PartyId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Identifier of a requested transaction. Positive, displayed as `T<id>`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TransactionId(u32);

impl TransactionId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Conversion rule: `security` units of security convert to `currency`
/// units of cash. Both sides must be positive; the ratio used downstream
/// is `currency / security`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeFactor {
    pub security: u32,
    pub currency: u32,
}

/// A participant's initial holdings and optional conversion rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyInfo {
    pub id: PartyId,
    pub security_balance: u64,
    pub currency_balance: u64,
    pub exchange_factor: Option<ExchangeFactor>,
}

/// A requested DvP transaction: a security leg and an opposing cash leg
/// between the same pair of parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub id: TransactionId,
    pub security_from: PartyId,
    pub security_to: PartyId,
    pub security_amount: u64,
    pub cash_from: PartyId,
    pub cash_to: PartyId,
    pub cash_amount: u64,
}

/// A market scenario: ordered participants plus ordered transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub parties: Vec<PartyInfo>,
    pub transactions: Vec<TransactionInfo>,
}

impl Scenario {
    /// Build a scenario, rejecting any element that fails its local
    /// invariants.
    pub fn new(parties: Vec<PartyInfo>, transactions: Vec<TransactionInfo>) -> Result<Self> {
        let scenario = Self {
            parties,
            transactions,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check every local invariant.
    ///
    /// Party and transaction ids must densely cover `1..=len` (in any
    /// order, without duplicates), balances are non-negative by type,
    /// exchange factors and amounts must be positive, transaction party
    /// references must exist, and every transaction must satisfy the DvP
    /// shape: the security leg runs opposite the cash leg between the
    /// same two distinct parties.
    pub fn validate(&self) -> Result<()> {
        let num_parties = self.parties.len();
        let mut seen = vec![false; num_parties];
        for party in &self.parties {
            let id = party.id.get() as usize;
            if id < 1 || id > num_parties {
                return Err(Error::InvalidScenario(format!(
                    "party id {} outside the dense range 1..={num_parties}",
                    party.id
                )));
            }
            if seen[id - 1] {
                return Err(Error::InvalidScenario(format!("duplicate party id {}", party.id)));
            }
            seen[id - 1] = true;

            if let Some(factor) = &party.exchange_factor {
                if factor.security == 0 || factor.currency == 0 {
                    return Err(Error::InvalidScenario(format!(
                        "exchange factor of {} must have positive security and currency sides",
                        party.id
                    )));
                }
            }
        }

        let num_transactions = self.transactions.len();
        let mut seen = vec![false; num_transactions];
        for tx in &self.transactions {
            let id = tx.id.get() as usize;
            if id < 1 || id > num_transactions {
                return Err(Error::InvalidScenario(format!(
                    "transaction id {} outside the dense range 1..={num_transactions}",
                    tx.id
                )));
            }
            if seen[id - 1] {
                return Err(Error::InvalidScenario(format!(
                    "duplicate transaction id {}",
                    tx.id
                )));
            }
            seen[id - 1] = true;

            if tx.security_amount == 0 || tx.cash_amount == 0 {
                return Err(Error::InvalidScenario(format!(
                    "transaction {} must move positive amounts",
                    tx.id
                )));
            }
            if tx.security_from == tx.security_to {
                return Err(Error::InvalidScenario(format!(
                    "transaction {} moves security from {} to itself",
                    tx.id, tx.security_from
                )));
            }
            if tx.security_from != tx.cash_to || tx.security_to != tx.cash_from {
                return Err(Error::InvalidScenario(format!(
                    "transaction {} is not delivery-versus-payment: the cash leg must run opposite the security leg",
                    tx.id
                )));
            }
            for party in [tx.security_from, tx.security_to, tx.cash_from, tx.cash_to] {
                let id = party.get() as usize;
                if id < 1 || id > num_parties {
                    return Err(Error::InvalidScenario(format!(
                        "transaction {} references unknown party {}",
                        tx.id, party
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../unit_tests/market/scenario.rs"]
mod tests;
