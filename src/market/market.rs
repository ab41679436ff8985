//! Sparse market assembly and transaction execution.

use crate::error::{Error, Result};
use crate::market::{Scenario, SparseMatrix, TransactionId};
use crate::types::Scalar;
use serde::{Deserialize, Serialize};

/// Initial per-participant state: cash, securities, and the conversion
/// ratio (`currency / security` of the exchange factor, zero when the
/// participant has none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSetup<T> {
    pub currency: Vec<T>,
    pub security: Vec<T>,
    pub conversion: Vec<T>,
}

/// Per-transaction balance deltas as sparse participant×transaction
/// matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDeltas<T> {
    pub currency: SparseMatrix<T>,
    pub security: SparseMatrix<T>,
}

/// A validated, assembled market scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market<T> {
    setup: MarketSetup<T>,
    deltas: TransactionDeltas<T>,
}

/// Balances after executing a sequence of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketState<T> {
    pub currency: Vec<T>,
    pub security: Vec<T>,
    /// `currency[p] + conversion[p] · security[p]`: the cash a
    /// participant can raise by converting securities.
    pub after_conversion: Vec<T>,
}

impl<T: Scalar> Market<T> {
    /// Assemble a market from a scenario, validating it first.
    ///
    /// Each transaction contributes four nonzeros: `−amount` at the
    /// sending row and `+amount` at the receiving row of the matching
    /// matrix. The dimensions inferred from the ids encountered must
    /// equal the scenario's list lengths (asserted; validation
    /// guarantees it).
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        scenario.validate()?;

        let num_parties = scenario.parties.len();
        let num_transactions = scenario.transactions.len();

        let mut setup = MarketSetup {
            currency: vec![T::zero(); num_parties],
            security: vec![T::zero(); num_parties],
            conversion: vec![T::zero(); num_parties],
        };
        let mut max_party = 0usize;
        for party in &scenario.parties {
            let row = party.id.get() as usize - 1;
            max_party = max_party.max(row + 1);
            setup.currency[row] = from_u64::<T>(party.currency_balance)?;
            setup.security[row] = from_u64::<T>(party.security_balance)?;
            if let Some(factor) = &party.exchange_factor {
                setup.conversion[row] =
                    from_u64::<T>(factor.currency as u64)? / from_u64::<T>(factor.security as u64)?;
            }
        }

        let mut deltas = TransactionDeltas {
            currency: SparseMatrix::new(num_parties, num_transactions),
            security: SparseMatrix::new(num_parties, num_transactions),
        };
        let mut max_transaction = 0usize;
        for tx in &scenario.transactions {
            let col = tx.id.get() as usize - 1;
            max_transaction = max_transaction.max(col + 1);
            let security_amount = from_u64::<T>(tx.security_amount)?;
            let cash_amount = from_u64::<T>(tx.cash_amount)?;
            deltas.security.add(
                tx.security_from.get() as usize - 1,
                col,
                -security_amount.clone(),
            );
            deltas
                .security
                .add(tx.security_to.get() as usize - 1, col, security_amount);
            deltas
                .currency
                .add(tx.cash_from.get() as usize - 1, col, -cash_amount.clone());
            deltas
                .currency
                .add(tx.cash_to.get() as usize - 1, col, cash_amount);
        }

        assert_eq!(max_party, num_parties, "party dimension mismatch");
        assert_eq!(
            max_transaction, num_transactions,
            "transaction dimension mismatch"
        );

        Ok(Self { setup, deltas })
    }

    pub fn num_parties(&self) -> usize {
        self.setup.currency.len()
    }

    pub fn num_transactions(&self) -> usize {
        self.deltas.currency.ncols()
    }

    pub fn setup(&self) -> &MarketSetup<T> {
        &self.setup
    }

    pub fn deltas(&self) -> &TransactionDeltas<T> {
        &self.deltas
    }

    /// Apply the deltas of `executed` (in order, duplicates allowed) to
    /// copies of the initial balances and return the resulting state.
    ///
    /// Transactions only move amounts between participants, so the totals
    /// are conserved; this is asserted after execution.
    pub fn execute(&self, executed: &[TransactionId]) -> MarketState<T> {
        let mut currency = self.setup.currency.clone();
        let mut security = self.setup.security.clone();

        for id in executed {
            let col = id.get() as usize - 1;
            for (row, delta) in self.deltas.currency.column(col) {
                currency[*row] += delta.clone();
            }
            for (row, delta) in self.deltas.security.column(col) {
                security[*row] += delta.clone();
            }
        }

        let total = |values: &[T]| {
            values
                .iter()
                .fold(T::zero(), |acc, v| acc + v.clone())
        };
        assert!(
            total(&currency).approx_eq(&total(&self.setup.currency)),
            "currency total not conserved"
        );
        assert!(
            total(&security).approx_eq(&total(&self.setup.security)),
            "security total not conserved"
        );

        let after_conversion = currency
            .iter()
            .zip(&security)
            .zip(&self.setup.conversion)
            .map(|((c, s), conv)| c.clone() + conv.clone() * s.clone())
            .collect();

        MarketState {
            currency,
            security,
            after_conversion,
        }
    }
}

fn from_u64<T: Scalar>(value: u64) -> Result<T> {
    T::from_u64(value)
        .ok_or_else(|| Error::InvalidScenario(format!("amount {value} is not representable")))
}

#[cfg(test)]
#[path = "../unit_tests/market/market.rs"]
mod tests;
