//! Transaction settlement: scenario data model, market assembly, and the
//! maximum-throughput formulation.

mod formulate;
#[allow(clippy::module_inception)]
mod market;
mod parse;
mod scenario;
mod sparse;

pub use formulate::{admissible_transactions, validate_solution, SettlementProgram};
#[cfg(feature = "milp-solver")]
pub use formulate::SettlementSolution;
pub use market::{Market, MarketSetup, MarketState, TransactionDeltas};
pub use parse::{parse_from_file, parse_scenario};
pub(crate) use parse::{PARTY_HEADER, TRANSACTION_HEADER};
pub use scenario::{
    ExchangeFactor, PartyId, PartyInfo, Scenario, TransactionId, TransactionInfo,
};
pub use sparse::SparseMatrix;
