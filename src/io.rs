//! Reading and writing instances.
//!
//! Scenarios travel in two representations: the settlement text format
//! of [`crate::market::parse_scenario`] (`.csv`/`.txt`) and JSON
//! (`.json`), picked by file extension. A scenario loaded from JSON is
//! re-validated, since serde checks shape but not the DvP invariants.
//! QUMO instances are JSON only.

use crate::error::{Error, Result};
use crate::market::{parse_scenario, Scenario, PARTY_HEADER, TRANSACTION_HEADER};
use crate::reduce::Qumo;
use crate::types::Scalar;
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

/// On-disk representation of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceFormat {
    /// The two-section settlement text format.
    SettlementText,
    /// JSON via serde.
    Json,
}

impl InstanceFormat {
    /// Pick the format from a file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(InstanceFormat::SettlementText),
            "json" => Some(InstanceFormat::Json),
            _ => None,
        }
    }

    fn for_path(path: &Path) -> Result<Self> {
        Self::from_extension(path).ok_or_else(|| {
            Error::Parse(format!(
                "cannot infer a format for `{}`: expected a .csv, .txt or .json extension",
                path.display()
            ))
        })
    }
}

/// Load a scenario, picking the representation from the file extension.
pub fn read_scenario(path: impl AsRef<Path>) -> Result<Scenario> {
    let path = path.as_ref();
    let text = read_file(path)?;
    match InstanceFormat::for_path(path)? {
        InstanceFormat::SettlementText => parse_scenario(&text),
        InstanceFormat::Json => {
            let scenario: Scenario = serde_json::from_str(&text)
                .map_err(|e| Error::Parse(format!("{}: {e}", path.display())))?;
            scenario.validate()?;
            Ok(scenario)
        }
    }
}

/// Write a scenario, picking the representation from the file extension.
pub fn write_scenario(scenario: &Scenario, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let contents = match InstanceFormat::for_path(path)? {
        InstanceFormat::SettlementText => scenario_to_text(scenario),
        InstanceFormat::Json => serde_json::to_string_pretty(scenario)
            .map_err(|e| Error::Parse(format!("failed to serialize scenario: {e}")))?,
    };
    write_file(path, &contents)
}

/// Render a scenario in the settlement text format.
///
/// The output parses back with [`parse_scenario`]: one participant row
/// per party (with the `P<id> converts <s> S into <c> C` clause when an
/// exchange factor is present), a blank line, then one row per
/// transaction.
pub fn scenario_to_text(scenario: &Scenario) -> String {
    let mut out = String::new();

    out.push_str(&PARTY_HEADER.join(","));
    out.push('\n');
    for party in &scenario.parties {
        out.push_str(&format!(
            "{},{},{}",
            party.id, party.security_balance, party.currency_balance
        ));
        if let Some(factor) = &party.exchange_factor {
            out.push_str(&format!(
                ",{} converts {} S into {} C",
                party.id, factor.security, factor.currency
            ));
        }
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&TRANSACTION_HEADER.join(","));
    out.push('\n');
    for tx in &scenario.transactions {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            tx.id,
            tx.security_from,
            tx.security_to,
            tx.security_amount,
            tx.cash_from,
            tx.cash_to,
            tx.cash_amount
        ));
    }

    out
}

/// Load a QUMO instance from a JSON file.
pub fn read_qumo<T>(path: impl AsRef<Path>) -> Result<Qumo<T>>
where
    T: Scalar + DeserializeOwned,
{
    let path = path.as_ref();
    let text = read_file(path)?;
    serde_json::from_str(&text).map_err(|e| Error::Parse(format!("{}: {e}", path.display())))
}

/// Write a QUMO instance as pretty-printed JSON.
pub fn write_qumo<T>(qumo: &Qumo<T>, path: impl AsRef<Path>) -> Result<()>
where
    T: Scalar + Serialize,
{
    write_file(path.as_ref(), &qumo_to_json(qumo)?)
}

/// Render a QUMO instance as pretty-printed JSON.
pub fn qumo_to_json<T>(qumo: &Qumo<T>) -> Result<String>
where
    T: Scalar + Serialize,
{
    serde_json::to_string_pretty(qumo)
        .map_err(|e| Error::Parse(format!("failed to serialize QUMO instance: {e}")))
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| Error::Io(format!("failed to read {}: {e}", path.display())))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .map_err(|e| Error::Io(format!("failed to write {}: {e}", path.display())))
}

#[cfg(test)]
#[path = "unit_tests/io.rs"]
mod tests;
