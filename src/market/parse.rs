//! Text format for settlement scenarios.
//!
//! Two comma-separated sections split by blank lines: participants first,
//! transactions second. Whitespace around commas is ignored. The
//! participant row's optional fourth field is an exchange clause of the
//! form `P<id> converts <s> S into <c> C`, whose party must match the
//! row.

use crate::error::{Error, Result};
use crate::market::{
    ExchangeFactor, Market, PartyId, PartyInfo, Scenario, TransactionId, TransactionInfo,
};
use crate::types::Scalar;
use std::path::Path;

pub(crate) const PARTY_HEADER: [&str; 4] = [
    "Party Id",
    "Security Balance",
    "Currency Balance",
    "CCF Exchange Factor",
];

pub(crate) const TRANSACTION_HEADER: [&str; 7] = [
    "Transaction Id",
    "From",
    "To",
    "Security Amount",
    "From",
    "To",
    "Cash Amount",
];

/// Parse scenario text into a validated [`Scenario`].
pub fn parse_scenario(text: &str) -> Result<Scenario> {
    let sections = split_sections(text);
    if sections.len() != 2 {
        return Err(Error::Parse(format!(
            "expected 2 sections separated by a blank line, found {}",
            sections.len()
        )));
    }

    let parties = parse_section(&sections[0], &PARTY_HEADER, parse_party_row)?;
    let transactions = parse_section(&sections[1], &TRANSACTION_HEADER, parse_transaction_row)?;
    Scenario::new(parties, transactions)
}

/// Read a scenario file and assemble the market over the numeric type `T`.
pub fn parse_from_file<T: Scalar>(path: impl AsRef<Path>) -> Result<Market<T>> {
    let text = std::fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Io(format!("failed to read {}: {e}", path.as_ref().display())))?;
    let scenario = parse_scenario(&text)?;
    Market::from_scenario(&scenario)
}

/// Group non-blank lines into blank-line-separated sections.
fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

fn parse_section<R>(
    lines: &[&str],
    header: &[&str],
    parse_row: impl Fn(&[&str], usize) -> Result<R>,
) -> Result<Vec<R>> {
    let fields: Vec<&str> = lines[0].split(',').map(str::trim).collect();
    if fields != header {
        return Err(Error::Parse(format!(
            "expected header `{}`, found `{}`",
            header.join(","),
            lines[0]
        )));
    }
    lines[1..]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            parse_row(&fields, i + 2)
        })
        .collect()
}

fn parse_party_row(fields: &[&str], line: usize) -> Result<PartyInfo> {
    if fields.len() != 3 && fields.len() != 4 {
        return Err(Error::Parse(format!(
            "line {line}: expected 3 or 4 fields, found {}",
            fields.len()
        )));
    }
    let id = parse_party_id(fields[0], line)?;
    let security_balance = parse_amount(fields[1], line)?;
    let currency_balance = parse_amount(fields[2], line)?;

    let exchange_factor = match fields.get(3) {
        None => None,
        Some(clause) if clause.is_empty() => None,
        Some(clause) => Some(parse_exchange_clause(clause, id, line)?),
    };

    Ok(PartyInfo {
        id,
        security_balance,
        currency_balance,
        exchange_factor,
    })
}

/// `P<id> converts <s> S into <c> C`
fn parse_exchange_clause(clause: &str, row_id: PartyId, line: usize) -> Result<ExchangeFactor> {
    let tokens: Vec<&str> = clause.split_whitespace().collect();
    match tokens.as_slice() {
        [party, "converts", security, "S", "into", currency, "C"] => {
            let party = parse_party_id(party, line)?;
            if party != row_id {
                return Err(Error::InvalidScenario(format!(
                    "line {line}: exchange clause names {party} but the row belongs to {row_id}"
                )));
            }
            Ok(ExchangeFactor {
                security: parse_factor_side(security, line)?,
                currency: parse_factor_side(currency, line)?,
            })
        }
        _ => Err(Error::Parse(format!(
            "line {line}: malformed exchange clause `{clause}`"
        ))),
    }
}

fn parse_transaction_row(fields: &[&str], line: usize) -> Result<TransactionInfo> {
    if fields.len() != 7 {
        return Err(Error::Parse(format!(
            "line {line}: expected 7 fields, found {}",
            fields.len()
        )));
    }
    Ok(TransactionInfo {
        id: parse_transaction_id(fields[0], line)?,
        security_from: parse_party_id(fields[1], line)?,
        security_to: parse_party_id(fields[2], line)?,
        security_amount: parse_amount(fields[3], line)?,
        cash_from: parse_party_id(fields[4], line)?,
        cash_to: parse_party_id(fields[5], line)?,
        cash_amount: parse_amount(fields[6], line)?,
    })
}

fn parse_party_id(field: &str, line: usize) -> Result<PartyId> {
    let digits = field
        .strip_prefix('P')
        .ok_or_else(|| Error::Parse(format!("line {line}: expected `P<id>`, found `{field}`")))?;
    let id = digits
        .parse::<u32>()
        .map_err(|_| Error::Parse(format!("line {line}: invalid party id `{field}`")))?;
    Ok(PartyId::new(id))
}

fn parse_transaction_id(field: &str, line: usize) -> Result<TransactionId> {
    let digits = field
        .strip_prefix('T')
        .ok_or_else(|| Error::Parse(format!("line {line}: expected `T<id>`, found `{field}`")))?;
    let id = digits
        .parse::<u32>()
        .map_err(|_| Error::Parse(format!("line {line}: invalid transaction id `{field}`")))?;
    Ok(TransactionId::new(id))
}

fn parse_amount(field: &str, line: usize) -> Result<u64> {
    field
        .parse::<u64>()
        .map_err(|_| Error::Parse(format!("line {line}: invalid amount `{field}`")))
}

fn parse_factor_side(field: &str, line: usize) -> Result<u32> {
    field
        .parse::<u32>()
        .map_err(|_| Error::Parse(format!("line {line}: invalid exchange factor side `{field}`")))
}

#[cfg(test)]
#[path = "../unit_tests/market/parse.rs"]
mod tests;
