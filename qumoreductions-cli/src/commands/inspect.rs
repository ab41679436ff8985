//! `qumo inspect`: validate a scenario and report its dimensions.

use anyhow::Context;
use qumoreductions::io::read_scenario;
use qumoreductions::market::Market;
use serde_json::json;
use std::path::Path;

pub fn run(input: &Path, json: bool) -> anyhow::Result<()> {
    let scenario =
        read_scenario(input).with_context(|| format!("reading {}", input.display()))?;
    let market = Market::<f64>::from_scenario(&scenario)?;

    let with_conversion = market
        .setup()
        .conversion
        .iter()
        .filter(|c| **c != 0.0)
        .count();
    let nonzeros = market.deltas().currency.nnz() + market.deltas().security.nnz();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "parties": market.num_parties(),
                "transactions": market.num_transactions(),
                "parties_with_conversion": with_conversion,
                "delta_nonzeros": nonzeros,
            }))?
        );
    } else {
        println!("scenario: {}", input.display());
        println!("  parties:        {}", market.num_parties());
        println!("  transactions:   {}", market.num_transactions());
        println!("  with conversion: {with_conversion}");
        println!("  delta nonzeros: {nonzeros}");
    }
    Ok(())
}
