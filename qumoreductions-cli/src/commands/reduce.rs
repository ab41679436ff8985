//! `qumo reduce`: settlement IP → QUMO instance.

use anyhow::Context;
use qumoreductions::io::qumo_to_json;
use qumoreductions::market::{parse_from_file, SettlementProgram};
use qumoreductions::reduce::reduce_to_qumo_in_place;
use std::path::Path;

pub fn run(input: &Path, penalty: f64, json: bool) -> anyhow::Result<()> {
    let market = parse_from_file::<f64>(input)
        .with_context(|| format!("loading {}", input.display()))?;
    let mut model = SettlementProgram::build(&market).into_model();
    let reduction = reduce_to_qumo_in_place(&mut model, penalty)?;
    let qumo = reduction.target();

    if json {
        println!("{}", qumo_to_json(qumo)?);
    } else {
        println!("QUMO instance from {}", input.display());
        println!("  variables: {} ({} binary)", qumo.num_vars(), qumo.binaries().len());
        println!("  matrix nonzeros: {}", qumo.matrix().len());
        println!("  constant: {}", qumo.constant());
    }
    Ok(())
}
