//! `qumo solve`: settle a scenario with the MILP backend.

use anyhow::Context;
use qumoreductions::market::{parse_from_file, validate_solution, SettlementProgram};
use qumoreductions::solvers::MilpSolver;
use serde_json::json;
use std::path::Path;

pub fn run(input: &Path, check_admissible: bool, json: bool) -> anyhow::Result<()> {
    let market = parse_from_file::<f64>(input)
        .with_context(|| format!("loading {}", input.display()))?;
    let program = SettlementProgram::build(&market);
    let solution = program.solve(&MilpSolver::new())?;
    let state = validate_solution(&market, &solution.executed, check_admissible)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "executed": solution.executed,
                "continuous": solution.continuous,
                "currency": state.currency,
                "security": state.security,
                "after_conversion": state.after_conversion,
            }))?
        );
    } else {
        let executed: Vec<String> = solution.executed.iter().map(ToString::to_string).collect();
        println!(
            "executed {} of {} transactions: {}",
            solution.executed.len(),
            market.num_transactions(),
            executed.join(", ")
        );
        for p in 0..market.num_parties() {
            println!(
                "  P{}: currency {}, security {}, after conversion {}",
                p + 1,
                state.currency[p],
                state.security[p],
                state.after_conversion[p]
            );
        }
    }
    Ok(())
}
