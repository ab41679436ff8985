use super::*;
use crate::error::Error;
use crate::market::{
    parse_scenario, ExchangeFactor, PartyId, PartyInfo, Scenario, TransactionId, TransactionInfo,
};
use crate::model::{Model, QuadExpr};
use crate::reduce::{extract_qumo, Qumo};
use crate::types::Direction;
use std::path::{Path, PathBuf};

fn unlock_scenario() -> Scenario {
    Scenario::new(
        vec![
            PartyInfo {
                id: PartyId::new(1),
                security_balance: 1,
                currency_balance: 0,
                exchange_factor: Some(ExchangeFactor {
                    security: 1,
                    currency: 2,
                }),
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

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(name)
}

#[test]
fn test_format_detection() {
    assert_eq!(
        InstanceFormat::from_extension(Path::new("scenario.csv")),
        Some(InstanceFormat::SettlementText)
    );
    assert_eq!(
        InstanceFormat::from_extension(Path::new("scenario.TXT")),
        Some(InstanceFormat::SettlementText)
    );
    assert_eq!(
        InstanceFormat::from_extension(Path::new("scenario.json")),
        Some(InstanceFormat::Json)
    );
    assert_eq!(InstanceFormat::from_extension(Path::new("scenario.lp")), None);
    assert_eq!(InstanceFormat::from_extension(Path::new("scenario")), None);
}

#[test]
fn test_scenario_text_rendering() {
    let text = scenario_to_text(&unlock_scenario());
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Party Id,Security Balance,Currency Balance,CCF Exchange Factor")
    );
    assert_eq!(lines.next(), Some("P1,1,0,P1 converts 1 S into 2 C"));
    assert_eq!(lines.next(), Some("P2,0,1"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(
        lines.next(),
        Some("Transaction Id,From,To,Security Amount,From,To,Cash Amount")
    );
    assert_eq!(lines.next(), Some("T1,P1,P2,1,P2,P1,1"));
}

#[test]
fn test_scenario_text_parses_back() {
    let scenario = unlock_scenario();
    let reparsed = parse_scenario(&scenario_to_text(&scenario)).unwrap();
    assert_eq!(reparsed, scenario);
}

#[test]
fn test_scenario_file_roundtrip_text() {
    let path = temp_path("qumoreductions_io_roundtrip.csv");
    let scenario = unlock_scenario();
    write_scenario(&scenario, &path).unwrap();
    let back = read_scenario(&path).unwrap();
    assert_eq!(back, scenario);
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_scenario_file_roundtrip_json() {
    let path = temp_path("qumoreductions_io_roundtrip.json");
    let scenario = unlock_scenario();
    write_scenario(&scenario, &path).unwrap();
    let back = read_scenario(&path).unwrap();
    assert_eq!(back, scenario);
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_json_scenarios_are_revalidated() {
    // well-formed JSON, but the transaction violates the DvP shape
    let path = temp_path("qumoreductions_io_invalid.json");
    let mut scenario = unlock_scenario();
    scenario.transactions[0].cash_to = PartyId::new(2);
    std::fs::write(&path, serde_json::to_string(&scenario).unwrap()).unwrap();

    assert!(matches!(
        read_scenario(&path),
        Err(Error::InvalidScenario(_))
    ));
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_unknown_extension_is_rejected() {
    let scenario = unlock_scenario();
    assert!(matches!(
        write_scenario(&scenario, temp_path("scenario.lp")),
        Err(Error::Parse(_))
    ));
}

#[test]
fn test_qumo_file_roundtrip() {
    let mut model = Model::new(Direction::Minimize);
    let x = model.add_binary_variable("x");
    let mut objective = QuadExpr::new();
    objective.add_quadratic_term(x, x, 2.0);
    objective.add_constant(1.0);
    model.set_objective(objective);
    let qumo = extract_qumo(&model).unwrap();

    let path = temp_path("qumoreductions_io_qumo.json");
    write_qumo(&qumo, &path).unwrap();
    let back: Qumo<f64> = read_qumo(&path).unwrap();
    assert_eq!(back, qumo);
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_qumo_json_rendering_is_stable() {
    let model = Model::<f64>::new(Direction::Minimize);
    let qumo = extract_qumo(&model).unwrap();
    let json = qumo_to_json(&qumo).unwrap();
    assert!(json.contains("\"binaries\""));
    assert!(json.contains("\"matrix\""));
}

#[test]
fn test_missing_file_is_an_io_error() {
    assert!(matches!(
        read_scenario("/nonexistent/scenario.csv"),
        Err(Error::Io(_))
    ));
    assert!(matches!(
        read_qumo::<f64>("/nonexistent/instance.json"),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_garbage_json_is_a_parse_error() {
    let path = temp_path("qumoreductions_io_garbage.json");
    std::fs::write(&path, "not json at all").unwrap();
    assert!(matches!(read_scenario(&path), Err(Error::Parse(_))));
    std::fs::remove_file(&path).ok();
}
