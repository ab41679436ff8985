use super::*;
use crate::error::Error;
use crate::market::{ExchangeFactor, PartyId};

const EXAMPLE: &str = "\
Party Id,Security Balance,Currency Balance,CCF Exchange Factor
P1,1,0,P1 converts 1 S into 2 C
P2,0,1

Transaction Id,From,To,Security Amount,From,To,Cash Amount
T1,P1,P2,1,P2,P1,1
T2,P2,P1,1,P1,P2,2
";

#[test]
fn test_parse_example_scenario() {
    let scenario = parse_scenario(EXAMPLE).unwrap();
    assert_eq!(scenario.parties.len(), 2);
    assert_eq!(scenario.transactions.len(), 2);

    let p1 = &scenario.parties[0];
    assert_eq!(p1.id, PartyId::new(1));
    assert_eq!(p1.security_balance, 1);
    assert_eq!(p1.currency_balance, 0);
    assert_eq!(
        p1.exchange_factor,
        Some(ExchangeFactor {
            security: 1,
            currency: 2
        })
    );
    assert_eq!(scenario.parties[1].exchange_factor, None);

    let t2 = &scenario.transactions[1];
    assert_eq!(t2.security_from, PartyId::new(2));
    assert_eq!(t2.security_to, PartyId::new(1));
    assert_eq!(t2.security_amount, 1);
    assert_eq!(t2.cash_amount, 2);
}

#[test]
fn test_whitespace_around_commas_is_ignored() {
    let text = "\
Party Id , Security Balance , Currency Balance , CCF Exchange Factor
 P1 , 1 , 0
 P2 , 0 , 1

Transaction Id,From,To,Security Amount,From,To,Cash Amount
 T1 , P1 , P2 , 1 , P2 , P1 , 1
";
    let scenario = parse_scenario(text).unwrap();
    assert_eq!(scenario.parties.len(), 2);
    assert_eq!(scenario.transactions.len(), 1);
}

#[test]
fn test_multiple_blank_lines_separate_sections() {
    let text = EXAMPLE.replace("\n\nTransaction", "\n\n\n\nTransaction");
    assert!(parse_scenario(&text).is_ok());
}

#[test]
fn test_missing_section_is_an_error() {
    let text = "\
Party Id,Security Balance,Currency Balance,CCF Exchange Factor
P1,1,0
";
    assert!(matches!(parse_scenario(text), Err(Error::Parse(_))));
}

#[test]
fn test_wrong_header_is_an_error() {
    let text = EXAMPLE.replace("Security Balance", "Securities");
    assert!(matches!(parse_scenario(&text), Err(Error::Parse(_))));
}

#[test]
fn test_exchange_clause_party_must_match_row() {
    let text = EXAMPLE.replace("P1 converts", "P2 converts");
    assert!(matches!(
        parse_scenario(&text),
        Err(Error::InvalidScenario(_))
    ));
}

#[test]
fn test_malformed_exchange_clause_is_an_error() {
    let text = EXAMPLE.replace("converts 1 S into 2 C", "swaps 1 S for 2 C");
    assert!(matches!(parse_scenario(&text), Err(Error::Parse(_))));
}

#[test]
fn test_bad_id_prefix_is_an_error() {
    let text = EXAMPLE.replace("T1,P1", "T1,Q1");
    assert!(matches!(parse_scenario(&text), Err(Error::Parse(_))));
}

#[test]
fn test_negative_amounts_do_not_parse() {
    let text = EXAMPLE.replace("P1,1,0,", "P1,-1,0,");
    assert!(matches!(parse_scenario(&text), Err(Error::Parse(_))));
}

#[test]
fn test_parsed_scenario_is_validated() {
    // T1 rewritten to move security from P1 to P1
    let text = EXAMPLE.replace("T1,P1,P2,1,P2,P1,1", "T1,P1,P1,1,P1,P1,1");
    assert!(matches!(
        parse_scenario(&text),
        Err(Error::InvalidScenario(_))
    ));
}

#[test]
fn test_parse_from_file_assembles_a_market() {
    let dir = std::env::temp_dir();
    let path = dir.join("qumoreductions_parse_test.csv");
    std::fs::write(&path, EXAMPLE).unwrap();

    let market = parse_from_file::<f64>(&path).unwrap();
    assert_eq!(market.num_parties(), 2);
    assert_eq!(market.num_transactions(), 2);
    assert_eq!(market.setup().conversion, vec![2.0, 0.0]);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_missing_file_is_an_io_error() {
    assert!(matches!(
        parse_from_file::<f64>("/nonexistent/scenario.csv"),
        Err(Error::Io(_))
    ));
}
