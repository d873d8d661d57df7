use super::{balances, mid};
use crate::core::errors::LedgerError;
use crate::core::models::{MemberId, SettlementId};
use crate::core::settlement_resolver::{apply_settlements, resolve_settlements};

fn pairs(group_id: &str, entries: &[(&str, f64)]) -> Vec<(String, String, f64)> {
    resolve_settlements(group_id, 1, &balances(entries))
        .into_iter()
        .map(|s| (s.debtor.to_string(), s.creditor.to_string(), s.amount))
        .collect()
}

#[test]
fn test_one_creditor_two_debtors() {
    let _ = env_logger::try_init();
    let result = pairs("g1", &[("A", 150.0), ("B", -90.0), ("C", -60.0)]);
    assert_eq!(
        result,
        vec![
            ("B".to_string(), "A".to_string(), 90.0),
            ("C".to_string(), "A".to_string(), 60.0),
        ]
    );
}

#[test]
fn test_all_settled_yields_nothing() {
    assert!(pairs("g1", &[("A", 0.005), ("B", -0.004), ("C", 0.0)]).is_empty());
}

#[test]
fn test_no_creditors_or_no_debtors_yields_nothing() {
    assert!(pairs("g1", &[("A", -10.0), ("B", 0.0)]).is_empty());
    assert!(pairs("g1", &[("A", 10.0), ("B", 0.0)]).is_empty());
    assert!(pairs("g1", &[]).is_empty());
}

#[test]
fn test_iteration_order_is_preserved_not_sorted() {
    // Sorting by size would pair C with B first.
    let result = pairs("g1", &[("A", -10.0), ("B", 30.0), ("C", -20.0)]);
    assert_eq!(
        result,
        vec![
            ("A".to_string(), "B".to_string(), 10.0),
            ("C".to_string(), "B".to_string(), 20.0),
        ]
    );
}

#[test]
fn test_debtor_split_across_creditors() {
    let result = pairs("g1", &[("A", 40.0), ("B", 60.0), ("C", -100.0)]);
    assert_eq!(
        result,
        vec![
            ("C".to_string(), "A".to_string(), 40.0),
            ("C".to_string(), "B".to_string(), 60.0),
        ]
    );
}

#[test]
fn test_both_cursors_advance_on_exact_match() {
    let result = pairs("g1", &[("A", 50.0), ("B", -50.0), ("C", 25.0), ("D", -25.0)]);
    assert_eq!(
        result,
        vec![
            ("B".to_string(), "A".to_string(), 50.0),
            ("D".to_string(), "C".to_string(), 25.0),
        ]
    );
}

#[test]
fn test_greedy_is_not_globally_minimal() {
    // A pays D and B pays C would take two transfers; the greedy walk takes three.
    let result = pairs("g1", &[("A", -5.0), ("B", -10.0), ("C", 10.0), ("D", 5.0)]);
    assert_eq!(result.len(), 3);
}

#[test]
fn test_applied_settlements_zero_every_balance() {
    let original = balances(&[("A", 33.34), ("B", -16.67), ("C", -16.67), ("D", 0.0)]);
    let settlements = resolve_settlements("g1", 4, &original);
    let adjusted = apply_settlements(&original, &settlements);

    for (_, amount) in &adjusted {
        assert!(amount.abs() < 0.01);
    }
}

#[test]
fn test_settlement_ids_carry_group_run_and_pair() {
    let settlements = resolve_settlements("g1", 7, &balances(&[("A", 150.0), ("B", -90.0), ("C", -60.0)]));

    assert_eq!(settlements[0].id, SettlementId::new("g1", 7, mid("B"), mid("A")));
    assert_eq!(settlements[0].id.to_string(), "g1:7:B:A");
    assert_ne!(settlements[0].id, settlements[1].id);
    assert!(settlements.iter().all(|s| s.debtor != s.creditor));
}

#[test]
fn test_settlement_id_parsing() {
    let parsed: SettlementId = "g1:12:bob:alice".parse().unwrap();
    assert_eq!(parsed, SettlementId::new("g1", 12, mid("bob"), mid("alice")));

    assert!(matches!(
        "g1:x:bob:alice".parse::<SettlementId>(),
        Err(LedgerError::InvalidInput(_, _))
    ));
    assert!("g1:1:bob".parse::<SettlementId>().is_err());
    assert!(":1:bob:alice".parse::<SettlementId>().is_err());
}

#[test]
fn test_member_id_rejects_separator_and_blank() {
    assert!(MemberId::new("").is_err());
    assert!(MemberId::new("a:b").is_err());
    assert!(MemberId::new("a b").is_err());
    assert!(MemberId::new("u1").is_ok());
}
