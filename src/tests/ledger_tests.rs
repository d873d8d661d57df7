use super::{balances, mid};
use crate::core::errors::LedgerError;
use crate::core::models::{PaymentState, SettlementId};
use crate::core::settlement_ledger::{SettlementLedger, TransitionPolicy};
use crate::core::settlement_resolver::resolve_settlements;

fn sid(debtor: &str, creditor: &str) -> SettlementId {
    SettlementId::new("g1", 1, mid(debtor), mid(creditor))
}

#[test]
fn test_initiate_then_mark_paid() {
    let _ = env_logger::try_init();
    let mut ledger = SettlementLedger::new(TransitionPolicy::Strict);
    let id = sid("B", "A");

    let status = ledger.initiate(&id);
    assert_eq!(status.state, PaymentState::Pending);
    assert_eq!(status.external_reference, None);

    let status = ledger.mark_paid(&id, Some("txn-42".to_string())).unwrap();
    assert_eq!(status.state, PaymentState::Paid);
    assert_eq!(status.external_reference.as_deref(), Some("txn-42"));

    let stored = ledger.get_status(&id).unwrap();
    assert_eq!(stored.state, PaymentState::Paid);
}

#[test]
fn test_cancel_and_fail_from_pending() {
    let mut ledger = SettlementLedger::new(TransitionPolicy::Strict);
    let cancelled = sid("B", "A");
    let failed = sid("C", "A");
    ledger.initiate(&cancelled);
    ledger.initiate(&failed);

    assert_eq!(ledger.mark_cancelled(&cancelled).unwrap().state, PaymentState::Cancelled);
    assert_eq!(ledger.mark_failed(&failed).unwrap().state, PaymentState::Failed);
    assert_eq!(ledger.len(), 2);
}

#[test]
fn test_terminal_states_reject_further_marks_under_strict_policy() {
    let mut ledger = SettlementLedger::new(TransitionPolicy::Strict);
    let id = sid("B", "A");
    ledger.initiate(&id);
    ledger.mark_paid(&id, Some("ref-1".to_string())).unwrap();

    let result = ledger.mark_cancelled(&id);
    assert_eq!(
        result.unwrap_err(),
        LedgerError::InvalidTransition {
            settlement_id: "g1:1:B:A".to_string(),
            from: "paid".to_string(),
            to: "cancelled".to_string(),
        }
    );
    assert!(ledger.mark_failed(&id).is_err());
    assert!(ledger.mark_paid(&id, None).is_err());

    let status = ledger.get_status(&id).unwrap();
    assert_eq!(status.state, PaymentState::Paid);
    assert_eq!(status.external_reference.as_deref(), Some("ref-1"));
}

#[test]
fn test_mark_paid_without_initiate_is_rejected_under_strict_policy() {
    let mut ledger = SettlementLedger::new(TransitionPolicy::Strict);
    let id = sid("B", "A");

    let result = ledger.mark_paid(&id, Some("ref".to_string()));
    assert!(matches!(
        result,
        Err(LedgerError::InvalidTransition { ref from, ref to, .. }) if from == "absent" && to == "paid"
    ));
    assert!(ledger.get_status(&id).is_none());
    assert!(ledger.is_empty());
}

#[test]
fn test_mark_paid_without_initiate_creates_record_under_lenient_policy() {
    let mut ledger = SettlementLedger::new(TransitionPolicy::Lenient);
    let id = sid("B", "A");

    let status = ledger.mark_paid(&id, Some("ref".to_string())).unwrap();
    assert_eq!(status.state, PaymentState::Paid);
    assert_eq!(status.external_reference.as_deref(), Some("ref"));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_lenient_policy_reopens_terminal_record() {
    let mut ledger = SettlementLedger::new(TransitionPolicy::Lenient);
    let id = sid("B", "A");
    ledger.initiate(&id);
    ledger.mark_failed(&id).unwrap();

    let status = ledger.mark_paid(&id, None).unwrap();
    assert_eq!(status.state, PaymentState::Paid);
}

#[test]
fn test_reinitiate_after_terminal_starts_fresh_pending() {
    let mut ledger = SettlementLedger::new(TransitionPolicy::Strict);
    let id = sid("B", "A");
    ledger.initiate(&id);
    ledger.mark_paid(&id, Some("ref-1".to_string())).unwrap();

    let status = ledger.initiate(&id);
    assert_eq!(status.state, PaymentState::Pending);
    assert_eq!(status.external_reference, None);

    assert_eq!(ledger.mark_failed(&id).unwrap().state, PaymentState::Failed);
}

#[test]
fn test_records_outside_latest_resolution_are_orphaned_but_kept() {
    let mut ledger = SettlementLedger::new(TransitionPolicy::Strict);
    let old = resolve_settlements("g1", 1, &balances(&[("A", 150.0), ("B", -90.0), ("C", -60.0)]));
    ledger.initiate(&old[0].id);
    ledger.initiate(&old[1].id);
    ledger.mark_paid(&old[0].id, None).unwrap();

    let new = resolve_settlements("g1", 2, &balances(&[("A", 160.0), ("B", -100.0), ("C", -60.0)]));
    let orphaned = ledger.orphaned("g1", &new);

    assert_eq!(orphaned.len(), 2);
    assert!(ledger.get_status(&old[0].id).is_some());
    assert!(ledger.get_status(&new[0].id).is_none());
    assert!(ledger.orphaned("g1", &old).is_empty());
    assert!(ledger.orphaned("other", &new).is_empty());
}
