use super::{expense, mid};
use crate::core::balance_calculator::{compute_balances, is_conserved, member_summary};
use crate::core::errors::LedgerError;
use crate::core::models::{Expense, ExpenseAmounts, ExpenseCategory, NewExpense};
use indexmap::IndexSet;

#[test]
fn test_equal_split_among_three() {
    let _ = env_logger::try_init();
    let members = vec![mid("A"), mid("B"), mid("C")];
    let expenses = vec![expense("g1", 150.0, "A", &["A", "B", "C"])];

    let balances = compute_balances(&members, &expenses).unwrap();

    assert_eq!(balances.get(&mid("A")), Some(100.0));
    assert_eq!(balances.get(&mid("B")), Some(-50.0));
    assert_eq!(balances.get(&mid("C")), Some(-50.0));
    assert!(is_conserved(&balances));
}

#[test]
fn test_members_without_expenses_appear_at_zero_in_member_order() {
    let members = vec![mid("D"), mid("A"), mid("B")];
    let expenses = vec![expense("g1", 40.0, "A", &["B"])];

    let balances = compute_balances(&members, &expenses).unwrap();

    let order: Vec<String> = balances.iter().map(|(m, _)| m.to_string()).collect();
    assert_eq!(order, vec!["D", "A", "B"]);
    assert_eq!(balances.get(&mid("D")), Some(0.0));
    assert_eq!(balances.get(&mid("A")), Some(40.0));
    assert_eq!(balances.get(&mid("B")), Some(-40.0));
}

#[test]
fn test_payer_outside_participants_is_credited_in_full() {
    let members = vec![mid("A"), mid("B"), mid("C")];
    let expenses = vec![
        expense("g1", 90.0, "A", &["B", "C"]),
        expense("g1", 30.0, "B", &["A", "B", "C"]),
    ];

    let balances = compute_balances(&members, &expenses).unwrap();

    assert!((balances.get(&mid("A")).unwrap() - 80.0).abs() < 1e-9);
    assert!((balances.get(&mid("B")).unwrap() + 25.0).abs() < 1e-9);
    assert!((balances.get(&mid("C")).unwrap() + 55.0).abs() < 1e-9);
    assert!(is_conserved(&balances));
}

#[test]
fn test_compute_balances_is_idempotent() {
    let members = vec![mid("A"), mid("B"), mid("C")];
    let expenses = vec![
        expense("g1", 100.0, "A", &["A", "B", "C"]),
        expense("g1", 35.5, "C", &["A", "C"]),
    ];

    let first = compute_balances(&members, &expenses).unwrap();
    let second = compute_balances(&members, &expenses).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_expense_order_does_not_change_balances() {
    let members = vec![mid("A"), mid("B"), mid("C")];
    let e1 = expense("g1", 100.0, "A", &["A", "B", "C"]);
    let e2 = expense("g1", 35.5, "C", &["A", "C"]);

    let forward = compute_balances(&members, &[e1.clone(), e2.clone()]).unwrap();
    let backward = compute_balances(&members, &[e2, e1]).unwrap();

    for (member, amount) in &forward {
        assert!((backward.get(member).unwrap() - amount).abs() < 1e-9);
    }
}

#[test]
fn test_empty_participants_rejected() {
    let members = vec![mid("A"), mid("B")];
    let mut broken = expense("g1", 10.0, "A", &["B"]);
    broken.participants = IndexSet::new();

    let result = compute_balances(&members, &[broken]);
    assert!(matches!(result, Err(LedgerError::InvalidExpense(_))));
}

#[test]
fn test_unknown_payer_or_participant_rejected() {
    let members = vec![mid("A"), mid("B")];

    let unknown_payer = compute_balances(&members, &[expense("g1", 10.0, "Z", &["A"])]);
    assert!(matches!(unknown_payer, Err(LedgerError::InvalidExpense(_))));

    let unknown_participant = compute_balances(&members, &[expense("g1", 10.0, "A", &["A", "Z"])]);
    assert!(matches!(unknown_participant, Err(LedgerError::InvalidExpense(_))));
}

#[test]
fn test_expense_construction_validates_input() {
    let base = NewExpense {
        group_id: "g1".to_string(),
        description: "Groceries".to_string(),
        category: ExpenseCategory::Shopping,
        amounts: ExpenseAmounts::new(20.0, 0.0, 0.0).unwrap(),
        payer: mid("A"),
        participants: vec![],
    };
    assert!(matches!(Expense::new(base.clone()), Err(LedgerError::InvalidExpense(_))));

    let blank = NewExpense {
        description: "   ".to_string(),
        participants: vec![mid("A")],
        ..base.clone()
    };
    assert!(matches!(Expense::new(blank), Err(LedgerError::InvalidExpense(_))));

    assert!(matches!(ExpenseAmounts::new(0.0, 0.0, 0.0), Err(LedgerError::InvalidExpense(_))));
    assert!(matches!(ExpenseAmounts::new(-5.0, 0.0, 0.0), Err(LedgerError::InvalidExpense(_))));
    assert!(matches!(ExpenseAmounts::new(10.0, -1.0, 0.0), Err(LedgerError::InvalidExpense(_))));
    assert!(matches!(ExpenseAmounts::new(f64::NAN, 0.0, 0.0), Err(LedgerError::InvalidExpense(_))));
}

#[test]
fn test_duplicate_participants_collapse() {
    let e = expense("g1", 30.0, "A", &["A", "B", "A", "C"]);
    assert_eq!(e.participants.len(), 3);
    assert_eq!(e.share(), 10.0);
}

#[test]
fn test_tax_and_tip_resolved_from_percentages() {
    let amounts = ExpenseAmounts::from_percentages(100.0, 8.0, 15.0).unwrap();
    assert!((amounts.tax - 8.0).abs() < 1e-9);
    assert!((amounts.tip - 15.0).abs() < 1e-9);
    assert!((amounts.total() - 123.0).abs() < 1e-9);

    assert!(ExpenseAmounts::from_percentages(100.0, -1.0, 0.0).is_err());
}

#[test]
fn test_total_includes_tax_and_tip_in_balances() {
    let members = vec![mid("A"), mid("B")];
    let e = Expense::new(NewExpense {
        group_id: "g1".to_string(),
        description: "Taxi".to_string(),
        category: ExpenseCategory::Transport,
        amounts: ExpenseAmounts::new(40.0, 4.0, 6.0).unwrap(),
        payer: mid("A"),
        participants: vec![mid("A"), mid("B")],
    })
    .unwrap();
    assert_eq!(e.total_amount, 50.0);

    let balances = compute_balances(&members, &[e]).unwrap();
    assert_eq!(balances.get(&mid("A")), Some(25.0));
    assert_eq!(balances.get(&mid("B")), Some(-25.0));
}

#[test]
fn test_member_summary_reports_paid_and_share() {
    let expenses = vec![
        expense("g1", 150.0, "A", &["A", "B", "C"]),
        expense("g1", 60.0, "B", &["A", "B"]),
    ];

    let summary = member_summary(&mid("A"), &expenses);
    assert_eq!(summary.paid, 150.0);
    assert_eq!(summary.share, 80.0);
    assert_eq!(summary.net, 70.0);

    let summary = member_summary(&mid("C"), &expenses);
    assert_eq!(summary.paid, 0.0);
    assert_eq!(summary.share, 50.0);
    assert_eq!(summary.net, -50.0);
}

#[test]
fn test_negative_or_non_finite_total_is_rejected() {
    let members = vec![mid("A"), mid("B")];
    for bad in [-10.0, f64::NAN, f64::INFINITY] {
        let mut tampered = expense("g1", 20.0, "A", &["A", "B"]);
        tampered.total_amount = bad;
        let result = compute_balances(&members, &[expense("g1", 10.0, "B", &["A", "B"]), tampered]);
        assert!(
            matches!(result, Err(LedgerError::InvalidExpense(ref msg)) if msg.contains("invalid amount")),
            "total {} was accepted: {:?}",
            bad,
            result
        );
    }
}
