mod balance_tests;
mod ledger_tests;
mod settlement_tests;

use crate::config::Config;
use crate::core::models::{
    Balances, Expense, ExpenseAmounts, ExpenseCategory, Member, MemberId, NewExpense,
};
use crate::core::services::LedgerService;
use crate::core::settlement_ledger::TransitionPolicy;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::notifier::in_memory::InMemoryNotifier;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub type TestService = LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache, InMemoryNotifier>;

pub fn mid(id: &str) -> MemberId {
    MemberId::new(id).unwrap()
}

pub fn member(id: &str, name: &str) -> Member {
    Member::new(mid(id), name).unwrap()
}

pub fn balances(entries: &[(&str, f64)]) -> Balances {
    entries.iter().map(|(id, amount)| (mid(id), *amount)).collect()
}

pub fn expense(group_id: &str, total: f64, payer: &str, participants: &[&str]) -> Expense {
    Expense::new(new_expense(group_id, total, payer, participants)).unwrap()
}

pub fn new_expense(group_id: &str, total: f64, payer: &str, participants: &[&str]) -> NewExpense {
    NewExpense {
        group_id: group_id.to_string(),
        description: "Dinner".to_string(),
        category: ExpenseCategory::Food,
        amounts: ExpenseAmounts::new(total, 0.0, 0.0).unwrap(),
        payer: mid(payer),
        participants: participants.iter().map(|p| mid(p)).collect(),
    }
}

pub struct TestHarness {
    pub service: TestService,
    pub storage: InMemoryStorage,
    pub notifier: InMemoryNotifier,
}

pub fn create_test_service(policy: TransitionPolicy) -> TestHarness {
    let _ = env_logger::try_init();
    let storage = InMemoryStorage::new();
    let notifier = InMemoryNotifier::new();
    let config = Config {
        strict_payment_transitions: policy == TransitionPolicy::Strict,
        ..Config::default()
    };
    let service = LedgerService::new(
        storage.clone(),
        InMemoryLogging::new(),
        InMemoryCache::new(),
        notifier.clone(),
        &config,
    );
    TestHarness {
        service,
        storage,
        notifier,
    }
}
