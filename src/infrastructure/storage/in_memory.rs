use crate::core::errors::LedgerError;
use crate::core::models::{Expense, Group, LedgerSnapshot, MemberId};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    groups: Arc<RwLock<HashMap<String, Group>>>,
    expenses: Arc<RwLock<HashMap<String, Vec<Expense>>>>, // group_id -> log
    snapshots: Arc<RwLock<HashMap<MemberId, LedgerSnapshot>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            groups: Arc::new(RwLock::new(HashMap::new())),
            expenses: Arc::new(RwLock::new(HashMap::new())),
            snapshots: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn get_member_groups(&self, member_id: &MemberId) -> Result<Vec<Group>, LedgerError> {
        let groups = self.groups.read().await;
        let mut member_groups: Vec<Group> = groups.values().filter(|g| g.is_member(member_id)).cloned().collect();
        member_groups.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(member_groups)
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError> {
        let mut expenses = self.expenses.write().await;
        let log = expenses.entry(expense.group_id.clone()).or_default();
        if log.iter().any(|e| e.id == expense.id) {
            return Err(LedgerError::StorageError(format!("Expense {} already stored", expense.id)));
        }
        log.push(expense);
        Ok(())
    }

    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<Expense>, LedgerError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.get(group_id).cloned().unwrap_or_default())
    }

    async fn save_snapshot(&self, snapshot: LedgerSnapshot) -> Result<(), LedgerError> {
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(snapshot.owner.clone(), snapshot);
        Ok(())
    }

    async fn get_snapshot(&self, member_id: &MemberId) -> Result<Option<LedgerSnapshot>, LedgerError> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots.get(member_id).cloned())
    }
}
