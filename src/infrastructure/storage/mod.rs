use crate::core::errors::LedgerError;
use crate::core::models::{Expense, Group, LedgerSnapshot, MemberId};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError>;
    async fn get_member_groups(&self, member_id: &MemberId) -> Result<Vec<Group>, LedgerError>;
    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError>;
    /// Expenses of a group in the order they were saved.
    async fn get_group_expenses(&self, group_id: &str) -> Result<Vec<Expense>, LedgerError>;
    async fn save_snapshot(&self, snapshot: LedgerSnapshot) -> Result<(), LedgerError>;
    async fn get_snapshot(&self, member_id: &MemberId) -> Result<Option<LedgerSnapshot>, LedgerError>;
}

pub mod in_memory;
