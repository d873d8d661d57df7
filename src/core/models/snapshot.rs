use super::expense::Expense;
use super::group::Group;
use super::member::MemberId;
use super::payment::PaymentStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one member can see: their groups, those groups' expenses and the
/// payment records for those groups.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub owner: MemberId,
    pub groups: Vec<Group>,
    pub expenses: Vec<Expense>,
    pub payments: Vec<PaymentStatus>,
    pub taken_at: DateTime<Utc>,
}

/// Refresh notification for whatever renders the group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    GroupCreated { group_id: String },
    ExpenseAdded { group_id: String, expense_id: String },
    PaymentUpdated { group_id: String, settlement_id: String, state: String },
}

impl LedgerEvent {
    pub fn group_id(&self) -> &str {
        match self {
            LedgerEvent::GroupCreated { group_id }
            | LedgerEvent::ExpenseAdded { group_id, .. }
            | LedgerEvent::PaymentUpdated { group_id, .. } => group_id,
        }
    }
}
