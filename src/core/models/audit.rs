use super::member::MemberId;
use super::payment::PaymentState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use utoipa::ToSchema;

/// What an audit entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    GroupCreated,
    ExpenseAdded,
    BalancesQueried,
    SettlementsResolved,
    PaymentInitiated,
    PaymentPaid,
    PaymentCancelled,
    PaymentFailed,
}

impl AuditAction {
    /// The action recorded when a payment lands in `state`.
    pub fn for_payment(state: PaymentState) -> Self {
        match state {
            PaymentState::Pending => AuditAction::PaymentInitiated,
            PaymentState::Paid => AuditAction::PaymentPaid,
            PaymentState::Cancelled => AuditAction::PaymentCancelled,
            PaymentState::Failed => AuditAction::PaymentFailed,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuditAction::GroupCreated => "GROUP_CREATED",
            AuditAction::ExpenseAdded => "EXPENSE_ADDED",
            AuditAction::BalancesQueried => "BALANCES_QUERIED",
            AuditAction::SettlementsResolved => "SETTLEMENTS_RESOLVED",
            AuditAction::PaymentInitiated => "PAYMENT_INITIATED",
            AuditAction::PaymentPaid => "PAYMENT_PAID",
            AuditAction::PaymentCancelled => "PAYMENT_CANCELLED",
            AuditAction::PaymentFailed => "PAYMENT_FAILED",
        };
        write!(f, "{}", s)
    }
}

/// One audited ledger operation, always scoped to a group.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AppLog {
    pub id: String,
    pub action: AuditAction,
    #[schema(value_type = String)]
    pub actor: MemberId,
    pub group_id: String,
    #[schema(value_type = Object)]
    pub details: HashMap<String, serde_json::Value>,
    #[schema(value_type = String, example = "2025-08-15T12:00:00Z")]
    pub timestamp: DateTime<Utc>,
}
