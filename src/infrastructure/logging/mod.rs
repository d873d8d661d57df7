pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::{AppLog, AuditAction, MemberId};
use async_trait::async_trait;

/// Append-only audit trail of ledger operations.
#[async_trait]
pub trait LoggingService: Send + Sync {
    /// `details` must be a JSON object.
    async fn log_action(
        &self,
        action: AuditAction,
        group_id: &str,
        actor: &MemberId,
        details: serde_json::Value,
    ) -> Result<(), LedgerError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, LedgerError>;
    async fn get_group_logs(&self, group_id: &str) -> Result<Vec<AppLog>, LedgerError>;
}
