use crate::core::errors::LedgerError;
use crate::core::models::{AppLog, AuditAction, MemberId};
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryLogging {
    entries: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        InMemoryLogging {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(
        &self,
        action: AuditAction,
        group_id: &str,
        actor: &MemberId,
        details: Value,
    ) -> Result<(), LedgerError> {
        let Value::Object(fields) = details else {
            return Err(LedgerError::LoggingError(format!(
                "{} details for group {} are not a JSON object",
                action, group_id
            )));
        };
        tracing::debug!(group_id, actor = %actor, "audit: {}", action);
        self.entries.write().await.push(AppLog {
            id: Uuid::new_v4().to_string(),
            action,
            actor: actor.clone(),
            group_id: group_id.to_string(),
            details: fields.into_iter().collect(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, LedgerError> {
        Ok(self.entries.read().await.clone())
    }

    async fn get_group_logs(&self, group_id: &str) -> Result<Vec<AppLog>, LedgerError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().filter(|e| e.group_id == group_id).cloned().collect())
    }
}
