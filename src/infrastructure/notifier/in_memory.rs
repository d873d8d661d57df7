use crate::core::errors::LedgerError;
use crate::core::models::LedgerEvent;
use crate::infrastructure::notifier::Notifier;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryNotifier {
    events: Arc<RwLock<Vec<LedgerEvent>>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        InMemoryNotifier {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn events(&self) -> Vec<LedgerEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, event: LedgerEvent) -> Result<(), LedgerError> {
        tracing::debug!(group_id = event.group_id(), "refresh notification: {:?}", event);
        self.events.write().await.push(event);
        Ok(())
    }
}
