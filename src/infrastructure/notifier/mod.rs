pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::LedgerEvent;
use async_trait::async_trait;

/// Tells the presentation side that a group needs re-rendering.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: LedgerEvent) -> Result<(), LedgerError>;
}
