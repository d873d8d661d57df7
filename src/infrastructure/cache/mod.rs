pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::Settlement;
use async_trait::async_trait;

/// Resolved settlements per group revision.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_settlements(&self, group_id: &str, run: u64) -> Result<Option<Vec<Settlement>>, LedgerError>;
    async fn save_settlements(
        &self,
        group_id: &str,
        run: u64,
        settlements: &[Settlement],
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError>;
    async fn invalidate_group(&self, group_id: &str) -> Result<(), LedgerError>;
}
