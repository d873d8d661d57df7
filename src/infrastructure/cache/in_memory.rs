use crate::core::errors::LedgerError;
use crate::core::models::Settlement;
use crate::infrastructure::cache::{Cache, cache_keys};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (Vec<Settlement>, DateTime<Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_settlements(&self, group_id: &str, run: u64) -> Result<Option<Vec<Settlement>>, LedgerError> {
        let cache = self.cache.read().await;
        let key = cache_keys::settlements_key(group_id, run);
        Ok(cache
            .get(&key)
            .filter(|(_, expiry)| *expiry > Utc::now())
            .map(|(settlements, _)| settlements.clone()))
    }

    async fn save_settlements(
        &self,
        group_id: &str,
        run: u64,
        settlements: &[Settlement],
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError> {
        let expiry = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| LedgerError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        let mut cache = self.cache.write().await;
        cache.insert(cache_keys::settlements_key(group_id, run), (settlements.to_vec(), expiry));
        Ok(())
    }

    async fn invalidate_group(&self, group_id: &str) -> Result<(), LedgerError> {
        let prefix = cache_keys::group_prefix(group_id);
        let mut cache = self.cache.write().await;
        cache.retain(|key, (_, expiry)| !key.starts_with(&prefix) && *expiry > Utc::now());
        Ok(())
    }
}
