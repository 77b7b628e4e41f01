//! Cache Storage capability.
//!
//! Mirrors the subset of the `caches` global the worker uses: named caches
//! holding responses keyed by request identity.

use async_trait::async_trait;
use ponto_common::PlatformError;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use crate::models::Response;

/// Named response caches.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Stores `response` under `key` in `cache_name`, creating the cache and
    /// replacing any previous entry.
    async fn put(&self, cache_name: &str, key: &str, response: &Response)
        -> Result<(), PlatformError>;

    /// Looks `key` up in `cache_name`.
    async fn match_key(&self, cache_name: &str, key: &str)
        -> Result<Option<Response>, PlatformError>;

    /// Names of every existing cache.
    async fn keys(&self) -> Result<Vec<String>, PlatformError>;

    /// Deletes a whole cache. Returns `false` if it did not exist.
    async fn delete(&self, cache_name: &str) -> Result<bool, PlatformError>;
}

/// Process-local cache storage. Entries live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryCacheStorage {
    caches: Mutex<BTreeMap<String, HashMap<String, Response>>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held in `cache_name`.
    pub fn entry_count(&self, cache_name: &str) -> usize {
        self.caches
            .lock()
            .ok()
            .and_then(|caches| caches.get(cache_name).map(HashMap::len))
            .unwrap_or(0)
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, HashMap<String, Response>>>, PlatformError>
    {
        self.caches
            .lock()
            .map_err(|_| PlatformError::Cache("cache storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    async fn put(
        &self,
        cache_name: &str,
        key: &str,
        response: &Response,
    ) -> Result<(), PlatformError> {
        let mut caches = self.lock()?;
        caches
            .entry(cache_name.to_string())
            .or_default()
            .insert(key.to_string(), response.clone());
        Ok(())
    }

    async fn match_key(
        &self,
        cache_name: &str,
        key: &str,
    ) -> Result<Option<Response>, PlatformError> {
        let caches = self.lock()?;
        Ok(caches
            .get(cache_name)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    async fn keys(&self) -> Result<Vec<String>, PlatformError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    async fn delete(&self, cache_name: &str) -> Result<bool, PlatformError> {
        Ok(self.lock()?.remove(cache_name).is_some())
    }
}
