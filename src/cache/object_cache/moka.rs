use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

/// 单实例部署的默认会话缓存，条目统一按 `cache.default_ttl` 过期
pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let cache = &AppConfig::get().cache;
        if cache.memory.max_capacity == 0 {
            return Err("cache.memory.max_capacity must be positive".to_string());
        }

        debug!(
            "In-memory session cache: {} entries, ttl {}s",
            cache.memory.max_capacity, cache.default_ttl
        );
        Ok(Self {
            inner: Cache::builder()
                .max_capacity(cache.memory.max_capacity)
                .time_to_live(std::time::Duration::from_secs(cache.default_ttl))
                .build(),
        })
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        self.inner
            .get(key)
            .await
            .map_or(CacheResult::NotFound, CacheResult::Found)
    }

    // 单条 ttl 被忽略，过期时间在构建时统一设定
    async fn insert_raw(&self, key: String, value: String, _ttl: u64) {
        self.inner.insert(key, value).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalidate_all_drops_sessions() {
        let cache = MokaCacheWrapper::new().unwrap();
        cache.insert_raw("admin:a".into(), "1".into(), 0).await;
        cache.insert_raw("admin:b".into(), "2".into(), 0).await;
        cache.invalidate_all().await;
        assert_eq!(cache.get_raw("admin:a").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("admin:b").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::new().unwrap();
        cache.insert_raw("admin:t".into(), "{}".into(), 0).await;
        assert_eq!(cache.get_raw("admin:t").await, CacheResult::Found("{}".into()));
        cache.remove("admin:t").await;
        assert_eq!(cache.get_raw("admin:t").await, CacheResult::NotFound);
    }
}
