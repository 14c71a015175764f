use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, info};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

/// 多实例部署时共享管理员会话
///
/// 所有键都带 `cache.redis.key_prefix` 前缀，清空时也只动这一前缀下的键。
pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    default_ttl: u64,
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis_config = &config.cache.redis;

        let client = redis::Client::open(redis_config.url.as_str())
            .map_err(|e| format!("Invalid Redis URL '{}': {e}", redis_config.url))?;

        // 启动阶段同步 PING 一次，连不上就让启动流程回退到 moka
        let pong: String = client
            .get_connection()
            .and_then(|mut conn| redis::cmd("PING").query(&mut conn))
            .map_err(|e| {
                error!("Redis at {} is unreachable: {}", redis_config.url, e);
                format!("Redis ping failed: {e}")
            })?;
        info!(
            "Redis session cache ready ({}), prefix '{}'",
            pong, redis_config.key_prefix
        );

        Ok(Self::from_parts(
            client,
            &redis_config.key_prefix,
            config.cache.default_ttl,
        ))
    }

    fn from_parts(client: redis::Client, key_prefix: &str, default_ttl: u64) -> Self {
        Self {
            client,
            key_prefix: key_prefix.to_string(),
            default_ttl,
        }
    }

    fn ttl_or_default(&self, ttl: u64) -> u64 {
        if ttl == 0 { self.default_ttl } else { ttl }
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    async fn connection(&self) -> Option<MultiplexedConnection> {
        match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let Some(mut conn) = self.connection().await else {
            return CacheResult::ExistsButNoValue;
        };

        match conn.get::<_, Option<String>>(self.prefixed(key)).await {
            Ok(Some(data)) => CacheResult::Found(data),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Redis GET {} failed: {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let ttl = self.ttl_or_default(ttl);
        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.prefixed(&key), value, ttl)
            .await
        {
            error!("Redis SETEX {} failed: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        match conn.del::<_, i64>(self.prefixed(key)).await {
            Ok(0) => debug!("Nothing to remove for {}", key),
            Ok(_) => debug!("Removed {}", key),
            Err(e) => error!("Redis DEL {} failed: {}", key, e),
        }
    }

    async fn invalidate_all(&self) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let pattern = format!("{}*", self.key_prefix);
        let keys: Vec<String> = match redis::cmd("KEYS")
            .arg(&pattern)
            .query_async(&mut conn)
            .await
        {
            Ok(keys) => keys,
            Err(e) => {
                error!("Redis KEYS {} failed: {}", pattern, e);
                return;
            }
        };
        if keys.is_empty() {
            return;
        }

        match conn.del::<_, i64>(keys).await {
            Ok(n) => info!("Dropped {} cached sessions", n),
            Err(e) => error!("Failed to drop cached sessions: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_cache() -> RedisObjectCache {
        // open 只解析 URL，不会建立连接
        let client = redis::Client::open("redis://127.0.0.1:6379").unwrap();
        RedisObjectCache::from_parts(client, "school:", 3600)
    }

    #[test]
    fn test_keys_are_prefixed() {
        assert_eq!(offline_cache().prefixed("admin:abc"), "school:admin:abc");
    }

    #[test]
    fn test_zero_ttl_uses_default() {
        let cache = offline_cache();
        assert_eq!(cache.ttl_or_default(0), 3600);
        assert_eq!(cache.ttl_or_default(60), 60);
    }
}
