use crate::cache::{ObjectCache, register::OBJECT_CACHES};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::admins::{AdminRole, NewAdmin};
use crate::object_store::{ObjectStore, register::OBJECT_STORES};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub object_store: Arc<dyn ObjectStore>,
}

/// 会话缓存：配置的后端连不上（通常是 redis）时用进程内的 moka
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;
    OBJECT_CACHES
        .build_with_fallback(cache_type, "moka")
        .await
        .map(Arc::from)
}

fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 文件存储：远程存储凭据缺失或不可用时写本地磁盘
async fn create_object_store() -> Result<Arc<dyn ObjectStore>> {
    let store_type = &AppConfig::get().object_store.store_type;
    OBJECT_STORES
        .build_with_fallback(store_type, "local")
        .await
        .map(Arc::from)
}

/// 库里还没有管理员时创建 `admin`，密码取 ADMIN_PASSWORD，未设置则随机生成并打印一次
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_admins(None).await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} admin(s), skipping admin seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No admins found in database, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count admins: {}, skipping admin seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!(
            "ADMIN_PASSWORD not set, generated password for 'admin': {} (store it now, it is not shown again)",
            pwd
        );
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let new_admin = NewAdmin {
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password_hash,
        role: AdminRole::Admin,
    };

    match storage.create_admin(new_admin).await {
        Ok(admin) => {
            info!(
                "Default admin account created successfully (ID: {}, username: {})",
                admin.admin_id, admin.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 依次准备存储（含迁移）、默认管理员、会话缓存与文件存储；任何一步失败都无法提供服务，直接退出
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        OBJECT_CACHES.log_registered();
        OBJECT_STORES.log_registered();
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    let object_store = create_object_store()
        .await
        .expect("Failed to create object store");
    warn!("Object store initialized: {}", object_store.name());

    StartupContext {
        storage,
        cache,
        object_store,
    }
}
