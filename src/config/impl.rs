use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 单文件上传上限：10MB
pub const DEFAULT_UPLOAD_MAX_SIZE: i64 = 10 * 1024 * 1024;

impl AppConfig {
    /// 内置默认值，保证没有配置文件时也能启动（开发与测试环境）
    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.unix_socket_path", "")?
            .set_default("server.workers", 0)?
            .set_default("server.max_workers", 16)?
            .set_default("server.timeouts.client_request", 30000)?
            .set_default("server.timeouts.client_disconnect", 5000)?
            .set_default("server.timeouts.keep_alive", 75)?
            .set_default("server.limits.max_payload_size", 12 * 1024 * 1024)?
            .set_default("jwt.secret", "change-me-in-production")?
            .set_default("jwt.access_token_expiry", 60 * 24)?
            .set_default("argon2.memory_cost", 19456)?
            .set_default("argon2.time_cost", 2)?
            .set_default("argon2.parallelism", 1)?
            .set_default("database.url", "school.db")?
            .set_default("database.pool_size", 10)?
            .set_default("database.timeout", 30)?
            .set_default("cache.type", "moka")?
            .set_default("cache.default_ttl", 3600)?
            .set_default("cache.redis.url", "redis://127.0.0.1:6379")?
            .set_default("cache.redis.key_prefix", "school:")?
            .set_default("cache.redis.pool_size", 10)?
            .set_default("cache.memory.max_capacity", 10000)?
            .set_default("cors.allowed_origins", vec!["http://localhost:5173"])?
            .set_default("cors.max_age", 3600)?
            .set_default("upload.dir", "uploads/tmp")?
            .set_default("upload.public_dir", "public/uploads")?
            .set_default("upload.public_base_url", "http://localhost:3000")?
            .set_default("upload.max_size", DEFAULT_UPLOAD_MAX_SIZE)?
            .set_default(
                "upload.image_types",
                vec!["image/jpeg", "image/jpg", "image/png", "image/gif"],
            )?
            .set_default(
                "upload.routine_types",
                vec![
                    "image/jpeg",
                    "image/jpg",
                    "image/png",
                    "image/gif",
                    "application/pdf",
                ],
            )?
            .set_default("upload.image_extensions", vec!["jpeg", "jpg", "png", "gif"])?
            .set_default(
                "upload.routine_extensions",
                vec!["jpeg", "jpg", "png", "gif", "pdf"],
            )?
            .set_default("upload.remote_timeout_secs", 15)?
            .set_default("object_store.type", "cloudinary")?
            .set_default("object_store.cloudinary.cloud_name", "")?
            .set_default("object_store.cloudinary.api_key", "")?
            .set_default("object_store.cloudinary.api_secret", "")?
            .set_default(
                "object_store.cloudinary.api_base",
                "https://api.cloudinary.com/v1_1",
            )?
            .set_default("object_store.cloudinary.request_timeout_secs", 30)
    }

    /// 合并顺序：内置默认值、config.toml、config.{APP_ENV}.toml、SCHOOL_* 变量、常用独立变量
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config").required(false))
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 例如 SCHOOL_UPLOAD__PUBLIC_DIR
            .add_source(
                Environment::with_prefix("SCHOOL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "upload.public_base_url",
                std::env::var("PUBLIC_BASE_URL").ok(),
            )?
            .set_override_option(
                "object_store.cloudinary.cloud_name",
                std::env::var("CLOUDINARY_CLOUD_NAME").ok(),
            )?
            .set_override_option(
                "object_store.cloudinary.api_key",
                std::env::var("CLOUDINARY_API_KEY").ok(),
            )?
            .set_override_option(
                "object_store.cloudinary.api_secret",
                std::env::var("CLOUDINARY_API_SECRET").ok(),
            )?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 0 表示按 CPU 核数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        Ok(app_config)
    }

    /// 全局配置；首次访问时加载，失败直接退出进程
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时显式加载；重复调用返回错误
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config: AppConfig = AppConfig::with_defaults(Config::builder())
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .expect("defaults should form a complete config");

        assert_eq!(config.upload.max_size, 10 * 1024 * 1024);
        assert_eq!(config.upload.remote_timeout_secs, 15);
        assert!(config.upload.image_types.contains(&"image/png".to_string()));
        assert!(
            !config
                .upload
                .image_types
                .contains(&"application/pdf".to_string())
        );
        assert!(
            config
                .upload
                .routine_types
                .contains(&"application/pdf".to_string())
        );
        assert!(!config.upload.image_extensions.contains(&"pdf".to_string()));
        assert!(config.upload.routine_extensions.contains(&"pdf".to_string()));
        assert_eq!(config.object_store.store_type, "cloudinary");
        assert_eq!(config.cache.cache_type, "moka");
    }
}
