use serde::{Deserialize, Serialize};

/// 全部配置段，字段名与配置文件的小节一一对应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub argon2: Argon2Config,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
    pub object_store: ObjectStoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub environment: String, // development / production
    pub log_level: String,
}

/// HTTP 监听与 worker 数量；`unix_socket_path` 非空时改为监听套接字
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 毫秒，keep_alive 为秒
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// 管理员访问令牌
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    #[serde(skip_serializing, default)]
    pub secret: String,
    pub access_token_expiry: i64, // 分钟
}

/// Argon2 密码哈希参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
}

/// sqlite / postgres / mysql，类型由 URL scheme 决定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub timeout: u64, // 秒
}

/// 会话缓存，`type` 为 moka 或 redis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
    pub pool_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: usize,
}

/// 学校图片与课程表文件的上传规则
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: String,                     // 临时上传目录
    pub public_dir: String,              // 本地公开文件目录（通过 /uploads 访问）
    pub public_base_url: String,         // 本地文件对外访问的基础地址
    pub max_size: usize,                 // 单文件最大字节数
    pub image_types: Vec<String>,        // 图片允许的 MIME 类型
    pub image_extensions: Vec<String>,   // 图片允许的扩展名（不含点号）
    pub routine_types: Vec<String>,      // 课程表允许的 MIME 类型
    pub routine_extensions: Vec<String>, // 课程表允许的扩展名
    pub remote_timeout_secs: u64,        // 远程上传超时，超时后课程表回退到本地
}

/// 远程文件存储，`type` 为 cloudinary 或 local
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStoreConfig {
    #[serde(rename = "type")]
    pub store_type: String,
    pub cloudinary: CloudinaryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    #[serde(skip_serializing, default)]
    pub api_secret: String,
    pub api_base: String,
    pub request_timeout_secs: u64,
}
