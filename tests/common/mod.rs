//! 端点测试共用的夹具：临时 SQLite、可记录调用的对象存储与登录令牌

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use actix_web::{App, web};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use tempfile::TempDir;

use rust_school_next::cache::ObjectCache;
use rust_school_next::cache::object_cache::moka::MokaCacheWrapper;
use rust_school_next::config::AppConfig;
use rust_school_next::errors::{Result, SchoolError};
use rust_school_next::models::AppStartTime;
use rust_school_next::models::admins::{Admin, AdminRole, NewAdmin};
use rust_school_next::object_store::{ObjectStore, StoredObject};
use rust_school_next::routes;
use rust_school_next::storage::Storage;
use rust_school_next::storage::sea_orm_storage::SeaOrmStorage;
use rust_school_next::utils::password::hash_password;
use rust_school_next::utils::{json_error_handler, query_error_handler};

/// 整个测试进程共用的上传目录，必须在第一次读取配置之前设置
static UPLOAD_ROOT: Lazy<TempDir> = Lazy::new(|| {
    let dir = tempfile::tempdir().expect("create upload root");
    // SAFETY: 在任何配置读取之前、由 Lazy 保证只执行一次
    unsafe {
        std::env::set_var("SCHOOL_UPLOAD__DIR", dir.path().join("tmp"));
        std::env::set_var("SCHOOL_UPLOAD__PUBLIC_DIR", dir.path().join("public"));
        std::env::set_var("SCHOOL_UPLOAD__PUBLIC_BASE_URL", "http://school.test");
        std::env::set_var("SCHOOL_UPLOAD__REMOTE_TIMEOUT_SECS", "1");
        std::env::set_var("SCHOOL_ARGON2__MEMORY_COST", "1024");
        std::env::set_var("SCHOOL_ARGON2__TIME_COST", "1");
    }
    dir
});

pub fn init_config() -> &'static AppConfig {
    Lazy::force(&UPLOAD_ROOT);
    AppConfig::get()
}

pub fn public_dir() -> PathBuf {
    UPLOAD_ROOT.path().join("public")
}

/// 对象存储的调用记录
#[derive(Default)]
pub struct RecordingStore {
    pub uploads: Mutex<Vec<String>>,
    pub deletes: Mutex<Vec<String>>,
    /// 按发生顺序的 `upload:{id}` 与 `delete:{id}`
    pub calls: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingStore {
    pub fn working() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 所有调用都失败，模拟远程存储不可用
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Default::default()
        })
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn call_log(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn upload(&self, path: &Path, folder: &str, _content_type: &str) -> Result<StoredObject> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        self.uploads.lock().unwrap().push(format!("{folder}/{file_name}"));
        self.calls
            .lock()
            .unwrap()
            .push(format!("upload:{folder}/{file_name}"));

        if self.fail {
            return Err(SchoolError::object_store("remote store unavailable"));
        }

        let public_id = format!("{folder}/{file_name}");
        Ok(StoredObject {
            url: format!("https://cdn.test/{public_id}"),
            public_id,
            format: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string(),
        })
    }

    async fn delete(&self, public_id: &str) -> Result<()> {
        self.deletes.lock().unwrap().push(public_id.to_string());
        self.calls.lock().unwrap().push(format!("delete:{public_id}"));
        if self.fail {
            return Err(SchoolError::object_store("remote store unavailable"));
        }
        Ok(())
    }
}

/// 单个测试的运行环境，持有临时数据库目录
pub struct TestContext {
    _db_dir: TempDir,
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub object_store: Arc<RecordingStore>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_store(RecordingStore::working()).await
    }

    pub async fn with_store(object_store: Arc<RecordingStore>) -> Self {
        init_config();

        let db_dir = tempfile::tempdir().expect("create db dir");
        let url = format!("sqlite://{}?mode=rwc", db_dir.path().join("school.db").display());
        let storage = SeaOrmStorage::new_with_url(&url, 1, 5)
            .await
            .expect("open test database");
        let cache = MokaCacheWrapper::new().expect("create moka cache");

        Self {
            _db_dir: db_dir,
            storage: Arc::new(storage),
            cache: Arc::new(cache),
            object_store,
        }
    }

    /// 与 main 相同的路由与数据注册
    pub fn app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let object_store: Arc<dyn ObjectStore> = self.object_store.clone();
        App::new()
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.cache.clone()))
            .app_data(web::Data::new(object_store))
            .app_data(web::Data::new(AppStartTime {
                start_datetime: chrono::Utc::now(),
            }))
            .configure(routes::configure_all)
    }

    /// 直接写库创建管理员
    pub async fn seed_admin(&self, username: &str, password: &str, role: AdminRole) -> Admin {
        self.storage
            .create_admin(NewAdmin {
                username: username.to_string(),
                email: format!("{username}@school.test"),
                password_hash: hash_password(password).expect("hash password"),
                role,
            })
            .await
            .expect("seed admin")
    }

    /// 创建管理员并返回 Bearer 头
    pub async fn admin_bearer(&self) -> (String, String) {
        let admin = self.seed_admin("principal", "secret-pass", AdminRole::Admin).await;
        let token = admin.generate_access_token().expect("sign token");
        ("Authorization".to_string(), format!("Bearer {token}"))
    }
}

pub const BOUNDARY: &str = "----school-test-boundary";

/// 手工拼装 multipart/form-data 请求体
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &str, &[u8])>,
) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    if let Some((field, file_name, content_type, data)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// 最小的合法 PNG 头
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01,
];

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<< >>\nendobj\ntrailer\n<< >>\n%%EOF\n";

pub fn student_payload(first_name: &str, class: &str, section: &str, roll: i32) -> serde_json::Value {
    serde_json::json!({
        "FirstName": first_name,
        "LastName": "Rahman",
        "DateOfBirth": "2012-04-09",
        "Gender": "Female",
        "Class": class,
        "Section": section,
        "RollNumber": roll,
    })
}
