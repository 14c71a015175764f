use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::config::AppConfig;
use crate::declare_object_store_plugin;
use crate::errors::{Result, SchoolError};
use crate::object_store::{ObjectStore, StoredObject};

declare_object_store_plugin!("local", LocalObjectStore);

/// 本地公开目录前缀，用于区分远程 public id
pub const LOCAL_PUBLIC_ID_PREFIX: &str = "local:";

/// 本地磁盘存储，文件通过 `/uploads/...` 对外提供
pub struct LocalObjectStore {
    public_dir: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new() -> std::result::Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_dirs(
            &config.upload.public_dir,
            &config.upload.public_base_url,
        ))
    }

    pub fn with_dirs(public_dir: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            public_dir: public_dir.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 相对路径对应的公开地址
    pub fn public_url(&self, relative: &str) -> String {
        format!("{}/uploads/{}", self.public_base_url, relative)
    }

    /// 把文件移动到公开目录根下的指定文件名，返回公开地址
    ///
    /// 临时目录与公开目录可能不在同一文件系统，rename 失败时改为复制后删除。
    pub async fn persist_as(&self, source: &Path, file_name: &str) -> Result<String> {
        let relative = sanitize_relative(file_name)?;
        let target = self.public_dir.join(&relative);
        ensure_parent(&target).await?;

        if tokio::fs::rename(source, &target).await.is_err() {
            tokio::fs::copy(source, &target).await.map_err(|e| {
                SchoolError::file_operation(format!("保存本地文件失败 {}: {e}", target.display()))
            })?;
            let _ = tokio::fs::remove_file(source).await;
        }

        debug!("Persisted file to {}", target.display());
        Ok(self.public_url(&relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn upload(&self, path: &Path, folder: &str, _content_type: &str) -> Result<StoredObject> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_else(|| "bin".to_string());

        let relative = sanitize_relative(&format!(
            "{}/{}.{}",
            folder.trim_matches('/'),
            uuid::Uuid::new_v4(),
            format
        ))?;
        let target = self.public_dir.join(&relative);
        ensure_parent(&target).await?;

        tokio::fs::copy(path, &target).await.map_err(|e| {
            SchoolError::file_operation(format!("复制文件失败 {}: {e}", target.display()))
        })?;

        Ok(StoredObject {
            url: self.public_url(&relative),
            public_id: format!("{LOCAL_PUBLIC_ID_PREFIX}{relative}"),
            format,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<()> {
        let Some(relative) = public_id.strip_prefix(LOCAL_PUBLIC_ID_PREFIX) else {
            debug!("Skipping delete of non-local object {}", public_id);
            return Ok(());
        };

        let target = self.public_dir.join(sanitize_relative(relative)?);
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SchoolError::file_operation(format!(
                "删除文件失败 {}: {e}",
                target.display()
            ))),
        }
    }
}

/// 只允许普通路径段，拒绝 `..` 与绝对路径
pub fn sanitize_relative(relative: &str) -> Result<String> {
    let path = Path::new(relative);
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => {
                return Err(SchoolError::validation(format!(
                    "Invalid file path: {relative}"
                )));
            }
        }
    }
    if parts.is_empty() {
        return Err(SchoolError::validation("Empty file path"));
    }
    Ok(parts.join("/"))
}

async fn ensure_parent(target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            SchoolError::file_operation(format!("创建目录失败 {}: {e}", parent.display()))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_relative_rejects_traversal() {
        assert_eq!(
            sanitize_relative("school/students/a.png").unwrap(),
            "school/students/a.png"
        );
        assert!(sanitize_relative("../etc/passwd").is_err());
        assert!(sanitize_relative("/etc/passwd").is_err());
        assert!(sanitize_relative("").is_err());
    }

    #[tokio::test]
    async fn test_upload_then_delete() {
        let public = tempfile::tempdir().unwrap();
        let source_dir = tempfile::tempdir().unwrap();
        let source = source_dir.path().join("upload.png");
        tokio::fs::write(&source, b"\x89PNG\r\n\x1a\nrest").await.unwrap();

        let store = LocalObjectStore::with_dirs(public.path(), "http://localhost:3000/");
        let stored = store
            .upload(&source, "school/students", "image/png")
            .await
            .unwrap();

        assert!(stored.url.starts_with("http://localhost:3000/uploads/school/students/"));
        assert!(stored.public_id.starts_with("local:school/students/"));
        assert_eq!(stored.format, "png");

        let relative = stored.public_id.trim_start_matches(LOCAL_PUBLIC_ID_PREFIX);
        assert!(public.path().join(relative).exists());

        store.delete(&stored.public_id).await.unwrap();
        assert!(!public.path().join(relative).exists());
        // 重复删除视为成功
        store.delete(&stored.public_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_persist_as_moves_file() {
        let public = tempfile::tempdir().unwrap();
        let source_dir = tempfile::tempdir().unwrap();
        let source = source_dir.path().join("tmp.pdf");
        tokio::fs::write(&source, b"%PDF-1.4").await.unwrap();

        let store = LocalObjectStore::with_dirs(public.path(), "http://school.test");
        let url = store.persist_as(&source, "routine_1.pdf").await.unwrap();

        assert_eq!(url, "http://school.test/uploads/routine_1.pdf");
        assert!(public.path().join("routine_1.pdf").exists());
        assert!(!source.exists());
    }
}
