//! 课程表文件落盘：远程上传限时，失败或超时回退到本地公开目录

use std::time::Duration;

use tracing::{info, warn};

use crate::errors::{Result, SchoolError};
use crate::models::routines::{entities::RoutineFileType, requests::RoutineFile};
use crate::object_store::ObjectStore;
use crate::object_store::stores::LocalObjectStore;
use crate::services::uploads::TempUpload;

/// 远程存储中的课程表目录
pub const ROUTINE_FOLDER: &str = "school/routines";

/// 保存课程表文件
///
/// 远程成功时返回远程地址与 public id；远程失败或超时后移动到
/// `{public_dir}/routine_{millis}.{ext}`，此时 public id 为空。
/// 两者都失败才返回错误。
pub async fn store_routine_file(
    remote: &dyn ObjectStore,
    fallback: &LocalObjectStore,
    upload: &TempUpload,
    timeout: Duration,
) -> Result<RoutineFile> {
    let file_type = RoutineFileType::from_extension(&upload.extension)
        .as_str()
        .to_string();

    let attempt = tokio::time::timeout(
        timeout,
        remote.upload(upload.path(), ROUTINE_FOLDER, &upload.content_type),
    )
    .await;

    match attempt {
        Ok(Ok(stored)) => {
            info!("Routine file uploaded via {}", remote.name());
            return Ok(RoutineFile {
                file_url: stored.url,
                file_type,
                file_public_id: Some(stored.public_id),
            });
        }
        Ok(Err(e)) => warn!(
            "Remote upload via {} failed, falling back to local storage: {}",
            remote.name(),
            e
        ),
        Err(_) => warn!(
            "Remote upload via {} timed out after {}s, falling back to local storage",
            remote.name(),
            timeout.as_secs()
        ),
    }

    let file_name = format!(
        "routine_{}.{}",
        chrono::Utc::now().timestamp_millis(),
        upload.extension
    );
    let file_url = fallback
        .persist_as(upload.path(), &file_name)
        .await
        .map_err(|e| SchoolError::file_operation(format!("本地保存课程表文件失败: {e}")))?;

    Ok(RoutineFile {
        file_url,
        file_type,
        file_public_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object_store::StoredObject;
    use async_trait::async_trait;
    use std::path::Path;

    struct SlowStore;

    #[async_trait]
    impl ObjectStore for SlowStore {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn upload(&self, _: &Path, _: &str, _: &str) -> Result<StoredObject> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Err(SchoolError::timeout("never reached"))
        }

        async fn delete(&self, _: &str) -> Result<()> {
            Ok(())
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl ObjectStore for BrokenStore {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn upload(&self, _: &Path, _: &str, _: &str) -> Result<StoredObject> {
            Err(SchoolError::object_store("credentials rejected"))
        }

        async fn delete(&self, _: &str) -> Result<()> {
            Ok(())
        }
    }

    fn temp_pdf(dir: &Path) -> TempUpload {
        let path = dir.join("upload.pdf");
        std::fs::write(&path, b"%PDF-1.4 routine").unwrap();
        TempUpload::for_test(path, "pdf", "application/pdf")
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_local() {
        let tmp = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        let fallback = LocalObjectStore::with_dirs(public.path(), "http://school.test");
        let upload = temp_pdf(tmp.path());

        let file = store_routine_file(&SlowStore, &fallback, &upload, Duration::from_millis(50))
            .await
            .unwrap();

        assert!(file.file_url.starts_with("http://school.test/uploads/routine_"));
        assert!(file.file_url.ends_with(".pdf"));
        assert_eq!(file.file_type, "pdf");
        assert!(file.file_public_id.is_none());
    }

    #[tokio::test]
    async fn test_remote_error_falls_back_to_local() {
        let tmp = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        let fallback = LocalObjectStore::with_dirs(public.path(), "http://school.test");
        let upload = temp_pdf(tmp.path());

        let file = store_routine_file(&BrokenStore, &fallback, &upload, Duration::from_secs(1))
            .await
            .unwrap();

        assert!(file.file_public_id.is_none());
        let stored_name = file.file_url.rsplit('/').next().unwrap().to_string();
        assert!(public.path().join(stored_name).exists());
    }
}
