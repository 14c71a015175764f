//! 图片与课程表共用的 multipart 解析
//!
//! 文件先落到 `upload.dir` 下的临时文件，类型、扩展名、魔术字节与大小全部校验通过后
//! 才交给对象存储。临时文件由 [`TempUpload`] 持有，离开作用域时自动删除。

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::{AppConfig, UploadConfig};
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::{content_type_for_extension, validate_magic_bytes};

/// 文本字段的长度上限
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;
/// 魔术字节校验所需的头部长度
const MAGIC_HEAD_BYTES: usize = 16;

/// 某个上传接口允许的 MIME 类型与扩展名
#[derive(Debug, Clone, Copy)]
pub struct UploadRules<'a> {
    pub types: &'a [String],
    pub extensions: &'a [String],
}

impl<'a> UploadRules<'a> {
    pub fn images(config: &'a UploadConfig) -> Self {
        Self {
            types: &config.image_types,
            extensions: &config.image_extensions,
        }
    }

    pub fn routines(config: &'a UploadConfig) -> Self {
        Self {
            types: &config.routine_types,
            extensions: &config.routine_extensions,
        }
    }
}

/// 已校验的临时上传文件
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
    pub original_name: String,
    /// 小写扩展名，不含点号
    pub extension: String,
    pub content_type: String,
    pub size: usize,
}

impl TempUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[cfg(test)]
    pub(crate) fn for_test(path: PathBuf, extension: &str, content_type: &str) -> Self {
        Self {
            path,
            original_name: format!("upload.{extension}"),
            extension: extension.to_string(),
            content_type: content_type.to_string(),
            size: 0,
        }
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        // 已被移动到公开目录时删除会失败，忽略即可
        if fs::remove_file(&self.path).is_ok() {
            debug!("Removed temp upload {}", self.path.display());
        }
    }
}

/// 解析后的表单：至多一个文件，加上全部文本字段
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<TempUpload>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// 去除首尾空白后的非空字段
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

fn rejected(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

fn upload_failed(err: SchoolError) -> HttpResponse {
    error!("{}", err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::FileUploadFailed,
        "Failed to store uploaded file",
    ))
}

/// 扩展名与 MIME 类型的前置校验
///
/// 声明的类型必须在允许列表内，扩展名也必须在允许列表内，且两者指向同一种文件。
pub fn check_declared_type(
    original_name: &str,
    content_type: &str,
    rules: UploadRules<'_>,
) -> Result<String, String> {
    if !rules
        .types
        .iter()
        .any(|t| t.eq_ignore_ascii_case(content_type))
    {
        return Err(format!("File type {content_type} is not allowed"));
    }

    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if extension.is_empty() || !rules.extensions.iter().any(|e| e.eq_ignore_ascii_case(&extension))
    {
        return Err(format!(
            "File extension must be one of: {}",
            rules.extensions.join(", ")
        ));
    }

    // image/jpg 是常见的非标准写法
    let declared = content_type.to_ascii_lowercase();
    let declared = if declared == "image/jpg" { "image/jpeg" } else { declared.as_str() };
    if content_type_for_extension(&extension) != declared {
        return Err(format!(
            "File extension .{extension} does not match type {content_type}"
        ));
    }

    Ok(extension)
}

/// 读取 multipart 表单
///
/// `file_field` 为文件字段名，`rules` 为该接口的类型限制。
/// 校验失败时返回可直接响应的 400。
pub async fn read_upload_form(
    mut payload: Multipart,
    file_field: &str,
    rules: UploadRules<'_>,
) -> Result<UploadForm, HttpResponse> {
    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;

    if let Err(e) = fs::create_dir_all(upload_dir) {
        return Err(upload_failed(SchoolError::file_operation(format!(
            "创建上传目录失败 {upload_dir}: {e}"
        ))));
    }

    let mut form = UploadForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| rejected(ErrorCode::BadRequest, format!("Malformed multipart body: {e}")))?
    {
        let content_disposition = field.content_disposition().cloned();
        let name = content_disposition
            .as_ref()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let file_name = content_disposition
            .as_ref()
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        // 普通文本字段
        let Some(original_name) = file_name else {
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| {
                    rejected(ErrorCode::BadRequest, format!("Malformed multipart body: {e}"))
                })?;
                if value.len() + data.len() > MAX_TEXT_FIELD_BYTES {
                    return Err(rejected(
                        ErrorCode::BadRequest,
                        format!("Field {name} is too large"),
                    ));
                }
                value.extend_from_slice(&data);
            }
            form.fields
                .insert(name, String::from_utf8_lossy(&value).into_owned());
            continue;
        };

        if name != file_field {
            return Err(rejected(
                ErrorCode::BadRequest,
                format!("Unexpected file field {name}, expected {file_field}"),
            ));
        }
        if form.file.is_some() {
            return Err(rejected(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            ));
        }

        let content_type = field
            .content_type()
            .map(|ct| ct.essence_str().to_string())
            .unwrap_or_default();

        let extension = check_declared_type(&original_name, &content_type, rules)
            .map_err(|msg| rejected(ErrorCode::FileTypeNotAllowed, msg))?;

        let path = Path::new(upload_dir).join(format!("{}.{}", Uuid::new_v4(), extension));
        let mut file = File::create(&path).map_err(|e| {
            upload_failed(SchoolError::file_operation(format!(
                "创建临时文件失败 {}: {e}",
                path.display()
            )))
        })?;

        // 从这里开始由 guard 负责清理
        let mut upload = TempUpload {
            path,
            original_name,
            extension,
            content_type,
            size: 0,
        };

        let mut head: Vec<u8> = Vec::with_capacity(MAGIC_HEAD_BYTES);
        let mut magic_checked = false;

        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| {
                rejected(ErrorCode::BadRequest, format!("Malformed multipart body: {e}"))
            })?;

            upload.size += data.len();
            if upload.size > max_size {
                return Err(rejected(
                    ErrorCode::FileSizeExceeded,
                    format!("File size exceeds the limit of {max_size} bytes"),
                ));
            }

            if !magic_checked {
                let need = MAGIC_HEAD_BYTES - head.len();
                head.extend_from_slice(&data[..need.min(data.len())]);
                if head.len() >= MAGIC_HEAD_BYTES {
                    magic_checked = true;
                    if !validate_magic_bytes(&head, &upload.extension) {
                        return Err(content_mismatch());
                    }
                }
            }

            file.write_all(&data).map_err(|e| {
                upload_failed(SchoolError::file_operation(format!("写入临时文件失败: {e}")))
            })?;
        }

        // 文件短于头部长度时按已读内容校验
        if !magic_checked && !validate_magic_bytes(&head, &upload.extension) {
            return Err(content_mismatch());
        }

        form.file = Some(upload);
    }

    Ok(form)
}

fn content_mismatch() -> HttpResponse {
    rejected(
        ErrorCode::FileTypeNotAllowed,
        "File content does not match its extension",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_declared_type_checks() {
        let types = strings(&["image/png", "image/jpeg", "image/jpg"]);
        let exts = strings(&["png", "jpg", "jpeg"]);
        let rules = UploadRules {
            types: &types,
            extensions: &exts,
        };

        assert_eq!(
            check_declared_type("Photo.PNG", "image/png", rules).unwrap(),
            "png"
        );
        assert_eq!(check_declared_type("a.jpg", "image/jpg", rules).unwrap(), "jpg");
        assert!(check_declared_type("photo.png", "text/html", rules).is_err());
        assert!(check_declared_type("photo.exe", "image/png", rules).is_err());
        assert!(check_declared_type("photo", "image/png", rules).is_err());
        // 扩展名与声明类型不一致
        assert!(check_declared_type("photo.jpg", "image/png", rules).is_err());
    }

    #[test]
    fn test_image_rules_reject_pdf() {
        let config = UploadConfig {
            dir: String::new(),
            public_dir: String::new(),
            public_base_url: String::new(),
            max_size: 1024,
            image_types: strings(&["image/png", "application/pdf"]),
            image_extensions: strings(&["png"]),
            routine_types: strings(&["image/png", "application/pdf"]),
            routine_extensions: strings(&["png", "pdf"]),
            remote_timeout_secs: 1,
        };

        assert!(check_declared_type("notes.pdf", "image/png", UploadRules::images(&config)).is_err());
        assert!(
            check_declared_type("notes.pdf", "image/png", UploadRules::routines(&config)).is_err()
        );
        assert_eq!(
            check_declared_type("notes.pdf", "application/pdf", UploadRules::routines(&config))
                .unwrap(),
            "pdf"
        );
    }

    #[test]
    fn test_temp_upload_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmp.png");
        fs::write(&path, b"data").unwrap();

        let upload = TempUpload {
            path: path.clone(),
            original_name: "a.png".to_string(),
            extension: "png".to_string(),
            content_type: "image/png".to_string(),
            size: 4,
        };
        drop(upload);
        assert!(!path.exists());
    }
}
