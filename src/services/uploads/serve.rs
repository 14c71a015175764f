use std::path::Path;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::UploadService;
use crate::config::AppConfig;
use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::stores::local::sanitize_relative;
use crate::services::common::{bad_request, not_found};
use crate::utils::content_type_for_extension;

pub async fn serve_upload(
    _service: &UploadService,
    _request: &HttpRequest,
    relative: String,
) -> ActixResult<HttpResponse> {
    let relative = match sanitize_relative(&relative) {
        Ok(relative) => relative,
        Err(_) => return Ok(bad_request("Invalid file path")),
    };

    let config = AppConfig::get();
    let file_path = Path::new(&config.upload.public_dir).join(&relative);

    let body = match tokio::fs::read(&file_path).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(not_found(ErrorCode::FileNotFound, "File not found"));
        }
        Err(e) => {
            tracing::error!(
                "{}",
                SchoolError::file_operation(format!("读取文件失败 {}: {e}", file_path.display()))
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type_for_extension(extension)))
        .body(body))
}
