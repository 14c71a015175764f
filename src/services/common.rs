//! 服务层共用的响应构造

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::error;

use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::ObjectStore;
use crate::storage::Storage;

/// 从 app data 中取出存储层
pub(crate) fn storage_from(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 从 app data 中取出对象存储
pub(crate) fn object_store_from(request: &HttpRequest) -> Arc<dyn ObjectStore> {
    request
        .app_data::<web::Data<Arc<dyn ObjectStore>>>()
        .expect("Object store not found in app data")
        .get_ref()
        .clone()
}

pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        message,
    ))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn conflict(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::DuplicateRecord, message))
}

/// 存储层错误映射为 HTTP 响应
///
/// 唯一约束冲突为 409，外键或输入错误为 400，其余记录日志后返回 500。
pub(crate) fn storage_failure(err: SchoolError, context: &str) -> HttpResponse {
    match err {
        SchoolError::Conflict(msg) => {
            tracing::info!("{}: {}", context, msg);
            conflict(format!("{context}: record already exists"))
        }
        SchoolError::Validation(msg) => bad_request(format!("{context}: {msg}")),
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {}", other.message()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_storage_failure_status_mapping() {
        assert_eq!(
            storage_failure(SchoolError::conflict("dup"), "Create class").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            storage_failure(SchoolError::validation("fk"), "Create class").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            storage_failure(SchoolError::database_operation("down"), "Create class").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
