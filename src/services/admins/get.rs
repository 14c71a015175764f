use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::storage_failure;

pub async fn list_admins(
    service: &AdminService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_admins().await {
        Ok(admins) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            admins,
            "Admins retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list admins")),
    }
}

pub async fn get_current_admin(
    _service: &AdminService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_admin(request) {
        Some(admin) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            admin,
            "Admin retrieved successfully",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing admin",
        ))),
    }
}
