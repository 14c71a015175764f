use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AdminService;
use crate::middlewares::RequireJWT;
use crate::models::admins::{UpdateAdminRequest, UpdateCredentialsRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{required_text, validate_email, validate_password};

pub async fn update_admin(
    service: &AdminService,
    request: &HttpRequest,
    admin_id: i64,
    update_data: UpdateAdminRequest,
) -> ActixResult<HttpResponse> {
    let update = UpdateAdminRequest {
        username: required_text(update_data.username.as_ref()),
        email: required_text(update_data.email.as_ref()),
    };

    if update.username.is_none() && update.email.is_none() {
        return Ok(bad_request("Nothing to update: provide Username or Email"));
    }
    if let Some(ref email) = update.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);

    match storage.update_admin(admin_id, update).await {
        Ok(Some(admin)) => {
            service.invalidate_sessions(request).await;
            info!("Admin {} updated", admin.admin_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(admin, "Admin updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::AdminNotFound, "Admin not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update admin")),
    }
}

pub async fn update_credentials(
    service: &AdminService,
    request: &HttpRequest,
    update_data: UpdateCredentialsRequest,
) -> ActixResult<HttpResponse> {
    let Some(admin_id) = RequireJWT::extract_admin_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing admin",
        )));
    };

    let new_email = required_text(update_data.new_email.as_ref());
    let new_password = update_data.new_password.filter(|p| !p.is_empty());

    if new_email.is_none() && new_password.is_none() {
        return Ok(bad_request(
            "Nothing to update: provide NewEmail or NewPassword",
        ));
    }
    if let Some(ref email) = new_email
        && let Err(msg) = validate_email(email)
    {
        return Ok(bad_request(msg));
    }
    if let Some(ref password) = new_password
        && let Err(msg) = validate_password(password)
    {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);

    // 会话缓存中不含密码哈希，需重新读取
    let admin = match storage.get_admin_by_id(admin_id).await {
        Ok(Some(admin)) => admin,
        Ok(None) => return Ok(not_found(ErrorCode::AdminNotFound, "Admin not found")),
        Err(e) => return Ok(storage_failure(e, "Failed to load admin")),
    };

    if !verify_password(&update_data.current_password, &admin.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Current password is incorrect",
        )));
    }

    let password_hash = match new_password.as_deref().map(hash_password).transpose() {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash new password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to update credentials",
                )),
            );
        }
    };

    match storage
        .update_admin_credentials(admin_id, new_email, password_hash)
        .await
    {
        Ok(Some(admin)) => {
            service.invalidate_sessions(request).await;
            info!("Admin {} updated credentials", admin.admin_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                admin,
                "Credentials updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::AdminNotFound, "Admin not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update credentials")),
    }
}
