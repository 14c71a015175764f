use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AdminService;
use crate::models::admins::{AdminRole, CreateAdminRequest, NewAdmin};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, storage_failure};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    missing_fields_message, required_text, validate_email, validate_password,
};

pub async fn create_admin(
    service: &AdminService,
    request: &HttpRequest,
    admin_data: CreateAdminRequest,
) -> ActixResult<HttpResponse> {
    let username = required_text(admin_data.username.as_ref());
    let email = required_text(admin_data.email.as_ref());
    let password = admin_data.password.filter(|p| !p.is_empty());

    let mut missing = Vec::new();
    if username.is_none() {
        missing.push("Username");
    }
    if email.is_none() {
        missing.push("Email");
    }
    if password.is_none() {
        missing.push("Password");
    }
    if let Some(msg) = missing_fields_message(&missing) {
        return Ok(bad_request(msg));
    }
    let (Some(username), Some(email), Some(password)) = (username, email, password) else {
        return Ok(bad_request("Missing required fields"));
    };

    if let Err(msg) = validate_email(&email) {
        return Ok(bad_request(msg));
    }
    if let Err(msg) = validate_password(&password) {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);

    // 用户名与邮箱都不能被占用
    for identifier in [&username, &email] {
        match storage.get_admin_by_username_or_email(identifier).await {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::AdminAlreadyExists,
                    "Admin with this username or email already exists",
                )));
            }
            Ok(None) => {}
            Err(e) => return Ok(storage_failure(e, "Failed to check existing admin")),
        }
    }

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash admin password: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to create admin",
                )),
            );
        }
    };

    let new_admin = NewAdmin {
        username,
        email,
        password_hash,
        role: admin_data.role.unwrap_or(AdminRole::Admin),
    };

    match storage.create_admin(new_admin).await {
        Ok(admin) => {
            info!("Admin {} created", admin.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(admin, "Admin created successfully")))
        }
        Err(e) => Ok(storage_failure(e, "Failed to create admin")),
    }
}
