use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::{bearer_token, session_cache_key};
use crate::models::{
    ApiResponse, ErrorCode,
    admins::{LoginRequest, LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AdminService;

pub async fn handle_login(
    service: &AdminService,
    request: &HttpRequest,
    login_request: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 根据用户名或邮箱获取管理员
    let admin = match storage
        .get_admin_by_username_or_email(login_request.username.trim())
        .await
    {
        Ok(Some(admin)) => admin,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Invalid username or password",
            )));
        }
        Err(e) => {
            tracing::error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Login failed: {e}"),
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &admin.password_hash) {
        tracing::info!("Failed login attempt for {}", admin.username);
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Invalid username or password",
        )));
    }

    // 3. 签发访问令牌
    match admin.generate_access_token() {
        Ok(access_token) => {
            tracing::info!("Admin {} logged in successfully", admin.username);
            let response = LoginResponse {
                access_token,
                expires_in: JwtUtils::access_token_ttl_secs(),
                admin,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}

pub async fn handle_logout(
    service: &AdminService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let (Some(token), Some(cache)) = (bearer_token(request), service.get_cache(request)) {
        cache.remove(&session_cache_key(&token)).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Logged out successfully")))
}
