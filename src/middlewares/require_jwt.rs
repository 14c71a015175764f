//! Bearer 令牌认证
//!
//! 缺少令牌返回 401，签名或过期校验失败返回 403，令牌对应的管理员已不存在时返回 401。
//! 通过后管理员放进请求扩展；会话以 `admin:{token}` 缓存，登出时删除。

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::admins::entities::Admin;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 管理员会话的缓存键
pub fn session_cache_key(token: &str) -> String {
    format!("admin:{token}")
}

// 认证失败的分类，决定返回的状态码
enum AuthFailure {
    Missing(&'static str),
    Invalid(String),
    Unknown(&'static str),
    Internal(String),
}

impl AuthFailure {
    fn into_parts(self) -> (StatusCode, ErrorCode, String) {
        match self {
            AuthFailure::Missing(msg) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg.into()),
            AuthFailure::Invalid(msg) => (StatusCode::FORBIDDEN, ErrorCode::InvalidToken, msg),
            AuthFailure::Unknown(msg) => (StatusCode::UNAUTHORIZED, ErrorCode::AdminNotFound, msg.into()),
            AuthFailure::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                msg,
            ),
        }
    }
}

/// 从请求头中取出 Bearer 令牌
pub(crate) fn bearer_token(req: &actix_web::HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

// 提取并验证 JWT access token，返回对应的管理员
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Admin, AuthFailure> {
    let token = bearer_token(req.request())
        .ok_or(AuthFailure::Missing("Access denied, token missing"))?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Invalid("Invalid token".to_string())
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .ok_or_else(|| AuthFailure::Internal("Cache not configured".to_string()))?
        .get_ref()
        .clone();

    let cache_key = session_cache_key(&token);
    if let CacheResult::Found(admin) = cache.get_json::<Admin>(&cache_key).await {
        return Ok(admin);
    }
    debug!("Admin session not cached, loading from storage");

    let admin_id = claims
        .admin_id()
        .ok_or_else(|| AuthFailure::Invalid("Invalid admin id in token".to_string()))?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| AuthFailure::Internal("Storage not configured".to_string()))?
        .get_ref()
        .clone();

    let admin = storage
        .get_admin_by_id(admin_id)
        .await
        .map_err(|e| {
            error!("Failed to load admin {}: {}", admin_id, e);
            AuthFailure::Internal("Failed to verify session".to_string())
        })?
        .ok_or(AuthFailure::Unknown("Admin no longer exists"))?;

    cache
        .insert_json(cache_key, &admin, AppConfig::get().cache.default_ttl)
        .await;

    Ok(admin)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(admin) => {
                    debug!("JWT authentication successful for admin {}", admin.admin_id);
                    req.extensions_mut().insert(admin);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(failure) => {
                    let (status, code, message) = failure.into_parts();
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        message
                    );
                    Ok(req.into_response(
                        create_error_response(status, code, &message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前管理员，仅在 RequireJWT 之后可用
    pub fn extract_admin(req: &actix_web::HttpRequest) -> Option<Admin> {
        req.extensions().get::<Admin>().cloned()
    }

    pub fn extract_admin_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Admin>().map(|admin| admin.admin_id)
    }
}
