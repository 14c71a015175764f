//! 登录节流
//!
//! 以客户端地址为键，在固定窗口内计数；超过上限直接返回 429，
//! 不再进入登录处理。计数保存在进程内的 moka 缓存里，窗口过期后自动清零。

use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use tracing::warn;

use super::create_error_response;
use crate::models::ErrorCode;

const LOGIN_ATTEMPTS_PER_WINDOW: u32 = 5;
const LOGIN_WINDOW_SECS: u64 = 60;

static ATTEMPTS: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(LOGIN_WINDOW_SECS))
        .max_capacity(50_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    limit: u32,
    bucket: &'static str,
}

impl RateLimit {
    /// 管理员登录：每个地址每分钟 5 次
    pub fn login() -> Self {
        Self {
            limit: LOGIN_ATTEMPTS_PER_WINDOW,
            bucket: "login",
        }
    }

    fn key_for(&self, req: &ServiceRequest) -> String {
        format!("{}:{}", self.bucket, client_addr(req))
    }
}

/// 连接地址优先，其次是代理头；无法解析为 IP 的值一律忽略
fn client_addr(req: &ServiceRequest) -> String {
    let info = req.connection_info();
    let from_conn = info.realip_remote_addr().map(str::to_string);
    drop(info);

    let candidates = from_conn.iter().cloned().chain(
        ["X-Forwarded-For", "X-Real-IP"]
            .iter()
            .filter_map(|name| req.headers().get(*name))
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(',').next())
            .map(|value| value.trim().to_string()),
    );

    for candidate in candidates {
        if candidate.parse::<IpAddr>().is_ok() {
            return candidate;
        }
    }

    from_conn.unwrap_or_else(|| "unknown".to_string())
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            policy: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    policy: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.policy.limit;
        let key = self.policy.key_for(&req);

        Box::pin(async move {
            let used = ATTEMPTS.get(&key).await.unwrap_or(0);
            if used >= limit {
                warn!("Too many login attempts from {} ({}/{})", key, used, limit);
                let mut resp = create_error_response(
                    StatusCode::TOO_MANY_REQUESTS,
                    ErrorCode::RateLimitExceeded,
                    "Too many requests, please try again later",
                );
                resp.headers_mut().insert(
                    actix_web::http::header::RETRY_AFTER,
                    actix_web::http::header::HeaderValue::from(LOGIN_WINDOW_SECS),
                );
                return Ok(req.into_response(resp).map_into_right_body());
            }

            ATTEMPTS.insert(key, used + 1).await;

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_login_policy_keys_by_address() {
        let req = TestRequest::default()
            .peer_addr("10.1.2.3:5000".parse().unwrap())
            .to_srv_request();
        let policy = RateLimit::login();
        assert_eq!(policy.limit, 5);
        assert_eq!(policy.key_for(&req), "login:10.1.2.3");
    }

    #[test]
    fn test_invalid_forwarded_header_is_ignored() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "not-an-ip, 10.0.0.1"))
            .insert_header(("X-Real-IP", "192.168.1.9"))
            .to_srv_request();
        assert_eq!(client_addr(&req), "192.168.1.9");
    }
}
