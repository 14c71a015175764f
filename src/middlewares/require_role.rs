//! 管理员角色校验
//!
//! 只能挂在 [`RequireJWT`] 之内：它依赖请求扩展里已经放好的 [`Admin`]。
//! 没有管理员时按未认证处理（401），角色不在允许列表里返回 403。

use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::info;

use super::create_error_response;
use crate::middlewares::RequireJWT;
use crate::models::ErrorCode;
use crate::models::admins::entities::AdminRole;

#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<[AdminRole]>,
}

impl RequireRole {
    pub fn new(role: &AdminRole) -> Self {
        Self {
            allowed: Rc::from([role.clone()]),
        }
    }

    fn permits(&self, role: Option<&AdminRole>) -> bool {
        role.is_some_and(|role| self.allowed.contains(role))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            rule: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    rule: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let rule = self.rule.clone();

        Box::pin(async move {
            let Some(admin) = RequireJWT::extract_admin(req.request()) else {
                info!("Role check on {} without an authenticated admin", req.path());
                let resp = create_error_response(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Authentication required",
                );
                return Ok(req.into_response(resp).map_into_right_body());
            };

            if !rule.permits(Some(&admin.role)) {
                info!(
                    "Admin {} with role {:?} may not access {}",
                    admin.admin_id,
                    admin.role,
                    req.path()
                );
                let resp = create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    "Insufficient role for this resource",
                );
                return Ok(req.into_response(resp).map_into_right_body());
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_listed_role_is_permitted() {
        let rule = RequireRole::new(&AdminRole::Admin);
        assert!(rule.permits(Some(&AdminRole::Admin)));
        assert!(!rule.permits(Some(&AdminRole::Staff)));
        assert!(!rule.permits(None));
    }
}
