pub mod create;
pub mod delete;
pub mod get;
pub mod login;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::admins::{
    CreateAdminRequest, LoginRequest, UpdateAdminRequest, UpdateCredentialsRequest,
};
use crate::storage::Storage;

pub struct AdminService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            super::common::storage_from(request)
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .map(|cache| cache.get_ref().clone())
    }

    // 创建管理员
    pub async fn create_admin(
        &self,
        request: &HttpRequest,
        admin_data: CreateAdminRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_admin(self, request, admin_data).await
    }

    // 登录
    pub async fn login(
        &self,
        request: &HttpRequest,
        login_request: LoginRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, request, login_request).await
    }

    // 登出，清除会话缓存
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        login::handle_logout(self, request).await
    }

    pub async fn list_admins(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_admins(self, request).await
    }

    // 当前登录的管理员
    pub async fn get_current_admin(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_current_admin(self, request).await
    }

    pub async fn update_admin(
        &self,
        request: &HttpRequest,
        admin_id: i64,
        update_data: UpdateAdminRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_admin(self, request, admin_id, update_data).await
    }

    // 修改当前管理员的邮箱和/或密码
    pub async fn update_credentials(
        &self,
        request: &HttpRequest,
        update_data: UpdateCredentialsRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_credentials(self, request, update_data).await
    }

    pub async fn delete_admin(
        &self,
        request: &HttpRequest,
        admin_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_admin(self, request, admin_id).await
    }

    /// 管理员信息变化后清空会话缓存，下一次请求重新从存储层加载
    pub(crate) async fn invalidate_sessions(&self, request: &HttpRequest) {
        if let Some(cache) = self.get_cache(request) {
            cache.invalidate_all().await;
        }
    }
}
