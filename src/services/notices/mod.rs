pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::notices::requests::{
    CreateNoticeRequest, SetVisibilityRequest, UpdateNoticeRequest,
};
use crate::storage::Storage;

pub struct NoticeService {
    storage: Option<Arc<dyn Storage>>,
}

impl NoticeService {
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

    pub async fn create_notice(
        &self,
        request: &HttpRequest,
        notice_data: CreateNoticeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_notice(self, request, notice_data).await
    }

    pub async fn list_notices(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_notices(self, request).await
    }

    pub async fn update_notice(
        &self,
        request: &HttpRequest,
        notice_id: i64,
        update_data: UpdateNoticeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_notice(self, request, notice_id, update_data).await
    }

    pub async fn set_visibility(
        &self,
        request: &HttpRequest,
        notice_id: i64,
        visibility: SetVisibilityRequest,
    ) -> ActixResult<HttpResponse> {
        update::set_visibility(self, request, notice_id, visibility).await
    }

    pub async fn toggle_visibility(
        &self,
        request: &HttpRequest,
        notice_id: i64,
    ) -> ActixResult<HttpResponse> {
        update::toggle_visibility(self, request, notice_id).await
    }

    pub async fn delete_notice(
        &self,
        request: &HttpRequest,
        notice_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_notice(self, request, notice_id).await
    }
}
