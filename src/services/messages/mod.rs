pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::messages::requests::{CreateMessageRequest, UpdateMessageRequest};
use crate::storage::Storage;

pub struct MessageService {
    storage: Option<Arc<dyn Storage>>,
}

impl MessageService {
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

    pub async fn create_message(
        &self,
        request: &HttpRequest,
        message_data: CreateMessageRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_message(self, request, message_data).await
    }

    pub async fn list_messages(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_messages(self, request).await
    }

    pub async fn update_message(
        &self,
        request: &HttpRequest,
        message_id: i64,
        update_data: UpdateMessageRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_message(self, request, message_id, update_data).await
    }

    pub async fn toggle_visibility(
        &self,
        request: &HttpRequest,
        message_id: i64,
    ) -> ActixResult<HttpResponse> {
        update::toggle_visibility(self, request, message_id).await
    }

    pub async fn delete_message(
        &self,
        request: &HttpRequest,
        message_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_message(self, request, message_id).await
    }
}
