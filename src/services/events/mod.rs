pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::events::requests::{
    CreateEventRequest, EventDateRangeQuery, UpdateEventRequest,
};
use crate::storage::Storage;

pub struct EventService {
    storage: Option<Arc<dyn Storage>>,
}

impl EventService {
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

    pub async fn list_events(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::list_events(self, request, None).await
    }

    pub async fn list_by_type(
        &self,
        request: &HttpRequest,
        event_type: String,
    ) -> ActixResult<HttpResponse> {
        get::list_events(self, request, Some(event_type)).await
    }

    // 与区间有重叠的活动
    pub async fn list_in_range(
        &self,
        request: &HttpRequest,
        query: EventDateRangeQuery,
    ) -> ActixResult<HttpResponse> {
        get::list_in_range(self, request, query).await
    }

    pub async fn get_event(&self, request: &HttpRequest, event_id: i64) -> ActixResult<HttpResponse> {
        get::get_event(self, request, event_id).await
    }

    pub async fn create_event(
        &self,
        request: &HttpRequest,
        event_data: CreateEventRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, request, event_data).await
    }

    pub async fn update_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
        update_data: UpdateEventRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_event(self, request, event_id, update_data).await
    }

    pub async fn delete_event(
        &self,
        request: &HttpRequest,
        event_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_event(self, request, event_id).await
    }
}
