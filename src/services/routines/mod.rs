pub mod create;
pub mod delete;
pub mod file;
pub mod get;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::routines::requests::{RoutineFilterQuery, RoutineSearchQuery};
use crate::object_store::ObjectStore;
use crate::storage::{RoutineQuery, Storage};

pub struct RoutineService {
    storage: Option<Arc<dyn Storage>>,
    object_store: Option<Arc<dyn ObjectStore>>,
}

impl RoutineService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            object_store: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            super::common::storage_from(request)
        }
    }

    pub(crate) fn get_object_store(&self, request: &HttpRequest) -> Arc<dyn ObjectStore> {
        if let Some(store) = &self.object_store {
            store.clone()
        } else {
            super::common::object_store_from(request)
        }
    }

    pub async fn list_routines(
        &self,
        request: &HttpRequest,
        query: RoutineQuery,
    ) -> ActixResult<HttpResponse> {
        get::list_routines(self, request, query).await
    }

    pub async fn filter_by_class_section(
        &self,
        request: &HttpRequest,
        query: RoutineFilterQuery,
    ) -> ActixResult<HttpResponse> {
        get::filter_by_class_section(self, request, query).await
    }

    pub async fn search_routines(
        &self,
        request: &HttpRequest,
        query: RoutineSearchQuery,
    ) -> ActixResult<HttpResponse> {
        get::search_routines(self, request, query).await
    }

    pub async fn get_routine(
        &self,
        request: &HttpRequest,
        routine_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_routine(self, request, routine_id).await
    }

    pub async fn class_options(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::class_options(self, request).await
    }

    pub async fn filter_options(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::filter_options(self, request).await
    }

    pub async fn sections_for_class(
        &self,
        request: &HttpRequest,
        class_name: String,
    ) -> ActixResult<HttpResponse> {
        get::sections_for_class(self, request, class_name).await
    }

    pub async fn create_routine(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_routine(self, request, payload).await
    }

    pub async fn update_routine(
        &self,
        request: &HttpRequest,
        routine_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        update::update_routine(self, request, routine_id, payload).await
    }

    // 软删除
    pub async fn delete_routine(
        &self,
        request: &HttpRequest,
        routine_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_routine(self, request, routine_id).await
    }
}
