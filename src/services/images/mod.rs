pub mod delete;
pub mod get;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::images::requests::{ImageDetailsQuery, UpdateImageRequest};
use crate::object_store::ObjectStore;
use crate::storage::{ImageQuery, Storage};

pub struct ImageService {
    storage: Option<Arc<dyn Storage>>,
    object_store: Option<Arc<dyn ObjectStore>>,
}

impl ImageService {
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

    pub async fn upload_image(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_image(self, request, payload).await
    }

    // 替换图片文件，保留元数据
    pub async fn replace_image(
        &self,
        request: &HttpRequest,
        image_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::replace_image(self, request, image_id, payload).await
    }

    pub async fn list_image_details(
        &self,
        request: &HttpRequest,
        query: ImageDetailsQuery,
    ) -> ActixResult<HttpResponse> {
        get::list_image_details(self, request, query).await
    }

    pub async fn list_by_type(
        &self,
        request: &HttpRequest,
        image_type: String,
    ) -> ActixResult<HttpResponse> {
        get::list_by_type(self, request, image_type).await
    }

    pub async fn list_images(
        &self,
        request: &HttpRequest,
        query: ImageQuery,
    ) -> ActixResult<HttpResponse> {
        get::list_images(self, request, query).await
    }

    pub async fn get_image(&self, request: &HttpRequest, image_id: i64) -> ActixResult<HttpResponse> {
        get::get_image(self, request, image_id).await
    }

    pub async fn update_image(
        &self,
        request: &HttpRequest,
        image_id: i64,
        update_data: UpdateImageRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_image(self, request, image_id, update_data).await
    }

    pub async fn delete_image(
        &self,
        request: &HttpRequest,
        image_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_image(self, request, image_id).await
    }
}
