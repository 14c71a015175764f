use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ImageService;
use crate::models::images::{entities::ImageType, requests::ImageDetailsQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::storage::ImageQuery;

/// `all` 或缺省表示不过滤
fn type_filter(value: Option<&str>) -> Result<Option<String>, String> {
    match value.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(raw) => raw.parse::<ImageType>().map(|t| Some(t.to_string())),
    }
}

pub async fn list_image_details(
    service: &ImageService,
    request: &HttpRequest,
    query: ImageDetailsQuery,
) -> ActixResult<HttpResponse> {
    let image_type = match type_filter(query.image_type.as_deref()) {
        Ok(image_type) => image_type,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let storage = service.get_storage(request);

    match storage.list_image_details(image_type.as_deref()).await {
        Ok(images) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            images,
            "Images retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list images")),
    }
}

pub async fn list_by_type(
    service: &ImageService,
    request: &HttpRequest,
    image_type: String,
) -> ActixResult<HttpResponse> {
    let image_type = match type_filter(Some(&image_type)) {
        Ok(image_type) => image_type,
        Err(msg) => return Ok(bad_request(msg)),
    };

    list_images(
        service,
        request,
        ImageQuery {
            image_type,
            ..Default::default()
        },
    )
    .await
}

pub async fn list_images(
    service: &ImageService,
    request: &HttpRequest,
    query: ImageQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_images(query).await {
        Ok(images) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            images,
            "Images retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list images")),
    }
}

pub async fn get_image(
    service: &ImageService,
    request: &HttpRequest,
    image_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_image_by_id(image_id).await {
        Ok(Some(image)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            image,
            "Image retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ImageNotFound, "Image not found")),
        Err(e) => Ok(storage_failure(e, "Failed to get image")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_filter_all() {
        assert_eq!(type_filter(None), Ok(None));
        assert_eq!(type_filter(Some("all")), Ok(None));
        assert_eq!(type_filter(Some("teacher")), Ok(Some("teacher".to_string())));
        assert!(type_filter(Some("pets")).is_err());
    }
}
