use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ImageService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_failure};

/// 先删远程对象，成功后再删记录
pub async fn delete_image(
    service: &ImageService,
    request: &HttpRequest,
    image_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let image = match storage.get_image_by_id(image_id).await {
        Ok(Some(image)) => image,
        Ok(None) => return Ok(not_found(ErrorCode::ImageNotFound, "Image not found")),
        Err(e) => return Ok(storage_failure(e, "Failed to load image")),
    };

    let object_store = service.get_object_store(request);
    if let Err(e) = object_store.delete(&image.public_id).await {
        error!("Failed to delete object {}: {}", image.public_id, e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Failed to delete image file",
            )),
        );
    }

    match storage.delete_image(image_id).await {
        Ok(true) => {
            info!("Image {} deleted", image_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Image deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ImageNotFound, "Image not found")),
        Err(e) => Ok(storage_failure(e, "Failed to delete image")),
    }
}
