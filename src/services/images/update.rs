use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ImageService;
use crate::models::images::{
    entities::ImageType,
    requests::{ImagePatch, UpdateImageRequest},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::required_text;

pub async fn update_image(
    service: &ImageService,
    request: &HttpRequest,
    image_id: i64,
    update_data: UpdateImageRequest,
) -> ActixResult<HttpResponse> {
    let image_type = match required_text(update_data.image_type.as_ref())
        .map(|t| t.parse::<ImageType>())
        .transpose()
    {
        Ok(image_type) => image_type,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let patch = ImagePatch {
        description: required_text(update_data.description.as_ref()),
        image_type: image_type.map(|t| t.to_string()),
        student_id: update_data.student_id,
        teacher_id: update_data.teacher_id,
        ..Default::default()
    };

    let storage = service.get_storage(request);

    match storage.update_image(image_id, patch).await {
        Ok(Some(image)) => {
            info!("Image {} metadata updated", image.image_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                image,
                "Image updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ImageNotFound, "Image not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update image")),
    }
}
