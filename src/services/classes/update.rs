use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use super::create::check_teacher_exists;
use crate::models::{ApiResponse, ErrorCode, classes::requests::UpdateClassRequest};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::required_text;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let update = UpdateClassRequest {
        class_name: required_text(update_data.class_name.as_ref()),
        section: required_text(update_data.section.as_ref()),
        teacher_id: update_data.teacher_id,
    };

    if update.class_name.is_none() && update.section.is_none() && update.teacher_id.is_none() {
        return Ok(bad_request("Nothing to update"));
    }

    let storage = service.get_storage(request);

    if let Err(resp) = check_teacher_exists(&storage, update.teacher_id).await {
        return Ok(resp);
    }

    match storage.update_class(class_id, update).await {
        Ok(Some(class)) => {
            info!("Class {} updated", class.class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(storage_failure(e, "Class update failed")),
    }
}
