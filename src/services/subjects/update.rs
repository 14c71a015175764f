use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use super::create::check_class_exists;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::UpdateSubjectRequest};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::required_text;

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    update_data: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let update = UpdateSubjectRequest {
        subject_name: required_text(update_data.subject_name.as_ref()),
        class_id: update_data.class_id,
    };

    if update.subject_name.is_none() && update.class_id.is_none() {
        return Ok(bad_request("Nothing to update"));
    }

    let storage = service.get_storage(request);

    if let Some(class_id) = update.class_id
        && let Err(resp) = check_class_exists(&storage, class_id).await
    {
        return Ok(resp);
    }

    match storage.update_subject(subject_id, update).await {
        Ok(Some(subject)) => {
            info!("Subject {} updated", subject.subject_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                subject,
                "Subject updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update subject")),
    }
}
