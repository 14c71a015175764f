use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use crate::models::exams::{
    entities::ExamType,
    requests::{ExamPatch, UpdateExamRequest},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::services::subjects::create::check_class_exists;
use crate::utils::validate::{parse_optional_date, required_text};

pub async fn update_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    update_data: UpdateExamRequest,
) -> ActixResult<HttpResponse> {
    let exam_type = match required_text(update_data.exam_type.as_ref())
        .map(|t| t.parse::<ExamType>())
        .transpose()
    {
        Ok(exam_type) => exam_type,
        Err(msg) => return Ok(bad_request(msg)),
    };
    let exam_date = match parse_optional_date(update_data.exam_date.as_deref(), "ExamDate") {
        Ok(date) => date,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let patch = ExamPatch {
        exam_name: required_text(update_data.exam_name.as_ref()),
        exam_type: exam_type.map(|t| t.to_string()),
        class_id: update_data.class_id,
        exam_date,
    };

    let storage = service.get_storage(request);

    if let Some(class_id) = patch.class_id
        && let Err(resp) = check_class_exists(&storage, class_id).await
    {
        return Ok(resp);
    }

    match storage.update_exam(exam_id, patch).await {
        Ok(Some(exam)) => {
            info!("Exam {} updated", exam.exam_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(exam, "Exam updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::ExamNotFound, "Exam not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update exam")),
    }
}
