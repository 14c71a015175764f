use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use super::create::check_duplicate;
use crate::models::teachers::requests::{TeacherPatch, UpdateTeacherRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::{parse_optional_date, required_text, validate_email};

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
    update_data: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    let joining_date =
        match parse_optional_date(update_data.joining_date.as_deref(), "JoiningDate") {
            Ok(date) => date,
            Err(msg) => return Ok(bad_request(msg)),
        };

    let patch = TeacherPatch {
        first_name: required_text(update_data.first_name.as_ref()),
        last_name: required_text(update_data.last_name.as_ref()),
        subject: required_text(update_data.subject.as_ref()),
        contact_number: required_text(update_data.contact_number.as_ref()),
        email: required_text(update_data.email.as_ref()),
        joining_date,
        address: update_data.address.map(|a| a.trim().to_string()),
    };

    if let Some(ref email) = patch.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(bad_request(msg));
    }

    let storage = service.get_storage(request);

    if (patch.email.is_some() || patch.contact_number.is_some())
        && let Err(resp) = check_duplicate(
            &storage,
            patch.email.as_deref(),
            patch.contact_number.as_deref(),
            Some(teacher_id),
        )
        .await
    {
        return Ok(resp);
    }

    match storage.update_teacher(teacher_id, patch).await {
        Ok(Some(teacher)) => {
            info!("Teacher {} updated", teacher.teacher_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update teacher")),
    }
}
