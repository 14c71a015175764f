use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::teachers::{
    requests::{CheckDuplicateQuery, TeacherListQuery},
    responses::DuplicateCheckResponse,
};
use crate::models::{ApiResponse, CountResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::required_text;

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Teachers retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list teachers")),
    }
}

pub async fn count_teachers(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_teachers().await {
        Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CountResponse { count },
            "Teacher count retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to count teachers")),
    }
}

pub async fn check_duplicate(
    service: &TeacherService,
    request: &HttpRequest,
    query: CheckDuplicateQuery,
) -> ActixResult<HttpResponse> {
    let email = required_text(query.email.as_ref());
    let contact_number = required_text(query.contact_number.as_ref());

    if email.is_none() && contact_number.is_none() {
        return Ok(bad_request("Provide email or contactNumber to check"));
    }

    let storage = service.get_storage(request);

    match storage
        .find_teacher_duplicate(
            email.as_deref(),
            contact_number.as_deref(),
            query.exclude_teacher_id,
        )
        .await
    {
        Ok(field) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            DuplicateCheckResponse {
                duplicate: field.is_some(),
                field,
            },
            "Duplicate check completed",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to check duplicate teacher")),
    }
}

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(teacher)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(storage_failure(e, "Failed to get teacher")),
    }
}
