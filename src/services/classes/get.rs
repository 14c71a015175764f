use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::classes::responses::ClassTotalStudents;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_class_details().await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            classes,
            "Classes retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list classes")),
    }
}

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(storage_failure(e, "Failed to get class information")),
    }
}

pub async fn total_students(
    service: &ClassService,
    request: &HttpRequest,
    class_name: String,
) -> ActixResult<HttpResponse> {
    let class_name = class_name.trim().to_string();
    if class_name.is_empty() {
        return Ok(bad_request("ClassName is required"));
    }

    let storage = service.get_storage(request);

    match storage.count_students_by_class_name(&class_name).await {
        Ok(total_students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassTotalStudents {
                class_name,
                total_students,
            },
            "Total students retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to count students")),
    }
}
