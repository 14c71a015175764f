use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::models::classes::responses::ClassOption;
use crate::services::common::storage_failure;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    class_id: Option<i64>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects(class_id).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list subjects")),
    }
}

pub async fn class_options(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_classes().await {
        Ok(classes) => {
            let options: Vec<ClassOption> = classes.iter().map(ClassOption::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                options,
                "Classes retrieved successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to list classes")),
    }
}
