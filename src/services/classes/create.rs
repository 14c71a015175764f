use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::ApiResponse;
use crate::models::classes::{
    requests::{CreateClassRequest, NewClass},
    responses::ClassUpsertResponse,
};
use crate::services::common::{bad_request, storage_failure};
use crate::storage::Storage;
use crate::utils::validate::{missing_fields_message, required_text};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let class_name = required_text(class_data.class_name.as_ref());
    let section = required_text(class_data.section.as_ref());

    let (class_name, section) = match (class_name, section) {
        (Some(name), Some(section)) => (name, section),
        (name, section) => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push("ClassName");
            }
            if section.is_none() {
                missing.push("Section");
            }
            return Ok(bad_request(
                missing_fields_message(&missing).unwrap_or_default(),
            ));
        }
    };

    let storage = service.get_storage(request);

    // 班主任必须存在
    if let Err(resp) = check_teacher_exists(&storage, class_data.teacher_id).await {
        return Ok(resp);
    }

    let new_class = NewClass {
        class_name,
        section,
        teacher_id: class_data.teacher_id,
    };

    match storage.get_or_create_class(new_class).await {
        Ok((class, true)) => {
            info!("Class {} created", class.display_name());
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ClassUpsertResponse {
                    created: true,
                    class,
                },
                "Class created successfully",
            )))
        }
        Ok((class, false)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassUpsertResponse {
                created: false,
                class,
            },
            "Class already exists",
        ))),
        Err(e) => Ok(storage_failure(e, "Class creation failed")),
    }
}

/// 校验班主任 ID（如果提供）对应的教师存在
pub(crate) async fn check_teacher_exists(
    storage: &Arc<dyn Storage>,
    teacher_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let Some(teacher_id) = teacher_id else {
        return Ok(());
    };

    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(bad_request(format!(
            "Teacher with TeacherID {teacher_id} does not exist"
        ))),
        Err(e) => Err(storage_failure(e, "Failed to verify teacher")),
    }
}
