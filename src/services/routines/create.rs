use std::sync::Arc;
use std::time::Duration;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::RoutineService;
use super::file::store_routine_file;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::classes::{entities::Class, responses::ClassOption};
use crate::models::routines::{
    requests::{NewRoutine, RoutineFile, RoutineFormFields},
    responses::RoutineCreatedResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::stores::LocalObjectStore;
use crate::services::common::{bad_request, storage_failure};
use crate::services::uploads::{TempUpload, UploadForm, UploadRules, read_upload_form};
use crate::storage::Storage;
use crate::utils::validate::parse_date;

/// multipart 中的课程表文件字段名
pub(crate) const ROUTINE_FIELD: &str = "routineFile";

pub(crate) fn form_fields(form: &UploadForm) -> RoutineFormFields {
    RoutineFormFields {
        routine_title: form.text("RoutineTitle"),
        class_id: form.text("ClassID"),
        routine_date: form.text("RoutineDate"),
        description: form.text("Description"),
    }
}

pub(crate) fn parse_class_id(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| format!("Invalid ClassID: {raw}"))
}

/// 班级必须存在，否则 400
pub(crate) async fn require_class(
    storage: &Arc<dyn Storage>,
    class_id: i64,
) -> Result<Class, HttpResponse> {
    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => Ok(class),
        Ok(None) => Err(bad_request(format!(
            "Invalid ClassID: {class_id}. Class does not exist."
        ))),
        Err(e) => Err(storage_failure(e, "Failed to check class")),
    }
}

/// 远程优先、本地兜底地保存文件，两者都失败时返回 500
pub(crate) async fn persist_file(
    service: &RoutineService,
    request: &HttpRequest,
    upload: &TempUpload,
) -> Result<RoutineFile, HttpResponse> {
    let config = AppConfig::get();
    let remote = service.get_object_store(request);
    let timeout = Duration::from_secs(config.upload.remote_timeout_secs);

    let fallback = LocalObjectStore::with_dirs(
        &config.upload.public_dir,
        &config.upload.public_base_url,
    );

    store_routine_file(remote.as_ref(), &fallback, upload, timeout)
        .await
        .map_err(|e| {
            error!("Routine file storage failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "File upload failed - both remote and local storage failed",
            ))
        })
}

pub async fn create_routine(
    service: &RoutineService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    let rules = UploadRules::routines(&config.upload);
    let form = match read_upload_form(payload, ROUTINE_FIELD, rules).await {
        Ok(form) => form,
        Err(resp) => return Ok(resp),
    };
    let fields = form_fields(&form);

    let (Some(title), Some(class_id), Some(routine_date)) = (
        fields.routine_title.clone(),
        fields.class_id.clone(),
        fields.routine_date.clone(),
    ) else {
        return Ok(bad_request(
            "Missing required fields: RoutineTitle, ClassID, RoutineDate",
        ));
    };

    let class_id = match parse_class_id(&class_id) {
        Ok(id) => id,
        Err(msg) => return Ok(bad_request(msg)),
    };
    let routine_date = match parse_date(&routine_date, "RoutineDate") {
        Ok(date) => date,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let storage = service.get_storage(request);

    let class = match require_class(&storage, class_id).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    let file = match form.file.as_ref() {
        Some(upload) => match persist_file(service, request, upload).await {
            Ok(file) => Some(file),
            Err(resp) => return Ok(resp),
        },
        None => None,
    };

    let new_routine = NewRoutine {
        routine_title: title,
        class_id,
        routine_date,
        description: fields.description,
        file,
        created_by: RequireJWT::extract_admin_id(request),
    };

    match storage.create_routine(new_routine).await {
        Ok(routine) => {
            info!(
                "Routine {} created for {}",
                routine.routine_id, routine.class_section_name
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                RoutineCreatedResponse {
                    routine,
                    class_info: ClassOption::from(&class),
                },
                "Routine created successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to create routine")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_id() {
        assert_eq!(parse_class_id("3"), Ok(3));
        assert!(parse_class_id("0").is_err());
        assert!(parse_class_id("three").is_err());
    }
}
