use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::RoutineService;
use super::create::{ROUTINE_FIELD, form_fields, parse_class_id, persist_file, require_class};
use crate::config::AppConfig;
use crate::models::routines::requests::RoutinePatch;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::services::uploads::{UploadRules, read_upload_form};
use crate::utils::validate::parse_optional_date;

pub async fn update_routine(
    service: &RoutineService,
    request: &HttpRequest,
    routine_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    let rules = UploadRules::routines(&config.upload);
    let form = match read_upload_form(payload, ROUTINE_FIELD, rules).await {
        Ok(form) => form,
        Err(resp) => return Ok(resp),
    };
    let fields = form_fields(&form);

    let class_id = match fields.class_id.as_deref().map(parse_class_id).transpose() {
        Ok(class_id) => class_id,
        Err(msg) => return Ok(bad_request(msg)),
    };
    let routine_date = match parse_optional_date(fields.routine_date.as_deref(), "RoutineDate") {
        Ok(date) => date,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let storage = service.get_storage(request);

    let existing = match storage.get_routine_by_id(routine_id).await {
        Ok(Some(routine)) => routine,
        Ok(None) => return Ok(not_found(ErrorCode::RoutineNotFound, "Routine not found")),
        Err(e) => return Ok(storage_failure(e, "Failed to load routine")),
    };

    if let Some(class_id) = class_id
        && let Err(resp) = require_class(&storage, class_id).await
    {
        return Ok(resp);
    }

    let file = match form.file.as_ref() {
        Some(upload) => match persist_file(service, request, upload).await {
            Ok(file) => Some(file),
            Err(resp) => return Ok(resp),
        },
        None => None,
    };
    let new_public_id = file.as_ref().and_then(|f| f.file_public_id.clone());

    let patch = RoutinePatch {
        routine_title: fields.routine_title,
        class_id,
        routine_date,
        description: fields.description,
        file,
    };

    let routine = match storage.update_routine(routine_id, patch).await {
        Ok(Some(routine)) => routine,
        Ok(None) => {
            discard_new_file(service, request, new_public_id.as_deref()).await;
            return Ok(not_found(ErrorCode::RoutineNotFound, "Routine not found"));
        }
        Err(e) => {
            discard_new_file(service, request, new_public_id.as_deref()).await;
            return Ok(storage_failure(e, "Failed to update routine"));
        }
    };

    // 行已指向新文件后才删除旧的远程对象，失败只记录
    if form.file.is_some()
        && let Some(public_id) = existing.file_public_id.as_deref()
    {
        let object_store = service.get_object_store(request);
        if let Err(e) = object_store.delete(public_id).await {
            warn!(
                "Failed to delete previous routine file {} for routine {}: {}",
                public_id, routine_id, e
            );
        }
    }

    info!("Routine {} updated", routine.routine_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        routine,
        "Routine updated successfully",
    )))
}

/// 更新失败时撤回刚上传的远程对象
async fn discard_new_file(
    service: &RoutineService,
    request: &HttpRequest,
    public_id: Option<&str>,
) {
    let Some(public_id) = public_id else {
        return;
    };
    if let Err(e) = service.get_object_store(request).delete(public_id).await {
        warn!("Failed to remove orphaned routine file {}: {}", public_id, e);
    }
}
