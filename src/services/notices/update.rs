use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NoticeService;
use crate::models::notices::requests::{SetVisibilityRequest, UpdateNoticeRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::required_text;

pub async fn update_notice(
    service: &NoticeService,
    request: &HttpRequest,
    notice_id: i64,
    update_data: UpdateNoticeRequest,
) -> ActixResult<HttpResponse> {
    let (Some(title), Some(description)) = (
        required_text(update_data.title.as_ref()),
        required_text(update_data.description.as_ref()),
    ) else {
        return Ok(bad_request("Title and description are required"));
    };

    let storage = service.get_storage(request);

    let update = UpdateNoticeRequest {
        title: Some(title),
        description: Some(description),
        show: update_data.show,
    };

    match storage.update_notice(notice_id, update).await {
        Ok(Some(notice)) => {
            info!("Notice {} updated", notice.notice_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                notice,
                "Notice updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update notice")),
    }
}

pub async fn set_visibility(
    service: &NoticeService,
    request: &HttpRequest,
    notice_id: i64,
    visibility: SetVisibilityRequest,
) -> ActixResult<HttpResponse> {
    let Some(show) = visibility.show else {
        return Ok(bad_request("Invalid value for 'Show'. It must be a boolean"));
    };

    let storage = service.get_storage(request);

    match storage.set_notice_visibility(notice_id, show).await {
        Ok(Some(notice)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notice,
            "Notice visibility updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update notice visibility")),
    }
}

pub async fn toggle_visibility(
    service: &NoticeService,
    request: &HttpRequest,
    notice_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.toggle_notice_visibility(notice_id).await {
        Ok(Some(notice)) => {
            info!("Notice {} visibility toggled to {}", notice.notice_id, notice.show);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                notice,
                "Notice visibility toggled successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::NoticeNotFound, "Notice not found")),
        Err(e) => Ok(storage_failure(e, "Failed to toggle notice visibility")),
    }
}
