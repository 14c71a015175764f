use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoticeService;
use crate::models::ApiResponse;
use crate::services::common::storage_failure;

pub async fn list_notices(
    service: &NoticeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_notices().await {
        Ok(notices) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            notices,
            "Notices retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list notices")),
    }
}
