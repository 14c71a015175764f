use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MessageService;
use crate::models::ApiResponse;
use crate::services::common::storage_failure;

pub async fn list_messages(
    service: &MessageService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_messages().await {
        Ok(messages) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            messages,
            "Messages retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list messages")),
    }
}
