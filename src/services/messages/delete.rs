use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MessageService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_failure};

pub async fn delete_message(
    service: &MessageService,
    request: &HttpRequest,
    message_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_message(message_id).await {
        Ok(true) => {
            info!("Message {} deleted", message_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Message deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::MessageNotFound, "Message not found")),
        Err(e) => Ok(storage_failure(e, "Failed to delete message")),
    }
}
