use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MessageService;
use crate::models::messages::requests::UpdateMessageRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::required_text;

pub async fn update_message(
    service: &MessageService,
    request: &HttpRequest,
    message_id: i64,
    update_data: UpdateMessageRequest,
) -> ActixResult<HttpResponse> {
    let (Some(content), Some(show)) = (
        required_text(update_data.messages.as_ref()),
        update_data.show,
    ) else {
        return Ok(bad_request("Message content and visibility are required"));
    };

    let storage = service.get_storage(request);

    let update = UpdateMessageRequest {
        messages: Some(content),
        show: Some(show),
    };

    match storage.update_message(message_id, update).await {
        Ok(Some(message)) => {
            info!("Message {} updated", message.message_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                message,
                "Message updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::MessageNotFound, "Message not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update message")),
    }
}

pub async fn toggle_visibility(
    service: &MessageService,
    request: &HttpRequest,
    message_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.toggle_message_visibility(message_id).await {
        Ok(Some(message)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            message,
            "Message visibility toggled successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::MessageNotFound, "Message not found")),
        Err(e) => Ok(storage_failure(e, "Failed to toggle message visibility")),
    }
}
