use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::MessageService;
use crate::models::ApiResponse;
use crate::models::messages::requests::CreateMessageRequest;
use crate::services::common::{bad_request, storage_failure};
use crate::utils::validate::required_text;

pub async fn create_message(
    service: &MessageService,
    request: &HttpRequest,
    message_data: CreateMessageRequest,
) -> ActixResult<HttpResponse> {
    let Some(content) = required_text(message_data.messages.as_ref()) else {
        return Ok(bad_request("Message content is required"));
    };

    let storage = service.get_storage(request);

    match storage
        .create_message(&content, message_data.show.unwrap_or(true))
        .await
    {
        Ok(message) => {
            info!("Message {} created", message.message_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                message,
                "Message added successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to add message")),
    }
}
