use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EventService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{not_found, storage_failure};

pub async fn delete_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_event(event_id).await {
        Ok(true) => {
            info!("Event {} deleted", event_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Event deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(storage_failure(e, "Failed to delete event")),
    }
}
