use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::EventService;
use super::create::build_event;
use crate::models::events::requests::UpdateEventRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::required_text;

/// 未提供的字段沿用原值，合并后整体校验并替换
pub async fn update_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
    update_data: UpdateEventRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current = match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => return Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => return Ok(storage_failure(e, "Failed to load event")),
    };

    let merged = build_event(
        required_text(update_data.event_name.as_ref()).or(Some(current.event_name)),
        required_text(update_data.event_type.as_ref()).or(Some(current.event_type.to_string())),
        required_text(update_data.start_date.as_ref()).or(Some(current.start_date.to_string())),
        required_text(update_data.end_date.as_ref()).or(Some(current.end_date.to_string())),
        required_text(update_data.venue.as_ref()).or(current.venue),
        required_text(update_data.description.as_ref()).or(current.description),
    );
    let event = match merged {
        Ok(event) => event,
        Err(msg) => return Ok(bad_request(msg)),
    };

    match storage.update_event(event_id, event).await {
        Ok(Some(event)) => {
            info!("Event {} updated", event.event_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                event,
                "Event updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update event")),
    }
}
