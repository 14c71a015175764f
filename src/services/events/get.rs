use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EventService;
use crate::models::events::{entities::EventType, requests::EventDateRangeQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::{parse_date, required_text};

pub async fn list_events(
    service: &EventService,
    request: &HttpRequest,
    event_type: Option<String>,
) -> ActixResult<HttpResponse> {
    let event_type = match event_type.map(|t| t.parse::<EventType>()).transpose() {
        Ok(event_type) => event_type.map(|t| t.to_string()),
        Err(msg) => return Ok(bad_request(msg)),
    };

    let storage = service.get_storage(request);

    match storage.list_events(event_type.as_deref()).await {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            events,
            "Events retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list events")),
    }
}

pub async fn list_in_range(
    service: &EventService,
    request: &HttpRequest,
    query: EventDateRangeQuery,
) -> ActixResult<HttpResponse> {
    let (Some(start), Some(end)) = (
        required_text(query.start_date.as_ref()),
        required_text(query.end_date.as_ref()),
    ) else {
        return Ok(bad_request("startDate and endDate are required"));
    };
    let (start, end) = match (parse_date(&start, "startDate"), parse_date(&end, "endDate")) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(msg), _) | (_, Err(msg)) => return Ok(bad_request(msg)),
    };
    if end < start {
        return Ok(bad_request("endDate must not be before startDate"));
    }

    let storage = service.get_storage(request);

    match storage.list_events_in_range(start, end).await {
        Ok(events) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            events,
            "Events retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list events")),
    }
}

pub async fn get_event(
    service: &EventService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_event_by_id(event_id).await {
        Ok(Some(event)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            event,
            "Event retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::EventNotFound, "Event not found")),
        Err(e) => Ok(storage_failure(e, "Failed to get event")),
    }
}
