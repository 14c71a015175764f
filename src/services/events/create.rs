use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use tracing::info;

use super::EventService;
use crate::models::ApiResponse;
use crate::models::events::{
    entities::EventType,
    requests::{CreateEventRequest, NewEvent},
};
use crate::services::common::{bad_request, storage_failure};
use crate::utils::validate::{missing_fields_message, parse_date, required_text};

/// 校验活动字段并组装为完整记录，创建与更新共用
pub(crate) fn build_event(
    event_name: Option<String>,
    event_type: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    venue: Option<String>,
    description: Option<String>,
) -> Result<NewEvent, String> {
    let (Some(name), Some(kind), Some(start), Some(end)) = (
        event_name.clone(),
        event_type.clone(),
        start_date.clone(),
        end_date.clone(),
    ) else {
        let missing: Vec<&str> = [
            ("EventName", event_name.is_none()),
            ("EventType", event_type.is_none()),
            ("StartDate", start_date.is_none()),
            ("EndDate", end_date.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        return Err(missing_fields_message(&missing).unwrap_or_default());
    };

    let kind = kind.parse::<EventType>()?;
    let start: NaiveDate = parse_date(&start, "StartDate")?;
    let end: NaiveDate = parse_date(&end, "EndDate")?;
    if end < start {
        return Err("EndDate must be on or after StartDate".to_string());
    }

    Ok(NewEvent {
        event_name: name,
        event_type: kind.to_string(),
        start_date: start,
        end_date: end,
        venue,
        description,
    })
}

pub async fn create_event(
    service: &EventService,
    request: &HttpRequest,
    event_data: CreateEventRequest,
) -> ActixResult<HttpResponse> {
    let new_event = match build_event(
        required_text(event_data.event_name.as_ref()),
        required_text(event_data.event_type.as_ref()),
        required_text(event_data.start_date.as_ref()),
        required_text(event_data.end_date.as_ref()),
        required_text(event_data.venue.as_ref()),
        required_text(event_data.description.as_ref()),
    ) {
        Ok(new_event) => new_event,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let storage = service.get_storage(request);

    match storage.create_event(new_event).await {
        Ok(event) => {
            info!("Event {} created", event.event_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                event,
                "Event created successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to create event")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_end_date_before_start_rejected() {
        let err = build_event(
            s("Sports Day"),
            s("Sports"),
            s("2024-05-10"),
            s("2024-05-09"),
            None,
            None,
        )
        .unwrap_err();
        assert!(err.contains("EndDate"));
    }

    #[test]
    fn test_single_day_event_accepted() {
        let event = build_event(
            s("Science Fair"),
            s("Academic"),
            s("2024-05-10"),
            s("2024-05-10"),
            s("Hall"),
            None,
        )
        .unwrap();
        assert_eq!(event.event_type, "Academic");
        assert_eq!(event.start_date, event.end_date);
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(
            build_event(s("Gala"), s("Party"), s("2024-05-10"), s("2024-05-11"), None, None)
                .is_err()
        );
    }
}
