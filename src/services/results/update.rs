use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ResultService;
use crate::models::results::{entities::is_valid_marks, requests::UpdateResultRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};

pub async fn update_result(
    service: &ResultService,
    request: &HttpRequest,
    result_id: i64,
    update_data: UpdateResultRequest,
) -> ActixResult<HttpResponse> {
    let Some(marks) = update_data.marks_obtained else {
        return Ok(bad_request("Missing required fields: MarksObtained"));
    };
    if !is_valid_marks(marks) {
        return Ok(bad_request("MarksObtained must be between 0 and 100"));
    }

    let storage = service.get_storage(request);

    match storage.update_result_marks(result_id, marks).await {
        Ok(Some(result)) => {
            info!("Result {} updated to {}", result.result_id, marks);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                result,
                "Result updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ResultNotFound, "Result not found")),
        Err(e) => Ok(storage_failure(e, "Failed to update result")),
    }
}
