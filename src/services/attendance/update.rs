use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::attendance::{entities::AttendanceStatus, requests::UpdateAttendanceRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::{parse_optional_date, required_text};

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_id: i64,
    update_data: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let class_date = match parse_optional_date(update_data.class_date.as_deref(), "ClassDate") {
        Ok(date) => date,
        Err(msg) => return Ok(bad_request(msg)),
    };
    let status = match required_text(update_data.status.as_ref())
        .map(|s| s.parse::<AttendanceStatus>())
        .transpose()
    {
        Ok(status) => status,
        Err(msg) => return Ok(bad_request(msg)),
    };

    if class_date.is_none() && status.is_none() {
        return Ok(bad_request("At least one of ClassDate or Status is required"));
    }

    let storage = service.get_storage(request);

    match storage
        .update_attendance(attendance_id, class_date, status.map(|s| s.to_string()))
        .await
    {
        Ok(Some(attendance)) => {
            info!("Attendance {} updated", attendance.attendance_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                attendance,
                "Attendance updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        )),
        Err(e) => Ok(storage_failure(e, "Failed to update attendance")),
    }
}
