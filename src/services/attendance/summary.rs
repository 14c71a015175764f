use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::parse_date;

pub async fn statistics(
    service: &AttendanceService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.attendance_statistics().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Attendance statistics retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to compute attendance statistics")),
    }
}

pub async fn student_summary(
    service: &AttendanceService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.student_attendance_summary(student_id).await {
        Ok(Some(summary)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Student attendance summary retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AttendanceNotFound,
            "No attendance records found for this student",
        )),
        Err(e) => Ok(storage_failure(e, "Failed to summarize attendance")),
    }
}

pub async fn class_date_summary(
    service: &AttendanceService,
    request: &HttpRequest,
    class_id: i64,
    date: String,
) -> ActixResult<HttpResponse> {
    let date = match parse_date(&date, "date") {
        Ok(date) => date,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let storage = service.get_storage(request);

    match storage.class_date_status_counts(class_id, date).await {
        Ok(counts) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            counts,
            "Class attendance summary retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to summarize attendance")),
    }
}
