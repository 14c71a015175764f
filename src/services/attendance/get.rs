use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::{
    requests::{AttendanceExistsQuery, AttendanceFilter},
    responses::AttendanceExistsResponse,
};
use crate::models::{ApiResponse, CountResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::{parse_date, required_text};

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    filter: AttendanceFilter,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_attendance(filter).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            records,
            "Attendance records retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to list attendance")),
    }
}

pub async fn search_by_student(
    service: &AttendanceService,
    request: &HttpRequest,
    first_name: String,
    roll_number: String,
    class_name: String,
    section: String,
) -> ActixResult<HttpResponse> {
    let Ok(roll_number) = roll_number.trim().parse::<i32>() else {
        return Ok(bad_request("Roll number must be an integer"));
    };

    let filter = AttendanceFilter {
        first_name: required_text(Some(&first_name)),
        roll_number: Some(roll_number),
        class_name: required_text(Some(&class_name)),
        section: required_text(Some(&section)),
        ..Default::default()
    };

    list_attendance(service, request, filter).await
}

pub async fn list_by_date(
    service: &AttendanceService,
    request: &HttpRequest,
    date: String,
) -> ActixResult<HttpResponse> {
    let date = match parse_date(&date, "date") {
        Ok(date) => date,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let filter = AttendanceFilter {
        start_date: Some(date),
        end_date: Some(date),
        ..Default::default()
    };

    list_attendance(service, request, filter).await
}

pub async fn list_by_date_range(
    service: &AttendanceService,
    request: &HttpRequest,
    start: String,
    end: String,
) -> ActixResult<HttpResponse> {
    let (start, end) = match (parse_date(&start, "startDate"), parse_date(&end, "endDate")) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(msg), _) | (_, Err(msg)) => return Ok(bad_request(msg)),
    };
    if end < start {
        return Ok(bad_request("endDate must not be before startDate"));
    }

    let filter = AttendanceFilter {
        start_date: Some(start),
        end_date: Some(end),
        ..Default::default()
    };

    list_attendance(service, request, filter).await
}

pub async fn count_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_attendance().await {
        Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CountResponse { count },
            "Attendance count retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(e, "Failed to count attendance")),
    }
}

pub async fn check_exists(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceExistsQuery,
) -> ActixResult<HttpResponse> {
    let (Some(student_id), Some(class_date)) =
        (query.student_id, required_text(query.class_date.as_ref()))
    else {
        return Ok(bad_request("studentID and classDate are required"));
    };
    let class_date = match parse_date(&class_date, "classDate") {
        Ok(date) => date,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let storage = service.get_storage(request);

    match storage.find_attendance(student_id, class_date).await {
        Ok(found) => {
            // 指定班级时只认该班级下的记录
            let found = found.filter(|a| query.class_id.is_none_or(|id| a.class_id == id));
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AttendanceExistsResponse {
                    exists: found.is_some(),
                    attendance_id: found.map(|a| a.attendance_id),
                },
                "Attendance existence checked successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to check attendance")),
    }
}

pub async fn get_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_attendance_by_id(attendance_id).await {
        Ok(Some(attendance)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            attendance,
            "Attendance retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        )),
        Err(e) => Ok(storage_failure(e, "Failed to get attendance")),
    }
}
