use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use tracing::info;

use super::AttendanceService;
use crate::errors::SchoolError;
use crate::models::attendance::{
    entities::{Attendance, AttendanceStatus},
    requests::{
        BulkAttendanceRequest, CreateAttendanceRequest, MarkAttendanceRequest, NewAttendance,
    },
    responses::{BulkAttendanceResponse, MarkAttendanceResponse},
};
use crate::models::{ApiResponse, ErrorCode, RowError};
use crate::services::common::{bad_request, conflict, not_found, storage_failure};
use crate::storage::Storage;
use crate::utils::validate::{missing_fields_message, parse_date, required_text};

/// 解析日期与状态两个公共字段
fn parse_day_and_status(
    class_date: Option<&String>,
    status: Option<&String>,
) -> Result<(NaiveDate, AttendanceStatus), String> {
    let class_date = required_text(class_date);
    let status = required_text(status);

    let (Some(class_date), Some(status)) = (class_date.clone(), status.clone()) else {
        let missing: Vec<&str> = [
            ("ClassDate", class_date.is_none()),
            ("Status", status.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        return Err(missing_fields_message(&missing).unwrap_or_default());
    };

    let class_date = parse_date(&class_date, "ClassDate")?;
    let status = status.parse::<AttendanceStatus>()?;
    Ok((class_date, status))
}

pub async fn create_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_data: CreateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let (Some(student_id), Some(class_id)) =
        (attendance_data.student_id, attendance_data.class_id)
    else {
        let missing: Vec<&str> = [
            ("StudentID", attendance_data.student_id.is_none()),
            ("ClassID", attendance_data.class_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        return Ok(bad_request(
            missing_fields_message(&missing).unwrap_or_default(),
        ));
    };

    let (class_date, status) = match parse_day_and_status(
        attendance_data.class_date.as_ref(),
        attendance_data.status.as_ref(),
    ) {
        Ok(parsed) => parsed,
        Err(msg) => return Ok(bad_request(msg)),
    };

    let storage = service.get_storage(request);

    match storage.find_attendance(student_id, class_date).await {
        Ok(Some(_)) => {
            return Ok(conflict(format!(
                "Attendance already recorded for student {student_id} on {class_date}"
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(storage_failure(e, "Failed to check attendance")),
    }

    let new_attendance = NewAttendance {
        student_id,
        class_id,
        class_date,
        status: status.to_string(),
    };

    match storage.create_attendance(new_attendance).await {
        Ok(attendance) => {
            info!(
                "Attendance {} recorded for student {}",
                attendance.attendance_id, attendance.student_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                attendance,
                "Attendance recorded successfully",
            )))
        }
        Err(e) => Ok(storage_failure(e, "Failed to record attendance")),
    }
}

/// 单条标记失败的原因
enum MarkFailure {
    Invalid(String),
    StudentMissing(i64),
    Storage(SchoolError),
}

/// 以学生当前班级为准进行 upsert
async fn mark_one(
    storage: &Arc<dyn Storage>,
    mark_data: &MarkAttendanceRequest,
) -> Result<(Attendance, bool), MarkFailure> {
    let Some(student_id) = mark_data.student_id else {
        return Err(MarkFailure::Invalid(
            "Missing required fields: StudentID".to_string(),
        ));
    };
    let (class_date, status) =
        parse_day_and_status(mark_data.class_date.as_ref(), mark_data.status.as_ref())
            .map_err(MarkFailure::Invalid)?;

    let student = storage
        .get_student_by_id(student_id)
        .await
        .map_err(MarkFailure::Storage)?
        .ok_or(MarkFailure::StudentMissing(student_id))?;

    storage
        .upsert_attendance(NewAttendance {
            student_id,
            class_id: student.class_id,
            class_date,
            status: status.to_string(),
        })
        .await
        .map_err(MarkFailure::Storage)
}

fn action_name(created: bool) -> &'static str {
    if created { "created" } else { "updated" }
}

pub async fn mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    mark_data: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match mark_one(&storage, &mark_data).await {
        Ok((attendance, created)) => {
            info!(
                "Attendance for student {} on {} {}",
                attendance.student_id,
                attendance.class_date,
                action_name(created)
            );
            let response = MarkAttendanceResponse {
                action: action_name(created).to_string(),
                attendance,
            };
            let message = format!("Attendance {} successfully", action_name(created));
            if created {
                Ok(HttpResponse::Created().json(ApiResponse::success(response, message)))
            } else {
                Ok(HttpResponse::Ok().json(ApiResponse::success(response, message)))
            }
        }
        Err(MarkFailure::Invalid(msg)) => Ok(bad_request(msg)),
        Err(MarkFailure::StudentMissing(id)) => Ok(not_found(
            ErrorCode::StudentNotFound,
            format!("Student {id} not found"),
        )),
        Err(MarkFailure::Storage(e)) => Ok(storage_failure(e, "Failed to mark attendance")),
    }
}

pub async fn bulk_mark(
    service: &AttendanceService,
    request: &HttpRequest,
    bulk_data: BulkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    if bulk_data.records.is_empty() {
        return Ok(bad_request("Records array is required and cannot be empty"));
    }

    let storage = service.get_storage(request);

    let mut response = BulkAttendanceResponse {
        created: 0,
        updated: 0,
        errors: Vec::new(),
    };

    for (index, record) in bulk_data.records.iter().enumerate() {
        match mark_one(&storage, record).await {
            Ok((_, true)) => response.created += 1,
            Ok((_, false)) => response.updated += 1,
            Err(MarkFailure::Invalid(message)) => response.errors.push(RowError { index, message }),
            Err(MarkFailure::StudentMissing(id)) => response.errors.push(RowError {
                index,
                message: format!("Student {id} not found"),
            }),
            Err(MarkFailure::Storage(e)) => {
                return Ok(storage_failure(e, "Failed to mark attendance"));
            }
        }
    }

    info!(
        "Bulk attendance: {} created, {} updated, {} rejected",
        response.created,
        response.updated,
        response.errors.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Bulk attendance processed",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_and_status() {
        let date = "2024-03-01".to_string();
        let status = "Absent".to_string();
        let (day, parsed) = parse_day_and_status(Some(&date), Some(&status)).unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(parsed, AttendanceStatus::Absent);

        let err = parse_day_and_status(None, Some(&status)).unwrap_err();
        assert!(err.contains("ClassDate"));

        let late = "Late".to_string();
        assert!(parse_day_and_status(Some(&date), Some(&late)).is_err());
    }
}
