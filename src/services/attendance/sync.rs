//! 月度考勤同步：完整性校验与整月导出

use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Datelike, NaiveDate};
use tracing::info;

use super::AttendanceService;
use crate::models::attendance::{
    entities::sync_status,
    requests::AttendanceSyncRequest,
    responses::{ForceSyncResponse, SyncValidationResponse},
};
use crate::models::classes::entities::Class;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{bad_request, not_found, storage_failure};
use crate::utils::validate::required_text;

/// 已校验的同步区间
struct SyncPeriod {
    class_name: String,
    section: String,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl SyncPeriod {
    fn days(&self) -> i64 {
        (self.last_day - self.first_day).num_days() + 1
    }

    fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

/// month 从 0 开始计数
fn month_bounds(month: u32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let first_day = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    let next_month = if first_day.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)?
    };
    Some((first_day, next_month.pred_opt()?))
}

fn parse_period(sync_data: &AttendanceSyncRequest) -> Result<SyncPeriod, String> {
    let class_name = required_text(sync_data.class_name.as_ref());
    let section = required_text(sync_data.section.as_ref());

    let (Some(class_name), Some(section), Some(month), Some(year)) =
        (class_name, section, sync_data.month, sync_data.year)
    else {
        return Err("className, section, month and year are required".to_string());
    };

    if month > 11 {
        return Err("month must be between 0 and 11".to_string());
    }

    let (first_day, last_day) =
        month_bounds(month, year).ok_or_else(|| format!("Invalid year: {year}"))?;

    Ok(SyncPeriod {
        class_name,
        section,
        first_day,
        last_day,
    })
}

/// 校验参数并定位班级；失败时返回可直接响应的结果
async fn resolve(
    service: &AttendanceService,
    request: &HttpRequest,
    sync_data: &AttendanceSyncRequest,
) -> Result<(SyncPeriod, Class), HttpResponse> {
    let period = parse_period(sync_data).map_err(bad_request)?;

    let storage = service.get_storage(request);

    match storage
        .find_class(&period.class_name, &period.section)
        .await
    {
        Ok(Some(class)) => Ok((period, class)),
        Ok(None) => Err(not_found(
            ErrorCode::ClassNotFound,
            format!(
                "Class {} section {} not found",
                period.class_name, period.section
            ),
        )),
        Err(e) => Err(storage_failure(e, "Failed to find class")),
    }
}

/// 未取整的完整度，分档按它判断
fn integrity_percentage(actual: i64, possible: i64) -> f64 {
    if possible <= 0 {
        return 0.0;
    }
    actual as f64 / possible as f64 * 100.0
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 班级没有学生时两种同步都返回 404
async fn count_class_students(
    service: &AttendanceService,
    request: &HttpRequest,
    class: &Class,
) -> Result<i64, HttpResponse> {
    match service.get_storage(request).count_students(Some(class.class_id)).await {
        Ok(0) => Err(not_found(
            ErrorCode::StudentNotFound,
            "No students found for the specified class and section",
        )),
        Ok(count) => Ok(count),
        Err(e) => Err(storage_failure(e, "Failed to count students")),
    }
}

pub async fn validate_sync(
    service: &AttendanceService,
    request: &HttpRequest,
    sync_data: AttendanceSyncRequest,
) -> ActixResult<HttpResponse> {
    let (period, class) = match resolve(service, request, &sync_data).await {
        Ok(resolved) => resolved,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let total_students = match count_class_students(service, request, &class).await {
        Ok(count) => count,
        Err(resp) => return Ok(resp),
    };
    let actual_records = match storage
        .count_attendance_in_range(class.class_id, period.first_day, period.last_day)
        .await
    {
        Ok(count) => count,
        Err(e) => return Ok(storage_failure(e, "Failed to count attendance")),
    };

    let days_in_month = period.days();
    let total_possible_records = total_students * days_in_month;
    let integrity = integrity_percentage(actual_records, total_possible_records);

    let response = SyncValidationResponse {
        class_name: period.class_name,
        section: period.section,
        total_students,
        days_in_month,
        total_possible_records,
        actual_records,
        integrity_percentage: round_2(integrity),
        sync_status: sync_status(integrity).to_string(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Attendance sync validated",
    )))
}

pub async fn force_sync(
    service: &AttendanceService,
    request: &HttpRequest,
    sync_data: AttendanceSyncRequest,
) -> ActixResult<HttpResponse> {
    let (period, class) = match resolve(service, request, &sync_data).await {
        Ok(resolved) => resolved,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let total_students = match count_class_students(service, request, &class).await {
        Ok(count) => count,
        Err(resp) => return Ok(resp),
    };
    let records = match storage
        .list_attendance_in_range(class.class_id, period.first_day, period.last_day)
        .await
    {
        Ok(records) => records,
        Err(e) => return Ok(storage_failure(e, "Failed to load attendance")),
    };

    let attendance_map: BTreeMap<String, String> = records
        .iter()
        .map(|a| {
            (
                format!("{}-{}", a.student_id, a.class_date),
                a.status.to_string(),
            )
        })
        .collect();

    info!(
        "Force sync for {} {}: {} records",
        period.class_name,
        period.label(),
        attendance_map.len()
    );

    let response = ForceSyncResponse {
        total_records: attendance_map.len(),
        attendance_map,
        total_students,
        sync_timestamp: chrono::Utc::now(),
        period: period.label(),
        class_name: period.class_name,
        section: period.section,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Attendance data synchronized",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync_request(month: Option<u32>, year: Option<i32>) -> AttendanceSyncRequest {
        AttendanceSyncRequest {
            class_name: Some("10".to_string()),
            section: Some("A".to_string()),
            month,
            year,
        }
    }

    #[test]
    fn test_month_is_zero_based() {
        let period = parse_period(&sync_request(Some(1), Some(2024))).unwrap();
        assert_eq!(period.days(), 29);
        assert_eq!(period.label(), "February 2024");

        let period = parse_period(&sync_request(Some(11), Some(2023))).unwrap();
        assert_eq!(period.days(), 31);
        assert_eq!(period.last_day, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_period_validation() {
        assert!(parse_period(&sync_request(Some(12), Some(2024))).is_err());
        assert!(parse_period(&sync_request(None, Some(2024))).is_err());
    }

    #[test]
    fn test_integrity_percentage_rounding() {
        assert_eq!(integrity_percentage(0, 0), 0.0);
        assert_eq!(round_2(integrity_percentage(2, 3)), 66.67);
        assert_eq!(round_2(integrity_percentage(30, 30)), 100.0);
    }

    #[test]
    fn test_status_uses_unrounded_integrity() {
        // 95.004% 取整后是 95.0，但仍高于 95
        let integrity = integrity_percentage(23_751, 25_000);
        assert_eq!(round_2(integrity), 95.0);
        assert_eq!(sync_status(integrity), "excellent");
    }
}
