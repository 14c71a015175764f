use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

use super::entities::Attendance;
use crate::models::common::RowError;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceResponse {
    pub action: String,
    pub attendance: Attendance,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkAttendanceResponse {
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<RowError>,
}

// 全局统计，百分比在数据库中计算
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceStatistics {
    pub total_records: i64,
    pub total_present: i64,
    pub total_absent: i64,
    pub total_students: i64,
    pub total_days: i64,
    pub present_percentage: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceExistsResponse {
    pub exists: bool,
    #[serde(rename = "AttendanceID", skip_serializing_if = "Option::is_none")]
    pub attendance_id: Option<i64>,
}

// 学生考勤汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct StudentAttendanceSummary {
    #[serde(rename = "StudentID")]
    pub student_id: i64,
    #[serde(rename = "TotalPresent")]
    pub total_present: i64,
    #[serde(rename = "TotalAbsent")]
    pub total_absent: i64,
    #[serde(rename = "totalDays")]
    pub total_days: i64,
    #[serde(rename = "AttendancePercentage")]
    pub attendance_percentage: f64,
}

// 班级某日按状态分组的人数
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceStatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct SyncValidationResponse {
    pub class_name: String,
    pub section: String,
    pub total_students: i64,
    pub days_in_month: i64,
    pub total_possible_records: i64,
    pub actual_records: i64,
    pub integrity_percentage: f64,
    pub sync_status: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct ForceSyncResponse {
    pub attendance_map: BTreeMap<String, String>,
    pub total_records: usize,
    pub total_students: i64,
    pub sync_timestamp: chrono::DateTime<chrono::Utc>,
    pub period: String,
    pub class_name: String,
    pub section: String,
}
