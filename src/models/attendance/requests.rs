use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::deserialize_optional_i64;

// 新增考勤
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CreateAttendanceRequest {
    #[serde(rename = "StudentID")]
    pub student_id: Option<i64>,
    #[serde(rename = "ClassID")]
    pub class_id: Option<i64>,
    pub class_date: Option<String>,
    pub status: Option<String>,
}

// 标记考勤（存在则更新），班级取自学生
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct MarkAttendanceRequest {
    #[serde(rename = "StudentID")]
    pub student_id: Option<i64>,
    pub class_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkAttendanceRequest {
    pub records: Vec<MarkAttendanceRequest>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub class_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceExistsQuery {
    #[serde(rename = "studentID", default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(rename = "classID", default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
    #[serde(rename = "classDate")]
    pub class_date: Option<String>,
}

// 月度同步参数，month 从 0 开始
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSyncRequest {
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

// 存储层使用
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub class_id: i64,
    pub class_date: chrono::NaiveDate,
    pub status: String,
}

// 存储层使用：学生/班级组合搜索
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub first_name: Option<String>,
    pub roll_number: Option<i32>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}
