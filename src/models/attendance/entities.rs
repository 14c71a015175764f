use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub const PRESENT: &'static str = "Present";
    pub const ABSENT: &'static str = "Absent";
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "{}", AttendanceStatus::PRESENT),
            AttendanceStatus::Absent => write!(f, "{}", AttendanceStatus::ABSENT),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AttendanceStatus::PRESENT => Ok(AttendanceStatus::Present),
            AttendanceStatus::ABSENT => Ok(AttendanceStatus::Absent),
            _ => Err(format!(
                "Invalid attendance status: {s}. Expected Present or Absent"
            )),
        }
    }
}

// 考勤记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct Attendance {
    #[serde(rename = "AttendanceID")]
    pub attendance_id: i64,
    #[serde(rename = "StudentID")]
    pub student_id: i64,
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_date: chrono::NaiveDate,
    pub status: AttendanceStatus,
}

// 考勤详情，附带学生与班级信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceDetail {
    #[serde(rename = "AttendanceID")]
    pub attendance_id: i64,
    #[serde(rename = "StudentID")]
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: i32,
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
    pub class_date: chrono::NaiveDate,
    pub status: String,
}

/// 完整性百分比对应的同步状态
pub fn sync_status(integrity_percentage: f64) -> &'static str {
    match integrity_percentage {
        p if p > 95.0 => "excellent",
        p if p > 80.0 => "good",
        p if p > 60.0 => "fair",
        _ => "needs_attention",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_status_thresholds() {
        assert_eq!(sync_status(100.0), "excellent");
        assert_eq!(sync_status(95.0), "good");
        assert_eq!(sync_status(80.0), "fair");
        assert_eq!(sync_status(60.0), "needs_attention");
        assert_eq!(sync_status(0.0), "needs_attention");
    }

    #[test]
    fn test_status_parse_is_case_sensitive() {
        assert_eq!("Present".parse(), Ok(AttendanceStatus::Present));
        assert!("present".parse::<AttendanceStatus>().is_err());
    }
}
