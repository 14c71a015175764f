use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 及格线
pub const PASS_MARK: f64 = 40.0;
/// 单科满分
pub const MAX_MARKS_PER_SUBJECT: f64 = 100.0;

// 成绩记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ExamResult {
    #[serde(rename = "ResultID")]
    pub result_id: i64,
    #[serde(rename = "StudentID")]
    pub student_id: i64,
    #[serde(rename = "ExamID")]
    pub exam_id: i64,
    #[serde(rename = "SubjectID")]
    pub subject_id: i64,
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub marks_obtained: f64,
}

// 成绩详情，等级与是否及格由数据库计算
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultDetail {
    #[serde(rename = "ResultID")]
    pub result_id: i64,
    #[serde(rename = "StudentID")]
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: i32,
    #[serde(rename = "ExamID")]
    pub exam_id: i64,
    pub exam_name: String,
    pub exam_type: String,
    pub exam_date: chrono::NaiveDate,
    #[serde(rename = "SubjectID")]
    pub subject_id: i64,
    pub subject_name: String,
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
    pub marks_obtained: f64,
    pub grade: String,
    pub status: String,
}

pub fn is_valid_marks(marks: f64) -> bool {
    marks.is_finite() && (0.0..=MAX_MARKS_PER_SUBJECT).contains(&marks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_range() {
        assert!(is_valid_marks(0.0));
        assert!(is_valid_marks(100.0));
        assert!(!is_valid_marks(100.5));
        assert!(!is_valid_marks(-1.0));
        assert!(!is_valid_marks(f64::NAN));
    }
}
