use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::deserialize_optional_i64;

// 新增成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct CreateResultRequest {
    #[serde(rename = "StudentID")]
    pub student_id: Option<i64>,
    #[serde(rename = "ExamID")]
    pub exam_id: Option<i64>,
    #[serde(rename = "SubjectID")]
    pub subject_id: Option<i64>,
    #[serde(rename = "ClassID")]
    pub class_id: Option<i64>,
    pub marks_obtained: Option<f64>,
}

// 通过名称而非 ID 新增成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct AddResultByDetailsRequest {
    pub student_name: Option<String>,
    pub roll_number: Option<i32>,
    pub class_name: Option<String>,
    pub section_name: Option<String>,
    pub exam_name: Option<String>,
    pub subject_name: Option<String>,
    pub marks_obtained: Option<f64>,
}

// 批量新增成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct BatchResultRequest {
    pub results: Vec<CreateResultRequest>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct UpdateResultRequest {
    pub marks_obtained: Option<f64>,
}

// 基础搜索
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultSearchQuery {
    #[serde(rename = "StudentID", default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(rename = "ExamID", default, deserialize_with = "deserialize_optional_i64")]
    pub exam_id: Option<i64>,
    #[serde(rename = "ClassID", default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
    #[serde(rename = "SubjectID", default, deserialize_with = "deserialize_optional_i64")]
    pub subject_id: Option<i64>,
}

// 高级搜索
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct AdvancedResultQuery {
    pub student_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub roll_number: Option<i64>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub exam_name: Option<String>,
    pub exam_type: Option<String>,
    pub subject_name: Option<String>,
    pub min_marks: Option<String>,
    pub max_marks: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
}

// 成绩存在性检查
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct CheckResultQuery {
    #[serde(rename = "studentID", default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(rename = "examID", default, deserialize_with = "deserialize_optional_i64")]
    pub exam_id: Option<i64>,
    #[serde(rename = "subjectID", default, deserialize_with = "deserialize_optional_i64")]
    pub subject_id: Option<i64>,
}

/// 高级搜索排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSortField {
    ExamDate,
    StudentName,
    RollNumber,
    ClassName,
    Marks,
    SubjectName,
}

impl ResultSortField {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("studentName") => Self::StudentName,
            Some("rollNumber") => Self::RollNumber,
            Some("className") => Self::ClassName,
            Some("marks") => Self::Marks,
            Some("subjectName") => Self::SubjectName,
            _ => Self::ExamDate,
        }
    }
}

// 存储层使用：已校验的成绩
#[derive(Debug, Clone)]
pub struct NewResult {
    pub student_id: i64,
    pub exam_id: i64,
    pub subject_id: i64,
    pub class_id: i64,
    pub marks_obtained: f64,
}

// 存储层使用：高级搜索条件
#[derive(Debug, Clone)]
pub struct ResultFilter {
    pub student_name: Option<String>,
    pub roll_number: Option<i64>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub exam_name: Option<String>,
    pub exam_type: Option<String>,
    pub subject_name: Option<String>,
    pub min_marks: Option<f64>,
    pub max_marks: Option<f64>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub sort_by: ResultSortField,
    pub descending: bool,
    pub limit: u64,
    pub offset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_defaults_to_exam_date() {
        assert_eq!(ResultSortField::parse(None), ResultSortField::ExamDate);
        assert_eq!(
            ResultSortField::parse(Some("DROP TABLE")),
            ResultSortField::ExamDate
        );
        assert_eq!(ResultSortField::parse(Some("marks")), ResultSortField::Marks);
    }
}
