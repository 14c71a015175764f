use serde::Serialize;
use ts_rs::TS;

use super::entities::ResultDetail;
use crate::models::common::{PaginationInfo, RowError};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultListResponse {
    pub items: Vec<ResultDetail>,
    pub pagination: PaginationInfo,
}

// 批量新增结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct BatchResultResponse {
    pub inserted: usize,
    pub errors: Vec<RowError>,
}

// 高级搜索结果
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct AdvancedResultResponse {
    pub results: Vec<ResultDetail>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultExistsResponse {
    pub exists: bool,
    #[serde(rename = "ResultID", skip_serializing_if = "Option::is_none")]
    pub result_id: Option<i64>,
}

// 学生单场考试汇总
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct StudentExamSummary {
    #[serde(rename = "StudentID")]
    pub student_id: i64,
    #[serde(rename = "ExamID")]
    pub exam_id: i64,
    pub subjects: Vec<ResultDetail>,
    pub total_marks: f64,
    pub max_marks: f64,
    pub percentage: f64,
    pub subject_count: i64,
    pub overall_grade: String,
}

// 数据库汇总行
#[derive(Debug, Clone, PartialEq)]
pub struct ExamTotals {
    pub total_marks: f64,
    pub max_marks: f64,
    pub percentage: f64,
    pub subject_count: i64,
    pub overall_grade: String,
}

// 班级单场考试排名
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ClassExamSummaryRow {
    #[serde(rename = "StudentID")]
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: i32,
    pub total_marks: f64,
    pub subject_count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct DeletedCountResponse {
    pub deleted: u64,
}
