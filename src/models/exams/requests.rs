use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::deserialize_optional_i64;

// 按班级 ID 创建考试
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamRequest {
    pub exam_name: Option<String>,
    pub exam_type: Option<String>,
    #[serde(rename = "ClassID")]
    pub class_id: Option<i64>,
    pub exam_date: Option<String>,
}

// 按班级名称与分部创建考试
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct CreateExamByClassRequest {
    pub exam_name: Option<String>,
    pub exam_type: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub exam_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpdateExamRequest {
    pub exam_name: Option<String>,
    pub exam_type: Option<String>,
    #[serde(rename = "ClassID")]
    pub class_id: Option<i64>,
    pub exam_date: Option<String>,
}

// 考试搜索参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamSearchQuery {
    pub exam_name: Option<String>,
    #[serde(rename = "ClassID", default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct UpcomingExamQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub days: Option<i64>,
}

// 存储层使用
#[derive(Debug, Clone)]
pub struct NewExam {
    pub exam_name: String,
    pub exam_type: String,
    pub class_id: i64,
    pub exam_date: chrono::NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct ExamPatch {
    pub exam_name: Option<String>,
    pub exam_type: Option<String>,
    pub class_id: Option<i64>,
    pub exam_date: Option<chrono::NaiveDate>,
}

// 存储层搜索条件
#[derive(Debug, Clone, Default)]
pub struct ExamFilter {
    pub exam_name: Option<String>,
    pub class_id: Option<i64>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}
