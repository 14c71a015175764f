use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/routine.ts")]
pub struct RoutineFilterQuery {
    pub class_name: Option<String>,
    pub section: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/routine.ts")]
pub struct RoutineSearchQuery {
    pub q: Option<String>,
}

// multipart 表单中的文本字段
#[derive(Debug, Clone, Default)]
pub struct RoutineFormFields {
    pub routine_title: Option<String>,
    pub class_id: Option<String>,
    pub routine_date: Option<String>,
    pub description: Option<String>,
}

// 已落盘（远程或本地）的课程表文件
#[derive(Debug, Clone)]
pub struct RoutineFile {
    pub file_url: String,
    pub file_type: String,
    pub file_public_id: Option<String>,
}

// 存储层使用
#[derive(Debug, Clone)]
pub struct NewRoutine {
    pub routine_title: String,
    pub class_id: i64,
    pub routine_date: chrono::NaiveDate,
    pub description: Option<String>,
    pub file: Option<RoutineFile>,
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct RoutinePatch {
    pub routine_title: Option<String>,
    pub class_id: Option<i64>,
    pub routine_date: Option<chrono::NaiveDate>,
    pub description: Option<String>,
    pub file: Option<RoutineFile>,
}
