use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;

// 新增教师请求，必填项在服务层校验
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub subject: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub joining_date: Option<String>,
    pub address: Option<String>,
}

// 更新教师请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeacherRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub subject: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub joining_date: Option<String>,
    pub address: Option<String>,
}

// 教师列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 重复检查参数
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CheckDuplicateQuery {
    pub email: Option<String>,
    pub contact_number: Option<String>,
    #[serde(
        rename = "excludeTeacherID",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    pub exclude_teacher_id: Option<i64>,
}

// 存储层使用
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub subject: String,
    pub contact_number: String,
    pub email: String,
    pub joining_date: chrono::NaiveDate,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TeacherPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub subject: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub joining_date: Option<chrono::NaiveDate>,
    pub address: Option<String>,
}
