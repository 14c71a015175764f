use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;

// 新增学生请求，Class + Section 会被解析为班级 ID（不存在则创建）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub class: Option<String>,
    pub section: Option<String>,
    pub roll_number: Option<i32>,
    pub admission_date: Option<String>,
    pub address: Option<String>,
    pub parent_contact: Option<String>,
}

// 更新学生请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub class: Option<String>,
    pub section: Option<String>,
    pub roll_number: Option<i32>,
    pub admission_date: Option<String>,
    pub address: Option<String>,
    pub parent_contact: Option<String>,
}

// 学生列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(rename = "ClassID", default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
}

// 学生搜索参数，至少提供一项
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentSearchQuery {
    pub first_name: Option<String>,
    pub class: Option<String>,
    pub section: Option<String>,
    pub roll_number: Option<String>,
}

impl StudentSearchQuery {
    pub fn is_empty(&self) -> bool {
        [
            &self.first_name,
            &self.class,
            &self.section,
            &self.roll_number,
        ]
        .iter()
        .all(|v| v.as_deref().is_none_or(|s| s.trim().is_empty()))
    }
}

// 学号重复检查参数
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CheckRollQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub roll_number: Option<i64>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    #[serde(
        rename = "excludeStudentID",
        default,
        deserialize_with = "deserialize_optional_i64"
    )]
    pub exclude_student_id: Option<i64>,
}

// 存储层使用
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: chrono::NaiveDate,
    pub gender: String,
    pub class_id: i64,
    pub roll_number: i32,
    pub admission_date: chrono::NaiveDate,
    pub address: Option<String>,
    pub parent_contact: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub gender: Option<String>,
    pub class_id: Option<i64>,
    pub roll_number: Option<i32>,
    pub admission_date: Option<chrono::NaiveDate>,
    pub address: Option<String>,
    pub parent_contact: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_requires_one_filter() {
        assert!(StudentSearchQuery::default().is_empty());
        let query = StudentSearchQuery {
            section: Some("  ".into()),
            ..Default::default()
        };
        assert!(query.is_empty());
        let query = StudentSearchQuery {
            first_name: Some("Asha".into()),
            ..Default::default()
        };
        assert!(!query.is_empty());
    }
}
