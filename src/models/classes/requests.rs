use serde::Deserialize;
use ts_rs::TS;

// 创建（或获取已有）班级请求
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub class_name: Option<String>,
    pub section: Option<String>,
    #[serde(rename = "TeacherID")]
    pub teacher_id: Option<i64>,
}

// 更新班级请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub class_name: Option<String>,
    pub section: Option<String>,
    #[serde(rename = "TeacherID")]
    pub teacher_id: Option<i64>,
}

// 存储层使用：已校验的新班级
#[derive(Debug, Clone)]
pub struct NewClass {
    pub class_name: String,
    pub section: String,
    pub teacher_id: Option<i64>,
}
