use serde::Deserialize;
use ts_rs::TS;

// 图片元数据更新
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/image.ts")]
pub struct UpdateImageRequest {
    pub description: Option<String>,
    pub image_type: Option<String>,
    #[serde(rename = "StudentID")]
    pub student_id: Option<i64>,
    #[serde(rename = "TeacherID")]
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/image.ts")]
pub struct ImageDetailsQuery {
    #[serde(rename = "type")]
    pub image_type: Option<String>,
}

// multipart 表单中的文本字段
#[derive(Debug, Clone, Default)]
pub struct ImageFormFields {
    pub image_type: Option<String>,
    pub description: Option<String>,
    pub student_id: Option<String>,
    pub teacher_id: Option<String>,
}

// 存储层使用
#[derive(Debug, Clone)]
pub struct NewImage {
    pub image_path: String,
    pub public_id: String,
    pub description: Option<String>,
    pub image_type: String,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ImagePatch {
    pub image_path: Option<String>,
    pub public_id: Option<String>,
    pub description: Option<String>,
    pub image_type: Option<String>,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
}
