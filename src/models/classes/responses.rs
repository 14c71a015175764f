use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Class;

// 班级列表项：附带班主任姓名与学生人数
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassDetail {
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
    #[serde(rename = "TeacherID")]
    pub teacher_id: Option<i64>,
    pub teacher_name: Option<String>,
    pub student_count: i64,
}

// 获取或创建班级的结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassUpsertResponse {
    pub created: bool,
    pub class: Class,
}

// 某班级名下（所有分部）学生总数
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassTotalStudents {
    pub class_name: String,
    pub total_students: i64,
}

// 下拉选项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassOption {
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
    pub class_section_name: String,
}

impl From<&Class> for ClassOption {
    fn from(class: &Class) -> Self {
        Self {
            class_id: class.class_id,
            class_name: class.class_name.clone(),
            section: class.section.clone(),
            class_section_name: class.display_name(),
        }
    }
}
