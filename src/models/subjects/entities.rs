use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 科目实体，附带所属班级信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    #[serde(rename = "SubjectID")]
    pub subject_id: i64,
    pub subject_name: String,
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
}
