use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 班级实体，(ClassName, Section) 唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
    #[serde(rename = "TeacherID")]
    pub teacher_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Class {
    /// 形如 "Grade 5 - Section A" 的展示名称
    pub fn display_name(&self) -> String {
        format_class_section(&self.class_name, &self.section)
    }
}

pub fn format_class_section(class_name: &str, section: &str) -> String {
    format!("{class_name} - Section {section}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(format_class_section("10", "B"), "10 - Section B");
    }
}
