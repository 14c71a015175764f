use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程表文件类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/routine.ts")]
pub enum RoutineFileType {
    Pdf,
    Image,
}

impl RoutineFileType {
    /// 根据扩展名判断文件类型，无法识别时按 pdf 处理
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" => RoutineFileType::Image,
            _ => RoutineFileType::Pdf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoutineFileType::Pdf => "pdf",
            RoutineFileType::Image => "image",
        }
    }
}

impl std::str::FromStr for RoutineFileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(RoutineFileType::Pdf),
            "image" => Ok(RoutineFileType::Image),
            _ => Err(format!("Invalid routine file type: {s}")),
        }
    }
}

// 课程表，附带班级信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/routine.ts")]
pub struct Routine {
    #[serde(rename = "RoutineID")]
    pub routine_id: i64,
    pub routine_title: String,
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
    pub class_section_name: String,
    pub routine_date: chrono::NaiveDate,
    pub description: Option<String>,
    #[serde(rename = "FileURL")]
    pub file_url: Option<String>,
    pub file_type: Option<RoutineFileType>,
    #[serde(rename = "FilePublicID")]
    pub file_public_id: Option<String>,
    pub created_by: Option<i64>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(RoutineFileType::from_extension("PDF"), RoutineFileType::Pdf);
        assert_eq!(
            RoutineFileType::from_extension("jpeg"),
            RoutineFileType::Image
        );
        assert_eq!(
            RoutineFileType::from_extension("webp"),
            RoutineFileType::Image
        );
        assert_eq!(RoutineFileType::from_extension("docx"), RoutineFileType::Pdf);
    }
}
