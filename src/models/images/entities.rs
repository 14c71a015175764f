use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 图片分类
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/image.ts")]
pub enum ImageType {
    Student,
    Teacher,
    School,
    Notice,
    Event,
}

impl ImageType {
    pub const ALL: [&'static str; 5] = ["student", "teacher", "school", "notice", "event"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Student => "student",
            ImageType::Teacher => "teacher",
            ImageType::School => "school",
            ImageType::Notice => "notice",
            ImageType::Event => "event",
        }
    }

    /// 远程存储中的目录，例如 school/students
    pub fn folder(&self) -> String {
        format!("school/{}s", self.as_str())
    }
}

impl std::fmt::Display for ImageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ImageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(ImageType::Student),
            "teacher" => Ok(ImageType::Teacher),
            "school" => Ok(ImageType::School),
            "notice" => Ok(ImageType::Notice),
            "event" => Ok(ImageType::Event),
            _ => Err(format!(
                "Invalid image type: {s}. Expected one of: {}",
                ImageType::ALL.join(", ")
            )),
        }
    }
}

// 图片元数据
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/image.ts")]
pub struct Image {
    #[serde(rename = "ImageID")]
    pub image_id: i64,
    pub image_path: String,
    #[serde(rename = "PublicID")]
    pub public_id: String,
    pub description: Option<String>,
    pub image_type: ImageType,
    #[serde(rename = "StudentID")]
    pub student_id: Option<i64>,
    #[serde(rename = "TeacherID")]
    pub teacher_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 图片详情，附带关联学生/教师姓名
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/image.ts")]
pub struct ImageDetail {
    #[serde(flatten)]
    pub image: Image,
    pub student_name: Option<String>,
    pub teacher_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_is_pluralized() {
        assert_eq!(ImageType::Teacher.folder(), "school/teachers");
        assert_eq!("event".parse::<ImageType>(), Ok(ImageType::Event));
        assert!("all".parse::<ImageType>().is_err());
    }
}
