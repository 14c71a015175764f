use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生性别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const MALE: &'static str = "Male";
    pub const FEMALE: &'static str = "Female";
    pub const OTHER: &'static str = "Other";
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "{}", Gender::MALE),
            Gender::Female => write!(f, "{}", Gender::FEMALE),
            Gender::Other => write!(f, "{}", Gender::OTHER),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Gender::MALE => Ok(Gender::Male),
            Gender::FEMALE => Ok(Gender::Female),
            Gender::OTHER => Ok(Gender::Other),
            _ => Err(format!(
                "Invalid gender: {s}. Expected one of: Male, Female, Other"
            )),
        }
    }
}

// 学生实体，总是附带所在班级的名称与分部
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    #[serde(rename = "StudentID")]
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: chrono::NaiveDate,
    pub gender: Gender,
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
    pub roll_number: i32,
    pub admission_date: chrono::NaiveDate,
    pub address: Option<String>,
    pub parent_contact: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse() {
        assert_eq!("Female".parse::<Gender>(), Ok(Gender::Female));
        assert!("female".parse::<Gender>().is_err());
    }
}
