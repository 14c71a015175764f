use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考试类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum ExamType {
    Monthly,
    Quarterly,
    #[serde(rename = "Half-Yearly")]
    HalfYearly,
    Annual,
    Final,
}

impl ExamType {
    pub const ALL: [&'static str; 5] = ["Monthly", "Quarterly", "Half-Yearly", "Annual", "Final"];
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExamType::Monthly => "Monthly",
            ExamType::Quarterly => "Quarterly",
            ExamType::HalfYearly => "Half-Yearly",
            ExamType::Annual => "Annual",
            ExamType::Final => "Final",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monthly" => Ok(ExamType::Monthly),
            "Quarterly" => Ok(ExamType::Quarterly),
            "Half-Yearly" => Ok(ExamType::HalfYearly),
            "Annual" => Ok(ExamType::Annual),
            "Final" => Ok(ExamType::Final),
            _ => Err(format!(
                "Invalid exam type: {s}. Expected one of: {}",
                ExamType::ALL.join(", ")
            )),
        }
    }
}

// 考试实体，附带班级信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    #[serde(rename = "ExamID")]
    pub exam_id: i64,
    pub exam_name: String,
    pub exam_type: ExamType,
    #[serde(rename = "ClassID")]
    pub class_id: i64,
    pub class_name: String,
    pub section: String,
    pub exam_date: chrono::NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_yearly_wire_name() {
        assert_eq!("Half-Yearly".parse::<ExamType>(), Ok(ExamType::HalfYearly));
        assert_eq!(
            serde_json::to_string(&ExamType::HalfYearly).unwrap(),
            "\"Half-Yearly\""
        );
        assert!("Weekly".parse::<ExamType>().is_err());
    }
}
