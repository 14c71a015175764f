use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 活动类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub enum EventType {
    Academic,
    Sports,
    Cultural,
    Other,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventType::Academic => "Academic",
            EventType::Sports => "Sports",
            EventType::Cultural => "Cultural",
            EventType::Other => "Other",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Academic" => Ok(EventType::Academic),
            "Sports" => Ok(EventType::Sports),
            "Cultural" => Ok(EventType::Cultural),
            "Other" => Ok(EventType::Other),
            _ => Err(format!(
                "Invalid event type: {s}. Expected one of: Academic, Sports, Cultural, Other"
            )),
        }
    }
}

// 校园活动
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct Event {
    #[serde(rename = "EventID")]
    pub event_id: i64,
    pub event_name: String,
    pub event_type: EventType,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
