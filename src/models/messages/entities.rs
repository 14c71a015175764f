use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 滚动消息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct Message {
    #[serde(rename = "MessageID")]
    pub message_id: i64,
    pub messages: String,
    pub show: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
