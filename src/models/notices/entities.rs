use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 公告
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct Notice {
    #[serde(rename = "NoticeID")]
    pub notice_id: i64,
    pub title: String,
    pub description: String,
    pub show: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
