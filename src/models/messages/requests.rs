use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct CreateMessageRequest {
    pub messages: Option<String>,
    pub show: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/message.ts")]
pub struct UpdateMessageRequest {
    pub messages: Option<String>,
    pub show: Option<bool>,
}
