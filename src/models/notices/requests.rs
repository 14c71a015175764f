use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct CreateNoticeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub show: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct UpdateNoticeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub show: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/notice.ts")]
pub struct SetVisibilityRequest {
    pub show: Option<bool>,
}
