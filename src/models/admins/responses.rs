use serde::Serialize;
use ts_rs::TS;

use super::entities::Admin;

// 登录响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64, // 秒
    pub admin: Admin,
}
