use serde::Deserialize;
use ts_rs::TS;

use super::entities::AdminRole;

// 创建管理员请求
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct CreateAdminRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<AdminRole>,
}

// 登录请求，Username 可以是用户名或邮箱
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// 更新管理员基本信息
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct UpdateAdminRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

// 修改邮箱/密码，需要验证当前密码
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct UpdateCredentialsRequest {
    pub current_password: String,
    pub new_email: Option<String>,
    pub new_password: Option<String>,
}

// 存储层使用：密码已哈希
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
}
