use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 管理员角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub enum AdminRole {
    Admin, // 管理员
    Staff, // 教务人员
}

impl AdminRole {
    pub const ADMIN: &'static str = "admin";
    pub const STAFF: &'static str = "staff";
}

impl<'de> Deserialize<'de> for AdminRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的管理员角色: '{s}'. 支持的角色: admin, staff"
            ))
        })
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::Admin => write!(f, "{}", AdminRole::ADMIN),
            AdminRole::Staff => write!(f, "{}", AdminRole::STAFF),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            AdminRole::ADMIN => Ok(AdminRole::Admin),
            AdminRole::STAFF => Ok(AdminRole::Staff),
            _ => Err(format!("Invalid admin role: {s}")),
        }
    }
}

// 管理员实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admin.ts")]
pub struct Admin {
    #[serde(rename = "AdminID")]
    pub admin_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: AdminRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Admin {
    // 生成访问令牌
    pub fn generate_access_token(&self) -> Result<String, String> {
        crate::utils::jwt::JwtUtils::generate_access_token(self.admin_id, &self.role.to_string())
            .map_err(|e| format!("生成访问令牌失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        assert_eq!("admin".parse::<AdminRole>(), Ok(AdminRole::Admin));
        assert_eq!(AdminRole::Staff.to_string(), "staff");
        assert!("root".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let admin = Admin {
            admin_id: 1,
            username: "principal".into(),
            email: "principal@school.test".into(),
            password_hash: "$argon2id$secret".into(),
            role: AdminRole::Admin,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&admin).unwrap();
        assert_eq!(json["AdminID"], 1);
        assert!(json.get("PasswordHash").is_none());
    }
}
