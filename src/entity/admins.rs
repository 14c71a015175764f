//! 管理员实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::routines::Entity")]
    Routines,
}

impl Related<super::routines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Routines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_admin(self) -> crate::models::admins::entities::Admin {
        use crate::models::admins::entities::{Admin, AdminRole};

        Admin {
            admin_id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role.parse::<AdminRole>().unwrap_or(AdminRole::Staff),
            created_at: super::timestamp_to_utc(self.created_at),
            updated_at: super::timestamp_to_utc(self.updated_at),
        }
    }
}
