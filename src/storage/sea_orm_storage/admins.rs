//! 管理员存储操作

use super::SeaOrmStorage;
use crate::entity::admins::{ActiveModel, Column, Entity as Admins};
use crate::errors::{Result, SchoolError};
use crate::models::admins::{Admin, AdminRole, NewAdmin, UpdateAdminRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建管理员
    pub async fn create_admin_impl(&self, admin: NewAdmin) -> Result<Admin> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(admin.username),
            email: Set(admin.email),
            password_hash: Set(admin.password_hash),
            role: Set(admin.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "创建管理员失败"))?;

        Ok(result.into_admin())
    }

    /// 通过 ID 获取管理员
    pub async fn get_admin_by_id_impl(&self, id: i64) -> Result<Option<Admin>> {
        let result = Admins::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询管理员失败: {e}")))?;

        Ok(result.map(|m| m.into_admin()))
    }

    /// 通过用户名或邮箱获取管理员
    pub async fn get_admin_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<Admin>> {
        let result = Admins::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询管理员失败: {e}")))?;

        Ok(result.map(|m| m.into_admin()))
    }

    /// 列出全部管理员
    pub async fn list_admins_impl(&self) -> Result<Vec<Admin>> {
        let admins = Admins::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询管理员列表失败: {e}")))?;

        Ok(admins.into_iter().map(|m| m.into_admin()).collect())
    }

    /// 统计管理员数量
    pub async fn count_admins_impl(&self, role: Option<AdminRole>) -> Result<i64> {
        let mut select = Admins::find();
        if let Some(role) = role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计管理员数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 更新用户名与邮箱
    pub async fn update_admin_impl(
        &self,
        id: i64,
        update: UpdateAdminRequest,
    ) -> Result<Option<Admin>> {
        if self.get_admin_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(username) = update.username {
            model.username = Set(username);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "更新管理员失败"))?;

        self.get_admin_by_id_impl(id).await
    }

    /// 更新邮箱与密码哈希
    pub async fn update_admin_credentials_impl(
        &self,
        id: i64,
        email: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<Admin>> {
        if self.get_admin_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(email) = email {
            model.email = Set(email);
        }
        if let Some(hash) = password_hash {
            model.password_hash = Set(hash);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "更新管理员凭据失败"))?;

        self.get_admin_by_id_impl(id).await
    }

    /// 删除管理员
    pub async fn delete_admin_impl(&self, id: i64) -> Result<bool> {
        let result = Admins::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除管理员失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
