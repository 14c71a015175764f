use super::SeaOrmStorage;
use crate::entity::notices::{ActiveModel, Column, Entity as Notices};
use crate::errors::{Result, SchoolError};
use crate::models::notices::{entities::Notice, requests::UpdateNoticeRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 发布公告
    pub async fn create_notice_impl(
        &self,
        title: &str,
        description: &str,
        show: bool,
    ) -> Result<Notice> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            is_visible: Set(show),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建公告失败: {e}")))?;

        Ok(created.into_notice())
    }

    /// 公告列表，最新的在前
    pub async fn list_notices_impl(&self) -> Result<Vec<Notice>> {
        let notices = Notices::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询公告列表失败: {e}")))?;

        Ok(notices.into_iter().map(|m| m.into_notice()).collect())
    }

    async fn find_notice(&self, id: i64) -> Result<Option<crate::entity::notices::Model>> {
        Notices::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询公告失败: {e}")))
    }

    pub async fn update_notice_impl(
        &self,
        id: i64,
        update: UpdateNoticeRequest,
    ) -> Result<Option<Notice>> {
        if self.find_notice(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(show) = update.show {
            model.is_visible = Set(show);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新公告失败: {e}")))?;

        Ok(Some(updated.into_notice()))
    }

    pub async fn set_notice_visibility_impl(&self, id: i64, show: bool) -> Result<Option<Notice>> {
        self.update_notice_impl(
            id,
            UpdateNoticeRequest {
                show: Some(show),
                ..Default::default()
            },
        )
        .await
    }

    /// 切换公告可见性
    pub async fn toggle_notice_visibility_impl(&self, id: i64) -> Result<Option<Notice>> {
        match self.find_notice(id).await? {
            Some(notice) => self.set_notice_visibility_impl(id, !notice.is_visible).await,
            None => Ok(None),
        }
    }

    pub async fn delete_notice_impl(&self, id: i64) -> Result<bool> {
        let result = Notices::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除公告失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
