use super::SeaOrmStorage;
use crate::entity::messages::{ActiveModel, Column, Entity as Messages, Model};
use crate::errors::{Result, SchoolError};
use crate::models::messages::{entities::Message, requests::UpdateMessageRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_message_impl(&self, message: &str, show: bool) -> Result<Message> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            message: Set(message.to_string()),
            is_visible: Set(show),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建留言失败: {e}")))?;

        Ok(created.into_message())
    }

    pub async fn list_messages_impl(&self) -> Result<Vec<Message>> {
        let messages = Messages::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询留言列表失败: {e}")))?;

        Ok(messages.into_iter().map(|m| m.into_message()).collect())
    }

    async fn find_message(&self, id: i64) -> Result<Option<Model>> {
        Messages::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询留言失败: {e}")))
    }

    pub async fn update_message_impl(
        &self,
        id: i64,
        update: UpdateMessageRequest,
    ) -> Result<Option<Message>> {
        if self.find_message(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(text) = update.messages {
            model.message = Set(text);
        }
        if let Some(show) = update.show {
            model.is_visible = Set(show);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新留言失败: {e}")))?;

        Ok(Some(updated.into_message()))
    }

    /// 切换留言可见性
    pub async fn toggle_message_visibility_impl(&self, id: i64) -> Result<Option<Message>> {
        let Some(current) = self.find_message(id).await? else {
            return Ok(None);
        };

        self.update_message_impl(
            id,
            UpdateMessageRequest {
                messages: None,
                show: Some(!current.is_visible),
            },
        )
        .await
    }

    pub async fn delete_message_impl(&self, id: i64) -> Result<bool> {
        let result = Messages::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除留言失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
