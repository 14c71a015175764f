use super::SeaOrmStorage;
use crate::entity::events::{ActiveModel, Column, Entity as Events};
use crate::errors::{Result, SchoolError};
use crate::models::events::{entities::Event, requests::NewEvent};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_event_impl(&self, event: NewEvent) -> Result<Event> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            event_name: Set(event.event_name),
            event_type: Set(event.event_type),
            start_date: Set(event.start_date),
            end_date: Set(event.end_date),
            venue: Set(event.venue),
            description: Set(event.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(created.into_event())
    }

    pub async fn get_event_by_id_impl(&self, id: i64) -> Result<Option<Event>> {
        let result = Events::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    /// 活动列表，可按类型过滤，按开始日期排序
    pub async fn list_events_impl(&self, event_type: Option<&str>) -> Result<Vec<Event>> {
        let mut select = Events::find();
        if let Some(event_type) = event_type {
            select = select.filter(Column::EventType.eq(event_type));
        }

        let events = select
            .order_by_asc(Column::StartDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(events.into_iter().map(|m| m.into_event()).collect())
    }

    /// 与 [start, end] 有交集的活动
    pub async fn list_events_in_range_impl(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Event>> {
        let events = Events::find()
            .filter(Column::StartDate.lte(end))
            .filter(Column::EndDate.gte(start))
            .order_by_asc(Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(events.into_iter().map(|m| m.into_event()).collect())
    }

    /// 整体替换活动内容
    pub async fn update_event_impl(&self, id: i64, event: NewEvent) -> Result<Option<Event>> {
        if self.get_event_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            event_name: Set(event.event_name),
            event_type: Set(event.event_type),
            start_date: Set(event.start_date),
            end_date: Set(event.end_date),
            venue: Set(event.venue),
            description: Set(event.description),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("更新活动失败: {e}")))?;

        Ok(Some(updated.into_event()))
    }

    pub async fn delete_event_impl(&self, id: i64) -> Result<bool> {
        let result = Events::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除活动失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
