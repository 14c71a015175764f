//! 活动实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub event_name: String,
    pub event_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub venue: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_event(self) -> crate::models::events::entities::Event {
        use crate::models::events::entities::{Event, EventType};

        Event {
            event_id: self.id,
            event_name: self.event_name,
            event_type: self.event_type.parse::<EventType>().unwrap_or(EventType::Other),
            start_date: self.start_date,
            end_date: self.end_date,
            venue: self.venue,
            description: self.description,
            created_at: super::timestamp_to_utc(self.created_at),
            updated_at: super::timestamp_to_utc(self.updated_at),
        }
    }
}
