//! 课程表实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "routines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub routine_title: String,
    pub class_id: i64,
    pub routine_date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub file_public_id: Option<String>,
    pub created_by: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::admins::Entity",
        from = "Column::CreatedBy",
        to = "super::admins::Column::Id"
    )]
    Creator,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::admins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_routine(
        self,
        class: Option<super::classes::Model>,
    ) -> crate::models::routines::entities::Routine {
        use crate::models::classes::entities::format_class_section;
        use crate::models::routines::entities::{Routine, RoutineFileType};

        let (class_name, section) = class
            .map(|c| (c.class_name, c.section))
            .unwrap_or_default();

        Routine {
            routine_id: self.id,
            routine_title: self.routine_title,
            class_id: self.class_id,
            class_section_name: format_class_section(&class_name, &section),
            class_name,
            section,
            routine_date: self.routine_date,
            description: self.description,
            file_url: self.file_url,
            file_type: self
                .file_type
                .and_then(|t| t.parse::<RoutineFileType>().ok()),
            file_public_id: self.file_public_id,
            created_by: self.created_by,
            is_active: self.is_active,
            created_at: super::timestamp_to_utc(self.created_at),
            updated_at: super::timestamp_to_utc(self.updated_at),
        }
    }
}
