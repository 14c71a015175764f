//! 图片实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub image_path: String,
    pub public_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub image_type: String,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_image(self) -> crate::models::images::entities::Image {
        use crate::models::images::entities::{Image, ImageType};

        Image {
            image_id: self.id,
            image_path: self.image_path,
            public_id: self.public_id,
            description: self.description,
            image_type: self
                .image_type
                .parse::<ImageType>()
                .unwrap_or(ImageType::School),
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            created_at: super::timestamp_to_utc(self.created_at),
            updated_at: super::timestamp_to_utc(self.updated_at),
        }
    }
}
