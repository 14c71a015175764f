//! 考试实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_name: String,
    pub exam_type: String,
    pub class_id: i64,
    pub exam_date: Date,
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
    #[sea_orm(has_many = "super::results::Entity")]
    Results,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl Related<super::results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(
        self,
        class: Option<super::classes::Model>,
    ) -> crate::models::exams::entities::Exam {
        use crate::models::exams::entities::{Exam, ExamType};

        let (class_name, section) = class
            .map(|c| (c.class_name, c.section))
            .unwrap_or_default();

        Exam {
            exam_id: self.id,
            exam_name: self.exam_name,
            exam_type: self.exam_type.parse::<ExamType>().unwrap_or(ExamType::Monthly),
            class_id: self.class_id,
            class_name,
            section,
            exam_date: self.exam_date,
        }
    }
}
