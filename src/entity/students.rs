//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub class_id: i64,
    pub roll_number: i32,
    pub admission_date: Date,
    pub address: Option<String>,
    pub parent_contact: Option<String>,
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
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendance,
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

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 需要关联的班级记录来补全班级名称与分部
    pub fn into_student(
        self,
        class: Option<super::classes::Model>,
    ) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{Gender, Student};

        let (class_name, section) = class
            .map(|c| (c.class_name, c.section))
            .unwrap_or_default();

        Student {
            student_id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender.parse::<Gender>().unwrap_or(Gender::Other),
            class_id: self.class_id,
            class_name,
            section,
            roll_number: self.roll_number,
            admission_date: self.admission_date,
            address: self.address,
            parent_contact: self.parent_contact,
            created_at: super::timestamp_to_utc(self.created_at),
            updated_at: super::timestamp_to_utc(self.updated_at),
        }
    }
}
