use super::SeaOrmStorage;
use crate::entity::classes::{self, Entity as Classes};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, SchoolError};
use crate::models::subjects::{entities::Subject, requests::UpdateSubjectRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, subject_name: &str, class_id: i64) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_name: Set(subject_name.to_string()),
            class_id: Set(class_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "创建科目失败"))?;

        self.get_subject_by_id_impl(created.id)
            .await?
            .ok_or_else(|| SchoolError::database_operation("新建科目读取失败"))
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .find_also_related(Classes)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|(subject, class)| subject.into_subject(class)))
    }

    /// 科目列表，可限定班级
    pub async fn list_subjects_impl(&self, class_id: Option<i64>) -> Result<Vec<Subject>> {
        let mut select = Subjects::find().find_also_related(Classes);
        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        let rows = select
            .order_by_asc(classes::Column::ClassName)
            .order_by_asc(classes::Column::Section)
            .order_by_asc(Column::SubjectName)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(subject, class)| subject.into_subject(class))
            .collect())
    }

    pub async fn find_subject_impl(
        &self,
        subject_name: &str,
        class_id: i64,
    ) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::SubjectName.eq(subject_name))
            .filter(Column::ClassId.eq(class_id))
            .find_also_related(Classes)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|(subject, class)| subject.into_subject(class)))
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.subject_name {
            model.subject_name = Set(name);
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "更新科目失败"))?;

        self.get_subject_by_id_impl(id).await
    }

    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
