use super::{SeaOrmStorage, non_blank};
use crate::entity::classes::{self, Entity as Classes};
use crate::entity::routines::{ActiveModel, Column, Entity as Routines};
use crate::errors::{Result, SchoolError};
use crate::models::routines::{
    entities::Routine,
    requests::{NewRoutine, RoutinePatch},
};
use crate::storage::RoutineQuery;
use crate::utils::sql::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建课程表
    pub async fn create_routine_impl(&self, routine: NewRoutine) -> Result<Routine> {
        let now = chrono::Utc::now().timestamp();
        let (file_url, file_type, file_public_id) = match routine.file {
            Some(file) => (Some(file.file_url), Some(file.file_type), file.file_public_id),
            None => (None, None, None),
        };

        let model = ActiveModel {
            routine_title: Set(routine.routine_title),
            class_id: Set(routine.class_id),
            routine_date: Set(routine.routine_date),
            description: Set(routine.description),
            file_url: Set(file_url),
            file_type: Set(file_type),
            file_public_id: Set(file_public_id),
            created_by: Set(routine.created_by),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "创建课程表失败"))?;

        self.get_routine_by_id_impl(created.id)
            .await?
            .ok_or_else(|| SchoolError::database_operation("新建课程表读取失败"))
    }

    /// 启用状态的课程表
    pub async fn get_routine_by_id_impl(&self, id: i64) -> Result<Option<Routine>> {
        let result = Routines::find_by_id(id)
            .filter(Column::IsActive.eq(true))
            .find_also_related(Classes)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程表失败: {e}")))?;

        Ok(result.map(|(routine, class)| routine.into_routine(class)))
    }

    /// 启用的课程表列表，可按班级与关键字筛选
    pub async fn list_routines_impl(&self, query: RoutineQuery) -> Result<Vec<Routine>> {
        let mut select = Routines::find()
            .filter(Column::IsActive.eq(true))
            .find_also_related(Classes);

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(class_name) = non_blank(&query.class_name) {
            select = select.filter(classes::Column::ClassName.eq(class_name));
        }
        if let Some(section) = non_blank(&query.section) {
            select = select.filter(classes::Column::Section.eq(section));
        }
        if let Some(keyword) = non_blank(&query.keyword) {
            select = select.filter(
                Condition::any()
                    .add(Column::RoutineTitle.like(contains_pattern(keyword)))
                    .add(Column::Description.like(contains_pattern(keyword)))
                    .add(classes::Column::ClassName.like(contains_pattern(keyword)))
                    .add(classes::Column::Section.like(contains_pattern(keyword))),
            );
        }

        let rows = select
            .order_by_desc(Column::RoutineDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课程表列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(routine, class)| routine.into_routine(class))
            .collect())
    }

    /// 更新课程表；提供新文件时整体替换文件信息
    pub async fn update_routine_impl(
        &self,
        id: i64,
        patch: RoutinePatch,
    ) -> Result<Option<Routine>> {
        if self.get_routine_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = patch.routine_title {
            model.routine_title = Set(title);
        }
        if let Some(class_id) = patch.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(date) = patch.routine_date {
            model.routine_date = Set(date);
        }
        if let Some(description) = patch.description {
            model.description = Set(Some(description));
        }
        if let Some(file) = patch.file {
            model.file_url = Set(Some(file.file_url));
            model.file_type = Set(Some(file.file_type));
            model.file_public_id = Set(file.file_public_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "更新课程表失败"))?;

        self.get_routine_by_id_impl(id).await
    }

    /// 软删除
    pub async fn deactivate_routine_impl(&self, id: i64) -> Result<bool> {
        let result = Routines::update_many()
            .col_expr(Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("停用课程表失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
