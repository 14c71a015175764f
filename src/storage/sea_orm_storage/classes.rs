//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes, Relation};
use crate::errors::{Result, SchoolError};
use crate::models::classes::{
    entities::Class,
    requests::{NewClass, UpdateClassRequest},
    responses::ClassDetail,
};
use crate::utils::sql::concat_name;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use tracing::debug;

#[derive(Debug, FromQueryResult)]
struct ClassDetailRow {
    id: i64,
    class_name: String,
    section: String,
    teacher_id: Option<i64>,
    teacher_name: Option<String>,
    student_count: i64,
}

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, class: NewClass) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_name: Set(class.class_name),
            section: Set(class.section),
            teacher_id: Set(class.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "创建班级失败"))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 按名称与分部查找班级
    pub async fn find_class_impl(&self, class_name: &str, section: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::ClassName.eq(class_name))
            .filter(Column::Section.eq(section))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 按名称与分部获取班级，不存在时创建
    ///
    /// 并发创建时唯一索引会拒绝后到的插入，此时重新查询已存在的班级。
    pub async fn get_or_create_class_impl(&self, class: NewClass) -> Result<(Class, bool)> {
        if let Some(existing) = self
            .find_class_impl(&class.class_name, &class.section)
            .await?
        {
            return Ok((existing, false));
        }

        let class_name = class.class_name.clone();
        let section = class.section.clone();
        match self.create_class_impl(class).await {
            Ok(created) => Ok((created, true)),
            Err(SchoolError::Conflict(msg)) => {
                debug!("Class {} - {} created concurrently: {}", class_name, section, msg);
                self.find_class_impl(&class_name, &section)
                    .await?
                    .map(|c| (c, false))
                    .ok_or(SchoolError::Conflict(msg))
            }
            Err(e) => Err(e),
        }
    }

    /// 班级列表，附带班主任姓名与学生人数
    pub async fn list_class_details_impl(&self) -> Result<Vec<ClassDetail>> {
        use crate::entity::teachers;

        let teacher_name = concat_name(
            self.backend(),
            "teachers.first_name",
            "teachers.last_name",
        );

        let rows = Classes::find()
            .select_only()
            .column(Column::Id)
            .column(Column::ClassName)
            .column(Column::Section)
            .column(Column::TeacherId)
            .column_as(Expr::cust(teacher_name), "teacher_name")
            .column_as(Expr::cust("COUNT(students.id)"), "student_count")
            .join(JoinType::LeftJoin, Relation::Teacher.def())
            .join(JoinType::LeftJoin, Relation::Students.def())
            .group_by(Column::Id)
            .group_by(Column::ClassName)
            .group_by(Column::Section)
            .group_by(Column::TeacherId)
            .group_by(teachers::Column::FirstName)
            .group_by(teachers::Column::LastName)
            .order_by_asc(Column::ClassName)
            .order_by_asc(Column::Section)
            .into_model::<ClassDetailRow>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| ClassDetail {
                class_id: row.id,
                class_name: row.class_name,
                section: row.section,
                teacher_id: row.teacher_id,
                teacher_name: row.teacher_name,
                student_count: row.student_count,
            })
            .collect())
    }

    /// 全部班级
    pub async fn list_classes_impl(&self) -> Result<Vec<Class>> {
        let classes = Classes::find()
            .order_by_asc(Column::ClassName)
            .order_by_asc(Column::Section)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 去重的班级名称
    pub async fn list_class_names_impl(&self) -> Result<Vec<String>> {
        Classes::find()
            .select_only()
            .column(Column::ClassName)
            .distinct()
            .order_by_asc(Column::ClassName)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级名称失败: {e}")))
    }

    /// 去重的分部
    pub async fn list_sections_impl(&self, class_name: Option<&str>) -> Result<Vec<String>> {
        let mut select = Classes::find()
            .select_only()
            .column(Column::Section)
            .distinct();

        if let Some(name) = class_name {
            select = select.filter(Column::ClassName.eq(name));
        }

        select
            .order_by_asc(Column::Section)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询分部失败: {e}")))
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.class_name {
            model.class_name = Set(name);
        }
        if let Some(section) = update.section {
            model.section = Set(section);
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "更新班级失败"))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
