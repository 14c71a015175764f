use super::SeaOrmStorage;
use crate::entity::classes::Entity as Classes;
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{Result, SchoolError};
use crate::models::exams::{
    entities::Exam,
    requests::{ExamFilter, ExamPatch, NewExam},
};
use crate::utils::sql::contains_pattern;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建考试
    pub async fn create_exam_impl(&self, exam: NewExam) -> Result<Exam> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            exam_name: Set(exam.exam_name),
            exam_type: Set(exam.exam_type),
            class_id: Set(exam.class_id),
            exam_date: Set(exam.exam_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "创建考试失败"))?;

        self.get_exam_by_id_impl(created.id)
            .await?
            .ok_or_else(|| SchoolError::database_operation("新建考试读取失败"))
    }

    pub async fn get_exam_by_id_impl(&self, id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(id)
            .find_also_related(Classes)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|(exam, class)| exam.into_exam(class)))
    }

    /// 按条件列出考试，按日期升序
    pub async fn list_exams_impl(&self, filter: ExamFilter) -> Result<Vec<Exam>> {
        let mut select = Exams::find();

        if let Some(ref name) = filter.exam_name
            && !name.trim().is_empty()
        {
            select = select.filter(Column::ExamName.like(contains_pattern(name)));
        }
        if let Some(class_id) = filter.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(start) = filter.start_date {
            select = select.filter(Column::ExamDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            select = select.filter(Column::ExamDate.lte(end));
        }

        let rows = select
            .find_also_related(Classes)
            .order_by_asc(Column::ExamDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(exam, class)| exam.into_exam(class))
            .collect())
    }

    /// 按名称在班级内查找考试
    pub async fn find_exam_impl(&self, exam_name: &str, class_id: i64) -> Result<Option<Exam>> {
        let result = Exams::find()
            .filter(Column::ExamName.eq(exam_name))
            .filter(Column::ClassId.eq(class_id))
            .find_also_related(Classes)
            .order_by_desc(Column::ExamDate)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|(exam, class)| exam.into_exam(class)))
    }

    pub async fn update_exam_impl(&self, id: i64, patch: ExamPatch) -> Result<Option<Exam>> {
        if self.get_exam_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = patch.exam_name {
            model.exam_name = Set(name);
        }
        if let Some(exam_type) = patch.exam_type {
            model.exam_type = Set(exam_type);
        }
        if let Some(class_id) = patch.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(date) = patch.exam_date {
            model.exam_date = Set(date);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "更新考试失败"))?;

        self.get_exam_by_id_impl(id).await
    }

    /// 删除考试，成绩级联删除
    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除考试失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
