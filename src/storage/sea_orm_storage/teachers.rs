use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    teachers::{
        entities::Teacher,
        requests::{NewTeacher, TeacherListQuery, TeacherPatch},
        responses::TeacherListResponse,
    },
};
use crate::utils::sql::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, teacher: NewTeacher) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            first_name: Set(teacher.first_name),
            last_name: Set(teacher.last_name),
            subject: Set(teacher.subject),
            contact_number: Set(teacher.contact_number),
            email: Set(teacher.email),
            joining_date: Set(teacher.joining_date),
            address: Set(teacher.address),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "创建教师失败"))?;

        Ok(result.into_teacher())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 分页列出教师
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Teachers::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.like(contains_pattern(search)))
                    .add(Column::LastName.like(contains_pattern(search)))
                    .add(Column::Email.like(contains_pattern(search)))
                    .add(Column::Subject.like(contains_pattern(search))),
            );
        }

        let paginator = select
            .order_by_asc(Column::FirstName)
            .order_by_asc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师页数失败: {e}")))?;

        let teachers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(TeacherListResponse {
            items: teachers.into_iter().map(|m| m.into_teacher()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 统计教师数量
    pub async fn count_teachers_impl(&self) -> Result<i64> {
        let count = Teachers::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计教师数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 邮箱或联系电话是否已被其他教师使用，返回重复的字段
    pub async fn find_teacher_duplicate_impl(
        &self,
        email: Option<&str>,
        contact_number: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<Option<String>> {
        let checks = [
            ("email", Column::Email, email),
            ("contactNumber", Column::ContactNumber, contact_number),
        ];

        for (field, column, value) in checks {
            let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
                continue;
            };

            let mut select = Teachers::find().filter(column.eq(value));
            if let Some(exclude) = exclude_id {
                select = select.filter(Column::Id.ne(exclude));
            }

            let found = select
                .one(&self.db)
                .await
                .map_err(|e| SchoolError::database_operation(format!("查询教师失败: {e}")))?;

            if found.is_some() {
                return Ok(Some(field.to_string()));
            }
        }

        Ok(None)
    }

    /// 更新教师信息
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        patch: TeacherPatch,
    ) -> Result<Option<Teacher>> {
        if self.get_teacher_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(first_name) = patch.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = patch.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(subject) = patch.subject {
            model.subject = Set(subject);
        }
        if let Some(contact_number) = patch.contact_number {
            model.contact_number = Set(contact_number);
        }
        if let Some(email) = patch.email {
            model.email = Set(email);
        }
        if let Some(joining_date) = patch.joining_date {
            model.joining_date = Set(joining_date);
        }
        if let Some(address) = patch.address {
            model.address = Set(Some(address));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "更新教师失败"))?;

        self.get_teacher_by_id_impl(id).await
    }

    /// 删除教师，所带班级的班主任置空
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
