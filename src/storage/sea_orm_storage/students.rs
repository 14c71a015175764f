use super::{SeaOrmStorage, non_blank};
use crate::entity::classes::{self, Entity as Classes};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo,
    students::{
        entities::Student,
        requests::{NewStudent, StudentListQuery, StudentPatch, StudentSearchQuery},
        responses::StudentListResponse,
    },
};
use crate::utils::sql::{concat_name, contains_pattern};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, student: NewStudent) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            first_name: Set(student.first_name),
            last_name: Set(student.last_name),
            date_of_birth: Set(student.date_of_birth),
            gender: Set(student.gender),
            class_id: Set(student.class_id),
            roll_number: Set(student.roll_number),
            admission_date: Set(student.admission_date),
            address: Set(student.address),
            parent_contact: Set(student.parent_contact),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "创建学生失败"))?;

        // 重新读取以带上班级名称
        self.get_student_by_id_impl(created.id)
            .await?
            .ok_or_else(|| SchoolError::database_operation("新建学生读取失败"))
    }

    /// 通过 ID 获取学生（附带班级）
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .find_also_related(Classes)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|(student, class)| student.into_student(class)))
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Students::find();
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        let paginator = select
            .find_also_related(Classes)
            .order_by_asc(Column::ClassId)
            .order_by_asc(Column::RollNumber)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: rows
                .into_iter()
                .map(|(student, class)| student.into_student(class))
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 统计学生数量，可限定班级
    pub async fn count_students_impl(&self, class_id: Option<i64>) -> Result<i64> {
        let mut select = Students::find();
        if let Some(class_id) = class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计学生数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 按班级名称统计全部分部的学生
    pub async fn count_students_by_class_name_impl(&self, class_name: &str) -> Result<i64> {
        let count = Students::find()
            .inner_join(Classes)
            .filter(classes::Column::ClassName.eq(class_name))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计学生数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 组合条件搜索学生
    pub async fn search_students_impl(&self, query: StudentSearchQuery) -> Result<Vec<Student>> {
        let mut select = Students::find().find_also_related(Classes);

        if let Some(first_name) = non_blank(&query.first_name) {
            select = select.filter(Column::FirstName.like(contains_pattern(first_name)));
        }
        if let Some(class_name) = non_blank(&query.class) {
            select = select.filter(classes::Column::ClassName.eq(class_name));
        }
        if let Some(section) = non_blank(&query.section) {
            select = select.filter(classes::Column::Section.eq(section));
        }
        if let Some(roll) = non_blank(&query.roll_number) {
            let roll: i32 = roll
                .parse()
                .map_err(|_| SchoolError::validation(format!("Invalid roll number: {roll}")))?;
            select = select.filter(Column::RollNumber.eq(roll));
        }

        let rows = select
            .order_by_asc(classes::Column::ClassName)
            .order_by_asc(classes::Column::Section)
            .order_by_asc(Column::RollNumber)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("搜索学生失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(student, class)| student.into_student(class))
            .collect())
    }

    /// 班级内学号查重
    pub async fn find_student_by_roll_impl(
        &self,
        class_id: i64,
        roll_number: i32,
        exclude_id: Option<i64>,
    ) -> Result<Option<Student>> {
        let mut select = Students::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::RollNumber.eq(roll_number));

        if let Some(exclude) = exclude_id {
            select = select.filter(Column::Id.ne(exclude));
        }

        let result = select
            .find_also_related(Classes)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|(student, class)| student.into_student(class)))
    }

    /// 某班级（可限定分部）的学生，按学号排序
    pub async fn list_students_by_class_impl(
        &self,
        class_name: &str,
        section: Option<&str>,
    ) -> Result<Vec<Student>> {
        let mut select = Students::find()
            .find_also_related(Classes)
            .filter(classes::Column::ClassName.eq(class_name));

        if let Some(section) = section {
            select = select.filter(classes::Column::Section.eq(section));
        }

        let rows = select
            .order_by_asc(classes::Column::Section)
            .order_by_asc(Column::RollNumber)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(student, class)| student.into_student(class))
            .collect())
    }

    /// 在班级中按名字（名或全名）和/或学号定位学生
    pub async fn find_student_in_class_impl(
        &self,
        class_id: i64,
        name: Option<&str>,
        roll_number: Option<i32>,
    ) -> Result<Option<Student>> {
        let mut select = Students::find().filter(Column::ClassId.eq(class_id));

        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            let full_name = concat_name(
                self.backend(),
                "students.first_name",
                "students.last_name",
            );
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.eq(name))
                    .add(Expr::cust(full_name).eq(name)),
            );
        }
        if let Some(roll) = roll_number {
            select = select.filter(Column::RollNumber.eq(roll));
        }

        let result = select
            .find_also_related(Classes)
            .order_by_asc(Column::RollNumber)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|(student, class)| student.into_student(class)))
    }

    /// 更新学生信息
    pub async fn update_student_impl(
        &self,
        id: i64,
        patch: StudentPatch,
    ) -> Result<Option<Student>> {
        if Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?
            .is_none()
        {
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
        if let Some(date_of_birth) = patch.date_of_birth {
            model.date_of_birth = Set(date_of_birth);
        }
        if let Some(gender) = patch.gender {
            model.gender = Set(gender);
        }
        if let Some(class_id) = patch.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(roll_number) = patch.roll_number {
            model.roll_number = Set(roll_number);
        }
        if let Some(admission_date) = patch.admission_date {
            model.admission_date = Set(admission_date);
        }
        if let Some(address) = patch.address {
            model.address = Set(Some(address));
        }
        if let Some(parent_contact) = patch.parent_contact {
            model.parent_contact = Set(Some(parent_contact));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "更新学生失败"))?;

        self.get_student_by_id_impl(id).await
    }

    /// 删除学生，成绩与考勤级联删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
