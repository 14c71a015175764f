//! 成绩存储操作
//!
//! 详情查询联结学生、考试、科目与班级，等级和及格状态由 CASE 表达式在数据库中计算，
//! 汇总类查询（总分、百分比）同样在 SQL 中完成。

use super::{SeaOrmStorage, non_blank};
use crate::entity::results::{ActiveModel, Column, Entity as Results, Relation};
use crate::entity::{classes, exams, students, subjects};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    results::{
        entities::{ExamResult, ResultDetail},
        requests::{NewResult, ResultFilter, ResultSearchQuery, ResultSortField},
        responses::{ClassExamSummaryRow, ExamTotals, ResultListResponse},
    },
};
use crate::utils::sql::{
    concat_name, contains_pattern, grade_case, pass_fail_case, percentage, sum_f64,
};
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, FromQueryResult, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};

const MARKS_COLUMN: &str = "results.marks_obtained";

#[derive(Debug, FromQueryResult)]
struct ResultDetailRow {
    result_id: i64,
    student_id: i64,
    first_name: String,
    last_name: String,
    roll_number: i32,
    exam_id: i64,
    exam_name: String,
    exam_type: String,
    exam_date: NaiveDate,
    subject_id: i64,
    subject_name: String,
    class_id: i64,
    class_name: String,
    section: String,
    marks_obtained: f64,
    grade: String,
    status: String,
}

impl From<ResultDetailRow> for ResultDetail {
    fn from(row: ResultDetailRow) -> Self {
        ResultDetail {
            result_id: row.result_id,
            student_id: row.student_id,
            first_name: row.first_name,
            last_name: row.last_name,
            roll_number: row.roll_number,
            exam_id: row.exam_id,
            exam_name: row.exam_name,
            exam_type: row.exam_type,
            exam_date: row.exam_date,
            subject_id: row.subject_id,
            subject_name: row.subject_name,
            class_id: row.class_id,
            class_name: row.class_name,
            section: row.section,
            marks_obtained: row.marks_obtained,
            grade: row.grade,
            status: row.status,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct ExamTotalsRow {
    total_marks: f64,
    max_marks: f64,
    percentage: f64,
    subject_count: i64,
    overall_grade: String,
}

#[derive(Debug, FromQueryResult)]
struct ClassExamRow {
    student_id: i64,
    first_name: String,
    last_name: String,
    roll_number: i32,
    total_marks: f64,
    subject_count: i64,
    percentage: f64,
}

// 成绩详情的基础查询
fn detail_select() -> Select<Results> {
    Results::find()
        .select_only()
        .column_as(Column::Id, "result_id")
        .column(Column::StudentId)
        .column(students::Column::FirstName)
        .column(students::Column::LastName)
        .column(students::Column::RollNumber)
        .column(Column::ExamId)
        .column(exams::Column::ExamName)
        .column(exams::Column::ExamType)
        .column(exams::Column::ExamDate)
        .column(Column::SubjectId)
        .column(subjects::Column::SubjectName)
        .column(Column::ClassId)
        .column(classes::Column::ClassName)
        .column(classes::Column::Section)
        .column(Column::MarksObtained)
        .column_as(Expr::cust(grade_case(MARKS_COLUMN)), "grade")
        .column_as(Expr::cust(pass_fail_case(MARKS_COLUMN)), "status")
        .join(JoinType::InnerJoin, Relation::Student.def())
        .join(JoinType::InnerJoin, Relation::Exam.def())
        .join(JoinType::InnerJoin, Relation::Subject.def())
        .join(JoinType::InnerJoin, Relation::Class.def())
}

impl SeaOrmStorage {
    /// 创建成绩
    pub async fn create_result_impl(&self, result: NewResult) -> Result<ExamResult> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(result.student_id),
            exam_id: Set(result.exam_id),
            subject_id: Set(result.subject_id),
            class_id: Set(result.class_id),
            marks_obtained: Set(result.marks_obtained),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "创建成绩失败"))?;

        Ok(created.into_result())
    }

    /// 成绩详情
    pub async fn get_result_by_id_impl(&self, id: i64) -> Result<Option<ResultDetail>> {
        let row = detail_select()
            .filter(Column::Id.eq(id))
            .into_model::<ResultDetailRow>()
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(row.map(ResultDetail::from))
    }

    /// 分页列出成绩详情，最新的在前
    pub async fn list_results_with_pagination_impl(
        &self,
        query: PaginationQuery,
    ) -> Result<ResultListResponse> {
        let (page, size) = query.normalized();

        let paginator = detail_select()
            .order_by_desc(Column::Id)
            .into_model::<ResultDetailRow>()
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(ResultListResponse {
            items: rows.into_iter().map(ResultDetail::from).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn count_results_impl(&self) -> Result<i64> {
        let count = Results::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计成绩数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 按 ID 组合筛选
    pub async fn search_results_impl(&self, query: ResultSearchQuery) -> Result<Vec<ResultDetail>> {
        let mut select = detail_select();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(exam_id) = query.exam_id {
            select = select.filter(Column::ExamId.eq(exam_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        let rows = select
            .order_by_desc(exams::Column::ExamDate)
            .order_by_asc(students::Column::RollNumber)
            .order_by_asc(subjects::Column::SubjectName)
            .into_model::<ResultDetailRow>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("搜索成绩失败: {e}")))?;

        Ok(rows.into_iter().map(ResultDetail::from).collect())
    }

    /// 高级搜索：名称模糊匹配、分数区间与日期区间，返回当前页与总数
    pub async fn advanced_search_results_impl(
        &self,
        filter: ResultFilter,
    ) -> Result<(Vec<ResultDetail>, i64)> {
        let condition = self.advanced_condition(&filter);

        let total = detail_select()
            .filter(condition.clone())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计成绩数量失败: {e}")))?;

        let order = if filter.descending {
            Order::Desc
        } else {
            Order::Asc
        };

        let mut select = detail_select().filter(condition);
        select = match filter.sort_by {
            ResultSortField::ExamDate => select.order_by(exams::Column::ExamDate, order),
            ResultSortField::StudentName => select
                .order_by(students::Column::FirstName, order.clone())
                .order_by(students::Column::LastName, order),
            ResultSortField::RollNumber => select.order_by(students::Column::RollNumber, order),
            ResultSortField::ClassName => select
                .order_by(classes::Column::ClassName, order.clone())
                .order_by(classes::Column::Section, order),
            ResultSortField::Marks => select.order_by(Column::MarksObtained, order),
            ResultSortField::SubjectName => select.order_by(subjects::Column::SubjectName, order),
        };

        let rows = select
            .order_by_asc(Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .into_model::<ResultDetailRow>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("搜索成绩失败: {e}")))?;

        Ok((rows.into_iter().map(ResultDetail::from).collect(), total as i64))
    }

    fn advanced_condition(&self, filter: &ResultFilter) -> Condition {
        let mut condition = Condition::all();

        if let Some(name) = non_blank(&filter.student_name) {
            let full_name = concat_name(
                self.backend(),
                "students.first_name",
                "students.last_name",
            );
            condition = condition.add(
                Condition::any()
                    .add(students::Column::FirstName.like(contains_pattern(name)))
                    .add(students::Column::LastName.like(contains_pattern(name)))
                    .add(Expr::cust(full_name).like(contains_pattern(name))),
            );
        }
        if let Some(roll) = filter.roll_number {
            condition = condition.add(students::Column::RollNumber.eq(roll));
        }
        if let Some(class_name) = non_blank(&filter.class_name) {
            condition = condition.add(classes::Column::ClassName.eq(class_name));
        }
        if let Some(section) = non_blank(&filter.section) {
            condition = condition.add(classes::Column::Section.eq(section));
        }
        if let Some(exam_name) = non_blank(&filter.exam_name) {
            condition = condition.add(exams::Column::ExamName.like(contains_pattern(exam_name)));
        }
        if let Some(exam_type) = non_blank(&filter.exam_type) {
            condition = condition.add(exams::Column::ExamType.eq(exam_type));
        }
        if let Some(subject_name) = non_blank(&filter.subject_name) {
            condition =
                condition.add(subjects::Column::SubjectName.like(contains_pattern(subject_name)));
        }
        if let Some(min) = filter.min_marks {
            condition = condition.add(Column::MarksObtained.gte(min));
        }
        if let Some(max) = filter.max_marks {
            condition = condition.add(Column::MarksObtained.lte(max));
        }
        if let Some(start) = filter.start_date {
            condition = condition.add(exams::Column::ExamDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            condition = condition.add(exams::Column::ExamDate.lte(end));
        }

        condition
    }

    /// 同一学生、考试、科目的成绩
    pub async fn find_result_impl(
        &self,
        student_id: i64,
        exam_id: i64,
        subject_id: i64,
    ) -> Result<Option<ExamResult>> {
        let result = Results::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ExamId.eq(exam_id))
            .filter(Column::SubjectId.eq(subject_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_result()))
    }

    /// 学生单场考试的总分、满分与百分比
    pub async fn exam_totals_impl(
        &self,
        student_id: i64,
        exam_id: i64,
    ) -> Result<Option<ExamTotals>> {
        let backend = self.backend();
        let overall = percentage(
            backend,
            "SUM(results.marks_obtained)",
            "COUNT(results.id) * 100",
        );

        let row = Results::find()
            .select_only()
            .column_as(Expr::cust(sum_f64(backend, MARKS_COLUMN)), "total_marks")
            .column_as(Expr::cust(sum_f64(backend, "100")), "max_marks")
            .column_as(Expr::cust(overall.clone()), "percentage")
            .column_as(Expr::cust(grade_case(&overall)), "overall_grade")
            .column_as(Expr::cust("COUNT(results.id)"), "subject_count")
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ExamId.eq(exam_id))
            .into_model::<ExamTotalsRow>()
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计考试成绩失败: {e}")))?;

        Ok(row
            .filter(|r| r.subject_count > 0)
            .map(|r| ExamTotals {
                total_marks: r.total_marks,
                max_marks: r.max_marks,
                percentage: r.percentage,
                subject_count: r.subject_count,
                overall_grade: r.overall_grade,
            }))
    }

    /// 班级单场考试按总分排名
    pub async fn class_exam_summary_impl(
        &self,
        class_id: i64,
        exam_id: i64,
    ) -> Result<Vec<ClassExamSummaryRow>> {
        let backend = self.backend();

        let rows = Results::find()
            .select_only()
            .column(Column::StudentId)
            .column(students::Column::FirstName)
            .column(students::Column::LastName)
            .column(students::Column::RollNumber)
            .column_as(Expr::cust(sum_f64(backend, MARKS_COLUMN)), "total_marks")
            .column_as(Expr::cust("COUNT(results.id)"), "subject_count")
            .column_as(
                Expr::cust(percentage(
                    backend,
                    "SUM(results.marks_obtained)",
                    "COUNT(results.id) * 100",
                )),
                "percentage",
            )
            .join(JoinType::InnerJoin, Relation::Student.def())
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::ExamId.eq(exam_id))
            .group_by(Column::StudentId)
            .group_by(students::Column::FirstName)
            .group_by(students::Column::LastName)
            .group_by(students::Column::RollNumber)
            .order_by(Expr::cust("total_marks"), Order::Desc)
            .order_by_asc(students::Column::RollNumber)
            .into_model::<ClassExamRow>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计班级成绩失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|r| ClassExamSummaryRow {
                student_id: r.student_id,
                first_name: r.first_name,
                last_name: r.last_name,
                roll_number: r.roll_number,
                total_marks: r.total_marks,
                subject_count: r.subject_count,
                percentage: r.percentage,
            })
            .collect())
    }

    /// 修改分数
    pub async fn update_result_marks_impl(
        &self,
        id: i64,
        marks: f64,
    ) -> Result<Option<ResultDetail>> {
        let model = ActiveModel {
            id: Set(id),
            marks_obtained: Set(marks),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model.update(&self.db).await {
            Ok(_) => self.get_result_by_id_impl(id).await,
            Err(sea_orm::DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(SchoolError::database_operation(format!("更新成绩失败: {e}"))),
        }
    }

    pub async fn delete_result_impl(&self, id: i64) -> Result<bool> {
        let result = Results::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除某场考试的全部成绩
    pub async fn delete_results_by_exam_impl(&self, exam_id: i64) -> Result<u64> {
        let result = Results::delete_many()
            .filter(Column::ExamId.eq(exam_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除考试成绩失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
