//! 考勤存储操作
//!
//! 出勤率等百分比都在 SQL 中计算，由 `utils::sql` 按后端渲染。

use super::{SeaOrmStorage, non_blank};
use crate::entity::attendance::{ActiveModel, Column, Entity as AttendanceEntity, Relation};
use crate::entity::{classes, students};
use crate::errors::{Result, SchoolError};
use crate::models::attendance::{
    entities::{Attendance, AttendanceDetail},
    requests::{AttendanceFilter, NewAttendance},
    responses::{AttendanceStatistics, AttendanceStatusCount, StudentAttendanceSummary},
};
use crate::utils::sql::{contains_pattern, count_when, percentage};
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use tracing::debug;

const PRESENT: &str = "attendance.status = 'Present'";
const ABSENT: &str = "attendance.status = 'Absent'";

#[derive(Debug, FromQueryResult)]
struct AttendanceDetailRow {
    attendance_id: i64,
    student_id: i64,
    first_name: String,
    last_name: String,
    roll_number: i32,
    class_id: i64,
    class_name: String,
    section: String,
    class_date: NaiveDate,
    status: String,
}

#[derive(Debug, FromQueryResult)]
struct StatisticsRow {
    total_records: i64,
    total_present: i64,
    total_absent: i64,
    total_students: i64,
    total_days: i64,
    present_percentage: f64,
}

#[derive(Debug, FromQueryResult)]
struct StudentSummaryRow {
    total_present: i64,
    total_absent: i64,
    total_days: i64,
    attendance_percentage: f64,
}

#[derive(Debug, FromQueryResult)]
struct StatusCountRow {
    status: String,
    count: i64,
}

impl SeaOrmStorage {
    /// 新增考勤记录
    pub async fn create_attendance_impl(&self, attendance: NewAttendance) -> Result<Attendance> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(attendance.student_id),
            class_id: Set(attendance.class_id),
            class_date: Set(attendance.class_date),
            status: Set(attendance.status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "创建考勤记录失败"))?;

        Ok(created.into_attendance())
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<Attendance>> {
        let result = AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤记录失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    /// 学生某天的考勤
    pub async fn find_attendance_impl(
        &self,
        student_id: i64,
        class_date: NaiveDate,
    ) -> Result<Option<Attendance>> {
        let result = AttendanceEntity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassDate.eq(class_date))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤记录失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    /// 存在则更新状态，否则新建
    pub async fn upsert_attendance_impl(
        &self,
        attendance: NewAttendance,
    ) -> Result<(Attendance, bool)> {
        if let Some(existing) = self
            .find_attendance_impl(attendance.student_id, attendance.class_date)
            .await?
        {
            let updated = self
                .update_attendance_impl(existing.attendance_id, None, Some(attendance.status))
                .await?
                .ok_or_else(|| SchoolError::database_operation("考勤记录已被删除"))?;
            return Ok((updated, false));
        }

        let student_id = attendance.student_id;
        let class_date = attendance.class_date;
        let status = attendance.status.clone();

        match self.create_attendance_impl(attendance).await {
            Ok(created) => Ok((created, true)),
            Err(SchoolError::Conflict(msg)) => {
                // 并发标记同一天时改为更新
                debug!(
                    "Attendance for student {} on {} created concurrently: {}",
                    student_id, class_date, msg
                );
                let existing = self
                    .find_attendance_impl(student_id, class_date)
                    .await?
                    .ok_or(SchoolError::Conflict(msg))?;
                let updated = self
                    .update_attendance_impl(existing.attendance_id, None, Some(status))
                    .await?
                    .ok_or_else(|| SchoolError::database_operation("考勤记录已被删除"))?;
                Ok((updated, false))
            }
            Err(e) => Err(e),
        }
    }

    /// 带学生与班级信息的考勤列表
    pub async fn list_attendance_impl(
        &self,
        filter: AttendanceFilter,
    ) -> Result<Vec<AttendanceDetail>> {
        let mut select = AttendanceEntity::find()
            .select_only()
            .column_as(Column::Id, "attendance_id")
            .column(Column::StudentId)
            .column(students::Column::FirstName)
            .column(students::Column::LastName)
            .column(students::Column::RollNumber)
            .column(Column::ClassId)
            .column(classes::Column::ClassName)
            .column(classes::Column::Section)
            .column(Column::ClassDate)
            .column(Column::Status)
            .join(JoinType::InnerJoin, Relation::Student.def())
            .join(JoinType::InnerJoin, Relation::Class.def());

        if let Some(first_name) = non_blank(&filter.first_name) {
            select = select.filter(students::Column::FirstName.like(contains_pattern(first_name)));
        }
        if let Some(roll) = filter.roll_number {
            select = select.filter(students::Column::RollNumber.eq(roll));
        }
        if let Some(class_name) = non_blank(&filter.class_name) {
            select = select.filter(classes::Column::ClassName.eq(class_name));
        }
        if let Some(section) = non_blank(&filter.section) {
            select = select.filter(classes::Column::Section.eq(section));
        }
        if let Some(student_id) = filter.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(class_id) = filter.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(start) = filter.start_date {
            select = select.filter(Column::ClassDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            select = select.filter(Column::ClassDate.lte(end));
        }

        let rows = select
            .order_by_desc(Column::ClassDate)
            .order_by_asc(classes::Column::ClassName)
            .order_by_asc(classes::Column::Section)
            .order_by_asc(students::Column::RollNumber)
            .into_model::<AttendanceDetailRow>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|r| AttendanceDetail {
                attendance_id: r.attendance_id,
                student_id: r.student_id,
                first_name: r.first_name,
                last_name: r.last_name,
                roll_number: r.roll_number,
                class_id: r.class_id,
                class_name: r.class_name,
                section: r.section,
                class_date: r.class_date,
                status: r.status,
            })
            .collect())
    }

    pub async fn count_attendance_impl(&self) -> Result<i64> {
        let count = AttendanceEntity::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计考勤数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 全局考勤统计
    pub async fn attendance_statistics_impl(&self) -> Result<AttendanceStatistics> {
        let present = count_when(PRESENT);

        let row = AttendanceEntity::find()
            .select_only()
            .column_as(Expr::cust("COUNT(attendance.id)"), "total_records")
            .column_as(Expr::cust(present.clone()), "total_present")
            .column_as(Expr::cust(count_when(ABSENT)), "total_absent")
            .column_as(
                Expr::cust("COUNT(DISTINCT attendance.student_id)"),
                "total_students",
            )
            .column_as(Expr::cust("COUNT(DISTINCT attendance.class_date)"), "total_days")
            .column_as(
                Expr::cust(percentage(self.backend(), &present, "COUNT(attendance.id)")),
                "present_percentage",
            )
            .into_model::<StatisticsRow>()
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计考勤失败: {e}")))?
            .ok_or_else(|| SchoolError::database_operation("统计考勤失败: 无结果"))?;

        Ok(AttendanceStatistics {
            total_records: row.total_records,
            total_present: row.total_present,
            total_absent: row.total_absent,
            total_students: row.total_students,
            total_days: row.total_days,
            present_percentage: row.present_percentage,
        })
    }

    /// 学生出勤汇总，没有记录时为 None
    pub async fn student_attendance_summary_impl(
        &self,
        student_id: i64,
    ) -> Result<Option<StudentAttendanceSummary>> {
        let present = count_when(PRESENT);

        let row = AttendanceEntity::find()
            .select_only()
            .column_as(Expr::cust(present.clone()), "total_present")
            .column_as(Expr::cust(count_when(ABSENT)), "total_absent")
            .column_as(Expr::cust("COUNT(attendance.id)"), "total_days")
            .column_as(
                Expr::cust(percentage(self.backend(), &present, "COUNT(attendance.id)")),
                "attendance_percentage",
            )
            .filter(Column::StudentId.eq(student_id))
            .into_model::<StudentSummaryRow>()
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计学生考勤失败: {e}")))?;

        Ok(row
            .filter(|r| r.total_days > 0)
            .map(|r| StudentAttendanceSummary {
                student_id,
                total_present: r.total_present,
                total_absent: r.total_absent,
                total_days: r.total_days,
                attendance_percentage: r.attendance_percentage,
            }))
    }

    /// 班级某天按状态分组计数
    pub async fn class_date_status_counts_impl(
        &self,
        class_id: i64,
        class_date: NaiveDate,
    ) -> Result<Vec<AttendanceStatusCount>> {
        let rows = AttendanceEntity::find()
            .select_only()
            .column(Column::Status)
            .column_as(Expr::cust("COUNT(attendance.id)"), "count")
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::ClassDate.eq(class_date))
            .group_by(Column::Status)
            .order_by_asc(Column::Status)
            .into_model::<StatusCountRow>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计班级考勤失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|r| AttendanceStatusCount {
                status: r.status,
                count: r.count,
            })
            .collect())
    }

    /// 班级在日期区间内的记录数
    pub async fn count_attendance_in_range_impl(
        &self,
        class_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64> {
        let count = AttendanceEntity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::ClassDate.between(start, end))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计考勤数量失败: {e}")))?;

        Ok(count as i64)
    }

    pub async fn list_attendance_in_range_impl(
        &self,
        class_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Attendance>> {
        let rows = AttendanceEntity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::ClassDate.between(start, end))
            .order_by_asc(Column::ClassDate)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考勤列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_attendance()).collect())
    }

    /// 修改日期和/或状态
    pub async fn update_attendance_impl(
        &self,
        id: i64,
        class_date: Option<NaiveDate>,
        status: Option<String>,
    ) -> Result<Option<Attendance>> {
        if self.get_attendance_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(date) = class_date {
            model.class_date = Set(date);
        }
        if let Some(status) = status {
            model.status = Set(status);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "更新考勤记录失败"))?;

        self.get_attendance_by_id_impl(id).await
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = AttendanceEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除考勤记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
