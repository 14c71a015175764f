//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod admins;
mod attendance;
mod classes;
mod events;
mod exams;
mod images;
mod messages;
mod notices;
mod results;
mod routines;
mod students;
mod subjects;
mod teachers;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 使用指定的数据库 URL 创建存储实例并运行迁移
    pub async fn new_with_url(url: &str, pool_size: u32, timeout_secs: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size, timeout_secs).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout_secs).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", redact_url(&db_url));

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 数据库连通性检查
    pub async fn ping_impl(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| SchoolError::database_connection(format!("数据库不可用: {e}")))
    }

    /// 当前连接的数据库后端，用于渲染后端相关的 SQL 片段
    pub(crate) fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// 去掉首尾空白后非空的可选文本
pub(super) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// 日志中隐藏连接串里的密码
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.find(':') {
                Some(colon) => format!(
                    "{}{}:***{}",
                    &url[..scheme_end + 3],
                    &credentials[..colon],
                    &url[at..]
                ),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}

// Storage trait 实现
use crate::models::{
    PaginationQuery,
    admins::{Admin, AdminRole, NewAdmin, UpdateAdminRequest},
    attendance::{
        entities::{Attendance, AttendanceDetail},
        requests::{AttendanceFilter, NewAttendance},
        responses::{AttendanceStatistics, AttendanceStatusCount, StudentAttendanceSummary},
    },
    classes::{
        entities::Class,
        requests::{NewClass, UpdateClassRequest},
        responses::ClassDetail,
    },
    events::{entities::Event, requests::NewEvent},
    exams::{
        entities::Exam,
        requests::{ExamFilter, ExamPatch, NewExam},
    },
    images::{
        entities::{Image, ImageDetail},
        requests::{ImagePatch, NewImage},
    },
    messages::{entities::Message, requests::UpdateMessageRequest},
    notices::{entities::Notice, requests::UpdateNoticeRequest},
    results::{
        entities::{ExamResult, ResultDetail},
        requests::{NewResult, ResultFilter, ResultSearchQuery},
        responses::{ClassExamSummaryRow, ExamTotals, ResultListResponse},
    },
    routines::{
        entities::Routine,
        requests::{NewRoutine, RoutinePatch},
    },
    students::{
        entities::Student,
        requests::{NewStudent, StudentListQuery, StudentPatch, StudentSearchQuery},
        responses::StudentListResponse,
    },
    subjects::{entities::Subject, requests::UpdateSubjectRequest},
    teachers::{
        entities::Teacher,
        requests::{NewTeacher, TeacherListQuery, TeacherPatch},
        responses::TeacherListResponse,
    },
};

use crate::storage::{ImageQuery, RoutineQuery, Storage};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 健康检查
    async fn ping(&self) -> Result<()> {
        self.ping_impl().await
    }

    // 管理员
    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin> {
        self.create_admin_impl(admin).await
    }

    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>> {
        self.get_admin_by_id_impl(id).await
    }

    async fn get_admin_by_username_or_email(&self, identifier: &str) -> Result<Option<Admin>> {
        self.get_admin_by_username_or_email_impl(identifier).await
    }

    async fn list_admins(&self) -> Result<Vec<Admin>> {
        self.list_admins_impl().await
    }

    async fn count_admins(&self, role: Option<AdminRole>) -> Result<i64> {
        self.count_admins_impl(role).await
    }

    async fn update_admin(&self, id: i64, update: UpdateAdminRequest) -> Result<Option<Admin>> {
        self.update_admin_impl(id, update).await
    }

    async fn update_admin_credentials(
        &self,
        id: i64,
        email: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<Admin>> {
        self.update_admin_credentials_impl(id, email, password_hash).await
    }

    async fn delete_admin(&self, id: i64) -> Result<bool> {
        self.delete_admin_impl(id).await
    }

    // 班级
    async fn create_class(&self, class: NewClass) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn find_class(&self, class_name: &str, section: &str) -> Result<Option<Class>> {
        self.find_class_impl(class_name, section).await
    }

    async fn get_or_create_class(&self, class: NewClass) -> Result<(Class, bool)> {
        self.get_or_create_class_impl(class).await
    }

    async fn list_class_details(&self) -> Result<Vec<ClassDetail>> {
        self.list_class_details_impl().await
    }

    async fn list_classes(&self) -> Result<Vec<Class>> {
        self.list_classes_impl().await
    }

    async fn list_class_names(&self) -> Result<Vec<String>> {
        self.list_class_names_impl().await
    }

    async fn list_sections(&self, class_name: Option<&str>) -> Result<Vec<String>> {
        self.list_sections_impl(class_name).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 教师
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn count_teachers(&self) -> Result<i64> {
        self.count_teachers_impl().await
    }

    async fn find_teacher_duplicate(
        &self,
        email: Option<&str>,
        contact_number: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<Option<String>> {
        self.find_teacher_duplicate_impl(email, contact_number, exclude_id).await
    }

    async fn update_teacher(&self, id: i64, patch: TeacherPatch) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, patch).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 学生
    async fn create_student(&self, student: NewStudent) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn count_students(&self, class_id: Option<i64>) -> Result<i64> {
        self.count_students_impl(class_id).await
    }

    async fn count_students_by_class_name(&self, class_name: &str) -> Result<i64> {
        self.count_students_by_class_name_impl(class_name).await
    }

    async fn search_students(&self, query: StudentSearchQuery) -> Result<Vec<Student>> {
        self.search_students_impl(query).await
    }

    async fn find_student_by_roll(
        &self,
        class_id: i64,
        roll_number: i32,
        exclude_id: Option<i64>,
    ) -> Result<Option<Student>> {
        self.find_student_by_roll_impl(class_id, roll_number, exclude_id).await
    }

    async fn list_students_by_class(
        &self,
        class_name: &str,
        section: Option<&str>,
    ) -> Result<Vec<Student>> {
        self.list_students_by_class_impl(class_name, section).await
    }

    async fn find_student_in_class(
        &self,
        class_id: i64,
        name: Option<&str>,
        roll_number: Option<i32>,
    ) -> Result<Option<Student>> {
        self.find_student_in_class_impl(class_id, name, roll_number).await
    }

    async fn update_student(&self, id: i64, patch: StudentPatch) -> Result<Option<Student>> {
        self.update_student_impl(id, patch).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 科目
    async fn create_subject(&self, subject_name: &str, class_id: i64) -> Result<Subject> {
        self.create_subject_impl(subject_name, class_id).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn list_subjects(&self, class_id: Option<i64>) -> Result<Vec<Subject>> {
        self.list_subjects_impl(class_id).await
    }

    async fn find_subject(&self, subject_name: &str, class_id: i64) -> Result<Option<Subject>> {
        self.find_subject_impl(subject_name, class_id).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 考试
    async fn create_exam(&self, exam: NewExam) -> Result<Exam> {
        self.create_exam_impl(exam).await
    }

    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(id).await
    }

    async fn list_exams(&self, filter: ExamFilter) -> Result<Vec<Exam>> {
        self.list_exams_impl(filter).await
    }

    async fn find_exam(&self, exam_name: &str, class_id: i64) -> Result<Option<Exam>> {
        self.find_exam_impl(exam_name, class_id).await
    }

    async fn update_exam(&self, id: i64, patch: ExamPatch) -> Result<Option<Exam>> {
        self.update_exam_impl(id, patch).await
    }

    async fn delete_exam(&self, id: i64) -> Result<bool> {
        self.delete_exam_impl(id).await
    }

    // 成绩
    async fn create_result(&self, result: NewResult) -> Result<ExamResult> {
        self.create_result_impl(result).await
    }

    async fn get_result_by_id(&self, id: i64) -> Result<Option<ResultDetail>> {
        self.get_result_by_id_impl(id).await
    }

    async fn list_results_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<ResultListResponse> {
        self.list_results_with_pagination_impl(query).await
    }

    async fn count_results(&self) -> Result<i64> {
        self.count_results_impl().await
    }

    async fn search_results(&self, query: ResultSearchQuery) -> Result<Vec<ResultDetail>> {
        self.search_results_impl(query).await
    }

    async fn advanced_search_results(
        &self,
        filter: ResultFilter,
    ) -> Result<(Vec<ResultDetail>, i64)> {
        self.advanced_search_results_impl(filter).await
    }

    async fn find_result(
        &self,
        student_id: i64,
        exam_id: i64,
        subject_id: i64,
    ) -> Result<Option<ExamResult>> {
        self.find_result_impl(student_id, exam_id, subject_id).await
    }

    async fn exam_totals(&self, student_id: i64, exam_id: i64) -> Result<Option<ExamTotals>> {
        self.exam_totals_impl(student_id, exam_id).await
    }

    async fn class_exam_summary(
        &self,
        class_id: i64,
        exam_id: i64,
    ) -> Result<Vec<ClassExamSummaryRow>> {
        self.class_exam_summary_impl(class_id, exam_id).await
    }

    async fn update_result_marks(&self, id: i64, marks: f64) -> Result<Option<ResultDetail>> {
        self.update_result_marks_impl(id, marks).await
    }

    async fn delete_result(&self, id: i64) -> Result<bool> {
        self.delete_result_impl(id).await
    }

    async fn delete_results_by_exam(&self, exam_id: i64) -> Result<u64> {
        self.delete_results_by_exam_impl(exam_id).await
    }

    // 考勤
    async fn create_attendance(&self, attendance: NewAttendance) -> Result<Attendance> {
        self.create_attendance_impl(attendance).await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn find_attendance(
        &self,
        student_id: i64,
        class_date: NaiveDate,
    ) -> Result<Option<Attendance>> {
        self.find_attendance_impl(student_id, class_date).await
    }

    async fn upsert_attendance(&self, attendance: NewAttendance) -> Result<(Attendance, bool)> {
        self.upsert_attendance_impl(attendance).await
    }

    async fn list_attendance(&self, filter: AttendanceFilter) -> Result<Vec<AttendanceDetail>> {
        self.list_attendance_impl(filter).await
    }

    async fn count_attendance(&self) -> Result<i64> {
        self.count_attendance_impl().await
    }

    async fn attendance_statistics(&self) -> Result<AttendanceStatistics> {
        self.attendance_statistics_impl().await
    }

    async fn student_attendance_summary(
        &self,
        student_id: i64,
    ) -> Result<Option<StudentAttendanceSummary>> {
        self.student_attendance_summary_impl(student_id).await
    }

    async fn class_date_status_counts(
        &self,
        class_id: i64,
        class_date: NaiveDate,
    ) -> Result<Vec<AttendanceStatusCount>> {
        self.class_date_status_counts_impl(class_id, class_date).await
    }

    async fn count_attendance_in_range(
        &self,
        class_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64> {
        self.count_attendance_in_range_impl(class_id, start, end).await
    }

    async fn list_attendance_in_range(
        &self,
        class_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Attendance>> {
        self.list_attendance_in_range_impl(class_id, start, end).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        class_date: Option<NaiveDate>,
        status: Option<String>,
    ) -> Result<Option<Attendance>> {
        self.update_attendance_impl(id, class_date, status).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    // 公告
    async fn create_notice(&self, title: &str, description: &str, show: bool) -> Result<Notice> {
        self.create_notice_impl(title, description, show).await
    }

    async fn list_notices(&self) -> Result<Vec<Notice>> {
        self.list_notices_impl().await
    }

    async fn update_notice(&self, id: i64, update: UpdateNoticeRequest) -> Result<Option<Notice>> {
        self.update_notice_impl(id, update).await
    }

    async fn set_notice_visibility(&self, id: i64, show: bool) -> Result<Option<Notice>> {
        self.set_notice_visibility_impl(id, show).await
    }

    async fn toggle_notice_visibility(&self, id: i64) -> Result<Option<Notice>> {
        self.toggle_notice_visibility_impl(id).await
    }

    async fn delete_notice(&self, id: i64) -> Result<bool> {
        self.delete_notice_impl(id).await
    }

    // 留言
    async fn create_message(&self, message: &str, show: bool) -> Result<Message> {
        self.create_message_impl(message, show).await
    }

    async fn list_messages(&self) -> Result<Vec<Message>> {
        self.list_messages_impl().await
    }

    async fn update_message(
        &self,
        id: i64,
        update: UpdateMessageRequest,
    ) -> Result<Option<Message>> {
        self.update_message_impl(id, update).await
    }

    async fn toggle_message_visibility(&self, id: i64) -> Result<Option<Message>> {
        self.toggle_message_visibility_impl(id).await
    }

    async fn delete_message(&self, id: i64) -> Result<bool> {
        self.delete_message_impl(id).await
    }

    // 活动
    async fn create_event(&self, event: NewEvent) -> Result<Event> {
        self.create_event_impl(event).await
    }

    async fn get_event_by_id(&self, id: i64) -> Result<Option<Event>> {
        self.get_event_by_id_impl(id).await
    }

    async fn list_events(&self, event_type: Option<&str>) -> Result<Vec<Event>> {
        self.list_events_impl(event_type).await
    }

    async fn list_events_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Event>> {
        self.list_events_in_range_impl(start, end).await
    }

    async fn update_event(&self, id: i64, event: NewEvent) -> Result<Option<Event>> {
        self.update_event_impl(id, event).await
    }

    async fn delete_event(&self, id: i64) -> Result<bool> {
        self.delete_event_impl(id).await
    }

    // 图片
    async fn create_image(&self, image: NewImage) -> Result<Image> {
        self.create_image_impl(image).await
    }

    async fn get_image_by_id(&self, id: i64) -> Result<Option<Image>> {
        self.get_image_by_id_impl(id).await
    }

    async fn list_images(&self, query: ImageQuery) -> Result<Vec<Image>> {
        self.list_images_impl(query).await
    }

    async fn list_image_details(&self, image_type: Option<&str>) -> Result<Vec<ImageDetail>> {
        self.list_image_details_impl(image_type).await
    }

    async fn update_image(&self, id: i64, patch: ImagePatch) -> Result<Option<Image>> {
        self.update_image_impl(id, patch).await
    }

    async fn delete_image(&self, id: i64) -> Result<bool> {
        self.delete_image_impl(id).await
    }

    // 课程表
    async fn create_routine(&self, routine: NewRoutine) -> Result<Routine> {
        self.create_routine_impl(routine).await
    }

    async fn get_routine_by_id(&self, id: i64) -> Result<Option<Routine>> {
        self.get_routine_by_id_impl(id).await
    }

    async fn list_routines(&self, query: RoutineQuery) -> Result<Vec<Routine>> {
        self.list_routines_impl(query).await
    }

    async fn update_routine(&self, id: i64, patch: RoutinePatch) -> Result<Option<Routine>> {
        self.update_routine_impl(id, patch).await
    }

    async fn deactivate_routine(&self, id: i64) -> Result<bool> {
        self.deactivate_routine_impl(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("school.db").unwrap(),
            "sqlite://school.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/school").unwrap(),
            "postgres://u:p@localhost/school"
        );
        assert!(SeaOrmStorage::build_database_url("school").is_err());
    }

    #[test]
    fn test_redact_url_hides_password() {
        assert_eq!(
            redact_url("mysql://root:secret@db:3306/school"),
            "mysql://root:***@db:3306/school"
        );
        assert_eq!(redact_url("sqlite://school.db?mode=rwc"), "sqlite://school.db?mode=rwc");
    }
}
