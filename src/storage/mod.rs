use std::sync::Arc;

use chrono::NaiveDate;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 课程表列表筛选条件（只返回启用的课程表）
#[derive(Debug, Clone, Default)]
pub struct RoutineQuery {
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub keyword: Option<String>,
}

/// 图片列表筛选条件
#[derive(Debug, Clone, Default)]
pub struct ImageQuery {
    pub image_type: Option<String>,
    pub student_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 健康检查
    async fn ping(&self) -> Result<()>;

    /// 管理员
    // 创建管理员（密码已哈希）
    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin>;
    // 通过ID获取管理员
    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>>;
    // 通过用户名或邮箱获取管理员
    async fn get_admin_by_username_or_email(&self, identifier: &str) -> Result<Option<Admin>>;
    // 列出管理员
    async fn list_admins(&self) -> Result<Vec<Admin>>;
    // 统计管理员数量，可按角色过滤
    async fn count_admins(&self, role: Option<AdminRole>) -> Result<i64>;
    // 更新用户名/邮箱
    async fn update_admin(&self, id: i64, update: UpdateAdminRequest) -> Result<Option<Admin>>;
    // 更新邮箱和/或密码哈希
    async fn update_admin_credentials(
        &self,
        id: i64,
        email: Option<String>,
        password_hash: Option<String>,
    ) -> Result<Option<Admin>>;
    // 删除管理员
    async fn delete_admin(&self, id: i64) -> Result<bool>;

    /// 班级
    async fn create_class(&self, class: NewClass) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 按班级名称与分部查找
    async fn find_class(&self, class_name: &str, section: &str) -> Result<Option<Class>>;
    // 按班级名称与分部查找，不存在则创建；返回 (班级, 是否新建)
    async fn get_or_create_class(&self, class: NewClass) -> Result<(Class, bool)>;
    // 班级列表，包含班主任姓名与学生人数
    async fn list_class_details(&self) -> Result<Vec<ClassDetail>>;
    // 全部班级，按名称与分部排序
    async fn list_classes(&self) -> Result<Vec<Class>>;
    // 去重的班级名称
    async fn list_class_names(&self) -> Result<Vec<String>>;
    // 去重的分部，可限定班级名称
    async fn list_sections(&self, class_name: Option<&str>) -> Result<Vec<String>>;
    async fn update_class(&self, class_id: i64, update: UpdateClassRequest)
    -> Result<Option<Class>>;
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 教师
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn count_teachers(&self) -> Result<i64>;
    // 邮箱或联系电话重复时返回重复的字段名
    async fn find_teacher_duplicate(
        &self,
        email: Option<&str>,
        contact_number: Option<&str>,
        exclude_id: Option<i64>,
    ) -> Result<Option<String>>;
    async fn update_teacher(&self, id: i64, patch: TeacherPatch) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 学生
    async fn create_student(&self, student: NewStudent) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn count_students(&self, class_id: Option<i64>) -> Result<i64>;
    // 按班级名称统计全部分部的学生
    async fn count_students_by_class_name(&self, class_name: &str) -> Result<i64>;
    async fn search_students(&self, query: StudentSearchQuery) -> Result<Vec<Student>>;
    // 班级内学号查重
    async fn find_student_by_roll(
        &self,
        class_id: i64,
        roll_number: i32,
        exclude_id: Option<i64>,
    ) -> Result<Option<Student>>;
    async fn list_students_by_class(
        &self,
        class_name: &str,
        section: Option<&str>,
    ) -> Result<Vec<Student>>;
    // 按姓名（名或全名）与学号在班级中定位学生
    async fn find_student_in_class(
        &self,
        class_id: i64,
        name: Option<&str>,
        roll_number: Option<i32>,
    ) -> Result<Option<Student>>;
    async fn update_student(&self, id: i64, patch: StudentPatch) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 科目
    async fn create_subject(&self, subject_name: &str, class_id: i64) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects(&self, class_id: Option<i64>) -> Result<Vec<Subject>>;
    async fn find_subject(&self, subject_name: &str, class_id: i64) -> Result<Option<Subject>>;
    async fn update_subject(&self, id: i64, update: UpdateSubjectRequest)
    -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 考试
    async fn create_exam(&self, exam: NewExam) -> Result<Exam>;
    async fn get_exam_by_id(&self, id: i64) -> Result<Option<Exam>>;
    async fn list_exams(&self, filter: ExamFilter) -> Result<Vec<Exam>>;
    async fn find_exam(&self, exam_name: &str, class_id: i64) -> Result<Option<Exam>>;
    async fn update_exam(&self, id: i64, patch: ExamPatch) -> Result<Option<Exam>>;
    async fn delete_exam(&self, id: i64) -> Result<bool>;

    /// 成绩
    async fn create_result(&self, result: NewResult) -> Result<ExamResult>;
    async fn get_result_by_id(&self, id: i64) -> Result<Option<ResultDetail>>;
    async fn list_results_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<ResultListResponse>;
    async fn count_results(&self) -> Result<i64>;
    async fn search_results(&self, query: ResultSearchQuery) -> Result<Vec<ResultDetail>>;
    // 高级搜索，返回 (当前页, 总数)
    async fn advanced_search_results(
        &self,
        filter: ResultFilter,
    ) -> Result<(Vec<ResultDetail>, i64)>;
    async fn find_result(
        &self,
        student_id: i64,
        exam_id: i64,
        subject_id: i64,
    ) -> Result<Option<ExamResult>>;
    // 学生单次考试的汇总，没有成绩时为 None
    async fn exam_totals(&self, student_id: i64, exam_id: i64) -> Result<Option<ExamTotals>>;
    async fn class_exam_summary(
        &self,
        class_id: i64,
        exam_id: i64,
    ) -> Result<Vec<ClassExamSummaryRow>>;
    async fn update_result_marks(&self, id: i64, marks: f64) -> Result<Option<ResultDetail>>;
    async fn delete_result(&self, id: i64) -> Result<bool>;
    async fn delete_results_by_exam(&self, exam_id: i64) -> Result<u64>;

    /// 考勤
    async fn create_attendance(&self, attendance: NewAttendance) -> Result<Attendance>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>>;
    async fn find_attendance(&self, student_id: i64, class_date: NaiveDate)
    -> Result<Option<Attendance>>;
    // 同一学生同一天存在则更新状态，否则新建；返回 (记录, 是否新建)
    async fn upsert_attendance(&self, attendance: NewAttendance) -> Result<(Attendance, bool)>;
    async fn list_attendance(&self, filter: AttendanceFilter) -> Result<Vec<AttendanceDetail>>;
    async fn count_attendance(&self) -> Result<i64>;
    async fn attendance_statistics(&self) -> Result<AttendanceStatistics>;
    async fn student_attendance_summary(
        &self,
        student_id: i64,
    ) -> Result<Option<StudentAttendanceSummary>>;
    async fn class_date_status_counts(
        &self,
        class_id: i64,
        class_date: NaiveDate,
    ) -> Result<Vec<AttendanceStatusCount>>;
    async fn count_attendance_in_range(
        &self,
        class_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64>;
    async fn list_attendance_in_range(
        &self,
        class_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Attendance>>;
    async fn update_attendance(
        &self,
        id: i64,
        class_date: Option<NaiveDate>,
        status: Option<String>,
    ) -> Result<Option<Attendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;

    /// 公告
    async fn create_notice(&self, title: &str, description: &str, show: bool) -> Result<Notice>;
    async fn list_notices(&self) -> Result<Vec<Notice>>;
    async fn update_notice(&self, id: i64, update: UpdateNoticeRequest) -> Result<Option<Notice>>;
    async fn set_notice_visibility(&self, id: i64, show: bool) -> Result<Option<Notice>>;
    async fn toggle_notice_visibility(&self, id: i64) -> Result<Option<Notice>>;
    async fn delete_notice(&self, id: i64) -> Result<bool>;

    /// 留言
    async fn create_message(&self, message: &str, show: bool) -> Result<Message>;
    async fn list_messages(&self) -> Result<Vec<Message>>;
    async fn update_message(&self, id: i64, update: UpdateMessageRequest)
    -> Result<Option<Message>>;
    async fn toggle_message_visibility(&self, id: i64) -> Result<Option<Message>>;
    async fn delete_message(&self, id: i64) -> Result<bool>;

    /// 活动
    async fn create_event(&self, event: NewEvent) -> Result<Event>;
    async fn get_event_by_id(&self, id: i64) -> Result<Option<Event>>;
    async fn list_events(&self, event_type: Option<&str>) -> Result<Vec<Event>>;
    // 与区间有重叠的活动
    async fn list_events_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Event>>;
    async fn update_event(&self, id: i64, event: NewEvent) -> Result<Option<Event>>;
    async fn delete_event(&self, id: i64) -> Result<bool>;

    /// 图片
    async fn create_image(&self, image: NewImage) -> Result<Image>;
    async fn get_image_by_id(&self, id: i64) -> Result<Option<Image>>;
    async fn list_images(&self, query: ImageQuery) -> Result<Vec<Image>>;
    // 带学生/教师姓名的图片列表
    async fn list_image_details(&self, image_type: Option<&str>) -> Result<Vec<ImageDetail>>;
    async fn update_image(&self, id: i64, patch: ImagePatch) -> Result<Option<Image>>;
    async fn delete_image(&self, id: i64) -> Result<bool>;

    /// 课程表
    async fn create_routine(&self, routine: NewRoutine) -> Result<Routine>;
    // 只返回启用的课程表
    async fn get_routine_by_id(&self, id: i64) -> Result<Option<Routine>>;
    async fn list_routines(&self, query: RoutineQuery) -> Result<Vec<Routine>>;
    async fn update_routine(&self, id: i64, patch: RoutinePatch) -> Result<Option<Routine>>;
    // 软删除
    async fn deactivate_routine(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
