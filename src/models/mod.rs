//! 数据模型定义
//!
//! 按资源划分为 entities（业务实体）、requests（请求体）与 responses（响应体），
//! 与 `entity` 模块中的数据库实体分离。

pub mod admins;
pub mod attendance;
pub mod classes;
pub mod common;
pub mod events;
pub mod exams;
pub mod images;
pub mod messages;
pub mod notices;
pub mod results;
pub mod routines;
pub mod students;
pub mod subjects;
pub mod teachers;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub use common::{
    ApiResponse, CountResponse, HealthResponse, PaginationInfo,
    PaginationQuery, RowError,
};

/// 业务错误代码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证授权 2xxx
    Unauthorized = 2001,
    AuthFailed = 2002,
    Forbidden = 2003,
    InvalidToken = 2004,
    AdminNotFound = 2005,
    AdminAlreadyExists = 2006,

    // 教学资源 3xxx
    ClassNotFound = 3001,
    StudentNotFound = 3002,
    TeacherNotFound = 3003,
    SubjectNotFound = 3004,
    ExamNotFound = 3005,
    ResultNotFound = 3006,
    AttendanceNotFound = 3007,
    DuplicateRecord = 3008,

    // 公告与活动 4xxx
    NoticeNotFound = 4001,
    MessageNotFound = 4002,
    EventNotFound = 4003,

    // 文件 5xxx
    FileNotFound = 5001,
    FileTypeNotAllowed = 5002,
    FileSizeExceeded = 5003,
    FileUploadFailed = 5004,
    MultifileUploadNotAllowed = 5005,
    ImageNotFound = 5006,
    RoutineNotFound = 5007,
}

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
