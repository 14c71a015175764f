//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod admins;
pub mod attendance;
pub mod classes;
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

use chrono::{DateTime, Utc};

/// unix 秒转换为 UTC 时间
pub(crate) fn timestamp_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
