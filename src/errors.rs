//! 存储层、对象存储与启动流程共用的错误类型
//!
//! 每个变体携带一段说明文字；服务层按变体决定 HTTP 状态码（见 `services::common`）。

use std::fmt;

/// 由 `变体(代码, 类型名)` 列表生成 [`SchoolError`]，以及同名 snake_case 构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    CacheConnection("S001", "Cache Connection Error"),
    DatabaseConfig("S002", "Database Configuration Error"),
    DatabaseConnection("S003", "Database Connection Error"),
    DatabaseOperation("S004", "Database Operation Error"),
    FileOperation("S005", "File Operation Error"),
    Validation("S006", "Validation Error"),
    NotFound("S007", "Resource Not Found"),
    Conflict("S008", "Resource Conflict"),
    Serialization("S009", "Serialization Error"),
    DateParse("S010", "Date Parse Error"),
    ObjectStore("S011", "Object Store Error"),
    Timeout("S012", "Operation Timed Out"),
}

impl SchoolError {
    /// 归类数据库错误
    ///
    /// 唯一约束冲突映射为 `Conflict`，外键约束失败映射为 `Validation`，其余为 `DatabaseOperation`。
    pub fn from_db(err: sea_orm::DbErr, context: &str) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                SchoolError::Conflict(format!("{context}: {detail}"))
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(detail)) => {
                SchoolError::Validation(format!("{context}: {detail}"))
            }
            _ => SchoolError::DatabaseOperation(format!("{context}: {err}")),
        }
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code(), self.error_type(), self.message())
    }
}

impl std::error::Error for SchoolError {}

impl From<sea_orm::DbErr> for SchoolError {
    fn from(err: sea_orm::DbErr) -> Self {
        SchoolError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SchoolError {
    fn from(err: std::io::Error) -> Self {
        SchoolError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

impl From<reqwest::Error> for SchoolError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SchoolError::Timeout(err.to_string())
        } else {
            SchoolError::ObjectStore(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pick_variant() {
        assert_eq!(SchoolError::database_config("x").code(), "S002");
        assert_eq!(SchoolError::conflict("x").code(), "S008");
        assert_eq!(SchoolError::object_store("x").error_type(), "Object Store Error");
        assert_eq!(SchoolError::validation("Invalid input").message(), "Invalid input");
    }

    #[test]
    fn test_from_db_keeps_context() {
        let err = SchoolError::from_db(sea_orm::DbErr::Custom("boom".into()), "创建学生失败");
        assert!(matches!(err, SchoolError::DatabaseOperation(_)));
        assert!(err.message().starts_with("创建学生失败"));
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_display_includes_code_and_type() {
        let shown = SchoolError::not_found("Student 42").to_string();
        assert_eq!(shown, "[S007] Resource Not Found: Student 42");
    }

    #[test]
    fn test_io_error_maps_to_file_operation() {
        let err: SchoolError = std::io::Error::other("disk full").into();
        assert!(matches!(err, SchoolError::FileOperation(_)));
    }
}
