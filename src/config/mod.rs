//! 配置管理
//!
//! 配置来源按优先级从低到高：内置默认值、`config.toml`、`config.{APP_ENV}.toml`、
//! `SCHOOL_*` 环境变量以及少量常用环境变量（`DATABASE_URL`、`JWT_SECRET` 等）。

mod r#impl;
mod structs;

pub use r#impl::DEFAULT_UPLOAD_MAX_SIZE;
pub use structs::*;
