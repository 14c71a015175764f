//! rust-school-next - 学校管理后台服务
//!
//! 基于 Actix Web 构建，管理班级、师生、考试成绩、考勤、公告与课程表。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证、角色与限流中间件
//! - `models`: 数据模型定义
//! - `object_store`: 图片与课程表文件的对象存储（Cloudinary/本地）
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod object_store;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
