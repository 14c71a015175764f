//! 对象存储
//!
//! 图片与课程表文件上传到对象存储，数据库只保存返回的 URL 与 public id。
//! 后端以插件形式注册（见 [`declare_object_store_plugin!`]），启动时按配置选择，
//! 远程存储配置不完整时回退到本地磁盘。

pub mod register;
pub mod stores;

use std::path::Path;

use async_trait::async_trait;

use crate::errors::Result;

/// 上传成功后的对象信息
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    /// 对外可访问的地址
    pub url: String,
    /// 删除或替换时使用的标识
    pub public_id: String,
    /// 文件格式（扩展名，不含点号）
    pub format: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 后端名称，用于日志
    fn name(&self) -> &'static str;

    /// 上传本地文件到指定目录
    async fn upload(&self, path: &Path, folder: &str, content_type: &str) -> Result<StoredObject>;

    /// 删除对象，对象不存在时视为成功
    async fn delete(&self, public_id: &str) -> Result<()>;
}

/// 声明并在程序加载时注册一个对象存储插件
///
/// 插件类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_store_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_store_plugin() {
            $crate::object_store::register::register_object_store_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let store =
                            <$ty>::new().map_err($crate::errors::SchoolError::object_store)?;
                        Ok(Box::new(store) as Box<dyn $crate::object_store::ObjectStore>)
                    })
                }),
            );
        }
    };
}
