use once_cell::sync::Lazy;

use crate::object_store::ObjectStore;
use crate::utils::plugin_registry::{PluginConstructor, PluginRegistry};

pub type ObjectStoreConstructor = PluginConstructor<dyn ObjectStore>;

/// 文件存储后端：cloudinary 与本地磁盘
pub static OBJECT_STORES: Lazy<PluginRegistry<dyn ObjectStore>> =
    Lazy::new(|| PluginRegistry::new("object store"));

pub fn register_object_store_plugin<S: Into<String>>(name: S, constructor: ObjectStoreConstructor) {
    OBJECT_STORES.register(name, constructor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_stores_registered() {
        assert!(OBJECT_STORES.get("local").is_some());
        assert!(OBJECT_STORES.get("cloudinary").is_some());
        assert!(OBJECT_STORES.get("s3").is_none());
    }
}
