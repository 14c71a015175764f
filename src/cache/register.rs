use once_cell::sync::Lazy;

use crate::cache::traits::ObjectCache;
use crate::utils::plugin_registry::{PluginConstructor, PluginRegistry};

pub type ObjectCacheConstructor = PluginConstructor<dyn ObjectCache>;

/// 会话缓存后端：moka（进程内）与 redis
pub static OBJECT_CACHES: Lazy<PluginRegistry<dyn ObjectCache>> =
    Lazy::new(|| PluginRegistry::new("cache"));

pub fn register_object_cache_plugin<S: Into<String>>(name: S, constructor: ObjectCacheConstructor) {
    OBJECT_CACHES.register(name, constructor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_caches_registered() {
        assert_eq!(OBJECT_CACHES.names(), vec!["moka".to_string(), "redis".to_string()]);
    }
}
