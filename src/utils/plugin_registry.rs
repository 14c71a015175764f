//! 按名称注册的后端构造器
//!
//! 缓存与对象存储都通过 `#[ctor]` 在程序加载时把构造器放进各自的注册表，
//! 启动时按配置名取出；配置的后端不可用时换成备选后端。

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::errors::{Result, SchoolError};

pub type PluginFuture<T> = Pin<Box<dyn Future<Output = Result<Box<T>>> + Send>>;
pub type PluginConstructor<T> = Arc<dyn Fn() -> PluginFuture<T> + Send + Sync>;

pub struct PluginRegistry<T: ?Sized> {
    kind: &'static str,
    entries: RwLock<HashMap<String, PluginConstructor<T>>>,
}

impl<T: ?Sized> PluginRegistry<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn register(&self, name: impl Into<String>, constructor: PluginConstructor<T>) {
        self.entries
            .write()
            .expect("plugin registry lock poisoned")
            .insert(name.into(), constructor);
    }

    pub fn get(&self, name: &str) -> Option<PluginConstructor<T>> {
        self.entries
            .read()
            .expect("plugin registry lock poisoned")
            .get(name)
            .cloned()
    }

    /// 已注册的名称，按字母序
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .read()
            .expect("plugin registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn log_registered(&self) {
        debug!("Registered {} backends: {:?}", self.kind, self.names());
    }

    async fn build(&self, name: &str) -> Result<Box<T>> {
        let constructor = self.get(name).ok_or_else(|| {
            SchoolError::not_found(format!("{} backend '{}' is not registered", self.kind, name))
        })?;
        constructor().await
    }

    /// 先构造 `preferred`，失败时改用 `fallback`
    pub async fn build_with_fallback(&self, preferred: &str, fallback: &str) -> Result<Box<T>> {
        match self.build(preferred).await {
            Ok(backend) => {
                warn!("Using {} backend '{}'", self.kind, preferred);
                Ok(backend)
            }
            Err(e) if preferred != fallback => {
                warn!(
                    "{} backend '{}' unavailable ({}), falling back to '{}'",
                    self.kind, preferred, e, fallback
                );
                self.build(fallback).await
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn hello(&self) -> &'static str;
    }

    struct English;
    impl Greeter for English {
        fn hello(&self) -> &'static str {
            "hello"
        }
    }

    fn registry() -> PluginRegistry<dyn Greeter> {
        let registry = PluginRegistry::<dyn Greeter>::new("greeter");
        registry.register(
            "en",
            Arc::new(|| Box::pin(async { Ok(Box::new(English) as Box<dyn Greeter>) })),
        );
        registry.register(
            "broken",
            Arc::new(|| Box::pin(async { Err(SchoolError::cache_connection("down")) })),
        );
        registry
    }

    #[tokio::test]
    async fn test_falls_back_when_preferred_fails() {
        let greeter = registry().build_with_fallback("broken", "en").await.unwrap();
        assert_eq!(greeter.hello(), "hello");
    }

    #[tokio::test]
    async fn test_unknown_backend_without_fallback_is_error() {
        let registry = registry();
        assert!(registry.build_with_fallback("fr", "fr").await.is_err());
        assert_eq!(registry.names(), vec!["broken".to_string(), "en".to_string()]);
    }
}
