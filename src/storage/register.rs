use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::storage::{Storage, memory_storage::MemoryStorage, sea_orm_storage::SeaOrmStorage};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedStorageFuture = Pin<Box<dyn Future<Output = Result<Arc<dyn Storage>>> + Send>>;
pub type StorageConstructor = Arc<dyn Fn(DatabaseConfig) -> BoxedStorageFuture + Send + Sync>;

// 内置后端在首次访问时注册
static STORAGE_REGISTRY: Lazy<RwLock<HashMap<String, StorageConstructor>>> = Lazy::new(|| {
    let mut registry: HashMap<String, StorageConstructor> = HashMap::new();

    registry.insert(
        "sea_orm".to_string(),
        Arc::new(|config: DatabaseConfig| {
            Box::pin(async move {
                let storage = SeaOrmStorage::connect(&config).await?;
                Ok(Arc::new(storage) as Arc<dyn Storage>)
            }) as BoxedStorageFuture
        }),
    );

    registry.insert(
        "memory".to_string(),
        Arc::new(|_config: DatabaseConfig| {
            Box::pin(async move { Ok(Arc::new(MemoryStorage::new()) as Arc<dyn Storage>) })
                as BoxedStorageFuture
        }),
    );

    RwLock::new(registry)
});

pub fn register_storage_plugin<S: Into<String>>(name: S, constructor: StorageConstructor) {
    let name = name.into();
    let mut registry = STORAGE_REGISTRY
        .write()
        .expect("Storage registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_storage_plugin(name: &str) -> Option<StorageConstructor> {
    STORAGE_REGISTRY
        .read()
        .expect("Storage registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_storage_registry() {
    let registry = STORAGE_REGISTRY
        .read()
        .expect("Storage registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No storage plugins registered.");
    } else {
        tracing::debug!("Registered storage plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_backends_registered() {
        assert!(get_storage_plugin("sea_orm").is_some());
        assert!(get_storage_plugin("memory").is_some());
        assert!(get_storage_plugin("redis").is_none());
    }

    #[tokio::test]
    async fn test_unknown_backend_is_reported() {
        let config = DatabaseConfig {
            backend: "cassandra".to_string(),
            ..Default::default()
        };
        let err = match crate::storage::create_storage(&config).await {
            Ok(_) => panic!("unknown backend must not resolve"),
            Err(e) => e,
        };
        assert_eq!(err.code(), "E011");
    }
}
