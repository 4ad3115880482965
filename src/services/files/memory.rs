use async_trait::async_trait;
use dashmap::DashMap;

use super::{FileStore, stored_name};
use crate::errors::{LabReviewError, Result};

/// 进程内文件存储
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: DashMap<String, Vec<u8>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<String> {
        let reference = stored_name(file_name);
        self.files.insert(reference.clone(), content.to_vec());
        Ok(reference)
    }

    async fn fetch(&self, reference: &str) -> Result<Vec<u8>> {
        self.files
            .get(reference)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LabReviewError::not_found(format!("文件不存在: {reference}")))
    }

    async fn remove(&self, reference: &str) -> Result<bool> {
        Ok(self.files.remove(reference).is_some())
    }
}
