use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{FileStore, stored_name};
use crate::errors::{LabReviewError, Result};

/// 本地目录文件存储
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // 引用只能是上传目录下的单个文件名
    fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let mut components = Path::new(reference).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.root.join(name)),
            _ => Err(LabReviewError::validation(format!(
                "非法的文件引用: {reference}"
            ))),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<String> {
        // 确保上传目录存在
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| LabReviewError::file_operation(format!("创建上传目录失败: {e}")))?;

        let reference = stored_name(file_name);
        let path = self.root.join(&reference);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| LabReviewError::file_operation(format!("文件写入失败: {e}")))?;

        debug!("Stored {} ({} bytes) as {}", file_name, content.len(), reference);
        Ok(reference)
    }

    async fn fetch(&self, reference: &str) -> Result<Vec<u8>> {
        let path = self.resolve(reference)?;
        match tokio::fs::read(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LabReviewError::not_found(
                format!("文件不存在: {reference}"),
            )),
            Err(e) => Err(LabReviewError::file_operation(format!("文件读取失败: {e}"))),
        }
    }

    async fn remove(&self, reference: &str) -> Result<bool> {
        let path = self.resolve(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(LabReviewError::file_operation(format!("文件删除失败: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_fetch_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path().join("uploads"));

        let reference = store.store("main.cpp", b"int main() {}").await.unwrap();
        assert!(reference.ends_with(".cpp"));
        assert_eq!(store.fetch(&reference).await.unwrap(), b"int main() {}");

        assert!(store.remove(&reference).await.unwrap());
        assert!(!store.remove(&reference).await.unwrap());
        assert_eq!(store.fetch(&reference).await.unwrap_err().code(), "E001");
    }

    #[tokio::test]
    async fn test_rejects_escaping_reference() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        for reference in ["../secret", "/etc/passwd", "a/b.py", ""] {
            let err = store.fetch(reference).await.unwrap_err();
            assert_eq!(err.code(), "E004", "reference {reference:?}");
        }
    }
}
