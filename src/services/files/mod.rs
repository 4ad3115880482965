//! 提交文件存储
//!
//! 生命周期记录只保存文件引用，文件内容由 `FileStore` 负责。

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::errors::Result;

pub use local::LocalFileStore;
pub use memory::MemoryFileStore;

#[async_trait]
pub trait FileStore: Send + Sync {
    /// 保存文件内容，返回文件引用
    async fn store(&self, file_name: &str, content: &[u8]) -> Result<String>;
    /// 按引用读取文件内容，引用不存在返回 NotFound
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>>;
    /// 删除文件，返回是否存在
    async fn remove(&self, reference: &str) -> Result<bool>;
}

/// 生成存储文件名：`{timestamp}-{uuid}{ext}`
pub(crate) fn stored_name(file_name: &str) -> String {
    format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp(),
        uuid::Uuid::new_v4(),
        crate::utils::file_extension(file_name)
    )
}
