use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{
    AssignmentService, CommandVerifier, CommentService, FileStore, LocalFileStore,
    MemoryFileStore, SubmissionService, Verifier,
};
use crate::storage::Storage;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub files: Arc<dyn FileStore>,
    pub verifier: Arc<dyn Verifier>,
    pub config: AppConfig,
}

impl StartupContext {
    pub fn assignment_service(&self) -> AssignmentService {
        AssignmentService::new(self.storage.clone(), self.files.clone())
    }

    pub fn submission_service(&self) -> SubmissionService {
        SubmissionService::new(
            self.storage.clone(),
            self.files.clone(),
            self.verifier.clone(),
        )
        .with_upload(self.config.upload.clone())
        .with_lifecycle(self.config.lifecycle.clone())
        .with_verify_timeout(Duration::from_millis(self.config.verification.timeout_ms))
    }

    pub fn comment_service(&self) -> CommentService {
        CommentService::new(self.storage.clone())
    }
}

/// 创建文件存储
///
/// 内存数据库搭配内存文件存储，避免在磁盘上留下无主文件。
fn create_file_store(config: &AppConfig) -> Arc<dyn FileStore> {
    if config.database.backend == "memory" {
        debug!("Using in-memory file store");
        Arc::new(MemoryFileStore::new())
    } else {
        debug!("Using local file store at {}", config.upload.dir);
        Arc::new(LocalFileStore::new(&config.upload.dir))
    }
}

/// 准备运行所需的上下文
/// 包括存储后端、文件存储和验证服务
pub async fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    if cfg!(debug_assertions) {
        crate::storage::register::debug_storage_registry();
        debug!("Debug mode: Storage registry is enabled");
    }

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!(
        "Storage backend '{}' initialized and migrations completed",
        config.database.backend
    );

    let files = create_file_store(config);
    let verifier: Arc<dyn Verifier> = Arc::new(CommandVerifier::new(&config.verification));

    Ok(StartupContext {
        storage,
        files,
        verifier,
        config: config.clone(),
    })
}
