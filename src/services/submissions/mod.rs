//! 提交生命周期
//!
//! pending → verified → reviewed，不可跳过也不可回退。
//! 同一提交上的状态迁移通过 `SubmissionLocks` 串行化，存储层再以旧状态为条件写入。

pub mod delete;
pub mod detail;
pub mod locks;
pub mod review;
pub mod submit;
pub mod verify;

use std::sync::Arc;
use std::time::Duration;

use crate::config::{LifecycleConfig, UploadConfig};
use crate::errors::Result;
use crate::models::AuthContext;
use crate::models::submissions::{
    entities::Submission,
    requests::{ReviewSubmissionRequest, SubmissionListQuery},
};
use crate::services::files::FileStore;
use crate::services::verification::Verifier;
use crate::storage::Storage;

pub use locks::{SubmissionLockGuard, SubmissionLocks};

pub const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    files: Arc<dyn FileStore>,
    verifier: Arc<dyn Verifier>,
    upload: UploadConfig,
    lifecycle: LifecycleConfig,
    verify_timeout: Duration,
    locks: SubmissionLocks,
}

impl SubmissionService {
    pub fn new(
        storage: Arc<dyn Storage>,
        files: Arc<dyn FileStore>,
        verifier: Arc<dyn Verifier>,
    ) -> Self {
        Self {
            storage,
            files,
            verifier,
            upload: UploadConfig::default(),
            lifecycle: LifecycleConfig::default(),
            verify_timeout: DEFAULT_VERIFY_TIMEOUT,
            locks: SubmissionLocks::default(),
        }
    }

    pub fn with_upload(mut self, upload: UploadConfig) -> Self {
        self.upload = upload;
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_verify_timeout(mut self, timeout: Duration) -> Self {
        self.verify_timeout = timeout;
        self
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub(crate) fn get_files(&self) -> Arc<dyn FileStore> {
        self.files.clone()
    }

    /// 学生提交作业文件
    pub async fn submit(
        &self,
        actor: &AuthContext,
        assignment_id: i64,
        file_name: &str,
        content: &[u8],
    ) -> Result<Submission> {
        submit::submit(self, actor, assignment_id, file_name, content).await
    }

    /// 运行验证服务并记录结果
    pub async fn verify(&self, actor: &AuthContext, submission_id: i64) -> Result<Submission> {
        verify::verify(self, actor, submission_id).await
    }

    /// 教师评审
    pub async fn review(
        &self,
        actor: &AuthContext,
        submission_id: i64,
        req: ReviewSubmissionRequest,
    ) -> Result<Submission> {
        review::review(self, actor, submission_id, req).await
    }

    /// 删除提交
    pub async fn delete(&self, actor: &AuthContext, submission_id: i64) -> Result<()> {
        delete::delete_submission(self, actor, submission_id).await
    }

    /// 获取提交详情
    pub async fn get(&self, actor: &AuthContext, submission_id: i64) -> Result<Submission> {
        detail::get_submission(self, actor, submission_id).await
    }

    /// 列出提交，学生只能看到自己的
    pub async fn list(
        &self,
        actor: &AuthContext,
        query: SubmissionListQuery,
    ) -> Result<Vec<Submission>> {
        detail::list_submissions(self, actor, query).await
    }
}
