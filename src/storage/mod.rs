use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    comments::{entities::CodeComment, requests::CreateCodeCommentRequest},
    submissions::{
        entities::{Submission, TeacherReview, VerificationResult},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
    },
};

use crate::errors::{LabReviewError, Result};

pub mod memory_storage;
pub mod register;
pub mod sea_orm_storage;

/// 实体存储
///
/// 实现方需要保证：
/// - 读取返回最新提交的状态
/// - 删除作业时级联删除提交与批注，要么全部成功要么全部不变
/// - 状态迁移写入以期望的旧状态为条件，不满足时返回 StateConflict 且不写入任何数据
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 实验作业管理方法
    // 创建作业
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出作业（最新创建的在前）
    async fn list_assignments(&self) -> Result<Vec<Assignment>>;
    // 删除作业，级联删除提交、验证结果、评审与批注
    // 返回被删除提交的文件引用，作业不存在时返回 None
    async fn delete_assignment(&self, assignment_id: i64) -> Result<Option<Vec<String>>>;

    /// 提交管理方法
    // 创建提交（pending），作业不存在返回 NotFound，重复提交返回 StateConflict
    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出提交（按提交顺序）
    async fn list_submissions(&self, query: SubmissionListQuery) -> Result<Vec<Submission>>;
    // 写入验证结果并迁移 pending → verified
    async fn record_verification(
        &self,
        submission_id: i64,
        result: VerificationResult,
    ) -> Result<Submission>;
    // 写入评审并迁移 verified → reviewed
    async fn record_review(&self, submission_id: i64, review: TeacherReview)
    -> Result<Submission>;
    // 删除提交，级联删除批注
    async fn delete_submission(&self, submission_id: i64) -> Result<bool>;

    /// 代码批注管理方法
    // 追加批注，提交不存在返回 NotFound
    async fn create_code_comment(&self, req: CreateCodeCommentRequest) -> Result<CodeComment>;
    // 列出提交的批注（按插入顺序）
    async fn list_code_comments(&self, submission_id: i64) -> Result<Vec<CodeComment>>;
}

/// 根据配置创建存储后端
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let constructor = register::get_storage_plugin(&config.backend).ok_or_else(|| {
        LabReviewError::storage_plugin_not_found(format!(
            "未知的存储后端: '{}'",
            config.backend
        ))
    })?;
    constructor(config.clone()).await
}
