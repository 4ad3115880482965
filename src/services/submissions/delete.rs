use tracing::{info, warn};

use super::SubmissionService;
use crate::errors::{LabReviewError, Result};
use crate::models::AuthContext;
use crate::services::policy::{self, Operation};

/// 删除提交及其批注，不可恢复
pub async fn delete_submission(
    service: &SubmissionService,
    actor: &AuthContext,
    submission_id: i64,
) -> Result<()> {
    policy::authorize(actor, Operation::DeleteSubmission)?;

    let guard = service.locks.acquire(submission_id).await;

    let storage = service.get_storage();
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LabReviewError::not_found(format!("提交不存在: {submission_id}")))?;

    if !storage.delete_submission(submission_id).await? {
        return Err(LabReviewError::not_found(format!(
            "提交不存在: {submission_id}"
        )));
    }

    drop(guard);

    // 记录已删除，文件清理失败只记录日志
    if let Err(e) = service.get_files().remove(&submission.file_reference).await {
        warn!(
            "Failed to remove stored file {} of submission {}: {}",
            submission.file_reference, submission_id, e
        );
    }

    info!("Submission {} deleted by user {}", submission_id, actor.user_id);
    Ok(())
}
