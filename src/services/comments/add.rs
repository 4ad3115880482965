use tracing::info;

use super::CommentService;
use crate::errors::{LabReviewError, Result};
use crate::models::AuthContext;
use crate::models::comments::{entities::CodeComment, requests::CreateCodeCommentRequest};
use crate::models::submissions::entities::SubmissionStatus;
use crate::services::policy::{self, Operation};
use crate::utils::{validate_comment_text, validate_line_number};

pub async fn add_comment(
    service: &CommentService,
    actor: &AuthContext,
    submission_id: i64,
    line_number: i64,
    text: &str,
) -> Result<CodeComment> {
    policy::authorize(actor, Operation::AddComment)?;
    let line_number = validate_line_number(line_number).map_err(LabReviewError::validation)?;
    validate_comment_text(text).map_err(LabReviewError::validation)?;

    let storage = service.get_storage();
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LabReviewError::not_found(format!("提交不存在: {submission_id}")))?;

    // 验证完成前不允许批注
    if submission.status() == SubmissionStatus::Pending {
        return Err(LabReviewError::state_conflict(format!(
            "提交 {submission_id} 尚未验证，不能添加批注"
        )));
    }

    let comment = storage
        .create_code_comment(CreateCodeCommentRequest {
            submission_id,
            teacher_id: actor.user_id,
            line_number,
            comment: text.trim().to_string(),
        })
        .await?;

    info!(
        "Comment {} added to submission {} line {} by user {}",
        comment.id, submission_id, line_number, actor.user_id
    );
    Ok(comment)
}
