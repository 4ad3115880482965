use super::CommentService;
use crate::errors::{LabReviewError, Result};
use crate::models::AuthContext;
use crate::models::comments::entities::CodeComment;
use crate::services::policy;

pub async fn list_comments(
    service: &CommentService,
    actor: &AuthContext,
    submission_id: i64,
    line_number: Option<u32>,
) -> Result<Vec<CodeComment>> {
    let storage = service.get_storage();
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LabReviewError::not_found(format!("提交不存在: {submission_id}")))?;
    policy::authorize_view(actor, submission.student_id)?;

    let comments = storage.list_code_comments(submission_id).await?;
    Ok(match line_number {
        Some(line) => comments
            .into_iter()
            .filter(|c| c.line_number == line)
            .collect(),
        None => comments,
    })
}
