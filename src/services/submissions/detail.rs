use super::SubmissionService;
use crate::errors::{LabReviewError, Result};
use crate::models::AuthContext;
use crate::models::submissions::{entities::Submission, requests::SubmissionListQuery};
use crate::services::policy::{self, Operation};

pub async fn get_submission(
    service: &SubmissionService,
    actor: &AuthContext,
    submission_id: i64,
) -> Result<Submission> {
    let submission = service
        .get_storage()
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LabReviewError::not_found(format!("提交不存在: {submission_id}")))?;

    policy::authorize_view(actor, submission.student_id)?;
    Ok(submission)
}

pub async fn list_submissions(
    service: &SubmissionService,
    actor: &AuthContext,
    mut query: SubmissionListQuery,
) -> Result<Vec<Submission>> {
    // 学生只能查看自己的提交
    if !policy::is_allowed(actor, Operation::ViewAllSubmissions) {
        query.student_id = Some(actor.user_id);
    }
    service.get_storage().list_submissions(query).await
}
