use tracing::info;

use super::SubmissionService;
use crate::errors::{LabReviewError, Result};
use crate::models::AuthContext;
use crate::models::submissions::{
    entities::{Submission, SubmissionStatus, TeacherReview},
    requests::ReviewSubmissionRequest,
};
use crate::services::policy::{self, Operation};
use crate::utils::{validate_grade, validate_review_comments};

/// 教师评审（verified → reviewed）
pub async fn review(
    service: &SubmissionService,
    actor: &AuthContext,
    submission_id: i64,
    req: ReviewSubmissionRequest,
) -> Result<Submission> {
    policy::authorize(actor, Operation::Review)?;
    validate_grade(req.grade).map_err(LabReviewError::validation)?;
    validate_review_comments(&req.comments).map_err(LabReviewError::validation)?;

    let _guard = service.locks.acquire(submission_id).await;

    let storage = service.get_storage();
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LabReviewError::not_found(format!("提交不存在: {submission_id}")))?;
    submission.expect_status(SubmissionStatus::Verified, "评审")?;

    let review = TeacherReview {
        teacher_id: actor.user_id,
        grade: req.grade,
        comments: req.comments.trim().to_string(),
        reviewed_at: chrono::Utc::now(),
    };
    let updated = storage.record_review(submission_id, review).await?;

    info!(
        "Submission {} reviewed by user {} with grade {:?}",
        submission_id, actor.user_id, req.grade
    );
    Ok(updated)
}
