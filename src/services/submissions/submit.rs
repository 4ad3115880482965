use tracing::{info, warn};

use super::SubmissionService;
use crate::errors::{LabReviewError, Result};
use crate::models::AuthContext;
use crate::models::submissions::{
    entities::Submission,
    requests::{CreateSubmissionRequest, SubmissionListQuery},
};
use crate::services::policy::{self, Operation};
use crate::utils::validate_upload;

pub async fn submit(
    service: &SubmissionService,
    actor: &AuthContext,
    assignment_id: i64,
    file_name: &str,
    content: &[u8],
) -> Result<Submission> {
    policy::authorize(actor, Operation::Submit)?;
    validate_upload(&service.upload, file_name, content).map_err(LabReviewError::validation)?;

    let storage = service.get_storage();

    let assignment = storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| LabReviewError::not_found(format!("作业不存在: {assignment_id}")))?;

    if service.lifecycle.enforce_deadline && assignment.is_past_deadline(chrono::Utc::now()) {
        return Err(LabReviewError::validation(format!(
            "作业 {assignment_id} 已过截止时间"
        )));
    }

    // 先检查重复提交，避免写入无主文件
    let existing = storage
        .list_submissions(SubmissionListQuery {
            assignment_id: Some(assignment_id),
            student_id: Some(actor.user_id),
            status: None,
        })
        .await?;
    if let Some(existing) = existing.first() {
        return Err(LabReviewError::state_conflict(format!(
            "学生 {} 已提交过作业 {assignment_id}（提交 {}）",
            actor.user_id, existing.id
        )));
    }

    let files = service.get_files();
    let file_reference = files.store(file_name, content).await?;

    let req = CreateSubmissionRequest {
        assignment_id,
        student_id: actor.user_id,
        file_reference: file_reference.clone(),
        file_name: file_name.to_string(),
    };

    match storage.create_submission(req).await {
        Ok(submission) => {
            info!(
                "Submission {} created by student {} for assignment {}",
                submission.id, actor.user_id, assignment_id
            );
            Ok(submission)
        }
        Err(e) => {
            // 记录未创建，回收已写入的文件
            if let Err(remove_err) = files.remove(&file_reference).await {
                warn!(
                    "Failed to remove orphaned file {}: {}",
                    file_reference, remove_err
                );
            }
            Err(e)
        }
    }
}
