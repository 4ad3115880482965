use tracing::{info, warn};

use super::AssignmentService;
use crate::errors::{LabReviewError, Result};
use crate::models::AuthContext;
use crate::services::policy::{self, Operation};

/// 删除作业，提交与批注随之删除，提交文件尽力清理
pub async fn delete_assignment(
    service: &AssignmentService,
    actor: &AuthContext,
    assignment_id: i64,
) -> Result<()> {
    policy::authorize(actor, Operation::DeleteAssignment)?;

    let Some(references) = service.get_storage().delete_assignment(assignment_id).await? else {
        return Err(LabReviewError::not_found(format!(
            "作业不存在: {assignment_id}"
        )));
    };

    let files = service.get_files();
    for reference in &references {
        if let Err(e) = files.remove(reference).await {
            warn!("Failed to remove stored file {}: {}", reference, e);
        }
    }

    info!(
        "Assignment {} deleted by user {} ({} submission(s) removed)",
        assignment_id,
        actor.user_id,
        references.len()
    );
    Ok(())
}
