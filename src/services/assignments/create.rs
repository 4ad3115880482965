use tracing::info;

use super::AssignmentService;
use crate::errors::{LabReviewError, Result};
use crate::models::AuthContext;
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use crate::services::policy::{self, Operation};
use crate::utils::{validate_deadline, validate_title};

pub async fn create_assignment(
    service: &AssignmentService,
    actor: &AuthContext,
    mut req: CreateAssignmentRequest,
) -> Result<Assignment> {
    policy::authorize(actor, Operation::CreateAssignment)?;

    validate_title(&req.title).map_err(LabReviewError::validation)?;
    validate_deadline(req.deadline, chrono::Utc::now()).map_err(LabReviewError::validation)?;

    req.title = req.title.trim().to_string();
    req.created_by = actor.user_id;

    let assignment = service.get_storage().create_assignment(req).await?;
    info!(
        "Assignment {} '{}' created by user {}",
        assignment.id, assignment.title, actor.user_id
    );
    Ok(assignment)
}
