use super::AssignmentService;
use crate::errors::{LabReviewError, Result};
use crate::models::assignments::entities::Assignment;

pub async fn get_assignment(service: &AssignmentService, assignment_id: i64) -> Result<Assignment> {
    service
        .get_storage()
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| LabReviewError::not_found(format!("作业不存在: {assignment_id}")))
}

pub async fn list_assignments(service: &AssignmentService) -> Result<Vec<Assignment>> {
    service.get_storage().list_assignments().await
}
