//! 角色授权策略
//!
//! 所有受控操作只在这里查表，服务层不直接比较角色。

use std::fmt;

use tracing::info;

use crate::errors::{LabReviewError, Result};
use crate::models::{AuthContext, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateAssignment,
    DeleteAssignment,
    Submit,
    Verify,
    Review,
    DeleteSubmission,
    AddComment,
    ViewAllSubmissions,
}

impl Operation {
    /// 允许执行该操作的角色
    pub fn allowed_roles(self) -> &'static [UserRole] {
        match self {
            Operation::Submit => UserRole::student_roles(),
            Operation::CreateAssignment
            | Operation::DeleteAssignment
            | Operation::Verify
            | Operation::Review
            | Operation::DeleteSubmission
            | Operation::AddComment
            | Operation::ViewAllSubmissions => UserRole::teacher_roles(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateAssignment => "create assignment",
            Operation::DeleteAssignment => "delete assignment",
            Operation::Submit => "submit",
            Operation::Verify => "verify",
            Operation::Review => "review",
            Operation::DeleteSubmission => "delete submission",
            Operation::AddComment => "add comment",
            Operation::ViewAllSubmissions => "view all submissions",
        };
        write!(f, "{name}")
    }
}

pub fn is_allowed(actor: &AuthContext, op: Operation) -> bool {
    op.allowed_roles().contains(&actor.role)
}

/// 检查操作者是否有权执行操作，否则返回 Forbidden
pub fn authorize(actor: &AuthContext, op: Operation) -> Result<()> {
    if is_allowed(actor, op) {
        return Ok(());
    }
    info!(
        "Denied '{}' for user {} with role {}",
        op, actor.user_id, actor.role
    );
    Err(LabReviewError::forbidden(format!(
        "角色 {} 无权执行操作: {op}",
        actor.role
    )))
}

/// 教师/管理员或提交所属学生可以查看
pub fn authorize_view(actor: &AuthContext, owner_id: i64) -> Result<()> {
    if actor.role.is_staff() || actor.user_id == owner_id {
        return Ok(());
    }
    Err(LabReviewError::forbidden(format!(
        "用户 {} 无权查看学生 {owner_id} 的提交",
        actor.user_id
    )))
}
