//! 提交实体

use sea_orm::entity::prelude::*;

use crate::errors::LabReviewError;
use crate::models::submissions::entities::{Submission, SubmissionState, SubmissionStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_reference: String,
    pub file_name: String,
    pub status: String,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(has_one = "super::verification_results::Entity")]
    VerificationResult,
    #[sea_orm(has_one = "super::teacher_reviews::Entity")]
    TeacherReview,
    #[sea_orm(has_many = "super::code_comments::Entity")]
    CodeComments,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::verification_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VerificationResult.def()
    }
}

impl Related<super::teacher_reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherReview.def()
    }
}

impl Related<super::code_comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CodeComments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    /// 组合提交行与其验证结果、评审行
    ///
    /// 状态列与附属行不一致时视为数据损坏。
    pub fn into_submission(
        self,
        verification: Option<super::verification_results::Model>,
        review: Option<super::teacher_reviews::Model>,
    ) -> crate::errors::Result<Submission> {
        let status: SubmissionStatus = self.status.parse().map_err(|e: String| {
            LabReviewError::database_operation(format!("提交 {} 状态无效: {e}", self.id))
        })?;

        let state = match (status, verification, review) {
            (SubmissionStatus::Pending, None, None) => SubmissionState::Pending,
            (SubmissionStatus::Verified, Some(v), None) => SubmissionState::Verified {
                verification_result: v.into_verification_result(),
            },
            (SubmissionStatus::Reviewed, Some(v), Some(r)) => SubmissionState::Reviewed {
                verification_result: v.into_verification_result(),
                teacher_review: r.into_teacher_review(),
            },
            (status, v, r) => {
                return Err(LabReviewError::database_operation(format!(
                    "提交 {} 数据不一致: 状态 {status}, 验证结果 {}, 评审 {}",
                    self.id,
                    v.is_some(),
                    r.is_some()
                )));
            }
        };

        Ok(Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            file_reference: self.file_reference,
            file_name: self.file_name,
            state,
            submitted_at: super::from_timestamp(self.submitted_at),
        })
    }
}
