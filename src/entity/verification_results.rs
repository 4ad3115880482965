//! 验证结果实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "verification_results")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub submission_id: i64,
    pub syntax_check_passed: bool,
    #[sea_orm(column_type = "Text")]
    pub syntax_errors: String,
    pub plagiarism_score: f64,
    #[sea_orm(column_type = "Text")]
    pub plagiarism_details: String,
    pub verified_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_verification_result(
        self,
    ) -> crate::models::submissions::entities::VerificationResult {
        use crate::models::submissions::entities::VerificationResult;

        VerificationResult {
            syntax_check_passed: self.syntax_check_passed,
            syntax_errors: self.syntax_errors,
            plagiarism_score: self.plagiarism_score,
            plagiarism_details: self.plagiarism_details,
            verified_at: super::from_timestamp(self.verified_at),
        }
    }
}
