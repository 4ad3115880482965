//! 代码批注实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "code_comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub teacher_id: i64,
    pub line_number: i32,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub created_at: i64,
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
    /// 行号必须从 1 开始，否则视为数据损坏
    pub fn into_code_comment(
        self,
    ) -> crate::errors::Result<crate::models::comments::entities::CodeComment> {
        use crate::errors::LabReviewError;
        use crate::models::comments::entities::CodeComment;

        let line_number = u32::try_from(self.line_number)
            .ok()
            .filter(|line| *line >= 1)
            .ok_or_else(|| {
                LabReviewError::database_operation(format!(
                    "批注 {} 行号无效: {}",
                    self.id, self.line_number
                ))
            })?;

        Ok(CodeComment {
            id: self.id,
            submission_id: self.submission_id,
            line_number,
            comment: self.comment,
            teacher_id: self.teacher_id,
            created_at: super::from_timestamp(self.created_at),
        })
    }
}
