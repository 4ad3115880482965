//! 教师评审实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub submission_id: i64,
    pub teacher_id: i64,
    pub grade: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub comments: String,
    pub reviewed_at: i64,
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
    pub fn into_teacher_review(self) -> crate::models::submissions::entities::TeacherReview {
        use crate::models::submissions::entities::TeacherReview;

        TeacherReview {
            teacher_id: self.teacher_id,
            grade: self.grade,
            comments: self.comments,
            reviewed_at: super::from_timestamp(self.reviewed_at),
        }
    }
}
