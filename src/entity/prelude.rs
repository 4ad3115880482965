//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::code_comments::{
    ActiveModel as CodeCommentActiveModel, Entity as CodeComments, Model as CodeCommentModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::teacher_reviews::{
    ActiveModel as TeacherReviewActiveModel, Entity as TeacherReviews,
    Model as TeacherReviewModel,
};
pub use super::verification_results::{
    ActiveModel as VerificationResultActiveModel, Entity as VerificationResults,
    Model as VerificationResultModel,
};
