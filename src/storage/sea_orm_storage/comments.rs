//! 代码批注存储操作

use super::SeaOrmStorage;
use crate::entity::code_comments::{ActiveModel, Column};
use crate::entity::prelude::{CodeComments, Submissions};
use crate::errors::{LabReviewError, Result};
use crate::models::comments::{entities::CodeComment, requests::CreateCodeCommentRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 追加批注
    pub async fn create_code_comment_impl(
        &self,
        req: CreateCodeCommentRequest,
    ) -> Result<CodeComment> {
        let now = chrono::Utc::now().timestamp();
        let line_number = i32::try_from(req.line_number)
            .map_err(|_| LabReviewError::validation(format!("行号超出范围: {}", req.line_number)))?;

        let txn = self.db.begin().await?;

        // 提交必须存在
        let submission = Submissions::find_by_id(req.submission_id)
            .one(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("查询提交失败: {e}")))?;
        if submission.is_none() {
            return Err(LabReviewError::not_found(format!(
                "提交不存在: {}",
                req.submission_id
            )));
        }

        let model = ActiveModel {
            submission_id: Set(req.submission_id),
            teacher_id: Set(req.teacher_id),
            line_number: Set(line_number),
            comment: Set(req.comment),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("创建批注失败: {e}")))?;

        txn.commit().await?;

        result.into_code_comment()
    }

    /// 列出提交的批注，按插入顺序
    pub async fn list_code_comments_impl(&self, submission_id: i64) -> Result<Vec<CodeComment>> {
        let comments = CodeComments::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("查询批注失败: {e}")))?;

        comments.into_iter().map(|m| m.into_code_comment()).collect()
    }
}
