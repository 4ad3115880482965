//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column};
use crate::entity::code_comments::Column as CodeCommentColumn;
use crate::entity::prelude::{
    Assignments, CodeComments, Submissions, TeacherReviews, VerificationResults,
};
use crate::entity::submissions::Column as SubmissionColumn;
use crate::entity::teacher_reviews::Column as TeacherReviewColumn;
use crate::entity::verification_results::Column as VerificationResultColumn;
use crate::errors::{LabReviewError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            deadline: Set(req.deadline.map(|d| d.timestamp())),
            created_by: Set(req.created_by),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 列出作业，最新创建的在前
    pub async fn list_assignments_impl(&self) -> Result<Vec<Assignment>> {
        let assignments = Assignments::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(assignments.into_iter().map(|m| m.into_assignment()).collect())
    }

    /// 删除作业，级联删除提交、验证结果、评审与批注
    ///
    /// 返回被删除提交的文件引用，与删除在同一事务中读取。
    pub async fn delete_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Vec<String>>> {
        let txn = self.db.begin().await?;

        let removed: Vec<(i64, String)> = Submissions::find()
            .select_only()
            .column(SubmissionColumn::Id)
            .column(SubmissionColumn::FileReference)
            .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("查询作业提交失败: {e}")))?;
        let (submission_ids, references): (Vec<i64>, Vec<String>) = removed.into_iter().unzip();

        if !submission_ids.is_empty() {
            CodeComments::delete_many()
                .filter(CodeCommentColumn::SubmissionId.is_in(submission_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| LabReviewError::database_operation(format!("删除批注失败: {e}")))?;

            VerificationResults::delete_many()
                .filter(VerificationResultColumn::SubmissionId.is_in(submission_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| {
                    LabReviewError::database_operation(format!("删除验证结果失败: {e}"))
                })?;

            TeacherReviews::delete_many()
                .filter(TeacherReviewColumn::SubmissionId.is_in(submission_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| LabReviewError::database_operation(format!("删除评审失败: {e}")))?;

            Submissions::delete_many()
                .filter(SubmissionColumn::AssignmentId.eq(assignment_id))
                .exec(&txn)
                .await
                .map_err(|e| LabReviewError::database_operation(format!("删除提交失败: {e}")))?;
        }

        let result = Assignments::delete_by_id(assignment_id)
            .exec(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("删除作业失败: {e}")))?;

        if result.rows_affected == 0 {
            // 作业不存在，回滚
            txn.rollback().await?;
            return Ok(None);
        }

        txn.commit().await?;

        debug!(
            "Removed assignment {} with {} submission(s)",
            assignment_id,
            submission_ids.len()
        );
        Ok(Some(references))
    }
}
