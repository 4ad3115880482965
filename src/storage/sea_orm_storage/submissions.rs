//! 提交存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::Entity as Assignments;
use crate::entity::code_comments::{Column as CodeCommentColumn, Entity as CodeComments};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::teacher_reviews::{
    ActiveModel as TeacherReviewActiveModel, Column as TeacherReviewColumn,
    Entity as TeacherReviews,
};
use crate::entity::verification_results::{
    ActiveModel as VerificationResultActiveModel, Column as VerificationResultColumn,
    Entity as VerificationResults,
};
use crate::errors::{LabReviewError, Result};
use crate::models::submissions::{
    entities::{Submission, SubmissionStatus, TeacherReview, VerificationResult},
    requests::{CreateSubmissionRequest, SubmissionListQuery},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};

/// 读取提交及其验证结果、评审
pub(super) async fn load_submission<C: ConnectionTrait>(
    conn: &C,
    submission_id: i64,
) -> Result<Option<Submission>> {
    let Some(model) = Submissions::find_by_id(submission_id)
        .one(conn)
        .await
        .map_err(|e| LabReviewError::database_operation(format!("查询提交失败: {e}")))?
    else {
        return Ok(None);
    };

    let verification = VerificationResults::find_by_id(submission_id)
        .one(conn)
        .await
        .map_err(|e| LabReviewError::database_operation(format!("查询验证结果失败: {e}")))?;

    let review = TeacherReviews::find_by_id(submission_id)
        .one(conn)
        .await
        .map_err(|e| LabReviewError::database_operation(format!("查询评审失败: {e}")))?;

    model.into_submission(verification, review).map(Some)
}

/// 以旧状态为条件更新状态列，未命中时区分不存在与状态冲突
async fn advance_status(
    txn: &DatabaseTransaction,
    submission_id: i64,
    from: SubmissionStatus,
    to: SubmissionStatus,
) -> Result<()> {
    let result = Submissions::update_many()
        .col_expr(
            Column::Status,
            sea_orm::sea_query::Expr::value(to.to_string()),
        )
        .filter(Column::Id.eq(submission_id))
        .filter(Column::Status.eq(from.to_string()))
        .exec(txn)
        .await
        .map_err(|e| LabReviewError::database_operation(format!("更新提交状态失败: {e}")))?;

    if result.rows_affected > 0 {
        return Ok(());
    }

    match load_submission(txn, submission_id).await? {
        None => Err(LabReviewError::not_found(format!(
            "提交不存在: {submission_id}"
        ))),
        Some(current) => Err(LabReviewError::state_conflict(format!(
            "提交 {submission_id} 当前状态为 {}，无法从 {from} 迁移到 {to}",
            current.status()
        ))),
    }
}

impl SeaOrmStorage {
    /// 创建提交（pending）
    pub async fn create_submission_impl(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        // 检查作业是否存在
        let assignment = Assignments::find_by_id(req.assignment_id)
            .one(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("查询作业失败: {e}")))?;
        if assignment.is_none() {
            return Err(LabReviewError::not_found(format!(
                "作业不存在: {}",
                req.assignment_id
            )));
        }

        // 每个学生每个作业只允许一份提交
        let existing = Submissions::find()
            .filter(Column::AssignmentId.eq(req.assignment_id))
            .filter(Column::StudentId.eq(req.student_id))
            .one(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("查询已有提交失败: {e}")))?;
        if let Some(existing) = existing {
            return Err(LabReviewError::state_conflict(format!(
                "学生 {} 已提交过作业 {}（提交 {}）",
                req.student_id, req.assignment_id, existing.id
            )));
        }

        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            student_id: Set(req.student_id),
            file_reference: Set(req.file_reference),
            file_name: Set(req.file_name),
            status: Set(SubmissionStatus::Pending.to_string()),
            submitted_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&txn).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                LabReviewError::state_conflict(format!(
                    "学生 {} 已提交过作业 {}",
                    req.student_id, req.assignment_id
                ))
            } else {
                LabReviewError::database_operation(format!("创建提交失败: {e}"))
            }
        })?;

        txn.commit().await?;

        result.into_submission(None, None)
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        load_submission(&self.db, submission_id).await
    }

    /// 列出提交
    pub async fn list_submissions_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<Vec<Submission>> {
        let mut select = Submissions::find();

        // 作业筛选
        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        // 学生筛选
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let submissions = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("查询提交列表失败: {e}")))?;

        if submissions.is_empty() {
            return Ok(vec![]);
        }

        // 批量查询验证结果与评审
        let ids: Vec<i64> = submissions.iter().map(|s| s.id).collect();

        let verifications = VerificationResults::find()
            .filter(VerificationResultColumn::SubmissionId.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("查询验证结果失败: {e}")))?;
        let mut verification_map: HashMap<i64, _> = verifications
            .into_iter()
            .map(|v| (v.submission_id, v))
            .collect();

        let reviews = TeacherReviews::find()
            .filter(TeacherReviewColumn::SubmissionId.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("查询评审失败: {e}")))?;
        let mut review_map: HashMap<i64, _> =
            reviews.into_iter().map(|r| (r.submission_id, r)).collect();

        submissions
            .into_iter()
            .map(|s| {
                let verification = verification_map.remove(&s.id);
                let review = review_map.remove(&s.id);
                s.into_submission(verification, review)
            })
            .collect()
    }

    /// 写入验证结果（pending → verified）
    pub async fn record_verification_impl(
        &self,
        submission_id: i64,
        result: VerificationResult,
    ) -> Result<Submission> {
        let txn = self.db.begin().await?;

        advance_status(
            &txn,
            submission_id,
            SubmissionStatus::Pending,
            SubmissionStatus::Verified,
        )
        .await?;

        let model = VerificationResultActiveModel {
            submission_id: Set(submission_id),
            syntax_check_passed: Set(result.syntax_check_passed),
            syntax_errors: Set(result.syntax_errors),
            plagiarism_score: Set(result.plagiarism_score),
            plagiarism_details: Set(result.plagiarism_details),
            verified_at: Set(result.verified_at.timestamp()),
        };
        VerificationResults::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("写入验证结果失败: {e}")))?;

        let submission = load_submission(&txn, submission_id)
            .await?
            .ok_or_else(|| LabReviewError::not_found(format!("提交不存在: {submission_id}")))?;

        txn.commit().await?;
        Ok(submission)
    }

    /// 写入教师评审（verified → reviewed）
    pub async fn record_review_impl(
        &self,
        submission_id: i64,
        review: TeacherReview,
    ) -> Result<Submission> {
        let txn = self.db.begin().await?;

        advance_status(
            &txn,
            submission_id,
            SubmissionStatus::Verified,
            SubmissionStatus::Reviewed,
        )
        .await?;

        let model = TeacherReviewActiveModel {
            submission_id: Set(submission_id),
            teacher_id: Set(review.teacher_id),
            grade: Set(review.grade),
            comments: Set(review.comments),
            reviewed_at: Set(review.reviewed_at.timestamp()),
        };
        TeacherReviews::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("写入评审失败: {e}")))?;

        let submission = load_submission(&txn, submission_id)
            .await?
            .ok_or_else(|| LabReviewError::not_found(format!("提交不存在: {submission_id}")))?;

        txn.commit().await?;
        Ok(submission)
    }

    /// 删除提交，级联删除批注、验证结果与评审
    pub async fn delete_submission_impl(&self, submission_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        CodeComments::delete_many()
            .filter(CodeCommentColumn::SubmissionId.eq(submission_id))
            .exec(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("删除批注失败: {e}")))?;

        VerificationResults::delete_by_id(submission_id)
            .exec(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("删除验证结果失败: {e}")))?;

        TeacherReviews::delete_by_id(submission_id)
            .exec(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("删除评审失败: {e}")))?;

        let result = Submissions::delete_by_id(submission_id)
            .exec(&txn)
            .await
            .map_err(|e| LabReviewError::database_operation(format!("删除提交失败: {e}")))?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
