//! 内存存储实现
//!
//! 进程内数据，适用于测试与演示。每个操作持有一次写锁，级联删除与状态迁移天然原子。

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::{LabReviewError, Result};
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    comments::{entities::CodeComment, requests::CreateCodeCommentRequest},
    submissions::{
        entities::{Submission, SubmissionState, TeacherReview, VerificationResult},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
    },
};
use crate::storage::Storage;

#[derive(Debug, Default)]
struct MemoryState {
    last_assignment_id: i64,
    last_submission_id: i64,
    last_comment_id: i64,
    assignments: BTreeMap<i64, Assignment>,
    submissions: BTreeMap<i64, Submission>,
    // 以 ID 为键，遍历顺序即插入顺序
    comments: BTreeMap<i64, CodeComment>,
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RwLock<MemoryState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryState {
    fn remove_submission_cascade(&mut self, submission_id: i64) -> bool {
        let removed = self.submissions.remove(&submission_id).is_some();
        if removed {
            self.comments.retain(|_, c| c.submission_id != submission_id);
        }
        removed
    }

    fn transition<F>(&mut self, submission_id: i64, apply: F) -> Result<Submission>
    where
        F: FnOnce(SubmissionState) -> Result<SubmissionState>,
    {
        let submission = self
            .submissions
            .get_mut(&submission_id)
            .ok_or_else(|| LabReviewError::not_found(format!("提交不存在: {submission_id}")))?;

        // 失败时不修改原状态
        let next = apply(submission.state.clone())?;
        submission.state = next;
        Ok(submission.clone())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let mut state = self.state.write().await;
        state.last_assignment_id += 1;

        let assignment = Assignment {
            id: state.last_assignment_id,
            title: req.title,
            description: req.description,
            deadline: req.deadline,
            created_by: req.created_by,
            created_at: chrono::Utc::now(),
        };
        state.assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        Ok(self.state.read().await.assignments.get(&assignment_id).cloned())
    }

    async fn list_assignments(&self) -> Result<Vec<Assignment>> {
        let state = self.state.read().await;
        let mut assignments: Vec<Assignment> = state.assignments.values().cloned().collect();
        assignments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(assignments)
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<Option<Vec<String>>> {
        let mut state = self.state.write().await;
        if state.assignments.remove(&assignment_id).is_none() {
            return Ok(None);
        }

        let removed: Vec<(i64, String)> = state
            .submissions
            .values()
            .filter(|s| s.assignment_id == assignment_id)
            .map(|s| (s.id, s.file_reference.clone()))
            .collect();
        for (submission_id, _) in &removed {
            state.remove_submission_cascade(*submission_id);
        }

        debug!(
            "Memory storage removed assignment {} with {} submission(s)",
            assignment_id,
            removed.len()
        );
        Ok(Some(removed.into_iter().map(|(_, r)| r).collect()))
    }

    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let mut state = self.state.write().await;

        if !state.assignments.contains_key(&req.assignment_id) {
            return Err(LabReviewError::not_found(format!(
                "作业不存在: {}",
                req.assignment_id
            )));
        }
        if state
            .submissions
            .values()
            .any(|s| s.assignment_id == req.assignment_id && s.student_id == req.student_id)
        {
            return Err(LabReviewError::state_conflict(format!(
                "学生 {} 已提交过作业 {}",
                req.student_id, req.assignment_id
            )));
        }

        state.last_submission_id += 1;
        let submission = Submission {
            id: state.last_submission_id,
            assignment_id: req.assignment_id,
            student_id: req.student_id,
            file_reference: req.file_reference,
            file_name: req.file_name,
            state: SubmissionState::Pending,
            submitted_at: chrono::Utc::now(),
        };
        state.submissions.insert(submission.id, submission.clone());
        Ok(submission)
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        Ok(self.state.read().await.submissions.get(&submission_id).cloned())
    }

    async fn list_submissions(&self, query: SubmissionListQuery) -> Result<Vec<Submission>> {
        let state = self.state.read().await;
        Ok(state
            .submissions
            .values()
            .filter(|s| query.assignment_id.is_none_or(|id| s.assignment_id == id))
            .filter(|s| query.student_id.is_none_or(|id| s.student_id == id))
            .filter(|s| query.status.is_none_or(|status| s.status() == status))
            .cloned()
            .collect())
    }

    async fn record_verification(
        &self,
        submission_id: i64,
        result: VerificationResult,
    ) -> Result<Submission> {
        let mut state = self.state.write().await;
        state.transition(submission_id, |current| current.verify(result))
    }

    async fn record_review(
        &self,
        submission_id: i64,
        review: TeacherReview,
    ) -> Result<Submission> {
        let mut state = self.state.write().await;
        state.transition(submission_id, |current| current.review(review))
    }

    async fn delete_submission(&self, submission_id: i64) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.remove_submission_cascade(submission_id))
    }

    async fn create_code_comment(&self, req: CreateCodeCommentRequest) -> Result<CodeComment> {
        let mut state = self.state.write().await;

        if !state.submissions.contains_key(&req.submission_id) {
            return Err(LabReviewError::not_found(format!(
                "提交不存在: {}",
                req.submission_id
            )));
        }

        state.last_comment_id += 1;
        let comment = CodeComment {
            id: state.last_comment_id,
            submission_id: req.submission_id,
            line_number: req.line_number,
            comment: req.comment,
            teacher_id: req.teacher_id,
            created_at: chrono::Utc::now(),
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn list_code_comments(&self, submission_id: i64) -> Result<Vec<CodeComment>> {
        let state = self.state.read().await;
        Ok(state
            .comments
            .values()
            .filter(|c| c.submission_id == submission_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(storage: &MemoryStorage) -> (Assignment, Submission) {
        let assignment = storage
            .create_assignment(CreateAssignmentRequest {
                title: "Lab 1".to_string(),
                description: "Sorting".to_string(),
                deadline: None,
                created_by: 1,
            })
            .await
            .unwrap();
        let submission = storage
            .create_submission(CreateSubmissionRequest {
                assignment_id: assignment.id,
                student_id: 10,
                file_reference: "ref-1".to_string(),
                file_name: "lab1.py".to_string(),
            })
            .await
            .unwrap();
        (assignment, submission)
    }

    fn verification() -> VerificationResult {
        VerificationResult {
            syntax_check_passed: true,
            syntax_errors: String::new(),
            plagiarism_score: 0.0,
            plagiarism_details: String::new(),
            verified_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_submission_rejected() {
        let storage = MemoryStorage::new();
        let (assignment, _) = seed(&storage).await;

        let err = storage
            .create_submission(CreateSubmissionRequest {
                assignment_id: assignment.id,
                student_id: 10,
                file_reference: "ref-2".to_string(),
                file_name: "lab1.py".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[tokio::test]
    async fn test_failed_transition_leaves_state() {
        let storage = MemoryStorage::new();
        let (_, submission) = seed(&storage).await;

        let review = TeacherReview {
            teacher_id: 2,
            grade: Some(90),
            comments: "ok".to_string(),
            reviewed_at: chrono::Utc::now(),
        };
        assert!(storage.record_review(submission.id, review).await.is_err());

        let stored = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.state, SubmissionState::Pending);

        storage
            .record_verification(submission.id, verification())
            .await
            .unwrap();
        let err = storage
            .record_verification(submission.id, verification())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[tokio::test]
    async fn test_comment_requires_existing_submission() {
        let storage = MemoryStorage::new();
        let err = storage
            .create_code_comment(CreateCodeCommentRequest {
                submission_id: 99,
                teacher_id: 2,
                line_number: 1,
                comment: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[tokio::test]
    async fn test_delete_assignment_returns_file_references() {
        let storage = MemoryStorage::new();
        let (assignment, submission) = seed(&storage).await;

        let references = storage.delete_assignment(assignment.id).await.unwrap();
        assert_eq!(references, Some(vec![submission.file_reference]));
        assert!(
            storage
                .get_submission_by_id(submission.id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(storage.delete_assignment(assignment.id).await.unwrap(), None);
    }
}
