#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rust_labreview::config::UploadConfig;
use rust_labreview::errors::{LabReviewError, Result};
use rust_labreview::models::AuthContext;
use rust_labreview::models::assignments::{
    entities::Assignment, requests::CreateAssignmentRequest,
};
use rust_labreview::models::submissions::entities::Submission;
use rust_labreview::services::{
    AssignmentService, CommentService, FileStore, MemoryFileStore, SubmissionService,
    VerificationReport, Verifier,
};
use rust_labreview::storage::{Storage, memory_storage::MemoryStorage};

pub const TEACHER: AuthContext = AuthContext {
    user_id: 2,
    role: rust_labreview::models::UserRole::Teacher,
};
pub const STUDENT: AuthContext = AuthContext {
    user_id: 10,
    role: rust_labreview::models::UserRole::Student,
};

/// 可编排的验证服务：前 `slow_calls` 次调用先等待 `delay`
pub struct ScriptedVerifier {
    pub calls: AtomicUsize,
    pub delay: Duration,
    pub slow_calls: usize,
    pub score: f64,
    pub fail: bool,
}

impl ScriptedVerifier {
    pub fn passing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            slow_calls: 0,
            score: 12.5,
            fail: false,
        }
    }

    pub fn slow(delay: Duration, slow_calls: usize) -> Self {
        Self {
            delay,
            slow_calls,
            ..Self::passing()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Verifier for ScriptedVerifier {
    async fn verify(&self, content: &[u8], extension: &str) -> Result<VerificationReport> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.slow_calls {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(LabReviewError::transient_unavailable("checker offline"));
        }
        Ok(VerificationReport {
            syntax_ok: !content.is_empty(),
            syntax_errors: format!("checked {extension}"),
            plagiarism_score: self.score,
            plagiarism_details: "no matches".to_string(),
        })
    }
}

pub struct Harness {
    pub storage: Arc<dyn Storage>,
    pub files: Arc<MemoryFileStore>,
    pub verifier: Arc<ScriptedVerifier>,
    pub assignments: AssignmentService,
    pub submissions: SubmissionService,
    pub comments: CommentService,
}

impl Harness {
    pub fn new(verifier: ScriptedVerifier) -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()), verifier)
    }

    pub fn with_storage(storage: Arc<dyn Storage>, verifier: ScriptedVerifier) -> Self {
        let files = Arc::new(MemoryFileStore::new());
        let verifier = Arc::new(verifier);
        let file_store: Arc<dyn FileStore> = files.clone();

        Self {
            assignments: AssignmentService::new(storage.clone(), file_store.clone()),
            submissions: SubmissionService::new(storage.clone(), file_store, verifier.clone())
                .with_upload(UploadConfig::default())
                .with_verify_timeout(Duration::from_millis(500)),
            comments: CommentService::new(storage.clone()),
            storage,
            files,
            verifier,
        }
    }

    pub async fn assignment(&self, title: &str) -> Assignment {
        self.assignments
            .create_assignment(
                &TEACHER,
                CreateAssignmentRequest {
                    title: title.to_string(),
                    description: "Implement quicksort".to_string(),
                    deadline: Some(chrono::Utc::now() + chrono::Duration::days(7)),
                    created_by: 0,
                },
            )
            .await
            .unwrap()
    }

    pub async fn submit(&self, student: &AuthContext, assignment_id: i64) -> Submission {
        self.submissions
            .submit(student, assignment_id, "lab.py", b"def sort(xs):\n    return xs\n")
            .await
            .unwrap()
    }
}
