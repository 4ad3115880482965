//! SeaORM 后端（SQLite 内存库）上的存储行为

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Harness, STUDENT, ScriptedVerifier, TEACHER};
use rust_labreview::config::DatabaseConfig;
use rust_labreview::models::AuthContext;
use rust_labreview::models::submissions::{
    entities::{SubmissionStatus, TeacherReview, VerificationResult},
    requests::{CreateSubmissionRequest, ReviewSubmissionRequest, SubmissionListQuery},
};
use rust_labreview::storage::{Storage, create_storage};

async fn sqlite_storage() -> Arc<dyn Storage> {
    create_storage(&DatabaseConfig {
        backend: "sea_orm".to_string(),
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn full_lifecycle_round_trips_through_database() {
    let h = Harness::with_storage(sqlite_storage().await, ScriptedVerifier::passing());
    let assignment = h.assignment("Lab 1").await;
    assert!(assignment.deadline.is_some());

    let submission = h.submit(&STUDENT, assignment.id).await;
    assert_eq!(submission.file_name, "lab.py");

    h.submissions.verify(&TEACHER, submission.id).await.unwrap();
    h.comments
        .add_comment(&TEACHER, submission.id, 2, "Return a sorted copy")
        .await
        .unwrap();
    h.submissions
        .review(
            &TEACHER,
            submission.id,
            ReviewSubmissionRequest {
                grade: Some(85),
                comments: "Good".to_string(),
            },
        )
        .await
        .unwrap();

    let stored = h.submissions.get(&STUDENT, submission.id).await.unwrap();
    assert_eq!(stored.status(), SubmissionStatus::Reviewed);
    let result = stored.verification_result().unwrap();
    assert!(result.syntax_check_passed);
    assert_eq!(result.plagiarism_score, 12.5);
    assert_eq!(stored.teacher_review().unwrap().grade, Some(85));

    let comments = h
        .comments
        .list_comments(&STUDENT, submission.id, None)
        .await
        .unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].line_number, 2);
}

#[tokio::test]
async fn conditional_transitions_write_nothing_on_conflict() {
    let storage = sqlite_storage().await;
    let h = Harness::with_storage(storage.clone(), ScriptedVerifier::passing());
    let assignment = h.assignment("Lab 1").await;
    let submission = h.submit(&STUDENT, assignment.id).await;

    let review = TeacherReview {
        teacher_id: TEACHER.user_id,
        grade: Some(50),
        comments: "early".to_string(),
        reviewed_at: chrono::Utc::now(),
    };
    let err = storage
        .record_review(submission.id, review)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E003");

    let result = VerificationResult {
        syntax_check_passed: false,
        syntax_errors: "line 1: invalid syntax".to_string(),
        plagiarism_score: 0.0,
        plagiarism_details: String::new(),
        verified_at: chrono::Utc::now(),
    };
    storage
        .record_verification(submission.id, result.clone())
        .await
        .unwrap();
    let err = storage
        .record_verification(submission.id, result)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E003");

    let err = storage
        .record_verification(404, VerificationResult {
            syntax_check_passed: true,
            syntax_errors: String::new(),
            plagiarism_score: 0.0,
            plagiarism_details: String::new(),
            verified_at: chrono::Utc::now(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E001");

    let stored = storage
        .get_submission_by_id(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status(), SubmissionStatus::Verified);
    assert!(!stored.verification_result().unwrap().syntax_check_passed);
    assert!(stored.teacher_review().is_none());
}

#[tokio::test]
async fn duplicate_submission_is_a_conflict() {
    let storage = sqlite_storage().await;
    let h = Harness::with_storage(storage.clone(), ScriptedVerifier::passing());
    let assignment = h.assignment("Lab 1").await;
    h.submit(&STUDENT, assignment.id).await;

    let err = storage
        .create_submission(CreateSubmissionRequest {
            assignment_id: assignment.id,
            student_id: STUDENT.user_id,
            file_reference: "other".to_string(),
            file_name: "lab.py".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E003");

    let err = storage
        .create_submission(CreateSubmissionRequest {
            assignment_id: 999,
            student_id: STUDENT.user_id,
            file_reference: "other".to_string(),
            file_name: "lab.py".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E001");
}

#[tokio::test]
async fn assignment_cascade_in_database() {
    let storage = sqlite_storage().await;
    let h = Harness::with_storage(storage.clone(), ScriptedVerifier::passing());
    let doomed = h.assignment("Lab 1").await;
    let kept = h.assignment("Lab 2").await;

    let reviewed = h.submit(&STUDENT, doomed.id).await;
    let other = h.submit(&AuthContext::student(11), doomed.id).await;
    let survivor = h.submit(&STUDENT, kept.id).await;

    h.submissions.verify(&TEACHER, reviewed.id).await.unwrap();
    h.comments
        .add_comment(&TEACHER, reviewed.id, 1, "note")
        .await
        .unwrap();
    h.submissions
        .review(
            &TEACHER,
            reviewed.id,
            ReviewSubmissionRequest {
                grade: Some(60),
                comments: "ok".to_string(),
            },
        )
        .await
        .unwrap();
    h.submissions.verify(&TEACHER, survivor.id).await.unwrap();
    h.comments
        .add_comment(&TEACHER, survivor.id, 1, "keep me")
        .await
        .unwrap();

    let mut references = storage
        .delete_assignment(doomed.id)
        .await
        .unwrap()
        .unwrap();
    references.sort();
    let mut expected = vec![reviewed.file_reference.clone(), other.file_reference.clone()];
    expected.sort();
    assert_eq!(references, expected);
    assert!(storage.delete_assignment(doomed.id).await.unwrap().is_none());

    let remaining = storage
        .list_submissions(SubmissionListQuery::default())
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, survivor.id);
    assert!(remaining[0].verification_result().is_some());
    assert!(storage.list_code_comments(reviewed.id).await.unwrap().is_empty());
    assert_eq!(storage.list_code_comments(survivor.id).await.unwrap().len(), 1);
    assert!(storage.get_assignment_by_id(doomed.id).await.unwrap().is_none());

    let listed = storage.list_assignments().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, kept.id);
}

#[tokio::test]
async fn concurrent_verifies_succeed_exactly_once_in_database() {
    let h = Arc::new(Harness::with_storage(
        sqlite_storage().await,
        ScriptedVerifier::slow(Duration::from_millis(50), 1),
    ));
    let assignment = h.assignment("Lab 1").await;
    let submission = h.submit(&STUDENT, assignment.id).await;

    let first = {
        let h = h.clone();
        tokio::spawn(async move { h.submissions.verify(&TEACHER, submission.id).await })
    };
    let second = {
        let h = h.clone();
        tokio::spawn(async move { h.submissions.verify(&TEACHER, submission.id).await })
    };
    let results = [first.await.unwrap(), second.await.unwrap()];

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let conflict = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert_eq!(conflict.code(), "E003");
    assert_eq!(h.verifier.calls(), 1);

    let stored = h
        .storage
        .get_submission_by_id(submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status(), SubmissionStatus::Verified);
}

#[tokio::test]
async fn line_numbers_past_column_range_are_rejected() {
    let h = Harness::with_storage(sqlite_storage().await, ScriptedVerifier::passing());
    let assignment = h.assignment("Lab 1").await;
    let submission = h.submit(&STUDENT, assignment.id).await;
    h.submissions.verify(&TEACHER, submission.id).await.unwrap();

    let err = h
        .comments
        .add_comment(&TEACHER, submission.id, 3_000_000_000, "too far")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E004");

    let comment = h
        .comments
        .add_comment(&TEACHER, submission.id, i64::from(i32::MAX), "last line")
        .await
        .unwrap();
    assert_eq!(comment.line_number, i32::MAX as u32);
    let listed = h
        .comments
        .list_comments(&STUDENT, submission.id, None)
        .await
        .unwrap();
    assert_eq!(listed[0].line_number, i32::MAX as u32);
}
