mod common;

use common::{Harness, STUDENT, ScriptedVerifier, TEACHER};
use rust_labreview::models::AuthContext;
use rust_labreview::models::comments::entities::group_by_line;
use rust_labreview::models::submissions::{
    entities::SubmissionStatus,
    requests::{ReviewSubmissionRequest, SubmissionListQuery},
};
use rust_labreview::storage::Storage;

#[tokio::test]
async fn comments_require_verified_submission() {
    let h = Harness::new(ScriptedVerifier::passing());
    let assignment = h.assignment("Lab 1").await;
    let submission = h.submit(&STUDENT, assignment.id).await;

    let err = h
        .comments
        .add_comment(&TEACHER, submission.id, 3, "Off by one")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E003");

    h.submissions.verify(&TEACHER, submission.id).await.unwrap();
    h.comments
        .add_comment(&TEACHER, submission.id, 3, "Off by one")
        .await
        .unwrap();
    h.comments
        .add_comment(&TEACHER, submission.id, 1, "Missing docstring")
        .await
        .unwrap();
    h.comments
        .add_comment(&TEACHER, submission.id, 3, "Use a slice here")
        .await
        .unwrap();

    // 批注不改变状态
    let stored = h.submissions.get(&TEACHER, submission.id).await.unwrap();
    assert_eq!(stored.status(), SubmissionStatus::Verified);

    let comments = h
        .comments
        .list_comments(&STUDENT, submission.id, None)
        .await
        .unwrap();
    let texts: Vec<&str> = comments.iter().map(|c| c.comment.as_str()).collect();
    assert_eq!(texts, ["Off by one", "Missing docstring", "Use a slice here"]);

    let line_three = h
        .comments
        .list_comments(&TEACHER, submission.id, Some(3))
        .await
        .unwrap();
    assert_eq!(line_three.len(), 2);

    let grouped = group_by_line(&comments);
    assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), [1, 3]);
    assert_eq!(grouped[&3][1].comment, "Use a slice here");
}

#[tokio::test]
async fn comments_allowed_after_review() {
    let h = Harness::new(ScriptedVerifier::passing());
    let assignment = h.assignment("Lab 1").await;
    let submission = h.submit(&STUDENT, assignment.id).await;
    h.submissions.verify(&TEACHER, submission.id).await.unwrap();
    h.submissions
        .review(
            &TEACHER,
            submission.id,
            ReviewSubmissionRequest {
                grade: Some(70),
                comments: "Fine".to_string(),
            },
        )
        .await
        .unwrap();

    let comment = h
        .comments
        .add_comment(&AuthContext::admin(1), submission.id, 12, "  Nice loop  ")
        .await
        .unwrap();
    assert_eq!(comment.comment, "Nice loop");
    assert_eq!(comment.line_number, 12);
    assert_eq!(comment.teacher_id, 1);
}

#[tokio::test]
async fn comment_validation() {
    let h = Harness::new(ScriptedVerifier::passing());
    let assignment = h.assignment("Lab 1").await;
    let submission = h.submit(&STUDENT, assignment.id).await;
    h.submissions.verify(&TEACHER, submission.id).await.unwrap();

    for (line, text) in [
        (0, "zero"),
        (-4, "negative"),
        (2, "   "),
        (3_000_000_000, "past the column range"),
    ] {
        let err = h
            .comments
            .add_comment(&TEACHER, submission.id, line, text)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E004");
    }

    let err = h
        .comments
        .add_comment(&STUDENT, submission.id, 1, "self review")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E002");

    let err = h
        .comments
        .add_comment(&TEACHER, 999, 1, "ghost")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E001");

    let err = h
        .comments
        .list_comments(&AuthContext::student(77), submission.id, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E002");
}

#[tokio::test]
async fn deleting_submission_removes_only_its_comments() {
    let h = Harness::new(ScriptedVerifier::passing());
    let assignment = h.assignment("Lab 1").await;
    let first = h.submit(&STUDENT, assignment.id).await;
    let second = h.submit(&AuthContext::student(11), assignment.id).await;

    for submission in [&first, &second] {
        h.submissions.verify(&TEACHER, submission.id).await.unwrap();
        h.comments
            .add_comment(&TEACHER, submission.id, 1, "note")
            .await
            .unwrap();
    }

    h.submissions.delete(&TEACHER, first.id).await.unwrap();

    assert_eq!(
        h.submissions
            .get(&TEACHER, first.id)
            .await
            .unwrap_err()
            .code(),
        "E001"
    );
    assert!(h.storage.list_code_comments(first.id).await.unwrap().is_empty());
    assert_eq!(h.storage.list_code_comments(second.id).await.unwrap().len(), 1);
    assert_eq!(h.files.len(), 1);

    let err = h.submissions.delete(&TEACHER, first.id).await.unwrap_err();
    assert_eq!(err.code(), "E001");
}

#[tokio::test]
async fn deleting_assignment_cascades() {
    let h = Harness::new(ScriptedVerifier::passing());
    let doomed = h.assignment("Lab 1").await;
    let kept = h.assignment("Lab 2").await;

    let first = h.submit(&STUDENT, doomed.id).await;
    h.submit(&AuthContext::student(11), doomed.id).await;
    let survivor = h.submit(&STUDENT, kept.id).await;
    h.submissions.verify(&TEACHER, first.id).await.unwrap();
    h.comments
        .add_comment(&TEACHER, first.id, 4, "note")
        .await
        .unwrap();

    h.assignments
        .delete_assignment(&TEACHER, doomed.id)
        .await
        .unwrap();

    assert_eq!(
        h.assignments.get_assignment(doomed.id).await.unwrap_err().code(),
        "E001"
    );
    let remaining = h
        .storage
        .list_submissions(SubmissionListQuery::default())
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, survivor.id);
    assert!(h.storage.list_code_comments(first.id).await.unwrap().is_empty());
    assert_eq!(h.files.len(), 1);

    let err = h
        .assignments
        .delete_assignment(&TEACHER, doomed.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E001");
}

#[tokio::test]
async fn assignments_listed_newest_first() {
    let h = Harness::new(ScriptedVerifier::passing());
    let first = h.assignment("Lab 1").await;
    let second = h.assignment("Lab 2").await;

    let listed = h.assignments.list_assignments().await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|a| a.id).collect();
    assert_eq!(ids, [second.id, first.id]);
    assert_eq!(listed[0].created_by, TEACHER.user_id);
}
