use tracing::{info, warn};

use super::SubmissionService;
use crate::errors::{LabReviewError, Result};
use crate::models::AuthContext;
use crate::models::submissions::entities::{Submission, SubmissionStatus, VerificationResult};
use crate::services::policy::{self, Operation};
use crate::services::verification::VerificationReport;

/// 验证提交（pending → verified）
///
/// 持有提交锁完成 读取、检查、验证、写入；验证失败或超时时提交保持 pending。
pub async fn verify(
    service: &SubmissionService,
    actor: &AuthContext,
    submission_id: i64,
) -> Result<Submission> {
    policy::authorize(actor, Operation::Verify)?;

    let _guard = service.locks.acquire(submission_id).await;

    let storage = service.get_storage();
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| LabReviewError::not_found(format!("提交不存在: {submission_id}")))?;
    submission.expect_status(SubmissionStatus::Pending, "验证")?;

    let content = service
        .get_files()
        .fetch(&submission.file_reference)
        .await
        .map_err(|e| {
            LabReviewError::transient_unavailable(format!(
                "无法读取提交文件 {}: {}",
                submission.file_reference,
                e.message()
            ))
        })?;

    let extension = submission.file_extension();
    let report = match tokio::time::timeout(
        service.verify_timeout,
        service.verifier.verify(&content, &extension),
    )
    .await
    {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            warn!("Verification of submission {} failed: {}", submission_id, e);
            return Err(if e.is_retryable() {
                e
            } else {
                LabReviewError::transient_unavailable(format!("验证服务失败: {}", e.message()))
            });
        }
        Err(_) => {
            warn!(
                "Verification of submission {} timed out after {:?}",
                submission_id, service.verify_timeout
            );
            return Err(LabReviewError::transient_unavailable(format!(
                "验证服务超时（{} ms）",
                service.verify_timeout.as_millis()
            )));
        }
    };

    let result = into_verification_result(report)?;
    let updated = storage.record_verification(submission_id, result).await?;

    info!(
        "Submission {} verified by user {} (syntax ok: {})",
        submission_id,
        actor.user_id,
        updated
            .verification_result()
            .is_some_and(|r| r.syntax_check_passed)
    );
    Ok(updated)
}

/// 校验验证报告并转换为持久化结果
fn into_verification_result(report: VerificationReport) -> Result<VerificationResult> {
    if !(0.0..=100.0).contains(&report.plagiarism_score) {
        return Err(LabReviewError::transient_unavailable(format!(
            "验证服务返回了无效的查重分数: {}",
            report.plagiarism_score
        )));
    }

    Ok(VerificationResult {
        syntax_check_passed: report.syntax_ok,
        syntax_errors: report.syntax_errors,
        plagiarism_score: report.plagiarism_score,
        plagiarism_details: report.plagiarism_details,
        verified_at: chrono::Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(score: f64) -> VerificationReport {
        VerificationReport {
            syntax_ok: true,
            syntax_errors: String::new(),
            plagiarism_score: score,
            plagiarism_details: String::new(),
        }
    }

    #[test]
    fn test_score_bounds() {
        assert!(into_verification_result(report(0.0)).is_ok());
        assert!(into_verification_result(report(100.0)).is_ok());
        assert_eq!(
            into_verification_result(report(100.5)).unwrap_err().code(),
            "E005"
        );
        assert!(into_verification_result(report(-1.0)).is_err());
        assert!(into_verification_result(report(f64::NAN)).is_err());
    }
}
