//! 提交及其生命周期状态
//!
//! 状态、验证结果与评审合并为一个枚举 [`SubmissionState`]，
//! 状态机只允许 pending → verified → reviewed 两步前进。

use serde::{Deserialize, Serialize};

use crate::errors::{LabReviewError, Result};

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,  // 待验证
    Verified, // 已验证，待评审
    Reviewed, // 已评审（终态）
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const VERIFIED: &'static str = "verified";
    pub const REVIEWED: &'static str = "reviewed";

    /// 状态机中的下一个状态，终态返回 None
    pub fn next(&self) -> Option<SubmissionStatus> {
        match self {
            SubmissionStatus::Pending => Some(SubmissionStatus::Verified),
            SubmissionStatus::Verified => Some(SubmissionStatus::Reviewed),
            SubmissionStatus::Reviewed => None,
        }
    }

    pub fn can_transition_to(&self, target: SubmissionStatus) -> bool {
        self.next() == Some(target)
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "{}", SubmissionStatus::PENDING),
            SubmissionStatus::Verified => write!(f, "{}", SubmissionStatus::VERIFIED),
            SubmissionStatus::Reviewed => write!(f, "{}", SubmissionStatus::REVIEWED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            SubmissionStatus::PENDING => Ok(SubmissionStatus::Pending),
            SubmissionStatus::VERIFIED => Ok(SubmissionStatus::Verified),
            SubmissionStatus::REVIEWED => Ok(SubmissionStatus::Reviewed),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

/// 自动验证结果，附加后不再修改
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerificationResult {
    pub syntax_check_passed: bool,
    pub syntax_errors: String,
    // 0-100
    pub plagiarism_score: f64,
    pub plagiarism_details: String,
    pub verified_at: chrono::DateTime<chrono::Utc>,
}

/// 教师评审
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeacherReview {
    pub teacher_id: i64,
    // 0-100，可为空（只写评语不打分）
    pub grade: Option<i32>,
    pub comments: String,
    pub reviewed_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionState {
    Pending,
    Verified {
        verification_result: VerificationResult,
    },
    Reviewed {
        verification_result: VerificationResult,
        teacher_review: TeacherReview,
    },
}

impl SubmissionState {
    pub fn status(&self) -> SubmissionStatus {
        match self {
            SubmissionState::Pending => SubmissionStatus::Pending,
            SubmissionState::Verified { .. } => SubmissionStatus::Verified,
            SubmissionState::Reviewed { .. } => SubmissionStatus::Reviewed,
        }
    }

    pub fn verification_result(&self) -> Option<&VerificationResult> {
        match self {
            SubmissionState::Pending => None,
            SubmissionState::Verified {
                verification_result,
            }
            | SubmissionState::Reviewed {
                verification_result,
                ..
            } => Some(verification_result),
        }
    }

    pub fn teacher_review(&self) -> Option<&TeacherReview> {
        match self {
            SubmissionState::Reviewed { teacher_review, .. } => Some(teacher_review),
            _ => None,
        }
    }

    /// pending → verified
    pub fn verify(self, result: VerificationResult) -> Result<Self> {
        match self {
            SubmissionState::Pending => Ok(SubmissionState::Verified {
                verification_result: result,
            }),
            other => Err(LabReviewError::state_conflict(format!(
                "提交当前状态为 {}，只有 pending 状态的提交可以验证",
                other.status()
            ))),
        }
    }

    /// verified → reviewed
    pub fn review(self, review: TeacherReview) -> Result<Self> {
        match self {
            SubmissionState::Verified {
                verification_result,
            } => Ok(SubmissionState::Reviewed {
                verification_result,
                teacher_review: review,
            }),
            other => Err(LabReviewError::state_conflict(format!(
                "提交当前状态为 {}，只有 verified 状态的提交可以评审",
                other.status()
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    // 文件存储返回的引用
    pub file_reference: String,
    // 原始文件名
    pub file_name: String,
    #[serde(flatten)]
    pub state: SubmissionState,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    pub fn status(&self) -> SubmissionStatus {
        self.state.status()
    }

    pub fn verification_result(&self) -> Option<&VerificationResult> {
        self.state.verification_result()
    }

    pub fn teacher_review(&self) -> Option<&TeacherReview> {
        self.state.teacher_review()
    }

    /// 小写扩展名（含点号），没有扩展名时为空串
    pub fn file_extension(&self) -> String {
        crate::utils::file_extension(&self.file_name)
    }

    /// 要求提交处于指定状态，否则返回状态冲突
    pub fn expect_status(&self, expected: SubmissionStatus, action: &str) -> Result<()> {
        let current = self.status();
        if current == expected {
            Ok(())
        } else {
            Err(LabReviewError::state_conflict(format!(
                "提交 {} 当前状态为 {current}，需要 {expected} 状态才能{action}",
                self.id
            )))
        }
    }
}
