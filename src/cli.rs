//! 命令行入口
//!
//! 每次调用以 `--user/--role` 指定的身份执行一个生命周期操作，结果以 JSON 输出。

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};

use crate::errors::{LabReviewError, Result};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::comments::entities::group_by_line;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::requests::{ReviewSubmissionRequest, SubmissionListQuery};
use crate::models::{AuthContext, UserRole};
use crate::runtime::lifetime::startup::StartupContext;

/// Lab submission verification and review.
#[derive(Debug, Parser)]
#[command(name = "rust-labreview", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// ID of the acting user.
    #[arg(long, global = true, default_value_t = 1)]
    pub user: i64,

    /// Role of the acting user (student, teacher, admin).
    #[arg(long, global = true, default_value = "teacher")]
    pub role: UserRole,
}

impl Cli {
    pub fn actor(&self) -> AuthContext {
        AuthContext::new(self.user, self.role)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage assignments.
    Assignment {
        #[command(subcommand)]
        action: AssignmentCommand,
    },

    /// Submit a file for an assignment.
    Submit {
        assignment_id: i64,
        file: PathBuf,
    },

    /// Run verification on a pending submission.
    Verify { submission_id: i64 },

    /// Review a verified submission.
    Review {
        submission_id: i64,

        /// Grade between 0 and 100.
        #[arg(long)]
        grade: Option<i32>,

        /// Review comments.
        #[arg(long)]
        comments: String,
    },

    /// Delete a submission and its comments.
    Delete { submission_id: i64 },

    /// Show a submission.
    Show { submission_id: i64 },

    /// List submissions.
    List {
        #[arg(long)]
        assignment: Option<i64>,

        #[arg(long)]
        status: Option<SubmissionStatus>,
    },

    /// Add a line comment to a submission.
    Comment {
        submission_id: i64,
        #[arg(allow_negative_numbers = true)]
        line: i64,
        text: String,
    },

    /// List comments of a submission.
    Comments {
        submission_id: i64,

        /// Only comments on this line.
        #[arg(long)]
        line: Option<u32>,

        /// Group comments by line number.
        #[arg(long, default_value_t = false)]
        grouped: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum AssignmentCommand {
    /// Create an assignment.
    Create {
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// RFC 3339 timestamp, e.g. 2026-12-31T23:59:59Z.
        #[arg(long)]
        deadline: Option<DateTime<Utc>>,
    },

    /// List assignments, newest first.
    List,

    /// Show an assignment.
    Show { assignment_id: i64 },

    /// Delete an assignment with all its submissions.
    Delete { assignment_id: i64 },
}

/// 执行命令并返回 JSON 结果
pub async fn execute(
    command: Command,
    actor: &AuthContext,
    context: &StartupContext,
) -> Result<Value> {
    match command {
        Command::Assignment { action } => {
            let service = context.assignment_service();
            match action {
                AssignmentCommand::Create {
                    title,
                    description,
                    deadline,
                } => {
                    let req = CreateAssignmentRequest {
                        title,
                        description,
                        deadline,
                        created_by: actor.user_id,
                    };
                    to_json(&service.create_assignment(actor, req).await?)
                }
                AssignmentCommand::List => to_json(&service.list_assignments().await?),
                AssignmentCommand::Show { assignment_id } => {
                    to_json(&service.get_assignment(assignment_id).await?)
                }
                AssignmentCommand::Delete { assignment_id } => {
                    service.delete_assignment(actor, assignment_id).await?;
                    Ok(json!({ "deleted": assignment_id }))
                }
            }
        }
        Command::Submit {
            assignment_id,
            file,
        } => {
            let content = tokio::fs::read(&file).await.map_err(|e| {
                LabReviewError::file_operation(format!("无法读取 {}: {e}", file.display()))
            })?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let submission = context
                .submission_service()
                .submit(actor, assignment_id, &file_name, &content)
                .await?;
            to_json(&submission)
        }
        Command::Verify { submission_id } => {
            to_json(&context.submission_service().verify(actor, submission_id).await?)
        }
        Command::Review {
            submission_id,
            grade,
            comments,
        } => {
            let req = ReviewSubmissionRequest { grade, comments };
            to_json(
                &context
                    .submission_service()
                    .review(actor, submission_id, req)
                    .await?,
            )
        }
        Command::Delete { submission_id } => {
            context
                .submission_service()
                .delete(actor, submission_id)
                .await?;
            Ok(json!({ "deleted": submission_id }))
        }
        Command::Show { submission_id } => {
            to_json(&context.submission_service().get(actor, submission_id).await?)
        }
        Command::List { assignment, status } => {
            let query = SubmissionListQuery {
                assignment_id: assignment,
                student_id: None,
                status,
            };
            to_json(&context.submission_service().list(actor, query).await?)
        }
        Command::Comment {
            submission_id,
            line,
            text,
        } => to_json(
            &context
                .comment_service()
                .add_comment(actor, submission_id, line, &text)
                .await?,
        ),
        Command::Comments {
            submission_id,
            line,
            grouped,
        } => {
            let comments = context
                .comment_service()
                .list_comments(actor, submission_id, line)
                .await?;
            if grouped {
                to_json(&group_by_line(&comments))
            } else {
                to_json(&comments)
            }
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// 错误输出格式
pub fn error_json(err: &LabReviewError) -> Value {
    json!({
        "code": err.code(),
        "error_type": err.error_type(),
        "message": err.message(),
    })
}
