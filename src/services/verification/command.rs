use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{VerificationReport, Verifier};
use crate::config::{SyntaxCheckerConfig, VerificationConfig};
use crate::errors::{LabReviewError, Result};

pub const UNSUPPORTED_SYNTAX_MESSAGE: &str = "File type not supported for syntax checking.";
pub const SYNTAX_OK_MESSAGE: &str = "No syntax errors found.";
pub const PLAGIARISM_NOT_CONFIGURED: &str = "Plagiarism checking is not configured.";

/// 调用外部程序做语法检查的验证服务
///
/// 按扩展名选择检查程序，参数中的 `{file}` 替换为临时文件路径。
/// 退出码为 0 视为通过。子进程随 future 一起被丢弃时会被终止。
#[derive(Debug, Clone)]
pub struct CommandVerifier {
    work_dir: PathBuf,
    checkers: Vec<SyntaxCheckerConfig>,
}

// 离开作用域时删除临时文件
struct TempSource {
    path: PathBuf,
}

impl Drop for TempSource {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!("Failed to remove {}: {}", self.path.display(), e);
        }
    }
}

impl CommandVerifier {
    pub fn new(config: &VerificationConfig) -> Self {
        Self {
            work_dir: PathBuf::from(&config.work_dir),
            checkers: config.checkers.clone(),
        }
    }

    fn checker_for(&self, extension: &str) -> Option<&SyntaxCheckerConfig> {
        if extension.is_empty() {
            return None;
        }
        self.checkers.iter().find(|checker| {
            checker
                .extensions
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
        })
    }

    async fn write_source(&self, content: &[u8], extension: &str) -> Result<TempSource> {
        tokio::fs::create_dir_all(&self.work_dir)
            .await
            .map_err(|e| {
                LabReviewError::transient_unavailable(format!("无法创建验证工作目录: {e}"))
            })?;

        let path = self
            .work_dir
            .join(format!("{}{}", uuid::Uuid::new_v4(), extension));
        tokio::fs::write(&path, content).await.map_err(|e| {
            LabReviewError::transient_unavailable(format!("无法写入待验证文件: {e}"))
        })?;
        Ok(TempSource { path })
    }

    async fn run_checker(
        &self,
        checker: &SyntaxCheckerConfig,
        file: &Path,
    ) -> Result<(bool, String)> {
        let file_arg = file.to_string_lossy();
        let args: Vec<String> = checker
            .args
            .iter()
            .map(|arg| arg.replace("{file}", &file_arg))
            .collect();

        debug!("Running syntax checker: {} {:?}", checker.program, args);

        let output = Command::new(&checker.program)
            .args(&args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                LabReviewError::transient_unavailable(format!(
                    "语法检查程序 {} 无法启动: {e}",
                    checker.program
                ))
            })?;

        if output.status.success() {
            return Ok((true, SYNTAX_OK_MESSAGE.to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let errors = if stdout.trim().is_empty() {
            stderr.trim()
        } else {
            stdout.trim()
        };
        Ok((false, errors.to_string()))
    }
}

#[async_trait]
impl Verifier for CommandVerifier {
    async fn verify(&self, content: &[u8], extension: &str) -> Result<VerificationReport> {
        let (syntax_ok, syntax_errors) = match self.checker_for(extension) {
            Some(checker) => {
                let source = self.write_source(content, extension).await?;
                self.run_checker(checker, &source.path).await?
            }
            None => (true, UNSUPPORTED_SYNTAX_MESSAGE.to_string()),
        };

        Ok(VerificationReport {
            syntax_ok,
            syntax_errors,
            plagiarism_score: 0.0,
            plagiarism_details: PLAGIARISM_NOT_CONFIGURED.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier(dir: &Path, checkers: Vec<SyntaxCheckerConfig>) -> CommandVerifier {
        CommandVerifier::new(&VerificationConfig {
            timeout_ms: 1_000,
            work_dir: dir.to_string_lossy().into_owned(),
            checkers,
        })
    }

    fn shell_checker(script: &str) -> SyntaxCheckerConfig {
        SyntaxCheckerConfig {
            extensions: vec![".py".to_string()],
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string(), "{file}".to_string()],
        }
    }

    #[tokio::test]
    async fn test_unsupported_extension_passes() {
        let dir = tempfile::tempdir().unwrap();
        let report = verifier(dir.path(), vec![])
            .verify(b"hello", ".txt")
            .await
            .unwrap();
        assert!(report.syntax_ok);
        assert_eq!(report.syntax_errors, UNSUPPORTED_SYNTAX_MESSAGE);
        assert_eq!(report.plagiarism_score, 0.0);
        assert_eq!(report.plagiarism_details, PLAGIARISM_NOT_CONFIGURED);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_checker_exit_status() {
        let dir = tempfile::tempdir().unwrap();

        let ok = verifier(dir.path(), vec![shell_checker("test -s \"$0\"")])
            .verify(b"print(1)\n", ".py")
            .await
            .unwrap();
        assert!(ok.syntax_ok);
        assert_eq!(ok.syntax_errors, SYNTAX_OK_MESSAGE);

        let failed = verifier(
            dir.path(),
            vec![shell_checker("echo \"E0001 syntax-error\" >&2; exit 2")],
        )
        .verify(b"print(\n", ".PY")
        .await
        .unwrap();
        assert!(!failed.syntax_ok);
        assert_eq!(failed.syntax_errors, "E0001 syntax-error");

        // 临时文件已清理
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_missing_program_is_transient() {
        let dir = tempfile::tempdir().unwrap();
        let checker = SyntaxCheckerConfig {
            extensions: vec![".py".to_string()],
            program: "labreview-no-such-checker".to_string(),
            args: vec!["{file}".to_string()],
        };
        let err = verifier(dir.path(), vec![checker])
            .verify(b"print(1)", ".py")
            .await
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
