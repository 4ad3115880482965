//! 验证服务接口
//!
//! 生命周期只依赖 `Verifier`，具体的语法检查与查重由实现方决定。

pub mod command;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

pub use command::CommandVerifier;

/// 验证服务返回的原始报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub syntax_ok: bool,
    pub syntax_errors: String,
    pub plagiarism_score: f64,
    pub plagiarism_details: String,
}

#[async_trait]
pub trait Verifier: Send + Sync {
    /// 验证文件内容，`extension` 为小写且带点号的扩展名（可能为空）
    ///
    /// 外部工具不可用时返回 TransientUnavailable。
    async fn verify(&self, content: &[u8], extension: &str) -> Result<VerificationReport>;
}
