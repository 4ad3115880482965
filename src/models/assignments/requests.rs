use serde::{Deserialize, Serialize};

/// 创建实验作业
///
/// `created_by` 由服务层根据调用方身份填写。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub description: String,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip)]
    pub created_by: i64,
}
