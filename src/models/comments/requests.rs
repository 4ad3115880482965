use serde::{Deserialize, Serialize};

/// 存储层创建批注所需数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCodeCommentRequest {
    pub submission_id: i64,
    pub teacher_id: i64,
    pub line_number: u32,
    pub comment: String,
}
