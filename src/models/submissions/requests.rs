use serde::{Deserialize, Serialize};

use super::entities::SubmissionStatus;

/// 存储层创建提交所需数据（状态固定为 pending）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_reference: String,
    pub file_name: String,
}

/// 教师评审请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSubmissionRequest {
    pub grade: Option<i32>,
    pub comments: String,
}

/// 提交列表筛选条件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionListQuery {
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
}
