use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 实验标题
    pub title: String,
    // 实验要求描述
    pub description: String,
    // 截止时间
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    // 创建者（教师）ID
    pub created_by: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 截止时间是否已过（未设置截止时间视为永不截止）
    pub fn is_past_deadline(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.deadline.is_some_and(|deadline| now > deadline)
    }
}
