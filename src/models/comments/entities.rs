use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 行级代码批注
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodeComment {
    pub id: i64,
    pub submission_id: i64,
    // 从 1 开始
    pub line_number: u32,
    pub comment: String,
    pub teacher_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 按行号分组，便于和源码并排渲染
///
/// 行号升序，同一行内保持插入顺序。
pub fn group_by_line(comments: &[CodeComment]) -> BTreeMap<u32, Vec<&CodeComment>> {
    let mut grouped: BTreeMap<u32, Vec<&CodeComment>> = BTreeMap::new();
    for comment in comments {
        grouped.entry(comment.line_number).or_default().push(comment);
    }
    grouped
}
