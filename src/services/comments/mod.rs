pub mod add;
pub mod list;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::AuthContext;
use crate::models::comments::entities::CodeComment;
use crate::storage::Storage;

/// 行级代码批注，与评分流程相互独立
pub struct CommentService {
    storage: Arc<dyn Storage>,
}

impl CommentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub async fn add_comment(
        &self,
        actor: &AuthContext,
        submission_id: i64,
        line_number: i64,
        text: &str,
    ) -> Result<CodeComment> {
        add::add_comment(self, actor, submission_id, line_number, text).await
    }

    /// 按插入顺序列出批注，可按行号筛选
    pub async fn list_comments(
        &self,
        actor: &AuthContext,
        submission_id: i64,
        line_number: Option<u32>,
    ) -> Result<Vec<CodeComment>> {
        list::list_comments(self, actor, submission_id, line_number).await
    }
}
