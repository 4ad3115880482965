pub mod create;
pub mod delete;
pub mod list;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::AuthContext;
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use crate::services::files::FileStore;
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Arc<dyn Storage>,
    files: Arc<dyn FileStore>,
}

impl AssignmentService {
    pub fn new(storage: Arc<dyn Storage>, files: Arc<dyn FileStore>) -> Self {
        Self { storage, files }
    }

    pub(crate) fn get_storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub(crate) fn get_files(&self) -> Arc<dyn FileStore> {
        self.files.clone()
    }

    pub async fn create_assignment(
        &self,
        actor: &AuthContext,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        create::create_assignment(self, actor, req).await
    }

    pub async fn get_assignment(&self, assignment_id: i64) -> Result<Assignment> {
        list::get_assignment(self, assignment_id).await
    }

    pub async fn list_assignments(&self) -> Result<Vec<Assignment>> {
        list::list_assignments(self).await
    }

    pub async fn delete_assignment(&self, actor: &AuthContext, assignment_id: i64) -> Result<()> {
        delete::delete_assignment(self, actor, assignment_id).await
    }
}
