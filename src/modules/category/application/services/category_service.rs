use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::category::application::ports::outgoing::CategoryRepository;
use crate::category::domain::entities::Category;
use crate::shared::error::RepositoryError;

/// What a reorder attempt ended up as. Callers apply the new order
/// optimistically; `Reverted` hands back the last order storage actually
/// holds so the caller can roll its view back.
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome {
    Applied,
    Reverted(Vec<Category>),
}

#[derive(Clone)]
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        self.repository.get_all().await
    }

    /// False, with no write, when the exact name already exists.
    pub async fn add_category(&self, name: &str) -> Result<bool, RepositoryError> {
        if self.repository.get_by_name(name).await?.is_some() {
            return Ok(false);
        }

        self.repository.create(name).await?;
        Ok(true)
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.repository.delete(id).await
    }

    /// Tentative apply + compensating re-fetch: the caller shows `ordered`
    /// immediately; when the write fails we re-fetch the stored order and
    /// return it so the caller can revert. The write itself is never retried.
    pub async fn reorder_categories(
        &self,
        ordered: Vec<Category>,
    ) -> Result<ReorderOutcome, RepositoryError> {
        match self.repository.reorder(ordered).await {
            Ok(()) => Ok(ReorderOutcome::Applied),
            Err(RepositoryError::Storage(err)) => {
                warn!(op = %err.op, "category reorder failed, re-fetching stored order");
                let last_known_good = self.repository.get_all().await?;
                Ok(ReorderOutcome::Reverted(last_known_good))
            }
            Err(other) => Err(other),
        }
    }
}
