use async_trait::async_trait;
use uuid::Uuid;

use crate::category::domain::entities::Category;
use crate::shared::error::RepositoryError;

/// Uniform category contract. Listings order by `order_index` ascending.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Category>, RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Category>, RepositoryError>;

    /// Exact string match on the unique name.
    async fn get_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError>;

    /// Validates the name, appends at the end of the current order.
    async fn create(&self, name: &str) -> Result<Category, RepositoryError>;

    /// True when a record existed and was removed. Idempotent.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Bulk replace: every `order_index` is recomputed from array position.
    async fn reorder(&self, ordered: Vec<Category>) -> Result<(), RepositoryError>;
}
