use async_trait::async_trait;
use uuid::Uuid;

use crate::project::domain::entities::{Project, ProjectDraft, ProjectPatch};
use crate::shared::error::RepositoryError;

/// Sentinel category that bypasses filtering in `get_by_category`.
pub const ALL_CATEGORIES: &str = "all";

/// Uniform project contract, satisfied by both storage backends.
///
/// `get_all` (and every listing operation) orders by `created_at`
/// descending. Misses are `None`/`false`, never errors.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Project>, RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError>;

    /// Validates first; no write happens on a validation failure. Assigns
    /// `id` when the draft does not carry one, and `created_at = now`.
    async fn create(&self, draft: ProjectDraft) -> Result<Project, RepositoryError>;

    /// Merges the patch onto the stored record, revalidates the merged
    /// result, then writes. `None` without a write when `id` is unknown.
    async fn update(&self, id: Uuid, patch: ProjectPatch)
        -> Result<Option<Project>, RepositoryError>;

    /// True when a record existed and was removed. Idempotent.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;

    async fn get_by_category(&self, category: &str) -> Result<Vec<Project>, RepositoryError>;

    /// Case-insensitive substring match on the title.
    async fn search_by_title(&self, query: &str) -> Result<Vec<Project>, RepositoryError>;
}
