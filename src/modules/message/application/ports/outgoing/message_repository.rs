use async_trait::async_trait;
use uuid::Uuid;

use crate::message::domain::entities::{Message, MessageDraft};
use crate::shared::error::RepositoryError;

/// Uniform contact-message contract, satisfied by both storage backends.
///
/// `get_all` orders by `created_at` descending. Misses are `None`/`false`,
/// never errors.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Message>, RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Message>, RepositoryError>;

    /// Validates first; no write happens on a validation failure. Assigns
    /// the id, `read = false` and `created_at = now`.
    async fn create(&self, draft: MessageDraft) -> Result<Message, RepositoryError>;

    /// True when a record existed and was removed. Idempotent.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Flips `read` to true. A no-op for unknown ids.
    async fn mark_as_read(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn unread_count(&self) -> Result<usize, RepositoryError>;
}
