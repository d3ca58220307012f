use async_trait::async_trait;

use crate::shared::error::StorageError;

/// Byte-level object storage behind the upload service. `put` upserts and
/// returns the object's public URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
