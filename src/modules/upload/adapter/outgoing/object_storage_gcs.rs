use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::shared::error::StorageError;
use crate::upload::application::ports::outgoing::ObjectStorage;

/// TTL for the signed URLs the writes go through.
const SIGNED_URL_TTL: Duration = Duration::from_secs(15 * 60);

/// google-cloud-storage uses a bucket resource name format:
/// `projects/_/buckets/{bucket}`
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

fn public_url(bucket: &str, key: &str) -> String {
    format!("https://storage.googleapis.com/{}/{}", bucket, key)
}

/// Internal seam so the adapter is testable without mocking
/// google-cloud-storage types. Tests implement this with a fake.
#[async_trait]
trait GcsApi: Send + Sync {
    async fn put_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        data: &[u8],
        content_type: &str,
        ttl: Duration,
    ) -> Result<(), String>;

    async fn delete_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        ttl: Duration,
    ) -> Result<(), String>;
}

/// Production adapter. Writes go through signed URLs so only the credential
/// signer needs service-account access; objects are then readable through
/// the bucket's public endpoint.
#[derive(Clone)]
pub struct GcsObjectStorage {
    api: Arc<OnceCell<Box<dyn GcsApi>>>,
    bucket: String,
    signed_url_ttl: Duration,
}

impl GcsObjectStorage {
    /// Synchronous constructor; the client is initialized lazily on first use.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            api: Arc::new(OnceCell::new()),
            bucket: bucket.into(),
            signed_url_ttl: SIGNED_URL_TTL,
        }
    }

    async fn get_api(&self) -> Result<&dyn GcsApi, StorageError> {
        self.api
            .get_or_try_init(|| async {
                let real = RealGcsApi::new().map_err(|e| StorageError::new("gcs.init", e))?;
                Ok(Box::new(real) as Box<dyn GcsApi>)
            })
            .await
            .map(|boxed| &**boxed)
    }

    #[cfg(test)]
    fn with_api(api: Arc<dyn GcsApi>, bucket: &str) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcGcsApi(api)) as Box<dyn GcsApi>);

        Self {
            api: Arc::new(once),
            bucket: bucket.to_string(),
            signed_url_ttl: SIGNED_URL_TTL,
        }
    }
}

#[cfg(test)]
struct ArcGcsApi(Arc<dyn GcsApi>);

#[cfg(test)]
#[async_trait]
impl GcsApi for ArcGcsApi {
    async fn put_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        data: &[u8],
        content_type: &str,
        ttl: Duration,
    ) -> Result<(), String> {
        self.0
            .put_object(bucket_resource, object_name, data, content_type, ttl)
            .await
    }

    async fn delete_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        ttl: Duration,
    ) -> Result<(), String> {
        self.0.delete_object(bucket_resource, object_name, ttl).await
    }
}

#[async_trait]
impl ObjectStorage for GcsObjectStorage {
    async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let api = self.get_api().await?;

        api.put_object(
            &bucket_resource(&self.bucket),
            key,
            data,
            content_type,
            self.signed_url_ttl,
        )
        .await
        .map_err(|e| StorageError::new("gcs.put", e))?;

        Ok(public_url(&self.bucket, key))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let api = self.get_api().await?;

        api.delete_object(&bucket_resource(&self.bucket), key, self.signed_url_ttl)
            .await
            .map_err(|e| StorageError::new("gcs.delete", e))
    }
}

// ============================================================================
// Real Google Cloud Storage client (google-cloud-auth signer + reqwest)
// ============================================================================

struct RealGcsApi {
    signer: google_cloud_auth::signer::Signer,
    http: reqwest::Client,
}

impl RealGcsApi {
    fn new() -> Result<Self, String> {
        let signer = google_cloud_auth::credentials::Builder::default()
            .build_signer()
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("authorized_user") {
                    tracing::error!(
                        "Signed URLs require a service account key. \
                         Set GOOGLE_APPLICATION_CREDENTIALS to a service-account JSON (type=service_account)."
                    );
                }
                msg
            })?;

        Ok(Self {
            signer,
            http: reqwest::Client::new(),
        })
    }

    async fn sign(
        &self,
        bucket_resource: &str,
        object_name: &str,
        method: google_cloud_storage::http::Method,
        ttl: Duration,
    ) -> Result<String, String> {
        google_cloud_storage::builder::storage::SignedUrlBuilder::for_object(
            bucket_resource.to_string(),
            object_name.to_string(),
        )
        .with_method(method)
        .with_expiration(ttl)
        .sign_with(&self.signer)
        .await
        .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl GcsApi for RealGcsApi {
    async fn put_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        data: &[u8],
        content_type: &str,
        ttl: Duration,
    ) -> Result<(), String> {
        let url = self
            .sign(
                bucket_resource,
                object_name,
                google_cloud_storage::http::Method::PUT,
                ttl,
            )
            .await?;

        let response = self
            .http
            .put(url)
            .header("content-type", content_type.to_string())
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("upload rejected with status {}", response.status()));
        }

        Ok(())
    }

    async fn delete_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        ttl: Duration,
    ) -> Result<(), String> {
        let url = self
            .sign(
                bucket_resource,
                object_name,
                google_cloud_storage::http::Method::DELETE,
                ttl,
            )
            .await?;

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        // 404 counts as deleted so cleanup stays idempotent.
        if !response.status().is_success() && response.status().as_u16() != 404 {
            return Err(format!("delete rejected with status {}", response.status()));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
