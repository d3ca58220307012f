use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::{info, warn};

use crate::shared::error::StorageError;
use crate::upload::application::ports::outgoing::ObjectStorage;
use crate::upload::domain::policies::{UploadKind, UploadPolicy};

/// Multiple of 3 so no chunk ends in base64 padding.
const ENCODE_CHUNK: usize = 3 * 64 * 1024;

#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Observable upload state. The error is sticky: it survives until
/// `clear_error` or the next `process_file`.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadState {
    pub uploading: bool,
    pub progress: u8,
    pub error: Option<String>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            uploading: false,
            progress: 0,
            error: None,
        }
    }
}

/// With remote storage bound, files land in the bucket and resolve to public
/// URLs. Without it, files are inlined as base64 data URLs so they live
/// inside the record itself, under a tighter ceiling.
pub struct UploadService {
    storage: Option<Arc<dyn ObjectStorage>>,
    policy: UploadPolicy,
    state: Mutex<UploadState>,
}

impl UploadService {
    pub fn new(storage: Option<Arc<dyn ObjectStorage>>, policy: UploadPolicy) -> Self {
        Self {
            storage,
            policy,
            state: Mutex::new(UploadState::default()),
        }
    }

    pub fn state(&self) -> UploadState {
        self.lock_state().clone()
    }

    pub fn clear_error(&self) {
        self.lock_state().error = None;
    }

    // A panicked holder left the state inconsistent at worst, not invalid.
    fn lock_state(&self) -> std::sync::MutexGuard<'_, UploadState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, uploading: bool, progress: u8, error: Option<String>) {
        *self.lock_state() = UploadState {
            uploading,
            progress,
            error,
        };
    }

    fn set_progress(&self, progress: u8) {
        self.lock_state().progress = progress;
    }

    /// Stores the file under the owner's slot and hands the resulting URL to
    /// `on_url_ready`. `None` on failure, with the reason left in the state;
    /// the callback is never invoked then. The size ceiling is checked before
    /// any byte is processed.
    pub async fn process_file<F>(
        &self,
        file: UploadFile,
        kind: UploadKind,
        owner: &str,
        on_url_ready: F,
    ) -> Option<String>
    where
        F: FnOnce(&str),
    {
        self.set_state(true, 0, None);

        let max_bytes = if self.storage.is_some() {
            self.policy.remote_max_bytes
        } else {
            self.policy.local_max_bytes
        };

        if file.data.len() as u64 > max_bytes {
            let limit_mb = max_bytes / (1024 * 1024);
            self.set_state(
                false,
                0,
                Some(format!("file exceeds the {limit_mb}MB upload limit")),
            );
            return None;
        }

        let result = match &self.storage {
            Some(storage) => self.upload_remote(storage.as_ref(), &file, kind, owner).await,
            None => Ok(self.encode_local(&file)),
        };

        match result {
            Ok(url) => {
                self.set_state(false, 100, None);
                on_url_ready(&url);
                Some(url)
            }
            Err(err) => {
                warn!(op = %err.op, "upload failed: {}", err.message);
                self.set_state(false, 0, Some(err.message));
                None
            }
        }
    }

    async fn upload_remote(
        &self,
        storage: &dyn ObjectStorage,
        file: &UploadFile,
        kind: UploadKind,
        owner: &str,
    ) -> Result<String, StorageError> {
        let key = self.policy.object_key(kind, owner, &extension_of(file));
        self.set_progress(30);

        let url = storage.put(&key, &file.data, &file.content_type).await?;
        info!(key = %key, "uploaded object");
        Ok(url)
    }

    fn encode_local(&self, file: &UploadFile) -> String {
        let total = file.data.len().max(1);
        let mut encoded = String::with_capacity(file.data.len() * 4 / 3 + 4);
        let mut processed = 0usize;

        for chunk in file.data.chunks(ENCODE_CHUNK) {
            encoded.push_str(&BASE64.encode(chunk));
            processed += chunk.len();
            self.set_progress((processed * 100 / total) as u8);
        }

        format!("data:{};base64,{}", file.content_type, encoded)
    }

    /// Deletes every variant the owner may have stored. Misses and individual
    /// failures are logged and swallowed: losing an orphan object is cheaper
    /// than failing the record deletion that triggered the cleanup.
    pub async fn delete_owner_files(&self, owner: &str) {
        let Some(storage) = &self.storage else {
            return;
        };

        for key in self.policy.owner_variants(owner) {
            if let Err(err) = storage.delete(&key).await {
                warn!(key = %key, "cleanup skip: {}", err.message);
            }
        }
    }
}

fn extension_of(file: &UploadFile) -> String {
    file.name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| {
            file.content_type
                .rsplit_once('/')
                .map(|(_, sub)| sub.to_lowercase())
                .unwrap_or_else(|| "bin".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FakeObjectStorage {
        put_keys: Mutex<Vec<String>>,
        deleted_keys: Mutex<Vec<String>>,
        fail_deletes: bool,
    }

    impl FakeObjectStorage {
        fn new() -> Self {
            Self {
                put_keys: Mutex::new(Vec::new()),
                deleted_keys: Mutex::new(Vec::new()),
                fail_deletes: false,
            }
        }

        fn failing_deletes() -> Self {
            Self {
                fail_deletes: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl ObjectStorage for FakeObjectStorage {
        async fn put(
            &self,
            key: &str,
            _data: &[u8],
            _content_type: &str,
        ) -> Result<String, StorageError> {
            self.put_keys.lock().unwrap().push(key.to_string());
            Ok(format!("https://storage.example.com/bucket/{key}"))
        }

        async fn delete(&self, key: &str) -> Result<(), StorageError> {
            self.deleted_keys.lock().unwrap().push(key.to_string());
            if self.fail_deletes {
                return Err(StorageError::new("storage.delete", "object missing"));
            }
            Ok(())
        }
    }

    fn png(len: usize) -> UploadFile {
        UploadFile {
            name: "banner.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0u8; len],
        }
    }

    fn local_service() -> UploadService {
        UploadService::new(None, UploadPolicy::default())
    }

    #[tokio::test]
    async fn local_upload_yields_a_data_url_and_full_progress() {
        let service = local_service();
        let called = AtomicBool::new(false);

        let url = service
            .process_file(png(5 * 1024 * 1024), UploadKind::Image, "abc", |u| {
                assert!(u.starts_with("data:image/png;base64,"));
                called.store(true, Ordering::SeqCst);
            })
            .await
            .unwrap();

        assert!(called.load(Ordering::SeqCst));
        assert!(!url.is_empty());

        let state = service.state();
        assert!(!state.uploading);
        assert_eq!(state.progress, 100);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn local_encoding_round_trips() {
        let service = local_service();
        let data: Vec<u8> = (0..=255u8).cycle().take(ENCODE_CHUNK + 17).collect();
        let file = UploadFile {
            data: data.clone(),
            ..png(0)
        };

        let url = service
            .process_file(file, UploadKind::Image, "abc", |_| {})
            .await
            .unwrap();

        let encoded = url.strip_prefix("data:image/png;base64,").unwrap();
        assert_eq!(BASE64.decode(encoded).unwrap(), data);
    }

    #[tokio::test]
    async fn oversized_local_file_is_rejected_before_encoding() {
        let service = local_service();
        let called = AtomicBool::new(false);

        let result = service
            .process_file(png(11 * 1024 * 1024), UploadKind::Image, "abc", |_| {
                called.store(true, Ordering::SeqCst);
            })
            .await;

        assert!(result.is_none());
        assert!(!called.load(Ordering::SeqCst));

        let state = service.state();
        assert!(!state.uploading);
        assert!(state.error.as_deref().unwrap().contains("10MB"));

        // sticky until cleared
        assert!(service.state().error.is_some());
        service.clear_error();
        assert_eq!(service.state().error, None);
    }

    #[tokio::test]
    async fn next_upload_clears_a_previous_error() {
        let service = local_service();

        service
            .process_file(png(11 * 1024 * 1024), UploadKind::Image, "abc", |_| {})
            .await;
        assert!(service.state().error.is_some());

        service
            .process_file(png(16), UploadKind::Image, "abc", |_| {})
            .await
            .unwrap();
        assert_eq!(service.state().error, None);
    }

    #[tokio::test]
    async fn remote_upload_uses_the_slot_key_and_returned_url() {
        let storage = Arc::new(FakeObjectStorage::new());
        let service = UploadService::new(
            Some(Arc::clone(&storage) as Arc<dyn ObjectStorage>),
            UploadPolicy::default(),
        );

        let url = service
            .process_file(png(1024), UploadKind::Thumbnail, "abc", |_| {})
            .await
            .unwrap();

        assert_eq!(url, "https://storage.example.com/bucket/thumbnails/abc/thumb.png");
        assert_eq!(
            storage.put_keys.lock().unwrap().as_slice(),
            ["thumbnails/abc/thumb.png"]
        );
    }

    #[tokio::test]
    async fn remote_ceiling_is_fifty_megabytes() {
        let storage = Arc::new(FakeObjectStorage::new());
        let service = UploadService::new(
            Some(Arc::clone(&storage) as Arc<dyn ObjectStorage>),
            UploadPolicy::default(),
        );

        let result = service
            .process_file(png(51 * 1024 * 1024), UploadKind::Image, "abc", |_| {})
            .await;

        assert!(result.is_none());
        assert!(service.state().error.as_deref().unwrap().contains("50MB"));
        assert!(storage.put_keys.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cleanup_attempts_every_variant_and_swallows_failures() {
        let storage = Arc::new(FakeObjectStorage::failing_deletes());
        let service = UploadService::new(
            Some(Arc::clone(&storage) as Arc<dyn ObjectStorage>),
            UploadPolicy::default(),
        );

        service.delete_owner_files("abc").await;

        let deleted = storage.deleted_keys.lock().unwrap();
        assert_eq!(deleted.len(), 8);
        assert!(deleted.contains(&"projects/abc/main.webp".to_string()));
        assert!(deleted.contains(&"videos/abc/video.mp4".to_string()));
    }

    #[test]
    fn state_survives_a_poisoned_lock() {
        let service = Arc::new(local_service());

        let holder = Arc::clone(&service);
        let _ = std::thread::spawn(move || {
            let _guard = holder.state.lock().unwrap();
            panic!("poison the state lock");
        })
        .join();

        assert_eq!(service.state(), UploadState::default());
        service.clear_error();
        service.set_progress(40);
        assert_eq!(service.state().progress, 40);
    }

    #[test]
    fn extension_falls_back_to_the_content_type() {
        let mut file = png(1);
        file.name = "noextension".to_string();
        assert_eq!(extension_of(&file), "png");

        file.name = "Upper.JPG".to_string();
        assert_eq!(extension_of(&file), "jpg");
    }
}
