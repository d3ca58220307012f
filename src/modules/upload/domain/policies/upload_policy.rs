//! Size ceilings and object-key layout for uploaded media.

pub const REMOTE_MAX_BYTES: u64 = 50 * 1024 * 1024;
pub const LOCAL_MAX_BYTES: u64 = 10 * 1024 * 1024;

const DEFAULT_BUCKET: &str = "portfolio-media";

/// Which slot of a project the file fills. The slot decides the key prefix
/// and the fixed file stem, so re-uploading the same slot overwrites the
/// previous object instead of piling up variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Thumbnail,
    Video,
}

impl UploadKind {
    fn prefix(self) -> &'static str {
        match self {
            UploadKind::Image => "projects",
            UploadKind::Thumbnail => "thumbnails",
            UploadKind::Video => "videos",
        }
    }

    fn stem(self) -> &'static str {
        match self {
            UploadKind::Image => "main",
            UploadKind::Thumbnail => "thumb",
            UploadKind::Video => "video",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub bucket: String,
    pub remote_max_bytes: u64,
    pub local_max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET)
    }
}

impl UploadPolicy {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            remote_max_bytes: REMOTE_MAX_BYTES,
            local_max_bytes: LOCAL_MAX_BYTES,
        }
    }

    /// `{prefix}/{owner}/{stem}.{ext}`.
    pub fn object_key(&self, kind: UploadKind, owner: &str, ext: &str) -> String {
        format!("{}/{}/{}.{}", kind.prefix(), owner, kind.stem(), ext)
    }

    /// Every key a project may have left behind, across the extensions we
    /// ever write. Used by cleanup, which tolerates misses.
    pub fn owner_variants(&self, owner: &str) -> Vec<String> {
        let mut keys = Vec::new();
        for kind in [UploadKind::Image, UploadKind::Thumbnail] {
            for ext in ["jpg", "png", "webp"] {
                keys.push(self.object_key(kind, owner, ext));
            }
        }
        for ext in ["mp4", "webm"] {
            keys.push(self.object_key(UploadKind::Video, owner, ext));
        }
        keys
    }
}
