use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contact-form message. `read` starts false and only ever flips to true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Submission payload. Id, read flag and timestamp are assigned by storage.
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}
