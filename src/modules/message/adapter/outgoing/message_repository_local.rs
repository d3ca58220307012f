use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::message::application::ports::outgoing::MessageRepository;
use crate::message::domain::entities::{Message, MessageDraft};
use crate::message::domain::schema::validate_draft;
use crate::shared::error::RepositoryError;
use crate::shared::local_store::LocalStore;

const KEY: &str = "portfolio_messages";

/// Local-store implementation: read the collection, operate in memory,
/// write back. Ordering is applied on every read.
#[derive(Clone)]
pub struct MessageRepositoryLocal {
    store: Arc<LocalStore>,
}

impl MessageRepositoryLocal {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<Message>, RepositoryError> {
        Ok(self.store.get::<Vec<Message>>(KEY)?.unwrap_or_default())
    }

    fn save(&self, messages: &[Message]) -> Result<(), RepositoryError> {
        Ok(self.store.set(KEY, &messages)?)
    }
}

fn newest_first(mut messages: Vec<Message>) -> Vec<Message> {
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    messages
}

#[async_trait]
impl MessageRepository for MessageRepositoryLocal {
    async fn get_all(&self) -> Result<Vec<Message>, RepositoryError> {
        Ok(newest_first(self.load()?))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Message>, RepositoryError> {
        Ok(self.load()?.into_iter().find(|m| m.id == id))
    }

    async fn create(&self, draft: MessageDraft) -> Result<Message, RepositoryError> {
        let draft = validate_draft(draft)?;

        let message = Message {
            id: Uuid::new_v4(),
            name: draft.name,
            email: draft.email,
            subject: draft.subject,
            body: draft.body,
            read: false,
            created_at: Utc::now(),
        };

        let mut messages = self.load()?;
        messages.push(message.clone());
        self.save(&messages)?;

        Ok(message)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut messages = self.load()?;
        let before = messages.len();
        messages.retain(|m| m.id != id);

        if messages.len() == before {
            return Ok(false);
        }

        self.save(&messages)?;
        Ok(true)
    }

    async fn mark_as_read(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut messages = self.load()?;

        let Some(message) = messages.iter_mut().find(|m| m.id == id) else {
            return Ok(());
        };

        if !message.read {
            message.read = true;
            self.save(&messages)?;
        }

        Ok(())
    }

    async fn unread_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.load()?.iter().filter(|m| !m.read).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, MessageRepositoryLocal) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LocalStore::open(dir.path()).unwrap());
        (dir, MessageRepositoryLocal::new(store))
    }

    fn draft(subject: &str) -> MessageDraft {
        MessageDraft {
            name: "Jane Client".to_string(),
            email: "jane@example.com".to_string(),
            subject: subject.to_string(),
            body: "I would like a banner set for a product launch.".to_string(),
        }
    }

    #[tokio::test]
    async fn create_starts_unread_with_assigned_id() {
        let (_dir, repo) = repo();
        let message = repo.create(draft("Quote request")).await.unwrap();

        assert!(!message.read);
        assert_eq!(repo.get_by_id(message.id).await.unwrap(), Some(message));
    }

    #[tokio::test]
    async fn invalid_submission_fails_without_a_write() {
        let (_dir, repo) = repo();

        let mut bad = draft("Quote request");
        bad.body = "short".to_string();
        let result = repo.create(bad).await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));

        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_all_orders_newest_first() {
        let (_dir, repo) = repo();
        repo.create(draft("First")).await.unwrap();
        repo.create(draft("Second")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].created_at >= all[1].created_at);
    }

    #[tokio::test]
    async fn mark_as_read_flips_once_and_ignores_unknown_ids() {
        let (_dir, repo) = repo();
        let message = repo.create(draft("Quote request")).await.unwrap();

        assert_eq!(repo.unread_count().await.unwrap(), 1);

        repo.mark_as_read(message.id).await.unwrap();
        assert_eq!(repo.unread_count().await.unwrap(), 0);
        assert!(repo.get_by_id(message.id).await.unwrap().unwrap().read);

        // already read and unknown ids are both no-ops
        repo.mark_as_read(message.id).await.unwrap();
        repo.mark_as_read(Uuid::new_v4()).await.unwrap();
        assert_eq!(repo.unread_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_existed() {
        let (_dir, repo) = repo();
        let message = repo.create(draft("Quote request")).await.unwrap();

        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
        assert!(repo.delete(message.id).await.unwrap());
        assert!(!repo.delete(message.id).await.unwrap());
    }
}
