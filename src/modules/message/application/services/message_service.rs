use std::sync::Arc;

use uuid::Uuid;

use crate::message::application::ports::outgoing::MessageRepository;
use crate::message::domain::entities::{Message, MessageDraft};
use crate::shared::error::RepositoryError;

/// Thin façade over the contact-message repository.
#[derive(Clone)]
pub struct MessageService {
    repository: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_messages(&self) -> Result<Vec<Message>, RepositoryError> {
        self.repository.get_all().await
    }

    pub async fn get_message_by_id(&self, id: Uuid) -> Result<Option<Message>, RepositoryError> {
        self.repository.get_by_id(id).await
    }

    pub async fn submit_message(&self, draft: MessageDraft) -> Result<Message, RepositoryError> {
        self.repository.create(draft).await
    }

    pub async fn delete_message(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.repository.delete(id).await
    }

    pub async fn mark_as_read(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repository.mark_as_read(id).await
    }

    pub async fn unread_count(&self) -> Result<usize, RepositoryError> {
        self.repository.unread_count().await
    }
}
