use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::message::adapter::outgoing::sea_orm_entity::messages::{
    self, ActiveModel, Column, Entity,
};
use crate::message::application::ports::outgoing::MessageRepository;
use crate::message::domain::entities::{Message, MessageDraft};
use crate::message::domain::schema::validate_draft;
use crate::shared::error::{RepositoryError, StorageError};

// ============================================================================
// Repository Implementation
// ============================================================================

#[derive(Clone)]
pub struct MessageRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl MessageRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageRepository for MessageRepositoryPostgres {
    async fn get_all(&self) -> Result<Vec<Message>, RepositoryError> {
        let models = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err("messages.get_all"))?;

        Ok(models.into_iter().map(model_to_message).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Message>, RepositoryError> {
        let model = Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err("messages.get_by_id"))?;

        Ok(model.map(model_to_message))
    }

    async fn create(&self, draft: MessageDraft) -> Result<Message, RepositoryError> {
        let draft = validate_draft(draft)?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(draft.name),
            email: Set(draft.email),
            subject: Set(draft.subject),
            body: Set(draft.body),
            read: Set(false),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let created = model
            .insert(&*self.db)
            .await
            .map_err(db_err("messages.create"))?;

        Ok(model_to_message(created))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(db_err("messages.delete"))?;

        Ok(result.rows_affected > 0)
    }

    async fn mark_as_read(&self, id: Uuid) -> Result<(), RepositoryError> {
        Entity::update_many()
            .set(ActiveModel {
                read: Set(true),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .exec(&*self.db)
            .await
            .map_err(db_err("messages.mark_as_read"))?;

        Ok(())
    }

    async fn unread_count(&self) -> Result<usize, RepositoryError> {
        let count = Entity::find()
            .filter(Column::Read.eq(false))
            .count(&*self.db)
            .await
            .map_err(db_err("messages.unread_count"))?;

        Ok(count as usize)
    }
}

fn model_to_message(model: messages::Model) -> Message {
    Message {
        id: model.id,
        name: model.name,
        email: model.email,
        subject: model.subject,
        body: model.body,
        read: model.read,
        created_at: model.created_at.into(),
    }
}

fn db_err(op: &'static str) -> impl Fn(DbErr) -> RepositoryError {
    move |e| StorageError::new(op, e).into()
}

// ============================================================================
// Tests
// ============================================================================
