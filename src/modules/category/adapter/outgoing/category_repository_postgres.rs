use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::category::adapter::outgoing::sea_orm_entity::categories::{
    self, ActiveModel, Column, Entity,
};
use crate::category::application::ports::outgoing::CategoryRepository;
use crate::category::domain::entities::Category;
use crate::category::domain::schema::validate_name;
use crate::shared::error::{RepositoryError, StorageError};

#[derive(Clone)]
pub struct CategoryRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryPostgres {
    async fn get_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let models = Entity::find()
            .order_by_asc(Column::OrderIndex)
            .all(&*self.db)
            .await
            .map_err(db_err("categories.get_all"))?;

        Ok(models.into_iter().map(model_to_category).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Category>, RepositoryError> {
        let model = Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err("categories.get_by_id"))?;

        Ok(model.map(model_to_category))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        let model = Entity::find()
            .filter(Column::Name.eq(name))
            .one(&*self.db)
            .await
            .map_err(db_err("categories.get_by_name"))?;

        Ok(model.map(model_to_category))
    }

    async fn create(&self, name: &str) -> Result<Category, RepositoryError> {
        let name = validate_name(name)?;

        // Append after the current maximum order.
        let last = Entity::find()
            .order_by_desc(Column::OrderIndex)
            .limit(1)
            .one(&*self.db)
            .await
            .map_err(db_err("categories.create"))?;

        let next_order = last.map(|c| c.order_index + 1).unwrap_or(0);

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            order_index: Set(next_order),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let created = model
            .insert(&*self.db)
            .await
            .map_err(db_err("categories.create"))?;

        Ok(model_to_category(created))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(db_err("categories.delete"))?;

        Ok(result.rows_affected > 0)
    }

    async fn reorder(&self, ordered: Vec<Category>) -> Result<(), RepositoryError> {
        // One index rewrite per row, in the given order. Last write wins;
        // there is no cross-row transaction by design.
        for (index, category) in ordered.into_iter().enumerate() {
            let patch = ActiveModel {
                order_index: Set(index as i32),
                ..Default::default()
            };

            Entity::update_many()
                .set(patch)
                .filter(Column::Id.eq(category.id))
                .exec(&*self.db)
                .await
                .map_err(db_err("categories.reorder"))?;
        }

        Ok(())
    }
}

fn model_to_category(model: categories::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        order_index: model.order_index,
        created_at: model.created_at.into(),
    }
}

fn db_err(op: &'static str) -> impl Fn(DbErr) -> RepositoryError {
    move |e| StorageError::new(op, e).into()
}
