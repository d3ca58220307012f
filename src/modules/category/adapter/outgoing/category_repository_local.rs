use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::category::application::ports::outgoing::CategoryRepository;
use crate::category::domain::entities::{Category, DEFAULT_CATEGORIES};
use crate::category::domain::schema::validate_name;
use crate::shared::error::{RepositoryError, StorageError};
use crate::shared::local_store::LocalStore;

const KEY: &str = "portfolio_categories";

/// Local-store implementation. The first read seeds the nine defaults; a
/// legacy payload of plain name strings is migrated in place into full
/// records with a generated ordering.
#[derive(Clone)]
pub struct CategoryRepositoryLocal {
    store: Arc<LocalStore>,
}

impl CategoryRepositoryLocal {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<Category>, RepositoryError> {
        let Some(raw) = self.store.get::<serde_json::Value>(KEY)? else {
            let seeded = from_names(DEFAULT_CATEGORIES.iter().map(|n| n.to_string()));
            self.save(&seeded)?;
            return Ok(seeded);
        };

        // Legacy format: a plain array of name strings.
        if let Ok(names) = serde_json::from_value::<Vec<String>>(raw.clone()) {
            let migrated = from_names(names.into_iter());
            self.save(&migrated)?;
            return Ok(migrated);
        }

        serde_json::from_value(raw)
            .map_err(|e| StorageError::new("categories.load", e).into())
    }

    fn save(&self, categories: &[Category]) -> Result<(), RepositoryError> {
        Ok(self.store.set(KEY, &categories)?)
    }
}

fn from_names(names: impl Iterator<Item = String>) -> Vec<Category> {
    names
        .enumerate()
        .map(|(i, name)| Category {
            id: Uuid::new_v4(),
            name,
            order_index: i as i32,
            created_at: Utc::now(),
        })
        .collect()
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryLocal {
    async fn get_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let mut categories = self.load()?;
        categories.sort_by_key(|c| c.order_index);
        Ok(categories)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Category>, RepositoryError> {
        Ok(self.load()?.into_iter().find(|c| c.id == id))
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        Ok(self.load()?.into_iter().find(|c| c.name == name))
    }

    async fn create(&self, name: &str) -> Result<Category, RepositoryError> {
        let name = validate_name(name)?;

        let mut categories = self.load()?;
        let next_order = categories.iter().map(|c| c.order_index).max().unwrap_or(-1) + 1;

        let category = Category {
            id: Uuid::new_v4(),
            name,
            order_index: next_order,
            created_at: Utc::now(),
        };

        categories.push(category.clone());
        self.save(&categories)?;

        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut categories = self.load()?;
        let before = categories.len();
        categories.retain(|c| c.id != id);

        if categories.len() == before {
            return Ok(false);
        }

        self.save(&categories)?;
        Ok(true)
    }

    async fn reorder(&self, ordered: Vec<Category>) -> Result<(), RepositoryError> {
        let reindexed: Vec<Category> = ordered
            .into_iter()
            .enumerate()
            .map(|(i, c)| Category {
                order_index: i as i32,
                ..c
            })
            .collect();

        self.save(&reindexed)
    }
}
