use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::project::application::ports::outgoing::{ProjectRepository, ALL_CATEGORIES};
use crate::project::domain::entities::{Project, ProjectDraft, ProjectPatch};
use crate::project::domain::schema::{merge_patch, validate_draft};
use crate::shared::error::RepositoryError;
use crate::shared::local_store::LocalStore;

const KEY: &str = "portfolio_projects";

/// Local-store implementation: read the collection, operate in memory,
/// write back. Ordering is applied on every read.
#[derive(Clone)]
pub struct ProjectRepositoryLocal {
    store: Arc<LocalStore>,
}

impl ProjectRepositoryLocal {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<Project>, RepositoryError> {
        Ok(self.store.get::<Vec<Project>>(KEY)?.unwrap_or_default())
    }

    fn save(&self, projects: &[Project]) -> Result<(), RepositoryError> {
        Ok(self.store.set(KEY, &projects)?)
    }
}

fn newest_first(mut projects: Vec<Project>) -> Vec<Project> {
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    projects
}

#[async_trait]
impl ProjectRepository for ProjectRepositoryLocal {
    async fn get_all(&self) -> Result<Vec<Project>, RepositoryError> {
        Ok(newest_first(self.load()?))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        Ok(self.load()?.into_iter().find(|p| p.id == id))
    }

    async fn create(&self, draft: ProjectDraft) -> Result<Project, RepositoryError> {
        let draft = validate_draft(draft)?;

        let project = Project {
            id: draft.id.unwrap_or_else(Uuid::new_v4),
            title: draft.title,
            category: draft.category,
            media_type: draft.media_type,
            media_url: draft.media_url,
            thumbnail_url: draft.thumbnail_url,
            description: draft.description,
            created_at: Utc::now(),
        };

        let mut projects = self.load()?;
        projects.push(project.clone());
        self.save(&projects)?;

        Ok(project)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, RepositoryError> {
        let mut projects = self.load()?;

        let Some(index) = projects.iter().position(|p| p.id == id) else {
            return Ok(None);
        };

        let merged = validate_draft(merge_patch(&projects[index], patch))?;

        let updated = Project {
            id,
            title: merged.title,
            category: merged.category,
            media_type: merged.media_type,
            media_url: merged.media_url,
            thumbnail_url: merged.thumbnail_url,
            description: merged.description,
            created_at: projects[index].created_at,
        };

        projects[index] = updated.clone();
        self.save(&projects)?;

        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut projects = self.load()?;
        let before = projects.len();
        projects.retain(|p| p.id != id);

        if projects.len() == before {
            return Ok(false);
        }

        self.save(&projects)?;
        Ok(true)
    }

    async fn get_by_category(&self, category: &str) -> Result<Vec<Project>, RepositoryError> {
        let all = self.get_all().await?;
        if category == ALL_CATEGORIES {
            return Ok(all);
        }
        Ok(all.into_iter().filter(|p| p.category == category).collect())
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Project>, RepositoryError> {
        let needle = query.to_lowercase();
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .collect())
    }
}
