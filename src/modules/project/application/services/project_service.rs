use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::project::application::ports::outgoing::ProjectRepository;
use crate::project::domain::entities::{MediaType, Project, ProjectDraft, ProjectPatch};
use crate::shared::error::RepositoryError;
use crate::shared::local_store::LocalStore;

/// One-time seed guard so the demo records are inserted exactly once.
const INITIALIZED_KEY: &str = "portfolio_db_initialized";

/// Thin façade over the project repository; also owns the one-time demo
/// seeding that gives a fresh install something to render.
#[derive(Clone)]
pub struct ProjectService {
    repository: Arc<dyn ProjectRepository>,
    store: Arc<LocalStore>,
}

impl ProjectService {
    pub fn new(repository: Arc<dyn ProjectRepository>, store: Arc<LocalStore>) -> Self {
        Self { repository, store }
    }

    async fn ensure_initialized(&self) -> Result<(), RepositoryError> {
        let initialized: Option<bool> = self.store.get(INITIALIZED_KEY)?;
        if initialized == Some(true) {
            return Ok(());
        }

        info!("seeding demo projects");
        for draft in demo_projects() {
            self.repository.create(draft).await?;
        }
        self.store.set(INITIALIZED_KEY, &true)?;

        Ok(())
    }

    pub async fn get_projects(&self) -> Result<Vec<Project>, RepositoryError> {
        self.ensure_initialized().await?;
        self.repository.get_all().await
    }

    pub async fn get_projects_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Project>, RepositoryError> {
        self.ensure_initialized().await?;
        self.repository.get_by_category(category).await
    }

    pub async fn get_project_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        self.ensure_initialized().await?;
        self.repository.get_by_id(id).await
    }

    pub async fn create_project(&self, draft: ProjectDraft) -> Result<Project, RepositoryError> {
        self.repository.create(draft).await
    }

    pub async fn update_project(
        &self,
        id: Uuid,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, RepositoryError> {
        self.repository.update(id, patch).await
    }

    pub async fn delete_project(&self, id: Uuid) -> Result<bool, RepositoryError> {
        self.repository.delete(id).await
    }

    pub async fn search_projects(&self, query: &str) -> Result<Vec<Project>, RepositoryError> {
        self.repository.search_by_title(query).await
    }
}

fn demo_projects() -> Vec<ProjectDraft> {
    vec![
        ProjectDraft {
            id: None,
            title: "Black Friday Banner 2024".to_string(),
            category: "Banner".to_string(),
            media_type: MediaType::Image,
            media_url:
                "https://images.unsplash.com/photo-1557821552-17105176677c?w=1200&h=600&fit=crop"
                    .to_string(),
            thumbnail_url: None,
            description: "Promotional banner for a Black Friday conversion campaign.".to_string(),
        },
        ProjectDraft {
            id: None,
            title: "Product Launch Story".to_string(),
            category: "Story Estaticos".to_string(),
            media_type: MediaType::Image,
            media_url:
                "https://images.unsplash.com/photo-1611162617474-5b21e879e113?w=400&h=700&fit=crop"
                    .to_string(),
            thumbnail_url: None,
            description: "Static Instagram story highlighting a new product.".to_string(),
        },
        ProjectDraft {
            id: None,
            title: "Institutional Motion Video".to_string(),
            category: "Motion Video".to_string(),
            media_type: MediaType::Video,
            media_url:
                "https://storage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4"
                    .to_string(),
            thumbnail_url: Some(
                "https://images.unsplash.com/photo-1574717024653-61fd2cf4d44d?w=800&h=450&fit=crop"
                    .to_string(),
            ),
            description: "Motion video for a brand presentation.".to_string(),
        },
    ]
}
