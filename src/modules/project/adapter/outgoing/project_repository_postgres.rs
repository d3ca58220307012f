use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::project::adapter::outgoing::sea_orm_entity::projects::{
    self, ActiveModel, Column, Entity,
};
use crate::project::application::ports::outgoing::{ProjectRepository, ALL_CATEGORIES};
use crate::project::domain::entities::{MediaType, Project, ProjectDraft, ProjectPatch};
use crate::project::domain::schema::{merge_patch, validate_draft};
use crate::shared::error::{RepositoryError, StorageError};

// ============================================================================
// Repository Implementation
// ============================================================================

#[derive(Clone)]
pub struct ProjectRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProjectRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectRepository for ProjectRepositoryPostgres {
    async fn get_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let models = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err("projects.get_all"))?;

        models.into_iter().map(model_to_project).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Project>, RepositoryError> {
        let model = Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(db_err("projects.get_by_id"))?;

        model.map(model_to_project).transpose()
    }

    async fn create(&self, draft: ProjectDraft) -> Result<Project, RepositoryError> {
        let draft = validate_draft(draft)?;

        let model = draft_to_active_model(draft);
        let created = model
            .insert(&*self.db)
            .await
            .map_err(db_err("projects.create"))?;

        model_to_project(created)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, RepositoryError> {
        let Some(existing) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let merged = validate_draft(merge_patch(&existing, patch))?;

        let model = ActiveModel {
            id: Set(id),
            title: Set(merged.title),
            category: Set(merged.category),
            media_type: Set(merged.media_type.as_str().to_string()),
            media_url: Set(merged.media_url),
            thumbnail_url: Set(merged.thumbnail_url),
            description: Set(none_when_empty(merged.description)),
            created_at: Set(existing.created_at.fixed_offset()),
        };

        let updated = model
            .update(&*self.db)
            .await
            .map_err(db_err("projects.update"))?;

        model_to_project(updated).map(Some)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(db_err("projects.delete"))?;

        Ok(result.rows_affected > 0)
    }

    async fn get_by_category(&self, category: &str) -> Result<Vec<Project>, RepositoryError> {
        if category == ALL_CATEGORIES {
            return self.get_all().await;
        }

        let models = Entity::find()
            .filter(Column::Category.eq(category))
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err("projects.get_by_category"))?;

        models.into_iter().map(model_to_project).collect()
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Project>, RepositoryError> {
        let models = Entity::find()
            .filter(Expr::col(Column::Title).ilike(format!("%{}%", escape_like(query))))
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(db_err("projects.search_by_title"))?;

        models.into_iter().map(model_to_project).collect()
    }
}

// ============================================================================
// Mapping (snake_case persisted shape <-> in-memory entity)
// ============================================================================

fn model_to_project(model: projects::Model) -> Result<Project, RepositoryError> {
    Ok(Project {
        id: model.id,
        title: model.title,
        category: model.category,
        media_type: media_type_from_db(&model.media_type)?,
        media_url: model.media_url,
        thumbnail_url: model.thumbnail_url.filter(|t| !t.is_empty()),
        description: model.description.unwrap_or_default(),
        created_at: model.created_at.into(),
    })
}

fn draft_to_active_model(draft: ProjectDraft) -> ActiveModel {
    ActiveModel {
        id: Set(draft.id.unwrap_or_else(Uuid::new_v4)),
        title: Set(draft.title),
        category: Set(draft.category),
        media_type: Set(draft.media_type.as_str().to_string()),
        media_url: Set(draft.media_url),
        thumbnail_url: Set(draft.thumbnail_url),
        description: Set(none_when_empty(draft.description)),
        created_at: Set(Utc::now().fixed_offset()),
    }
}

fn media_type_from_db(value: &str) -> Result<MediaType, RepositoryError> {
    match value {
        "image" => Ok(MediaType::Image),
        "video" => Ok(MediaType::Video),
        other => Err(StorageError::new(
            "projects.map_media_type",
            format!("unknown media type '{other}'"),
        )
        .into()),
    }
}

fn none_when_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn escape_like(query: &str) -> String {
    query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn db_err(op: &'static str) -> impl Fn(DbErr) -> RepositoryError {
    move |e| StorageError::new(op, e).into()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn sample_model(id: Uuid, title: &str, category: &str) -> projects::Model {
        projects::Model {
            id,
            title: title.to_string(),
            category: category.to_string(),
            media_type: "image".to_string(),
            media_url: "https://example.com/media.png".to_string(),
            thumbnail_url: None,
            description: Some("Test description".to_string()),
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn sample_draft() -> ProjectDraft {
        ProjectDraft {
            id: None,
            title: "Test Project".to_string(),
            category: "Banner".to_string(),
            media_type: MediaType::Image,
            media_url: "https://example.com/media.png".to_string(),
            thumbnail_url: None,
            description: "Test description".to_string(),
        }
    }

    #[tokio::test]
    async fn create_maps_the_returned_row() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![sample_model(id, "Test Project", "Banner")]])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));
        let project = repo.create(sample_draft()).await.unwrap();

        assert_eq!(project.id, id);
        assert_eq!(project.title, "Test Project");
        assert_eq!(project.media_type, MediaType::Image);
        assert_eq!(project.description, "Test description");
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_before_touching_the_db() {
        // No query results appended: any db access would fail the test.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = ProjectRepositoryPostgres::new(Arc::new(db));

        let mut draft = sample_draft();
        draft.title = "ab".to_string();

        let result = repo.create(draft).await;
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }

    #[tokio::test]
    async fn create_database_error_is_wrapped_with_op_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("connection timeout".to_string())])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));
        let result = repo.create(sample_draft()).await;

        match result {
            Err(RepositoryError::Storage(err)) => {
                assert_eq!(err.op, "projects.create");
                assert!(err.message.contains("connection timeout"));
            }
            other => panic!("Expected StorageError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn get_by_id_miss_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<projects::Model>::new()])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));
        assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_onto_the_fetched_row() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // find_by_id
            .append_query_results(vec![vec![sample_model(id, "Original", "Banner")]])
            // update .. returning
            .append_query_results(vec![vec![sample_model(id, "Renamed", "Banner")]])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));
        let updated = repo
            .update(
                id,
                ProjectPatch {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.category, "Banner");
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<projects::Model>::new()])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));
        let result = repo
            .update(
                Uuid::new_v4(),
                ProjectPatch {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_returns_whether_a_row_was_removed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));
        assert!(repo.delete(Uuid::new_v4()).await.unwrap());
        assert!(!repo.delete(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn get_by_category_all_bypasses_the_filter() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![
                sample_model(Uuid::new_v4(), "A", "Banner"),
                sample_model(Uuid::new_v4(), "B", "Story Estaticos"),
            ]])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));
        let all = repo.get_by_category(ALL_CATEGORIES).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn unknown_media_type_surfaces_as_storage_error() {
        let id = Uuid::new_v4();
        let mut model = sample_model(id, "Test Project", "Banner");
        model.media_type = "gif".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = ProjectRepositoryPostgres::new(Arc::new(db));
        let result = repo.get_by_id(id).await;

        assert!(matches!(result, Err(RepositoryError::Storage(_))));
    }

    #[test]
    fn like_escaping_neutralizes_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
    }

    #[test]
    fn mapping_rehydrates_timestamps_and_empty_description() {
        let mut model = sample_model(Uuid::new_v4(), "Test Project", "Banner");
        model.description = None;

        let project = model_to_project(model.clone()).unwrap();
        assert_eq!(project.description, "");
        assert_eq!(project.created_at, model.created_at);
    }
}
