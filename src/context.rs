//! Wires configuration to concrete adapters and services, once.

use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use tracing::info;

use crate::auth::application::services::{AdminCredentials, AuthService};
use crate::category::adapter::outgoing::{CategoryRepositoryLocal, CategoryRepositoryPostgres};
use crate::category::application::ports::outgoing::CategoryRepository;
use crate::category::application::services::CategoryService;
use crate::config::AppConfig;
use crate::message::adapter::outgoing::{MessageRepositoryLocal, MessageRepositoryPostgres};
use crate::message::application::ports::outgoing::MessageRepository;
use crate::message::application::services::MessageService;
use crate::project::adapter::outgoing::{ProjectRepositoryLocal, ProjectRepositoryPostgres};
use crate::project::application::ports::outgoing::ProjectRepository;
use crate::project::application::services::ProjectService;
use crate::resume::application::services::ResumeService;
use crate::shared::error::StorageError;
use crate::shared::local_store::LocalStore;
use crate::upload::adapter::outgoing::GcsObjectStorage;
use crate::upload::application::ports::outgoing::ObjectStorage;
use crate::upload::application::services::UploadService;
use crate::upload::domain::policies::UploadPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    Remote,
}

/// All services, bound to one backend for the lifetime of the process.
/// The choice is made here and nowhere else; callers receive fully wired
/// services and never see the adapters.
#[derive(Clone)]
pub struct AppContext {
    backend: StorageBackend,
    pub projects: ProjectService,
    pub categories: CategoryService,
    pub messages: MessageService,
    pub resume: ResumeService,
    pub auth: AuthService,
    pub uploads: Arc<UploadService>,
}

impl AppContext {
    pub async fn init(config: AppConfig) -> Result<Self, StorageError> {
        let store = Arc::new(LocalStore::open(&config.data_dir)?);

        let (backend, projects, categories, messages, object_storage) = match &config.remote {
            Some(remote) => {
                info!("remote backend configured, connecting");

                let mut opt = ConnectOptions::new(remote.database_url());
                opt.max_connections(50)
                    .min_connections(10)
                    .connect_timeout(Duration::from_secs(5))
                    .acquire_timeout(Duration::from_secs(5))
                    .idle_timeout(Duration::from_secs(300))
                    .max_lifetime(Duration::from_secs(1800))
                    .sqlx_logging(false);

                let db = Arc::new(
                    Database::connect(opt)
                        .await
                        .map_err(|e| StorageError::new("context.connect", e))?,
                );

                let projects: Arc<dyn ProjectRepository> =
                    Arc::new(ProjectRepositoryPostgres::new(Arc::clone(&db)));
                let categories: Arc<dyn CategoryRepository> =
                    Arc::new(CategoryRepositoryPostgres::new(Arc::clone(&db)));
                let messages: Arc<dyn MessageRepository> =
                    Arc::new(MessageRepositoryPostgres::new(Arc::clone(&db)));
                let storage: Option<Arc<dyn ObjectStorage>> =
                    Some(Arc::new(GcsObjectStorage::new(&config.upload_bucket)));

                (StorageBackend::Remote, projects, categories, messages, storage)
            }
            None => {
                info!("no remote backend configured, using the local store");

                let projects: Arc<dyn ProjectRepository> =
                    Arc::new(ProjectRepositoryLocal::new(Arc::clone(&store)));
                let categories: Arc<dyn CategoryRepository> =
                    Arc::new(CategoryRepositoryLocal::new(Arc::clone(&store)));
                let messages: Arc<dyn MessageRepository> =
                    Arc::new(MessageRepositoryLocal::new(Arc::clone(&store)));

                (StorageBackend::Local, projects, categories, messages, None)
            }
        };

        Ok(Self {
            backend,
            projects: ProjectService::new(projects, Arc::clone(&store)),
            categories: CategoryService::new(categories),
            messages: MessageService::new(messages),
            resume: ResumeService::new(Arc::clone(&store)),
            auth: AuthService::new(
                AdminCredentials {
                    email: config.admin_email,
                    password: config.admin_password,
                },
                store,
            ),
            uploads: Arc::new(UploadService::new(
                object_storage,
                UploadPolicy::new(config.upload_bucket),
            )),
        })
    }

    pub fn backend(&self) -> StorageBackend {
        self.backend
    }
}
