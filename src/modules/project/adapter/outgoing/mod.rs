pub mod sea_orm_entity;

mod project_repository_local;
mod project_repository_postgres;

pub use project_repository_local::ProjectRepositoryLocal;
pub use project_repository_postgres::ProjectRepositoryPostgres;
