pub mod sea_orm_entity;

mod category_repository_local;
mod category_repository_postgres;

pub use category_repository_local::CategoryRepositoryLocal;
pub use category_repository_postgres::CategoryRepositoryPostgres;
