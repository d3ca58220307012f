pub mod sea_orm_entity;

mod message_repository_local;
mod message_repository_postgres;

pub use message_repository_local::MessageRepositoryLocal;
pub use message_repository_postgres::MessageRepositoryPostgres;
