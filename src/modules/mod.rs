pub mod auth;
pub mod category;
pub mod message;
pub mod project;
pub mod resume;
pub mod upload;
