mod auth_service;

pub use auth_service::{AdminCredentials, AuthService};
