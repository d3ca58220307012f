use std::sync::Arc;

use tracing::info;

use crate::auth::domain::schema::{validate_login, LoginPayload};
use crate::shared::error::RepositoryError;
use crate::shared::local_store::LocalStore;

const AUTH_KEY: &str = "portfolio_admin_auth";

/// Configured admin identity. An empty password means login is disabled.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

/// Credential check against the configured admin identity, with the session
/// flag persisted in the local store. `Ok(false)` is wrong credentials;
/// malformed payloads fail validation before any comparison.
#[derive(Clone)]
pub struct AuthService {
    admin: AdminCredentials,
    store: Arc<LocalStore>,
}

impl AuthService {
    pub fn new(admin: AdminCredentials, store: Arc<LocalStore>) -> Self {
        Self { admin, store }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<bool, RepositoryError> {
        let payload = validate_login(LoginPayload {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        if self.admin.password.is_empty() {
            return Ok(false);
        }

        let accepted = payload.email == self.admin.email && payload.password == self.admin.password;
        if accepted {
            info!("admin login accepted");
            self.store.set(AUTH_KEY, &true)?;
        }

        Ok(accepted)
    }

    pub fn logout(&self) -> Result<(), RepositoryError> {
        self.store.remove(AUTH_KEY)?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> Result<bool, RepositoryError> {
        Ok(self.store.get::<bool>(AUTH_KEY)? == Some(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(password: &str) -> (tempfile::TempDir, AuthService) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(LocalStore::open(dir.path()).unwrap());
        let admin = AdminCredentials {
            email: "admin@portfolio.com".to_string(),
            password: password.to_string(),
        };
        (dir, AuthService::new(admin, store))
    }

    #[test]
    fn login_logout_lifecycle() {
        let (_dir, service) = service("secret");

        assert!(!service.is_authenticated().unwrap());
        assert!(service.login("admin@portfolio.com", "secret").unwrap());
        assert!(service.is_authenticated().unwrap());

        service.logout().unwrap();
        assert!(!service.is_authenticated().unwrap());
    }

    #[test]
    fn wrong_credentials_are_rejected_without_a_flag() {
        let (_dir, service) = service("secret");

        assert!(!service.login("admin@portfolio.com", "wrong").unwrap());
        assert!(!service.login("other@portfolio.com", "secret").unwrap());
        assert!(!service.is_authenticated().unwrap());
    }

    #[test]
    fn empty_configured_password_always_fails() {
        let (_dir, service) = service("");
        assert!(!service.login("admin@portfolio.com", "anything").unwrap());
    }

    #[test]
    fn malformed_payload_is_a_validation_error_not_a_rejection() {
        let (_dir, service) = service("secret");

        let result = service.login("admin@", "");
        assert!(matches!(result, Err(RepositoryError::Validation(_))));
    }
}
