//! Acceptance rules for login payloads.

use crate::shared::error::ValidationError;
use crate::shared::validation::{required_email, IssueCollector};

#[derive(Debug, Clone)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Syntax only. Whether the credentials are right is the service's call.
pub fn validate_login(payload: LoginPayload) -> Result<LoginPayload, ValidationError> {
    let mut issues = IssueCollector::new();

    let email = required_email(&mut issues, "email", &payload.email);
    if payload.password.is_empty() {
        issues.push("password", "is required");
    }

    issues.into_result(LoginPayload {
        email,
        password: payload.password,
    })
}
