//! Field-rule helpers shared by the per-entity schemas.
//!
//! All helpers are pure: failure is reported by pushing an issue into the
//! collector, never by panicking.

use email_address::EmailAddress;
use url::Url;

use crate::shared::error::{ValidationError, ValidationIssue};

/// Collects issues across a whole payload so a single validation pass can
/// report every violated field at once.
#[derive(Debug, Default)]
pub struct IssueCollector {
    issues: Vec<ValidationIssue>,
}

impl IssueCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(path, message));
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Ok(value) when no issue was recorded, the full issue list otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationError> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(self.issues))
        }
    }
}

/// Trims `value` and checks its length against `[min, max]`.
/// The trimmed value is returned even on failure so later rules can still run.
pub fn bounded_text(
    issues: &mut IssueCollector,
    path: &str,
    value: &str,
    min: usize,
    max: usize,
) -> String {
    let trimmed = value.trim();
    let len = trimmed.chars().count();

    if len < min {
        issues.push(path, format!("must be at least {min} characters"));
    } else if len > max {
        issues.push(path, format!("must be at most {max} characters"));
    }

    trimmed.to_string()
}

/// Trims `value`; an empty string is allowed, anything longer than `max` is not.
pub fn optional_text(issues: &mut IssueCollector, path: &str, value: &str, max: usize) -> String {
    let trimmed = value.trim();
    if trimmed.chars().count() > max {
        issues.push(path, format!("must be at most {max} characters"));
    }
    trimmed.to_string()
}

/// A required, syntactically valid URL.
pub fn required_url(issues: &mut IssueCollector, path: &str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(path, "is required");
    } else if Url::parse(trimmed).is_err() {
        issues.push(path, "invalid URL");
    }
    trimmed.to_string()
}

/// An optional URL field where the empty string means "absent".
pub fn optional_url(
    issues: &mut IssueCollector,
    path: &str,
    value: Option<&str>,
) -> Option<String> {
    let trimmed = value.map(str::trim).filter(|v| !v.is_empty())?;
    if Url::parse(trimmed).is_err() {
        issues.push(path, "invalid URL");
    }
    Some(trimmed.to_string())
}

/// A required, syntactically valid email address.
pub fn required_email(issues: &mut IssueCollector, path: &str, value: &str) -> String {
    let trimmed = value.trim();
    if !EmailAddress::is_valid(trimmed) {
        issues.push(path, "invalid email");
    }
    trimmed.to_string()
}
