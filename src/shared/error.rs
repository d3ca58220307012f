use serde::Serialize;

//
// ──────────────────────────────────────────────────────────
// Validation
// ──────────────────────────────────────────────────────────
//

/// One violated field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Input failed a schema rule. Always raised before any storage write,
/// carries one message per violated field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", format_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.path, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

//
// ──────────────────────────────────────────────────────────
// Storage
// ──────────────────────────────────────────────────────────
//

/// An underlying backend failure (network, serialization, I/O), annotated
/// with the failing operation's name. Never retried by the core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{op} failed: {message}")]
pub struct StorageError {
    pub op: String,
    pub message: String,
}

impl StorageError {
    pub fn new(op: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self {
            op: op.into(),
            message: message.to_string(),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Uniform repository error
// ──────────────────────────────────────────────────────────
//

/// Not-found is never an error: repositories return `Option`/`bool` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
