//! Acceptance rules for category names.

use crate::shared::error::ValidationError;
use crate::shared::validation::{bounded_text, IssueCollector};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;

/// Trims and bounds-checks a category name.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let mut issues = IssueCollector::new();
    let name = bounded_text(&mut issues, "name", name, NAME_MIN, NAME_MAX);
    issues.into_result(name)
}
