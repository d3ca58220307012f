//! Acceptance rules for project payloads.

use crate::project::domain::entities::{Project, ProjectDraft, ProjectPatch};
use crate::shared::error::ValidationError;
use crate::shared::validation::{
    bounded_text, optional_text, optional_url, required_url, IssueCollector,
};

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;

/// Validates and normalizes a draft: strings are trimmed, an empty optional
/// thumbnail becomes absent. Never panics; all failures are reported as one
/// issue per field.
pub fn validate_draft(draft: ProjectDraft) -> Result<ProjectDraft, ValidationError> {
    let mut issues = IssueCollector::new();

    let title = bounded_text(&mut issues, "title", &draft.title, TITLE_MIN, TITLE_MAX);
    let category = bounded_text(&mut issues, "category", &draft.category, 1, usize::MAX);
    let media_url = required_url(&mut issues, "media_url", &draft.media_url);
    let thumbnail_url = optional_url(&mut issues, "thumbnail_url", draft.thumbnail_url.as_deref());
    let description = optional_text(&mut issues, "description", &draft.description, DESCRIPTION_MAX);

    issues.into_result(ProjectDraft {
        id: draft.id,
        title,
        category,
        media_type: draft.media_type,
        media_url,
        thumbnail_url,
        description,
    })
}

/// Merges a patch onto an existing record. Absent patch fields default to the
/// stored values; the merged result must pass `validate_draft` before any
/// write happens.
pub fn merge_patch(existing: &Project, patch: ProjectPatch) -> ProjectDraft {
    ProjectDraft {
        id: Some(existing.id),
        title: patch.title.unwrap_or_else(|| existing.title.clone()),
        category: patch.category.unwrap_or_else(|| existing.category.clone()),
        media_type: patch.media_type.unwrap_or(existing.media_type),
        media_url: patch.media_url.unwrap_or_else(|| existing.media_url.clone()),
        thumbnail_url: patch.thumbnail_url.or_else(|| existing.thumbnail_url.clone()),
        description: patch
            .description
            .unwrap_or_else(|| existing.description.clone()),
    }
}
