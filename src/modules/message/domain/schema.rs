//! Acceptance rules for contact-form submissions.

use crate::message::domain::entities::MessageDraft;
use crate::shared::error::ValidationError;
use crate::shared::validation::{bounded_text, required_email, IssueCollector};

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const SUBJECT_MIN: usize = 3;
pub const SUBJECT_MAX: usize = 150;
pub const BODY_MIN: usize = 10;
pub const BODY_MAX: usize = 1000;

/// Validates and trims a submission, reporting one issue per violated field.
pub fn validate_draft(draft: MessageDraft) -> Result<MessageDraft, ValidationError> {
    let mut issues = IssueCollector::new();

    let name = bounded_text(&mut issues, "name", &draft.name, NAME_MIN, NAME_MAX);
    let email = required_email(&mut issues, "email", &draft.email);
    let subject = bounded_text(&mut issues, "subject", &draft.subject, SUBJECT_MIN, SUBJECT_MAX);
    let body = bounded_text(&mut issues, "body", &draft.body, BODY_MIN, BODY_MAX);

    issues.into_result(MessageDraft {
        name,
        email,
        subject,
        body,
    })
}
