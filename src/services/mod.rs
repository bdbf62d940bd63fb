pub mod chat_service;
pub mod document_service;
pub mod flashcard_service;
pub mod quiz_service;
pub mod study_plan_service;

use crate::errors::{AppError, AppResult};

/// The caller's title if given, otherwise `"{subject} {kind}"` or just `kind`.
pub(crate) fn title_or_default(title: Option<String>, subject: Option<&str>, kind: &str) -> String {
    match title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        Some(title) => title,
        None => match subject.map(str::trim).filter(|s| !s.is_empty()) {
            Some(subject) => format!("{} {}", subject, kind),
            None => kind.to_string(),
        },
    }
}

pub(crate) fn require_text(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}
