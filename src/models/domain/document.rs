use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plain-text material a user uploads to ground chat answers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudyDocument {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StudyDocument {
    pub fn new(user_id: &str, name: &str, content: &str) -> Self {
        StudyDocument {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
