use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: &str, answer: &str) -> Self {
        Flashcard {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    /// Both sides must carry text once surrounding whitespace is ignored.
    pub fn is_complete(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlashcardDeck {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub subject: Option<String>,
    pub cards: Vec<Flashcard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl FlashcardDeck {
    pub fn new(user_id: &str, title: &str, subject: Option<String>, cards: Vec<Flashcard>) -> Self {
        FlashcardDeck {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            subject,
            cards,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }
}
