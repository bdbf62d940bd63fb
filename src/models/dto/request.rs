use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::Flashcard;

pub const DEFAULT_FLASHCARD_COUNT: u32 = 10;
pub const DEFAULT_QUIZ_COUNT: u32 = 5;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateFlashcardsRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(length(max = 100))]
    pub subject: Option<String>,

    #[validate(length(min = 1, message = "Notes must not be empty"))]
    pub notes: String,

    #[validate(range(min = 1, max = 50))]
    pub count: Option<u32>,

    #[validate(length(min = 2, max = 16))]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDeckRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[validate(length(max = 100))]
    pub subject: Option<String>,

    #[validate(length(min = 1, max = 500, message = "A deck needs at least one card"))]
    pub cards: Vec<Flashcard>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDeckRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(length(max = 100))]
    pub subject: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub cards: Option<Vec<Flashcard>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(length(max = 100))]
    pub subject: Option<String>,

    #[validate(length(min = 1, message = "Notes must not be empty"))]
    pub notes: String,

    #[validate(range(min = 1, max = 50))]
    pub count: Option<u32>,

    #[validate(length(min = 2, max = 16))]
    pub language: Option<String>,
}

/// Body for quizzes built from stored flashcards (deck or daily).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FlashcardQuizRequest {
    #[validate(range(min = 1, max = 50))]
    pub count: Option<u32>,

    #[validate(length(min = 2, max = 16))]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitQuizAttemptRequest {
    #[validate(length(max = 50))]
    pub answers: Vec<Option<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateStudyPlanRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 20, message = "Provide between 1 and 20 subjects"))]
    pub subjects: Vec<String>,

    pub exam_date: NaiveDate,

    /// Defaults to today.
    pub start_date: Option<NaiveDate>,

    #[validate(range(min = 0.5, max = 16.0))]
    pub hours_per_day: f32,

    #[validate(length(min = 2, max = 16))]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadDocumentRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 200_000))]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateChatSessionRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,

    pub document_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub message: String,
}
