pub mod chat;
pub mod document;
pub mod flashcard;
pub mod quiz;
pub mod study_plan;
pub use chat::{ChatMessage, ChatRole, ChatSession};
pub use document::StudyDocument;
pub use flashcard::{Flashcard, FlashcardDeck};
pub use quiz::{Quiz, QuizAttemptResult, QuizQuestion, QuizSource};
pub use study_plan::{Priority, StudyDay, StudyPlan, StudyTask};
