pub mod chat_repository;
pub mod document_repository;
pub mod flashcard_repository;
pub mod owned_collection;
pub mod quiz_repository;
pub mod study_plan_repository;

pub use chat_repository::{ChatSessionRepository, MongoChatSessionRepository};
pub use document_repository::{DocumentRepository, MongoDocumentRepository};
pub use flashcard_repository::{FlashcardDeckRepository, MongoFlashcardDeckRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use study_plan_repository::{MongoStudyPlanRepository, StudyPlanRepository};
