use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{ChatSession, FlashcardDeck, Quiz, StudyDocument, StudyPlan},
    repositories::{
        ChatSessionRepository, DocumentRepository, FlashcardDeckRepository, QuizRepository,
        StudyPlanRepository,
    },
};

#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{
        Flashcard, FlashcardDeck, Priority, QuizQuestion, StudyDay, StudyTask,
    };
    use chrono::NaiveDate;

    pub const TEST_USER: &str = "user-1";
    pub const OTHER_USER: &str = "user-2";

    pub fn test_cards() -> Vec<Flashcard> {
        vec![
            Flashcard::new("What is the powerhouse of the cell?", "The mitochondria"),
            Flashcard::new("What does DNA stand for?", "Deoxyribonucleic acid"),
            Flashcard::new("What gas do plants absorb?", "Carbon dioxide"),
        ]
    }

    pub fn test_deck(user_id: &str) -> FlashcardDeck {
        FlashcardDeck::new(user_id, "Biology", Some("Biology".to_string()), test_cards())
    }

    pub fn test_question(question: &str) -> QuizQuestion {
        QuizQuestion {
            question: question.to_string(),
            options: vec![
                "A".to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
            ],
            correct_answer: "B".to_string(),
            explanation: None,
            subject: None,
        }
    }

    pub fn test_day(date: NaiveDate) -> StudyDay {
        StudyDay {
            date,
            tasks: vec![StudyTask {
                subject: "Math".to_string(),
                duration: 60,
                activity: "Practice problems".to_string(),
                priority: Priority::High,
                completed: false,
            }],
        }
    }

    pub const FLASHCARDS_JSON: &str = r#"[
        {"question": "What is 2 + 2?", "answer": "4"},
        {"question": "Capital of France?", "answer": "Paris"}
    ]"#;

    pub const QUIZ_JSON: &str = r#"[
        {"question": "2 + 2 = ?", "options": ["3", "4", "5", "6"], "correctAnswer": "4"}
    ]"#;

    pub const STUDY_PLAN_JSON: &str = r#"[
        {"date": "2026-11-02", "tasks": [
            {"subject": "Math", "duration": 90, "activity": "Review algebra", "priority": "high"}
        ]},
        {"date": "2026-11-03", "tasks": [
            {"subject": "Physics", "duration": 60, "activity": "Kinematics drills", "priority": "medium"}
        ]}
    ]"#;
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

/// Fields the in-memory store needs to scope and order documents.
pub trait Owned: Clone + Send + Sync {
    fn id(&self) -> &str;
    fn owner(&self) -> &str;
    fn created(&self) -> Option<DateTime<Utc>>;
}

macro_rules! impl_owned {
    ($($ty:ty),*) => {
        $(impl Owned for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn owner(&self) -> &str {
                &self.user_id
            }
            fn created(&self) -> Option<DateTime<Utc>> {
                self.created_at
            }
        })*
    };
}

impl_owned!(FlashcardDeck, Quiz, StudyPlan, StudyDocument, ChatSession);

/// Map-backed stand-in for a user-scoped Mongo collection.
pub struct InMemoryStore<T: Owned> {
    items: Arc<RwLock<HashMap<String, T>>>,
    label: &'static str,
}

impl<T: Owned> InMemoryStore<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            label,
        }
    }

    async fn insert(&self, item: T) -> AppResult<T> {
        self.items
            .write()
            .await
            .insert(item.id().to_string(), item.clone());
        Ok(item)
    }

    async fn find(&self, user_id: &str, id: &str) -> AppResult<Option<T>> {
        let items = self.items.read().await;
        Ok(items.get(id).filter(|i| i.owner() == user_id).cloned())
    }

    async fn list(&self, user_id: &str) -> AppResult<Vec<T>> {
        let items = self.items.read().await;
        let mut owned: Vec<T> = items
            .values()
            .filter(|i| i.owner() == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created().cmp(&a.created()));
        Ok(owned)
    }

    async fn replace(&self, item: T) -> AppResult<T> {
        let mut items = self.items.write().await;
        match items.get(item.id()) {
            Some(existing) if existing.owner() == item.owner() => {
                items.insert(item.id().to_string(), item.clone());
                Ok(item)
            }
            _ => Err(self.not_found(item.id())),
        }
    }

    async fn remove(&self, user_id: &str, id: &str) -> AppResult<()> {
        let mut items = self.items.write().await;
        match items.get(id) {
            Some(existing) if existing.owner() == user_id => {
                items.remove(id);
                Ok(())
            }
            _ => Err(self.not_found(id)),
        }
    }

    fn not_found(&self, id: &str) -> AppError {
        AppError::NotFound(format!("{} with id '{}' not found", self.label, id))
    }
}

pub fn deck_store() -> InMemoryStore<FlashcardDeck> {
    InMemoryStore::new("Flashcard deck")
}

pub fn quiz_store() -> InMemoryStore<Quiz> {
    InMemoryStore::new("Quiz")
}

pub fn plan_store() -> InMemoryStore<StudyPlan> {
    InMemoryStore::new("Study plan")
}

pub fn document_store() -> InMemoryStore<StudyDocument> {
    InMemoryStore::new("Document")
}

pub fn chat_store() -> InMemoryStore<ChatSession> {
    InMemoryStore::new("Chat session")
}

#[async_trait]
impl FlashcardDeckRepository for InMemoryStore<FlashcardDeck> {
    async fn create(&self, deck: FlashcardDeck) -> AppResult<FlashcardDeck> {
        self.insert(deck).await
    }
    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<FlashcardDeck>> {
        self.find(user_id, id).await
    }
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<FlashcardDeck>> {
        self.list(user_id).await
    }
    async fn update(&self, deck: FlashcardDeck) -> AppResult<FlashcardDeck> {
        self.replace(deck).await
    }
    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.remove(user_id, id).await
    }
}

#[async_trait]
impl QuizRepository for InMemoryStore<Quiz> {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.insert(quiz).await
    }
    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<Quiz>> {
        self.find(user_id, id).await
    }
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.list(user_id).await
    }
    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.remove(user_id, id).await
    }
}

#[async_trait]
impl StudyPlanRepository for InMemoryStore<StudyPlan> {
    async fn create(&self, plan: StudyPlan) -> AppResult<StudyPlan> {
        self.insert(plan).await
    }
    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<StudyPlan>> {
        self.find(user_id, id).await
    }
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<StudyPlan>> {
        self.list(user_id).await
    }
    async fn update(&self, plan: StudyPlan) -> AppResult<StudyPlan> {
        self.replace(plan).await
    }
    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.remove(user_id, id).await
    }
}

#[async_trait]
impl DocumentRepository for InMemoryStore<StudyDocument> {
    async fn create(&self, document: StudyDocument) -> AppResult<StudyDocument> {
        self.insert(document).await
    }
    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<StudyDocument>> {
        self.find(user_id, id).await
    }
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<StudyDocument>> {
        self.list(user_id).await
    }
    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.remove(user_id, id).await
    }
}

#[async_trait]
impl ChatSessionRepository for InMemoryStore<ChatSession> {
    async fn create(&self, session: ChatSession) -> AppResult<ChatSession> {
        self.insert(session).await
    }
    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<ChatSession>> {
        self.find(user_id, id).await
    }
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<ChatSession>> {
        self.list(user_id).await
    }
    async fn update(&self, session: ChatSession) -> AppResult<ChatSession> {
        self.replace(session).await
    }
    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.remove(user_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[tokio::test]
    async fn test_store_is_scoped_to_owner() {
        let store = deck_store();
        let deck = FlashcardDeckRepository::create(&store, test_deck(TEST_USER))
            .await
            .unwrap();

        assert!(FlashcardDeckRepository::find_by_id(&store, TEST_USER, &deck.id)
            .await
            .unwrap()
            .is_some());
        assert!(FlashcardDeckRepository::find_by_id(&store, OTHER_USER, &deck.id)
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            FlashcardDeckRepository::delete(&store, OTHER_USER, &deck.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_store_lists_newest_first() {
        let store = deck_store();
        let mut older = test_deck(TEST_USER);
        older.created_at = Some(Utc::now() - chrono::Duration::hours(1));
        let newer = test_deck(TEST_USER);
        FlashcardDeckRepository::create(&store, older.clone()).await.unwrap();
        FlashcardDeckRepository::create(&store, newer.clone()).await.unwrap();

        let listed = FlashcardDeckRepository::list_by_user(&store, TEST_USER)
            .await
            .unwrap();
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }
}
