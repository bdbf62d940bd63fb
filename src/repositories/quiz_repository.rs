use async_trait::async_trait;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::Quiz,
    repositories::owned_collection::OwnedCollection,
};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<Quiz>>;
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>>;
    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    docs: OwnedCollection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            docs: OwnedCollection::new(db, "quizzes", "Quiz"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.docs.ensure_indexes().await
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.docs.insert(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<Quiz>> {
        self.docs.find(user_id, id).await
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.docs.list(user_id).await
    }

    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.docs.delete(user_id, id).await
    }
}
