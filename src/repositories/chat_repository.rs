use async_trait::async_trait;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::ChatSession,
    repositories::owned_collection::OwnedCollection,
};

#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    async fn create(&self, session: ChatSession) -> AppResult<ChatSession>;
    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<ChatSession>>;
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<ChatSession>>;
    async fn update(&self, session: ChatSession) -> AppResult<ChatSession>;
    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()>;
}

pub struct MongoChatSessionRepository {
    docs: OwnedCollection<ChatSession>,
}

impl MongoChatSessionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            docs: OwnedCollection::new(db, "chat_sessions", "Chat session"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.docs.ensure_indexes().await
    }
}

#[async_trait]
impl ChatSessionRepository for MongoChatSessionRepository {
    async fn create(&self, session: ChatSession) -> AppResult<ChatSession> {
        self.docs.insert(&session).await?;
        Ok(session)
    }

    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<ChatSession>> {
        self.docs.find(user_id, id).await
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<ChatSession>> {
        self.docs.list(user_id).await
    }

    async fn update(&self, session: ChatSession) -> AppResult<ChatSession> {
        self.docs.replace(&session.user_id, &session.id, &session).await?;
        Ok(session)
    }

    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.docs.delete(user_id, id).await
    }
}
