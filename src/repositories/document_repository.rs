use async_trait::async_trait;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::StudyDocument,
    repositories::owned_collection::OwnedCollection,
};

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn create(&self, document: StudyDocument) -> AppResult<StudyDocument>;
    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<StudyDocument>>;
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<StudyDocument>>;
    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()>;
}

pub struct MongoDocumentRepository {
    docs: OwnedCollection<StudyDocument>,
}

impl MongoDocumentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            docs: OwnedCollection::new(db, "documents", "Document"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.docs.ensure_indexes().await
    }
}

#[async_trait]
impl DocumentRepository for MongoDocumentRepository {
    async fn create(&self, document: StudyDocument) -> AppResult<StudyDocument> {
        self.docs.insert(&document).await?;
        Ok(document)
    }

    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<StudyDocument>> {
        self.docs.find(user_id, id).await
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<StudyDocument>> {
        self.docs.list(user_id).await
    }

    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.docs.delete(user_id, id).await
    }
}
