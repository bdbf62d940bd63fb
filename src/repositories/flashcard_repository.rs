use async_trait::async_trait;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::FlashcardDeck,
    repositories::owned_collection::OwnedCollection,
};

#[async_trait]
pub trait FlashcardDeckRepository: Send + Sync {
    async fn create(&self, deck: FlashcardDeck) -> AppResult<FlashcardDeck>;
    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<FlashcardDeck>>;
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<FlashcardDeck>>;
    async fn update(&self, deck: FlashcardDeck) -> AppResult<FlashcardDeck>;
    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()>;
}

pub struct MongoFlashcardDeckRepository {
    docs: OwnedCollection<FlashcardDeck>,
}

impl MongoFlashcardDeckRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            docs: OwnedCollection::new(db, "flashcard_decks", "Flashcard deck"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.docs.ensure_indexes().await
    }
}

#[async_trait]
impl FlashcardDeckRepository for MongoFlashcardDeckRepository {
    async fn create(&self, deck: FlashcardDeck) -> AppResult<FlashcardDeck> {
        self.docs.insert(&deck).await?;
        Ok(deck)
    }

    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<FlashcardDeck>> {
        self.docs.find(user_id, id).await
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<FlashcardDeck>> {
        self.docs.list(user_id).await
    }

    async fn update(&self, deck: FlashcardDeck) -> AppResult<FlashcardDeck> {
        self.docs.replace(&deck.user_id, &deck.id, &deck).await?;
        Ok(deck)
    }

    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.docs.delete(user_id, id).await
    }
}
