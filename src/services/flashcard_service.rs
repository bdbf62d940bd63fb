use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    generation::{GenerationPipeline, GenerationRequest, DEFAULT_LANGUAGE},
    models::{
        domain::{Flashcard, FlashcardDeck},
        dto::request::{
            CreateDeckRequest, GenerateFlashcardsRequest, UpdateDeckRequest,
            DEFAULT_FLASHCARD_COUNT,
        },
    },
    repositories::FlashcardDeckRepository,
    services::{require_text, title_or_default},
};

pub struct FlashcardService {
    repository: Arc<dyn FlashcardDeckRepository>,
    pipeline: GenerationPipeline,
}

impl FlashcardService {
    pub fn new(repository: Arc<dyn FlashcardDeckRepository>, pipeline: GenerationPipeline) -> Self {
        Self {
            repository,
            pipeline,
        }
    }

    /// Generates cards from notes and saves them as a new deck.
    pub async fn generate_deck(
        &self,
        user_id: &str,
        request: GenerateFlashcardsRequest,
    ) -> AppResult<FlashcardDeck> {
        request.validate()?;
        require_text(&request.notes, "Notes")?;

        let generation = GenerationRequest::flashcards(
            &request.notes,
            request.count.unwrap_or(DEFAULT_FLASHCARD_COUNT),
        )
        .with_language(request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE));

        let cards = self
            .pipeline
            .generate::<Flashcard>(&generation)
            .await
            .into_result()?;

        let title = title_or_default(request.title, request.subject.as_deref(), "Flashcards");
        let deck = FlashcardDeck::new(user_id, &title, request.subject, cards);
        let deck = self.repository.create(deck).await?;

        log::info!(
            "Created deck '{}' with {} generated cards for user {}",
            deck.id,
            deck.cards.len(),
            user_id
        );
        Ok(deck)
    }

    pub async fn create_deck(&self, user_id: &str, request: CreateDeckRequest) -> AppResult<FlashcardDeck> {
        request.validate()?;
        require_text(&request.title, "Title")?;
        ensure_complete(&request.cards)?;

        let deck = FlashcardDeck::new(user_id, request.title.trim(), request.subject, request.cards);
        self.repository.create(deck).await
    }

    pub async fn list_decks(&self, user_id: &str) -> AppResult<Vec<FlashcardDeck>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn get_deck(&self, user_id: &str, id: &str) -> AppResult<FlashcardDeck> {
        self.repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Flashcard deck with id '{}' not found", id)))
    }

    pub async fn update_deck(
        &self,
        user_id: &str,
        id: &str,
        request: UpdateDeckRequest,
    ) -> AppResult<FlashcardDeck> {
        request.validate()?;

        let mut deck = self.get_deck(user_id, id).await?;

        if let Some(title) = request.title {
            require_text(&title, "Title")?;
            deck.title = title.trim().to_string();
        }
        if request.subject.is_some() {
            deck.subject = request.subject;
        }
        if let Some(cards) = request.cards {
            ensure_complete(&cards)?;
            deck.cards = cards;
        }
        deck.modified_at = Some(Utc::now());

        self.repository.update(deck).await
    }

    pub async fn delete_deck(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.repository.delete(user_id, id).await
    }
}

fn ensure_complete(cards: &[Flashcard]) -> AppResult<()> {
    match cards.iter().position(|card| !card.is_complete()) {
        Some(index) => Err(AppError::ValidationError(format!(
            "Card {} needs both a question and an answer",
            index + 1
        ))),
        None => Ok(()),
    }
}
