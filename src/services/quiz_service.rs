use std::sync::Arc;

use rand::seq::SliceRandom;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    generation::{GenerationPipeline, GenerationRequest, DEFAULT_LANGUAGE},
    models::{
        domain::{Flashcard, Quiz, QuizAttemptResult, QuizQuestion, QuizSource},
        dto::request::{
            FlashcardQuizRequest, GenerateQuizRequest, SubmitQuizAttemptRequest,
            DEFAULT_QUIZ_COUNT,
        },
    },
    repositories::{FlashcardDeckRepository, QuizRepository},
    services::{require_text, title_or_default},
};

/// Cards drawn across all of a user's decks for the daily quiz.
pub const DAILY_CARD_SAMPLE: usize = 20;

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
    decks: Arc<dyn FlashcardDeckRepository>,
    pipeline: GenerationPipeline,
}

impl QuizService {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        decks: Arc<dyn FlashcardDeckRepository>,
        pipeline: GenerationPipeline,
    ) -> Self {
        Self {
            repository,
            decks,
            pipeline,
        }
    }

    pub async fn generate_from_notes(&self, user_id: &str, request: GenerateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;
        require_text(&request.notes, "Notes")?;

        let generation =
            GenerationRequest::quiz(&request.notes, request.count.unwrap_or(DEFAULT_QUIZ_COUNT))
                .with_language(request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE));

        let title = title_or_default(request.title, request.subject.as_deref(), "Quiz");
        self.generate_and_save(user_id, &generation, &title, request.subject, QuizSource::Notes)
            .await
    }

    pub async fn generate_from_deck(
        &self,
        user_id: &str,
        deck_id: &str,
        request: FlashcardQuizRequest,
    ) -> AppResult<Quiz> {
        request.validate()?;

        let deck = self
            .decks
            .find_by_id(user_id, deck_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Flashcard deck with id '{}' not found", deck_id)))?;

        if deck.cards.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Flashcard deck '{}' has no cards",
                deck.title
            )));
        }

        let generation = flashcard_quiz_request(&deck.cards, &request);
        let title = format!("{} Quiz", deck.title);
        self.generate_and_save(user_id, &generation, &title, deck.subject, QuizSource::Deck)
            .await
    }

    /// A quiz over a random sample of cards from every deck the user owns.
    pub async fn generate_daily(&self, user_id: &str, request: FlashcardQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let cards: Vec<Flashcard> = self
            .decks
            .list_by_user(user_id)
            .await?
            .into_iter()
            .flat_map(|deck| deck.cards)
            .collect();

        if cards.is_empty() {
            return Err(AppError::ValidationError(
                "Create some flashcards before taking a daily quiz".to_string(),
            ));
        }

        let sample: Vec<Flashcard> = cards
            .choose_multiple(&mut rand::thread_rng(), DAILY_CARD_SAMPLE)
            .cloned()
            .collect();
        log::debug!("Daily quiz sampled {} of {} cards", sample.len(), cards.len());

        let generation = flashcard_quiz_request(&sample, &request);
        let title = format!("Daily Quiz {}", chrono::Utc::now().format("%Y-%m-%d"));
        self.generate_and_save(user_id, &generation, &title, None, QuizSource::Daily)
            .await
    }

    async fn generate_and_save(
        &self,
        user_id: &str,
        generation: &GenerationRequest,
        title: &str,
        subject: Option<String>,
        source: QuizSource,
    ) -> AppResult<Quiz> {
        let questions = self
            .pipeline
            .generate::<QuizQuestion>(generation)
            .await
            .into_result()?;

        let quiz = self
            .repository
            .create(Quiz::new(user_id, title, subject, source, questions))
            .await?;

        log::info!(
            "Created {:?} quiz '{}' with {} questions for user {}",
            source,
            quiz.id,
            quiz.questions.len(),
            user_id
        );
        Ok(quiz)
    }

    pub async fn list_quizzes(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn get_quiz(&self, user_id: &str, id: &str) -> AppResult<Quiz> {
        self.repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn delete_quiz(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.repository.delete(user_id, id).await
    }

    pub async fn submit_attempt(
        &self,
        user_id: &str,
        id: &str,
        request: SubmitQuizAttemptRequest,
    ) -> AppResult<QuizAttemptResult> {
        request.validate()?;

        let quiz = self.get_quiz(user_id, id).await?;
        if request.answers.len() > quiz.questions.len() {
            return Err(AppError::ValidationError(format!(
                "Quiz has {} questions but {} answers were submitted",
                quiz.questions.len(),
                request.answers.len()
            )));
        }

        Ok(QuizAttemptResult::grade(&quiz, &request.answers))
    }
}

fn flashcard_quiz_request(cards: &[Flashcard], request: &FlashcardQuizRequest) -> GenerationRequest {
    GenerationRequest::quiz_from_flashcards(cards, request.count.unwrap_or(DEFAULT_QUIZ_COUNT))
        .with_language(request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE))
}
