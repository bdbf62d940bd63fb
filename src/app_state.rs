use std::sync::Arc;

use crate::{
    config::Config,
    db::{Database, HealthProbe},
    errors::AppResult,
    generation::{GeminiClient, GenerationPipeline},
    repositories::{
        ChatSessionRepository, DocumentRepository, FlashcardDeckRepository,
        MongoChatSessionRepository, MongoDocumentRepository, MongoFlashcardDeckRepository,
        MongoQuizRepository, MongoStudyPlanRepository, QuizRepository, StudyPlanRepository,
    },
    services::{
        chat_service::ChatService, document_service::DocumentService,
        flashcard_service::FlashcardService, quiz_service::QuizService,
        study_plan_service::StudyPlanService,
    },
};

/// One handle per collection; `AppState::from_parts` wires them into services.
#[derive(Clone)]
pub struct Repositories {
    pub decks: Arc<dyn FlashcardDeckRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub plans: Arc<dyn StudyPlanRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub chats: Arc<dyn ChatSessionRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub flashcard_service: Arc<FlashcardService>,
    pub quiz_service: Arc<QuizService>,
    pub study_plan_service: Arc<StudyPlanService>,
    pub document_service: Arc<DocumentService>,
    pub chat_service: Arc<ChatService>,
    pub health: Arc<dyn HealthProbe>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let decks = Arc::new(MongoFlashcardDeckRepository::new(&db));
        decks.ensure_indexes().await?;
        let quizzes = Arc::new(MongoQuizRepository::new(&db));
        quizzes.ensure_indexes().await?;
        let plans = Arc::new(MongoStudyPlanRepository::new(&db));
        plans.ensure_indexes().await?;
        let documents = Arc::new(MongoDocumentRepository::new(&db));
        documents.ensure_indexes().await?;
        let chats = Arc::new(MongoChatSessionRepository::new(&db));
        chats.ensure_indexes().await?;

        let pipeline = GenerationPipeline::new(Arc::new(GeminiClient::from_config(&config)));
        log::info!("Generation model: {}", config.gemini_model);

        let repositories = Repositories {
            decks,
            quizzes,
            plans,
            documents,
            chats,
        };

        Ok(Self::from_parts(config, Arc::new(db), repositories, pipeline))
    }

    pub fn from_parts(
        config: Config,
        health: Arc<dyn HealthProbe>,
        repositories: Repositories,
        pipeline: GenerationPipeline,
    ) -> Self {
        let Repositories {
            decks,
            quizzes,
            plans,
            documents,
            chats,
        } = repositories;

        Self {
            flashcard_service: Arc::new(FlashcardService::new(decks.clone(), pipeline.clone())),
            quiz_service: Arc::new(QuizService::new(quizzes, decks, pipeline.clone())),
            study_plan_service: Arc::new(StudyPlanService::new(plans, pipeline.clone())),
            document_service: Arc::new(DocumentService::new(documents.clone())),
            chat_service: Arc::new(ChatService::new(chats, documents, pipeline)),
            health,
            config: Arc::new(config),
        }
    }
}
