#[cfg(test)]
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .app_data(actix_web::web::Data::new(
                    $crate::handlers::tests::jwt_service(),
                ))
                .configure($crate::handlers::configure_health)
                .service(
                    actix_web::web::scope("/api")
                        .wrap($crate::auth::AuthMiddleware)
                        .configure($crate::handlers::configure_api),
                ),
        )
    };
}

pub mod chat_handler;
pub mod document_handler;
pub mod flashcard_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod study_plan_handler;

use actix_web::web;

pub use health_handler::{health_check, health_check_live, health_check_ready};

/// Public probes, mounted at the root.
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(health_check_ready);
}

/// Authenticated routes, mounted under `/api`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(flashcard_handler::generate_flashcards)
        .service(flashcard_handler::create_deck)
        .service(flashcard_handler::list_decks)
        .service(flashcard_handler::get_deck)
        .service(flashcard_handler::update_deck)
        .service(flashcard_handler::delete_deck)
        .service(quiz_handler::generate_quiz)
        .service(quiz_handler::generate_deck_quiz)
        .service(quiz_handler::generate_daily_quiz)
        .service(quiz_handler::list_quizzes)
        .service(quiz_handler::get_quiz)
        .service(quiz_handler::delete_quiz)
        .service(quiz_handler::submit_attempt)
        .service(study_plan_handler::generate_study_plan)
        .service(study_plan_handler::list_study_plans)
        .service(study_plan_handler::get_study_plan)
        .service(study_plan_handler::update_task)
        .service(study_plan_handler::delete_study_plan)
        .service(document_handler::upload_document)
        .service(document_handler::list_documents)
        .service(document_handler::get_document)
        .service(document_handler::delete_document)
        .service(chat_handler::create_session)
        .service(chat_handler::list_sessions)
        .service(chat_handler::get_session)
        .service(chat_handler::delete_session)
        .service(chat_handler::send_message);
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use actix_web::{http::header::AUTHORIZATION, test::TestRequest};
    use async_trait::async_trait;

    use crate::{
        app_state::{AppState, Repositories},
        auth::JwtService,
        config::Config,
        db::HealthProbe,
        errors::{AppError, AppResult},
        generation::{
            GenerationClient, GenerationError, GenerationPipeline, RetryPolicy, SamplingProfile,
        },
        test_utils::{
            chat_store, deck_store, document_store, fixtures::TEST_USER, plan_store, quiz_store,
        },
    };

    /// Replies with queued responses in order; an empty queue reads as a
    /// missing key so the pipeline stops at once.
    #[derive(Default)]
    pub struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    }

    impl ScriptedClient {
        pub fn push(&self, reply: Result<String, GenerationError>) {
            self.replies
                .lock()
                .expect("scripted client lock poisoned")
                .push_back(reply);
        }
    }

    #[async_trait]
    impl GenerationClient for ScriptedClient {
        async fn generate(&self, _prompt: &str, _profile: SamplingProfile) -> Result<String, GenerationError> {
            self.replies
                .lock()
                .expect("scripted client lock poisoned")
                .pop_front()
                .unwrap_or(Err(GenerationError::MissingApiKey))
        }
    }

    pub struct AlwaysUp;

    #[async_trait]
    impl HealthProbe for AlwaysUp {
        async fn ping(&self) -> AppResult<()> {
            Ok(())
        }
    }

    pub struct FailingProbe;

    #[async_trait]
    impl HealthProbe for FailingProbe {
        async fn ping(&self) -> AppResult<()> {
            Err(AppError::DatabaseError("connection refused".to_string()))
        }
    }

    pub fn jwt_service() -> JwtService {
        JwtService::new(&Config::test_config().jwt_secret)
    }

    /// Attaches a bearer token for `TEST_USER`.
    pub fn authed(request: TestRequest) -> TestRequest {
        let token = jwt_service()
            .create_token(TEST_USER, None, 1)
            .expect("token should be created");
        request.insert_header((AUTHORIZATION, format!("Bearer {}", token)))
    }

    /// In-memory state with no retry delay.
    pub fn test_state() -> (AppState, Arc<ScriptedClient>) {
        let client = Arc::new(ScriptedClient::default());
        let pipeline = GenerationPipeline::with_policy(
            client.clone(),
            RetryPolicy {
                max_attempts: 3,
                base_delay: Duration::ZERO,
            },
        );
        let repositories = Repositories {
            decks: Arc::new(deck_store()),
            quizzes: Arc::new(quiz_store()),
            plans: Arc::new(plan_store()),
            documents: Arc::new(document_store()),
            chats: Arc::new(chat_store()),
        };

        let state = AppState::from_parts(
            Config::test_config(),
            Arc::new(AlwaysUp),
            repositories,
            pipeline,
        );
        (state, client)
    }

    #[actix_web::test]
    async fn test_api_requires_token() {
        let (state, _) = test_state();
        let app = init_app!(state).await;

        let req = TestRequest::get().uri("/api/flashcards").to_request();
        let status = match actix_web::test::try_call_service(&app, req).await {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        };

        assert_eq!(status, actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_health_is_public() {
        let (state, _) = test_state();
        let app = init_app!(state).await;

        let req = TestRequest::get().uri("/health/live").to_request();
        let resp = actix_web::test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }
}
