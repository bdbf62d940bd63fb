use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::Quiz,
        dto::{
            request::{FlashcardQuizRequest, GenerateQuizRequest, SubmitQuizAttemptRequest},
            response::{GeneratedResponse, MessageResponse},
        },
    },
};

fn generated(quiz: Quiz) -> HttpResponse {
    HttpResponse::Ok().json(GeneratedResponse {
        id: quiz.id,
        data: quiz.questions,
    })
}

#[post("/quizzes/generate")]
async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .generate_from_notes(auth.user_id(), request.into_inner())
        .await?;
    Ok(generated(quiz))
}

#[post("/quizzes/from-deck/{deck_id}")]
async fn generate_deck_quiz(
    state: web::Data<AppState>,
    deck_id: web::Path<String>,
    request: Option<web::Json<FlashcardQuizRequest>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    let quiz = state
        .quiz_service
        .generate_from_deck(auth.user_id(), &deck_id, request)
        .await?;
    Ok(generated(quiz))
}

#[post("/quizzes/daily")]
async fn generate_daily_quiz(
    state: web::Data<AppState>,
    request: Option<web::Json<FlashcardQuizRequest>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    let quiz = state
        .quiz_service
        .generate_daily(auth.user_id(), request)
        .await?;
    Ok(generated(quiz))
}

#[get("/quizzes")]
async fn list_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_quizzes(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/quizzes/{id}")]
async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Quiz deleted")))
}

#[post("/quizzes/{id}/attempts")]
async fn submit_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitQuizAttemptRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .quiz_service
        .submit_attempt(auth.user_id(), &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[cfg(test)]
mod tests {
    use crate::handlers::tests::{authed, test_state};
    use crate::test_utils::fixtures::{FLASHCARDS_JSON, QUIZ_JSON};
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_generate_and_attempt_quiz() {
        let (state, client) = test_state();
        client.push(Ok(format!("Sure! {}", QUIZ_JSON)));
        let app = init_app!(state).await;

        let req = authed(test::TestRequest::post().uri("/api/quizzes/generate"))
            .set_json(json!({"notes": "Addition", "count": 1}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"][0]["correctAnswer"], "4");
        let id = body["id"].as_str().unwrap().to_string();

        let req = authed(test::TestRequest::post().uri(&format!("/api/quizzes/{}/attempts", id)))
            .set_json(json!({"answers": ["3"]}))
            .to_request();
        let result: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(result["score"], 0);
        assert_eq!(result["total"], 1);
        assert_eq!(result["results"][0]["correct"], false);
    }

    #[actix_web::test]
    async fn test_deck_quiz_without_body() {
        let (state, client) = test_state();
        client.push(Ok(FLASHCARDS_JSON.to_string()));
        client.push(Ok(QUIZ_JSON.to_string()));
        let app = init_app!(state).await;

        let req = authed(test::TestRequest::post().uri("/api/flashcards/generate"))
            .set_json(json!({"notes": "Arithmetic"}))
            .to_request();
        let deck: Value = test::call_and_read_body_json(&app, req).await;
        let deck_id = deck["id"].as_str().unwrap().to_string();

        let req = authed(
            test::TestRequest::post().uri(&format!("/api/quizzes/from-deck/{}", deck_id)),
        )
        .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_daily_quiz_without_decks_is_bad_request() {
        let (state, _) = test_state();
        let app = init_app!(state).await;

        let req = authed(test::TestRequest::post().uri("/api/quizzes/daily")).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unparseable_output_is_unprocessable() {
        let (state, client) = test_state();
        for _ in 0..3 {
            client.push(Ok("I cannot help with that.".to_string()));
        }
        let app = init_app!(state).await;

        let req = authed(test::TestRequest::post().uri("/api/quizzes/generate"))
            .set_json(json!({"notes": "Addition"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "InvalidResponseFormat");
    }
}
