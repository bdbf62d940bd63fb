use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateDeckRequest, GenerateFlashcardsRequest, UpdateDeckRequest},
        response::{GeneratedResponse, MessageResponse},
    },
};

#[post("/flashcards/generate")]
async fn generate_flashcards(
    state: web::Data<AppState>,
    request: web::Json<GenerateFlashcardsRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let deck = state
        .flashcard_service
        .generate_deck(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(GeneratedResponse {
        id: deck.id,
        data: deck.cards,
    }))
}

#[post("/flashcards")]
async fn create_deck(
    state: web::Data<AppState>,
    request: web::Json<CreateDeckRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let deck = state
        .flashcard_service
        .create_deck(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(deck))
}

#[get("/flashcards")]
async fn list_decks(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let decks = state.flashcard_service.list_decks(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(decks))
}

#[get("/flashcards/{id}")]
async fn get_deck(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let deck = state.flashcard_service.get_deck(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(deck))
}

#[put("/flashcards/{id}")]
async fn update_deck(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateDeckRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let deck = state
        .flashcard_service
        .update_deck(auth.user_id(), &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(deck))
}

#[delete("/flashcards/{id}")]
async fn delete_deck(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.flashcard_service.delete_deck(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Flashcard deck deleted")))
}
