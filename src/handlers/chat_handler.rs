use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateChatSessionRequest, SendMessageRequest},
        response::{ChatReplyResponse, DataResponse, MessageResponse},
    },
};

#[post("/chat/sessions")]
async fn create_session(
    state: web::Data<AppState>,
    request: Option<web::Json<CreateChatSessionRequest>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    let session = state
        .chat_service
        .create_session(auth.user_id(), request)
        .await?;
    Ok(HttpResponse::Created().json(session))
}

#[get("/chat/sessions")]
async fn list_sessions(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let sessions = state.chat_service.list_sessions(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(sessions))
}

#[get("/chat/sessions/{id}")]
async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state.chat_service.get_session(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[delete("/chat/sessions/{id}")]
async fn delete_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.chat_service.delete_session(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Chat session deleted")))
}

#[post("/chat/sessions/{id}/messages")]
async fn send_message(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SendMessageRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (session, reply) = state
        .chat_service
        .send_message(auth.user_id(), &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(DataResponse {
        data: ChatReplyResponse {
            session_id: session.id,
            reply,
        },
    }))
}
