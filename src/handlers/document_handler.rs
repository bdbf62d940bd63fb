use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{request::UploadDocumentRequest, response::MessageResponse},
};

#[post("/documents")]
async fn upload_document(
    state: web::Data<AppState>,
    request: web::Json<UploadDocumentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let document = state
        .document_service
        .upload_document(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(document))
}

#[get("/documents")]
async fn list_documents(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let documents = state.document_service.list_documents(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(documents))
}

#[get("/documents/{id}")]
async fn get_document(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let document = state.document_service.get_document(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(document))
}

#[delete("/documents/{id}")]
async fn delete_document(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.document_service.delete_document(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Document deleted")))
}
