use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    generation::{prompt::build_chat_prompt, GenerationError, GenerationPipeline, SamplingProfile},
    models::{
        domain::{ChatMessage, ChatRole, ChatSession},
        dto::request::{CreateChatSessionRequest, SendMessageRequest},
    },
    repositories::{ChatSessionRepository, DocumentRepository},
    services::require_text,
};

/// Prior messages replayed into each chat prompt.
pub const CHAT_HISTORY_LIMIT: usize = 20;

pub struct ChatService {
    repository: Arc<dyn ChatSessionRepository>,
    documents: Arc<dyn DocumentRepository>,
    pipeline: GenerationPipeline,
}

impl ChatService {
    pub fn new(
        repository: Arc<dyn ChatSessionRepository>,
        documents: Arc<dyn DocumentRepository>,
        pipeline: GenerationPipeline,
    ) -> Self {
        Self {
            repository,
            documents,
            pipeline,
        }
    }

    pub async fn create_session(
        &self,
        user_id: &str,
        request: CreateChatSessionRequest,
    ) -> AppResult<ChatSession> {
        request.validate()?;

        let document_name = match &request.document_id {
            Some(document_id) => Some(
                self.documents
                    .find_by_id(user_id, document_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Document with id '{}' not found", document_id))
                    })?
                    .name,
            ),
            None => None,
        };

        let title = request
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| document_name.map(|name| format!("Chat about {}", name)))
            .unwrap_or_else(|| "New chat".to_string());

        self.repository
            .create(ChatSession::new(user_id, &title, request.document_id))
            .await
    }

    pub async fn list_sessions(&self, user_id: &str) -> AppResult<Vec<ChatSession>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn get_session(&self, user_id: &str, id: &str) -> AppResult<ChatSession> {
        self.repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Chat session with id '{}' not found", id)))
    }

    pub async fn delete_session(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.repository.delete(user_id, id).await
    }

    /// Answers `request.message` in the context of the session's history
    /// and attached document. Both turns are stored only when a reply was
    /// produced.
    pub async fn send_message(
        &self,
        user_id: &str,
        session_id: &str,
        request: SendMessageRequest,
    ) -> AppResult<(ChatSession, String)> {
        request.validate()?;
        require_text(&request.message, "Message")?;

        let mut session = self.get_session(user_id, session_id).await?;

        let document = match &session.document_id {
            Some(document_id) => {
                let document = self.documents.find_by_id(user_id, document_id).await?;
                if document.is_none() {
                    log::warn!(
                        "Chat session {} references missing document {}",
                        session.id,
                        document_id
                    );
                }
                document
            }
            None => None,
        };

        let message = request.message.trim();
        let prompt = build_chat_prompt(
            session.recent(CHAT_HISTORY_LIMIT),
            document.as_ref().map(|d| d.content.as_str()),
            message,
        );

        let reply = self
            .pipeline
            .run_with(&prompt, SamplingProfile::Creative, |raw| {
                let text = raw.trim();
                if text.is_empty() {
                    Err(GenerationError::EmptyResponse)
                } else {
                    Ok(text.to_string())
                }
            })
            .await?;

        session.push(ChatMessage::new(ChatRole::User, message));
        session.push(ChatMessage::new(ChatRole::Assistant, &reply));
        let session = self.repository.update(session).await?;

        Ok((session, reply))
    }
}
