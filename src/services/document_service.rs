use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::StudyDocument, dto::request::UploadDocumentRequest},
    repositories::DocumentRepository,
    services::require_text,
};

pub struct DocumentService {
    repository: Arc<dyn DocumentRepository>,
}

impl DocumentService {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    pub async fn upload_document(
        &self,
        user_id: &str,
        request: UploadDocumentRequest,
    ) -> AppResult<StudyDocument> {
        request.validate()?;
        require_text(&request.name, "Document name")?;
        require_text(&request.content, "Document content")?;

        let document = StudyDocument::new(user_id, request.name.trim(), &request.content);
        self.repository.create(document).await
    }

    pub async fn list_documents(&self, user_id: &str) -> AppResult<Vec<StudyDocument>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn get_document(&self, user_id: &str, id: &str) -> AppResult<StudyDocument> {
        self.repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document with id '{}' not found", id)))
    }

    pub async fn delete_document(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.repository.delete(user_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{document_store, fixtures::*};

    #[tokio::test]
    async fn test_upload_and_fetch_document() {
        let service = DocumentService::new(Arc::new(document_store()));

        let document = service
            .upload_document(
                TEST_USER,
                UploadDocumentRequest {
                    name: " Chapter 1 ".to_string(),
                    content: "Photosynthesis converts light into chemical energy.".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(document.name, "Chapter 1");
        let fetched = service.get_document(TEST_USER, &document.id).await.unwrap();
        assert_eq!(fetched, document);
        assert!(matches!(
            service.get_document(OTHER_USER, &document.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_content_is_rejected() {
        let service = DocumentService::new(Arc::new(document_store()));

        let result = service
            .upload_document(
                TEST_USER,
                UploadDocumentRequest {
                    name: "Empty".to_string(),
                    content: "   ".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
