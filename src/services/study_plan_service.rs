use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    generation::{GenerationPipeline, GenerationRequest, DEFAULT_LANGUAGE},
    models::{
        domain::{StudyDay, StudyPlan},
        dto::request::GenerateStudyPlanRequest,
    },
    repositories::StudyPlanRepository,
};

pub struct StudyPlanService {
    repository: Arc<dyn StudyPlanRepository>,
    pipeline: GenerationPipeline,
}

impl StudyPlanService {
    pub fn new(repository: Arc<dyn StudyPlanRepository>, pipeline: GenerationPipeline) -> Self {
        Self {
            repository,
            pipeline,
        }
    }

    pub async fn generate_plan(
        &self,
        user_id: &str,
        request: GenerateStudyPlanRequest,
    ) -> AppResult<StudyPlan> {
        request.validate()?;

        let subjects: Vec<String> = request
            .subjects
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if subjects.is_empty() {
            return Err(AppError::ValidationError(
                "At least one subject is required".to_string(),
            ));
        }

        let start_date = request.start_date.unwrap_or_else(|| Utc::now().date_naive());
        if request.exam_date <= start_date {
            return Err(AppError::ValidationError(format!(
                "Exam date {} must be after the start date {}",
                request.exam_date, start_date
            )));
        }

        let generation = GenerationRequest::study_plan(
            &subjects,
            start_date,
            request.exam_date,
            request.hours_per_day,
        )
        .with_language(request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE));

        let days = self
            .pipeline
            .generate::<StudyDay>(&generation)
            .await
            .into_result()?;

        let title = request
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Study plan for {}", request.exam_date));

        let plan = StudyPlan::new(
            user_id,
            &title,
            subjects,
            request.exam_date,
            request.hours_per_day,
            days,
        );
        let plan = self.repository.create(plan).await?;

        log::info!(
            "Created study plan '{}' spanning {} days for user {}",
            plan.id,
            plan.days.len(),
            user_id
        );
        Ok(plan)
    }

    pub async fn list_plans(&self, user_id: &str) -> AppResult<Vec<StudyPlan>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn get_plan(&self, user_id: &str, id: &str) -> AppResult<StudyPlan> {
        self.repository
            .find_by_id(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Study plan with id '{}' not found", id)))
    }

    pub async fn set_task_completed(
        &self,
        user_id: &str,
        id: &str,
        day: usize,
        task: usize,
        completed: bool,
    ) -> AppResult<StudyPlan> {
        let mut plan = self.get_plan(user_id, id).await?;

        if !plan.set_task_completed(day, task, completed) {
            return Err(AppError::NotFound(format!(
                "Task {} on day {} not found in study plan '{}'",
                task, day, id
            )));
        }

        self.repository.update(plan).await
    }

    pub async fn delete_plan(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.repository.delete(user_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generation::{client::MockGenerationClient, GenerationError},
        test_utils::{fixtures::*, plan_store},
    };
    use chrono::NaiveDate;

    fn service_with(client: MockGenerationClient) -> StudyPlanService {
        StudyPlanService::new(
            Arc::new(plan_store()),
            GenerationPipeline::new(Arc::new(client)),
        )
    }

    fn plan_request(start: &str, exam: &str) -> GenerateStudyPlanRequest {
        GenerateStudyPlanRequest {
            title: None,
            subjects: vec!["Math".to_string(), " Physics ".to_string()],
            exam_date: exam.parse().unwrap(),
            start_date: Some(start.parse().unwrap()),
            hours_per_day: 2.5,
            language: None,
        }
    }

    #[tokio::test]
    async fn test_generate_plan_and_toggle_task() {
        let mut client = MockGenerationClient::new();
        client
            .expect_generate()
            .withf(|prompt, _| prompt.contains("Physics"))
            .times(1)
            .returning(|_, _| Ok(STUDY_PLAN_JSON.to_string()));
        let service = service_with(client);

        let plan = service
            .generate_plan(TEST_USER, plan_request("2026-11-01", "2026-11-04"))
            .await
            .unwrap();
        assert_eq!(plan.days.len(), 2);
        assert_eq!(plan.subjects, vec!["Math", "Physics"]);
        assert_eq!(plan.title, "Study plan for 2026-11-04");
        assert_eq!(
            plan.days[0].date,
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
        );

        let updated = service
            .set_task_completed(TEST_USER, &plan.id, 1, 0, true)
            .await
            .unwrap();
        assert!(updated.days[1].tasks[0].completed);
        assert_eq!(updated.progress(), 0.5);
    }

    #[tokio::test]
    async fn test_exam_before_start_is_rejected() {
        let mut client = MockGenerationClient::new();
        client.expect_generate().never();
        let service = service_with(client);

        let result = service
            .generate_plan(TEST_USER, plan_request("2026-11-04", "2026-11-04"))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_task_out_of_range_is_not_found() {
        let mut client = MockGenerationClient::new();
        client
            .expect_generate()
            .returning(|_, _| Ok(STUDY_PLAN_JSON.to_string()));
        let service = service_with(client);
        let plan = service
            .generate_plan(TEST_USER, plan_request("2026-11-01", "2026-11-04"))
            .await
            .unwrap();

        let result = service.set_task_completed(TEST_USER, &plan.id, 0, 7, true).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_key_is_not_retried() {
        let mut client = MockGenerationClient::new();
        client
            .expect_generate()
            .times(1)
            .returning(|_, _| Err(GenerationError::InvalidApiKey("API key not valid".to_string())));
        let service = service_with(client);

        let result = service
            .generate_plan(TEST_USER, plan_request("2026-11-01", "2026-11-04"))
            .await;

        assert!(matches!(result, Err(AppError::Generation(_))));
    }
}
