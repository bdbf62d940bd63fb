use async_trait::async_trait;

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::StudyPlan,
    repositories::owned_collection::OwnedCollection,
};

#[async_trait]
pub trait StudyPlanRepository: Send + Sync {
    async fn create(&self, plan: StudyPlan) -> AppResult<StudyPlan>;
    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<StudyPlan>>;
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<StudyPlan>>;
    async fn update(&self, plan: StudyPlan) -> AppResult<StudyPlan>;
    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()>;
}

pub struct MongoStudyPlanRepository {
    docs: OwnedCollection<StudyPlan>,
}

impl MongoStudyPlanRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            docs: OwnedCollection::new(db, "study_plans", "Study plan"),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.docs.ensure_indexes().await
    }
}

#[async_trait]
impl StudyPlanRepository for MongoStudyPlanRepository {
    async fn create(&self, plan: StudyPlan) -> AppResult<StudyPlan> {
        self.docs.insert(&plan).await?;
        Ok(plan)
    }

    async fn find_by_id(&self, user_id: &str, id: &str) -> AppResult<Option<StudyPlan>> {
        self.docs.find(user_id, id).await
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<StudyPlan>> {
        self.docs.list(user_id).await
    }

    async fn update(&self, plan: StudyPlan) -> AppResult<StudyPlan> {
        self.docs.replace(&plan.user_id, &plan.id, &plan).await?;
        Ok(plan)
    }

    async fn delete(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.docs.delete(user_id, id).await
    }
}
