use serde::Serialize;

use crate::models::domain::StudyPlan;

/// Body of a successful generation: the saved aggregate's id plus the
/// generated items.
#[derive(Debug, Serialize)]
pub struct GeneratedResponse<T: Serialize> {
    pub id: String,
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A stored plan plus the share of its tasks marked completed.
#[derive(Debug, Serialize)]
pub struct StudyPlanResponse {
    #[serde(flatten)]
    pub plan: StudyPlan,
    pub progress: f32,
}

impl From<StudyPlan> for StudyPlanResponse {
    fn from(plan: StudyPlan) -> Self {
        Self {
            progress: plan.progress(),
            plan,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatReplyResponse {
    pub session_id: String,
    pub reply: String,
}
