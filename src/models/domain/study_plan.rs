use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudyTask {
    pub subject: String,
    /// Minutes, always positive.
    pub duration: u32,
    pub activity: String,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudyDay {
    pub date: NaiveDate,
    pub tasks: Vec<StudyTask>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StudyPlan {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub subjects: Vec<String>,
    pub exam_date: NaiveDate,
    pub hours_per_day: f32,
    pub days: Vec<StudyDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl StudyPlan {
    pub fn new(
        user_id: &str,
        title: &str,
        subjects: Vec<String>,
        exam_date: NaiveDate,
        hours_per_day: f32,
        days: Vec<StudyDay>,
    ) -> Self {
        StudyPlan {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            subjects,
            exam_date,
            hours_per_day,
            days,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    /// Returns false when either index is out of range.
    pub fn set_task_completed(&mut self, day: usize, task: usize, completed: bool) -> bool {
        match self.days.get_mut(day).and_then(|d| d.tasks.get_mut(task)) {
            Some(t) => {
                t.completed = completed;
                self.modified_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    /// Fraction of tasks marked completed, 0.0 for an empty plan.
    pub fn progress(&self) -> f32 {
        let total: usize = self.days.iter().map(|d| d.tasks.len()).sum();
        if total == 0 {
            return 0.0;
        }
        let done = self
            .days
            .iter()
            .flat_map(|d| d.tasks.iter())
            .filter(|t| t.completed)
            .count();
        done as f32 / total as f32
    }
}
