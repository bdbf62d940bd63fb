use chrono::NaiveDate;
use serde::Serialize;

use crate::{generation::client::SamplingProfile, models::domain::Flashcard};

/// Free-text input beyond this many characters is dropped from prompts.
pub const MAX_NOTES_CHARS: usize = 15_000;
pub const MIN_ITEM_COUNT: u32 = 1;
pub const MAX_ITEM_COUNT: u32 = 50;
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Flashcards,
    Quiz,
    StudyPlan,
}

impl TaskKind {
    /// Structured output wants low temperature.
    pub fn profile(&self) -> SamplingProfile {
        SamplingProfile::Standard
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::Flashcards => write!(f, "flashcards"),
            TaskKind::Quiz => write!(f, "quiz"),
            TaskKind::StudyPlan => write!(f, "study-plan"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationInput {
    Notes(String),
    Flashcards(Vec<Flashcard>),
    Schedule {
        subjects: Vec<String>,
        start_date: NaiveDate,
        exam_date: NaiveDate,
        hours_per_day: f32,
    },
}

/// Everything needed to render one generation prompt. Built per request and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    task: TaskKind,
    input: GenerationInput,
    count: u32,
    language: String,
}

impl GenerationRequest {
    pub fn flashcards(notes: &str, count: u32) -> Self {
        Self::new(TaskKind::Flashcards, GenerationInput::Notes(notes.to_string()), count)
    }

    pub fn quiz(notes: &str, count: u32) -> Self {
        Self::new(TaskKind::Quiz, GenerationInput::Notes(notes.to_string()), count)
    }

    pub fn quiz_from_flashcards(cards: &[Flashcard], count: u32) -> Self {
        Self::new(TaskKind::Quiz, GenerationInput::Flashcards(cards.to_vec()), count)
    }

    pub fn study_plan(
        subjects: &[String],
        start_date: NaiveDate,
        exam_date: NaiveDate,
        hours_per_day: f32,
    ) -> Self {
        let days = (exam_date - start_date).num_days().max(1) as u32;
        Self::new(
            TaskKind::StudyPlan,
            GenerationInput::Schedule {
                subjects: subjects.to_vec(),
                start_date,
                exam_date,
                hours_per_day,
            },
            days,
        )
    }

    pub fn with_language(self, language: &str) -> Self {
        let language = language.trim();
        Self {
            language: if language.is_empty() {
                DEFAULT_LANGUAGE.to_string()
            } else {
                language.to_string()
            },
            ..self
        }
    }

    fn new(task: TaskKind, input: GenerationInput, count: u32) -> Self {
        Self {
            task,
            input,
            count: count.clamp(MIN_ITEM_COUNT, MAX_ITEM_COUNT),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn task(&self) -> TaskKind {
        self.task
    }

    pub fn input(&self) -> &GenerationInput {
        &self.input
    }

    /// Items to ask for; for study plans, the number of days.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// Cuts `text` to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_clamped() {
        assert_eq!(GenerationRequest::flashcards("notes", 0).count(), 1);
        assert_eq!(GenerationRequest::quiz("notes", 500).count(), MAX_ITEM_COUNT);
        assert_eq!(GenerationRequest::quiz("notes", 7).count(), 7);
    }

    #[test]
    fn blank_language_falls_back_to_default() {
        let request = GenerationRequest::flashcards("notes", 5).with_language("  ");
        assert_eq!(request.language(), DEFAULT_LANGUAGE);

        let request = GenerationRequest::flashcards("notes", 5).with_language("de");
        assert_eq!(request.language(), "de");
    }

    #[test]
    fn study_plan_count_is_days_until_exam() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let exam = NaiveDate::from_ymd_opt(2026, 10, 8).unwrap();
        let request = GenerationRequest::study_plan(&["Math".to_string()], start, exam, 2.0);

        assert_eq!(request.task(), TaskKind::StudyPlan);
        assert_eq!(request.count(), 7);
    }

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }
}
