use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const QUIZ_OPTION_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl QuizQuestion {
    /// Exact string match, no case folding.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum QuizSource {
    Notes,
    Deck,
    Daily,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub subject: Option<String>,
    pub source: QuizSource,
    pub questions: Vec<QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(
        user_id: &str,
        title: &str,
        subject: Option<String>,
        source: QuizSource,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            subject,
            source,
            questions,
            created_at: Some(Utc::now()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    pub index: usize,
    pub selected: Option<String>,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizAttemptResult {
    pub quiz_id: String,
    pub score: usize,
    pub total: usize,
    pub results: Vec<QuestionResult>,
}

impl QuizAttemptResult {
    /// Grade answers positionally; a missing answer counts as wrong.
    pub fn grade(quiz: &Quiz, answers: &[Option<String>]) -> Self {
        let results: Vec<QuestionResult> = quiz
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = answers.get(index).cloned().flatten();
                let correct = selected
                    .as_deref()
                    .is_some_and(|answer| question.is_correct(answer));
                QuestionResult {
                    index,
                    selected,
                    correct,
                }
            })
            .collect();

        QuizAttemptResult {
            quiz_id: quiz.id.clone(),
            score: results.iter().filter(|r| r.correct).count(),
            total: quiz.questions.len(),
            results,
        }
    }
}
