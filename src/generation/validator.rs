use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    generation::{error::GenerationError, request::TaskKind},
    models::domain::{
        quiz::QUIZ_OPTION_COUNT, Flashcard, Priority, QuizQuestion, StudyDay, StudyTask,
    },
};

/// A domain object the pipeline can produce from extracted JSON.
pub trait GeneratedItem: Sized + Serialize + Send {
    const TASK: TaskKind;

    fn validate(value: Value) -> Result<Vec<Self>, GenerationError>;
}

impl GeneratedItem for Flashcard {
    const TASK: TaskKind = TaskKind::Flashcards;

    fn validate(value: Value) -> Result<Vec<Self>, GenerationError> {
        validate_flashcards(value)
    }
}

impl GeneratedItem for QuizQuestion {
    const TASK: TaskKind = TaskKind::Quiz;

    fn validate(value: Value) -> Result<Vec<Self>, GenerationError> {
        validate_quiz_questions(value)
    }
}

impl GeneratedItem for StudyDay {
    const TASK: TaskKind = TaskKind::StudyPlan;

    fn validate(value: Value) -> Result<Vec<Self>, GenerationError> {
        validate_study_days(value)
    }
}

/// Keeps the cards whose question and answer are non-empty after trimming,
/// in their original order. Bad cards are dropped, not fatal.
pub fn validate_flashcards(value: Value) -> Result<Vec<Flashcard>, GenerationError> {
    let items = into_items(value, &["flashcards", "cards"])?;
    let total = items.len();

    let cards: Vec<Flashcard> = items
        .iter()
        .filter_map(|item| {
            let question = non_blank_str(item, "question")?;
            let answer = non_blank_str(item, "answer")?;
            Some(Flashcard {
                question: question.to_string(),
                answer: answer.to_string(),
            })
        })
        .collect();

    if cards.is_empty() {
        return Err(GenerationError::NoValidItems(
            "no flashcard has both a question and an answer".to_string(),
        ));
    }
    if cards.len() < total {
        log::debug!("Dropped {} invalid flashcards", total - cards.len());
    }
    Ok(cards)
}

/// All or nothing: one malformed question rejects the whole batch.
pub fn validate_quiz_questions(value: Value) -> Result<Vec<QuizQuestion>, GenerationError> {
    let items = into_items(value, &["questions", "quiz"])?;
    if items.is_empty() {
        return Err(GenerationError::NoValidItems(
            "quiz contains no questions".to_string(),
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            quiz_question(item).map_err(|reason| GenerationError::BatchRejected { index, reason })
        })
        .collect()
}

fn quiz_question(item: &Value) -> Result<QuizQuestion, String> {
    let question = item
        .get("question")
        .and_then(Value::as_str)
        .ok_or("question is not a string")?;

    let options = item
        .get("options")
        .and_then(Value::as_array)
        .ok_or("options is not an array")?;
    if options.len() != QUIZ_OPTION_COUNT {
        return Err(format!(
            "expected {} options, found {}",
            QUIZ_OPTION_COUNT,
            options.len()
        ));
    }
    let options = options
        .iter()
        .map(|o| o.as_str().map(str::to_string))
        .collect::<Option<Vec<String>>>()
        .ok_or("options must all be strings")?;

    let correct_answer = item
        .get("correctAnswer")
        .and_then(Value::as_str)
        .ok_or("correctAnswer is not a string")?;
    if !options.iter().any(|o| o == correct_answer) {
        return Err(format!("correctAnswer '{}' is not one of the options", correct_answer));
    }

    Ok(QuizQuestion {
        question: question.to_string(),
        options,
        correct_answer: correct_answer.to_string(),
        explanation: optional_str(item, "explanation"),
        subject: optional_str(item, "subject"),
    })
}

/// Drops days without a usable date or task list and tasks that break the
/// task rules. A day keeps its place even when no tasks remain.
pub fn validate_study_days(value: Value) -> Result<Vec<StudyDay>, GenerationError> {
    let items = into_items(value, &["days", "schedule", "plan"])?;

    let days: Vec<StudyDay> = items
        .iter()
        .filter_map(|item| match study_day(item) {
            Ok(day) => Some(day),
            Err(reason) => {
                log::debug!("Dropped study day: {}", reason);
                None
            }
        })
        .collect();

    if days.is_empty() {
        return Err(GenerationError::NoValidItems(
            "study plan contains no valid days".to_string(),
        ));
    }
    Ok(days)
}

fn study_day(item: &Value) -> Result<StudyDay, String> {
    let raw_date = item
        .get("date")
        .and_then(Value::as_str)
        .ok_or("date is not a string")?;
    let date = parse_date(raw_date).ok_or_else(|| format!("unparseable date '{}'", raw_date))?;

    let tasks: Vec<StudyTask> = item
        .get("tasks")
        .and_then(Value::as_array)
        .ok_or("tasks is not an array")?
        .iter()
        .filter_map(|task| match study_task(task) {
            Ok(task) => Some(task),
            Err(reason) => {
                log::debug!("Dropped task on {}: {}", date, reason);
                None
            }
        })
        .collect();

    Ok(StudyDay { date, tasks })
}

fn study_task(item: &Value) -> Result<StudyTask, String> {
    let subject = non_blank_str(item, "subject").ok_or("subject missing")?;
    let activity = non_blank_str(item, "activity").ok_or("activity missing")?;

    let minutes = item
        .get("duration")
        .and_then(Value::as_f64)
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or("duration must be a positive number")?;

    let priority: Priority = item
        .get("priority")
        .and_then(Value::as_str)
        .ok_or("priority missing")?
        .parse()?;

    Ok(StudyTask {
        subject: subject.to_string(),
        duration: minutes.ceil().min(u32::MAX as f64) as u32,
        activity: activity.to_string(),
        priority,
        completed: false,
    })
}

/// Accepts a plain ISO date or a full RFC 3339 timestamp.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// The expected array, or the one array held by a wrapper object such as
/// `{"questions": [...]}`.
fn into_items(value: Value, keys: &[&str]) -> Result<Vec<Value>, GenerationError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(map) => unwrap_object(map, keys),
        other => Err(GenerationError::UnexpectedShape(format!(
            "expected a JSON array, found {}",
            type_name(&other)
        ))),
    }
}

fn unwrap_object(mut map: Map<String, Value>, keys: &[&str]) -> Result<Vec<Value>, GenerationError> {
    for key in keys {
        if let Some(Value::Array(items)) = map.remove(*key) {
            return Ok(items);
        }
    }

    let mut arrays = map.into_iter().filter_map(|(_, v)| match v {
        Value::Array(items) => Some(items),
        _ => None,
    });
    match (arrays.next(), arrays.next()) {
        (Some(items), None) => Ok(items),
        _ => Err(GenerationError::UnexpectedShape(
            "expected a JSON array, found an object without a single array field".to_string(),
        )),
    }
}

fn non_blank_str<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn optional_str(item: &Value, key: &str) -> Option<String> {
    non_blank_str(item, key).map(str::to_string)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
