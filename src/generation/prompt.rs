use crate::{
    constants::prompts::{
        CHAT_ROLE_PROMPT, FLASHCARD_FORMAT_PROMPT, FLASHCARD_ROLE_PROMPT, QUIZ_FORMAT_PROMPT,
        QUIZ_ROLE_PROMPT, STUDY_PLAN_FORMAT_PROMPT, STUDY_PLAN_ROLE_PROMPT,
    },
    generation::request::{truncate_chars, GenerationInput, GenerationRequest, TaskKind, MAX_NOTES_CHARS},
    models::domain::{ChatMessage, Flashcard},
};

/// Renders role, output contract and user content into one instruction.
/// Pure: the same request always yields the same prompt.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let (role, format) = match request.task() {
        TaskKind::Flashcards => (FLASHCARD_ROLE_PROMPT, FLASHCARD_FORMAT_PROMPT),
        TaskKind::Quiz => (QUIZ_ROLE_PROMPT, QUIZ_FORMAT_PROMPT),
        TaskKind::StudyPlan => (STUDY_PLAN_ROLE_PROMPT, STUDY_PLAN_FORMAT_PROMPT),
    };

    let task_line = match (request.task(), request.input()) {
        (TaskKind::Flashcards, _) => format!(
            "Create exactly {} flashcards from the notes below.",
            request.count()
        ),
        (TaskKind::Quiz, GenerationInput::Flashcards(_)) => format!(
            "Create exactly {} quiz questions that test the flashcards below.",
            request.count()
        ),
        (TaskKind::Quiz, _) => format!(
            "Create exactly {} quiz questions from the notes below.",
            request.count()
        ),
        (TaskKind::StudyPlan, _) => format!(
            "Create a study plan with one entry per day, {} days in total.",
            request.count()
        ),
    };

    format!(
        "{role}\n\n{task_line}\nWrite all text in the language with tag \"{language}\".\n\n{format}\n\n{content}",
        language = request.language(),
        content = render_input(request.input()),
    )
}

fn render_input(input: &GenerationInput) -> String {
    match input {
        GenerationInput::Notes(notes) => {
            format!("Notes:\n{}", truncate_chars(notes, MAX_NOTES_CHARS))
        }
        GenerationInput::Flashcards(cards) => {
            let list = render_flashcards(cards);
            format!("Flashcards:\n{}", truncate_chars(&list, MAX_NOTES_CHARS))
        }
        GenerationInput::Schedule {
            subjects,
            start_date,
            exam_date,
            hours_per_day,
        } => format!(
            "Subjects: {}\nStart date: {}\nExam date: {}\nHours available per day: {}",
            subjects.join(", "),
            start_date.format("%Y-%m-%d"),
            exam_date.format("%Y-%m-%d"),
            hours_per_day
        ),
    }
}

fn render_flashcards(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| format!("{}. Q: {}\n   A: {}", i + 1, card.question, card.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Free-text chat prompt; the document excerpt is capped like notes.
pub fn build_chat_prompt(history: &[ChatMessage], document: Option<&str>, message: &str) -> String {
    let mut prompt = String::from(CHAT_ROLE_PROMPT);

    if let Some(document) = document {
        prompt.push_str("\n\nStudy material:\n");
        prompt.push_str(truncate_chars(document, MAX_NOTES_CHARS));
    }

    if !history.is_empty() {
        prompt.push_str("\n\nConversation so far:\n");
        for entry in history {
            prompt.push_str(&format!("{}: {}\n", entry.role.label(), entry.content));
        }
    }

    prompt.push_str(&format!("\nStudent: {}\nAssistant:", message));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::ChatRole;
    use chrono::NaiveDate;

    #[test]
    fn flashcard_prompt_has_contract_and_notes_last() {
        let prompt = build_prompt(&GenerationRequest::flashcards("Mitochondria make ATP.", 5));

        assert!(prompt.contains("Create exactly 5 flashcards"));
        assert!(prompt.contains("Return ONLY the array, no other text."));
        assert!(prompt.contains("\"question\""));
        assert!(prompt.ends_with("Notes:\nMitochondria make ATP."));
    }

    #[test]
    fn notes_beyond_limit_are_dropped() {
        let notes = "a".repeat(MAX_NOTES_CHARS + 500);
        let prompt = build_prompt(&GenerationRequest::flashcards(&notes, 5));
        let short = build_prompt(&GenerationRequest::flashcards(&notes[..MAX_NOTES_CHARS], 5));

        assert_eq!(prompt, short);
    }

    #[test]
    fn quiz_from_flashcards_lists_cards() {
        let cards = vec![Flashcard::new("Capital of France?", "Paris")];
        let prompt = build_prompt(&GenerationRequest::quiz_from_flashcards(&cards, 3));

        assert!(prompt.contains("test the flashcards below"));
        assert!(prompt.contains("1. Q: Capital of France?\n   A: Paris"));
        assert!(prompt.contains("\"correctAnswer\""));
    }

    #[test]
    fn study_plan_prompt_includes_schedule() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let exam = NaiveDate::from_ymd_opt(2026, 10, 4).unwrap();
        let request = GenerationRequest::study_plan(
            &["Physics".to_string(), "Chemistry".to_string()],
            start,
            exam,
            2.5,
        )
        .with_language("fr");
        let prompt = build_prompt(&request);

        assert!(prompt.contains("Subjects: Physics, Chemistry"));
        assert!(prompt.contains("Exam date: 2026-10-04"));
        assert!(prompt.contains("Hours available per day: 2.5"));
        assert!(prompt.contains("\"fr\""));
    }

    #[test]
    fn build_prompt_is_deterministic() {
        let request = GenerationRequest::quiz("Photosynthesis", 4);
        assert_eq!(build_prompt(&request), build_prompt(&request));
    }

    #[test]
    fn chat_prompt_includes_document_and_history() {
        let history = vec![
            ChatMessage::new(ChatRole::User, "What is DNA?"),
            ChatMessage::new(ChatRole::Assistant, "A molecule carrying genetic code."),
        ];
        let prompt = build_chat_prompt(&history, Some("Chapter 3: Genetics"), "And RNA?");

        assert!(prompt.contains("Study material:\nChapter 3: Genetics"));
        assert!(prompt.contains("Student: What is DNA?"));
        assert!(prompt.contains("Assistant: A molecule carrying genetic code."));
        assert!(prompt.ends_with("Student: And RNA?\nAssistant:"));
    }
}
