use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::generation::error::GenerationError;

static ARRAY_OF_OBJECTS_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*\{").expect("ARRAY_OF_OBJECTS_START is a valid regex pattern")
});

static KEYED_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\{\s*"[^"]+"\s*:.*\}"#).expect("KEYED_OBJECT is a valid regex pattern")
});

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?i:json)?\s*(.*?)\s*```").expect("FENCED_BLOCK is a valid regex pattern")
});

/// Locates and parses the JSON value embedded in free-form model output.
///
/// Strategies run in order and the first successful parse wins:
/// 1. an array of objects, the first `[ {` through its matching `} ]`
/// 2. a keyed object, `{ "key": ...` through the last `}`
/// 3. the interior of a fenced code block, optionally tagged `json`
/// 4. everything between the first `[`/`{` and the last `]`/`}`
///
/// A failing strategy falls through to the next one; only exhausting all four
/// is an error, and that error carries the original text.
pub fn extract_json(raw: &str) -> Result<Value, GenerationError> {
    let strategies: [(&str, fn(&str) -> Option<Value>); 4] = [
        ("array_of_objects", array_of_objects),
        ("keyed_object", keyed_object),
        ("fenced_block", fenced_block),
        ("outer_brackets", outer_brackets),
    ];

    for (name, strategy) in strategies {
        if let Some(value) = strategy(raw) {
            log::debug!("Extracted JSON from AI response using {}", name);
            return Ok(value);
        }
    }

    Err(GenerationError::InvalidAiResponse {
        raw: raw.to_string(),
    })
}

fn parse(candidate: &str) -> Option<Value> {
    serde_json::from_str(candidate).ok()
}

/// Reads one complete value from the first `[ {`; whatever follows the
/// closing bracket is ignored.
fn array_of_objects(raw: &str) -> Option<Value> {
    let start = ARRAY_OF_OBJECTS_START.find(raw)?.start();
    serde_json::Deserializer::from_str(&raw[start..])
        .into_iter::<Value>()
        .next()?
        .ok()
        .filter(Value::is_array)
}

fn keyed_object(raw: &str) -> Option<Value> {
    KEYED_OBJECT.find(raw).and_then(|m| parse(m.as_str()))
}

fn fenced_block(raw: &str) -> Option<Value> {
    FENCED_BLOCK
        .captures(raw)
        .and_then(|c| c.get(1))
        .and_then(|m| parse(m.as_str()))
}

fn outer_brackets(raw: &str) -> Option<Value> {
    let start = raw.find(['[', '{'])?;
    let end = raw.rfind([']', '}'])?;
    if end <= start {
        return None;
    }
    parse(&raw[start..=end])
}
