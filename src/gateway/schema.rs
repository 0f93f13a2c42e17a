//! Result schema sent to providers, and validation of what comes back.

use std::collections::HashSet;

use serde_json::{json, Map, Value};

use crate::error::GenerationError;
use crate::explanation::{GenerationResult, QuizItem, QUIZ_OPTION_COUNT};

/// Name attached to the schema for providers that require one.
pub const SCHEMA_NAME: &str = "term_explanation";

/// JSON Schema for [`GenerationResult`].
pub fn result_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "simpleNorwegian": {
                "type": "string",
                "description": "The concept explained in very simple Norwegian (CEFR A2/B1 level). Short sentences."
            },
            "nativeTranslation": {
                "type": "string",
                "description": "The full explanation translated into the user's native language"
            },
            "analogy": {
                "type": "string",
                "description": "A relatable real-world analogy appropriate for teenagers/young adults"
            },
            "quiz": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "A multiple-choice question to test understanding"
                    },
                    "options": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": QUIZ_OPTION_COUNT,
                        "maxItems": QUIZ_OPTION_COUNT,
                        "description": "Three answer options (1 correct, 2 wrong)"
                    },
                    "correctAnswer": {
                        "type": "string",
                        "description": "The correct answer (must match one of the options exactly)"
                    }
                },
                "required": ["question", "options", "correctAnswer"]
            }
        },
        "required": ["simpleNorwegian", "nativeTranslation", "analogy", "quiz"]
    })
}

/// Validate a provider object against the result schema.
///
/// Rejects missing or non-string fields, blank text, an option count other
/// than three, duplicate options and an answer that is not one of the
/// options. Unknown extra fields are ignored.
pub fn parse_result(value: &Value) -> Result<GenerationResult, GenerationError> {
    let root = as_object(value, "result")?;
    let simple = text_field(root, "simpleNorwegian")?;
    let translation = text_field(root, "nativeTranslation")?;
    let analogy = text_field(root, "analogy")?;

    let quiz = as_object(
        root.get("quiz").ok_or_else(|| violation("missing field 'quiz'"))?,
        "quiz",
    )?;
    let question = text_field(quiz, "question")?;
    let correct = text_field(quiz, "correctAnswer")?;

    let raw_options = quiz
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| violation("'quiz.options' must be an array"))?;
    if raw_options.len() != QUIZ_OPTION_COUNT {
        return Err(violation(format!(
            "'quiz.options' must have exactly {} items, got {}",
            QUIZ_OPTION_COUNT,
            raw_options.len()
        )));
    }
    let mut options = Vec::with_capacity(QUIZ_OPTION_COUNT);
    for (i, option) in raw_options.iter().enumerate() {
        match option.as_str() {
            Some(s) if !s.trim().is_empty() => options.push(s.to_string()),
            _ => {
                return Err(violation(format!(
                    "'quiz.options[{i}]' must be a non-empty string"
                )))
            }
        }
    }

    let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
    if distinct.len() != options.len() {
        return Err(violation("'quiz.options' contains duplicates"));
    }
    if !options.iter().any(|o| *o == correct) {
        return Err(violation("'quiz.correctAnswer' is not one of the options"));
    }

    Ok(GenerationResult::new(
        simple,
        translation,
        analogy,
        QuizItem::new(question, options, correct),
    ))
}

fn violation(message: impl Into<String>) -> GenerationError {
    GenerationError::SchemaViolation(message.into())
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, GenerationError> {
    value
        .as_object()
        .ok_or_else(|| violation(format!("'{what}' must be an object")))
}

fn text_field(obj: &Map<String, Value>, name: &str) -> Result<String, GenerationError> {
    match obj.get(name) {
        None => Err(violation(format!("missing field '{name}'"))),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(violation(format!("field '{name}' is blank"))),
        Some(_) => Err(violation(format!("field '{name}' must be a string"))),
    }
}
