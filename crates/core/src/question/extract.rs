//! Heuristic extractors for question payloads.
//!
//! Payload shapes differ per question type and per backend release, so every
//! function here is total: unknown shapes degrade to a placeholder, an empty
//! list or `None`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lookup::{
    as_record, first_array, first_raw_str, first_str, get_nested, nested_str,
};
use crate::model::QuestionType;

/// Shown when no prompt can be found in the payload.
pub const PROMPT_FALLBACK: &str = "Read the question and answer it.";

const PROMPT_KEYS: &[&str] = &[
    "question",
    "prompt",
    "text",
    "questionText",
    "stem",
    "sentence",
    "definition",
    "definitionVi",
    "clue",
    "content",
    "displayText",
    "title",
    "instruction",
];
const PROMPT_PATHS: &[&str] = &[
    "question.text",
    "question.prompt",
    "question.questionText",
    "data.question",
    "data.prompt",
    "meta.question",
];

const OPTION_KEYS: &[&str] = &["options", "choices", "candidates"];
const OPTION_PATHS: &[&str] = &["question.options", "question.choices"];
const OPTION_LABEL_KEYS: &[&str] = &["label", "text", "content", "optionText", "value"];
const OPTION_VALUE_KEYS: &[&str] = &["value", "key", "code", "id"];
const CORRECT_OPTION_VALUE_KEYS: &[&str] =
    &["value", "key", "code", "id", "label", "text", "content"];

const BOOLEAN_KEYS: &[&str] = &["correct", "isCorrect"];
const BOOLEAN_PATHS: &[&str] = &["question.correct", "data.correct"];
const INDEX_KEYS: &[&str] = &[
    "correctIndex",
    "answerIndex",
    "correctOptionIndex",
    "expectedIndex",
];
const INDEX_PATHS: &[&str] = &[
    "question.correctIndex",
    "question.answerIndex",
    "data.correctIndex",
    "data.answerIndex",
];
const VALUE_KEYS: &[&str] = &["correctOption", "correctValue", "answerValue", "expected"];
const VALUE_PATHS: &[&str] = &[
    "question.correctOption",
    "question.correctValue",
    "data.correctOption",
    "data.correctValue",
];
const EXPECTED_KEYS: &[&str] = &[
    "expected",
    "expectedAnswer",
    "correctAnswer",
    "answerKey",
    "solution",
    "target",
    "targetWord",
    "fullAnswer",
    "term",
    "word",
    "translation",
];
const EXPECTED_PATHS: &[&str] = &[
    "question.expected",
    "question.expectedAnswer",
    "question.correctAnswer",
    "question.answerKey",
    "question.solution",
    "question.term",
    "question.word",
    "data.expected",
    "data.expectedAnswer",
    "data.correctAnswer",
    "data.term",
    "meta.expected",
];

//
// ─── PROMPT ────────────────────────────────────────────────────────────────────
//

/// Display text of a question and whether it actually came from the payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptText {
    pub text: String,
    pub recognised: bool,
}

/// Extract the prompt; never returns an empty string.
#[must_use]
pub fn extract_prompt_text(payload: &Value) -> PromptText {
    let record = as_record(payload);
    let found = first_str(record, PROMPT_KEYS).or_else(|| nested_str(payload, PROMPT_PATHS));

    match found {
        Some(text) => PromptText {
            text: text.to_string(),
            recognised: true,
        },
        None => PromptText {
            text: PROMPT_FALLBACK.to_string(),
            recognised: false,
        },
    }
}

//
// ─── OPTIONS ───────────────────────────────────────────────────────────────────
//

/// A selectable answer derived from the payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub value: String,
}

impl AnswerOption {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

fn raw_options(payload: &Value) -> Option<&Vec<Value>> {
    first_array(payload, OPTION_KEYS, OPTION_PATHS)
}

fn map_option(entry: &Value) -> Option<AnswerOption> {
    match entry {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| AnswerOption::new(text, text))
        }
        Value::Number(number) => {
            let text = number.to_string();
            Some(AnswerOption::new(text.clone(), text))
        }
        other => {
            let record = as_record(other);
            let label = first_raw_str(record, OPTION_LABEL_KEYS)?;
            let value = first_raw_str(record, OPTION_VALUE_KEYS).unwrap_or(label);
            Some(AnswerOption::new(label, value))
        }
    }
}

/// Extract choice options.
///
/// `TRUE_FALSE` questions without explicit options get a synthesised
/// True/False pair. An empty result means "render a free-text input".
#[must_use]
pub fn extract_options(payload: &Value, question_type: &QuestionType) -> Vec<AnswerOption> {
    let mapped: Vec<AnswerOption> = raw_options(payload)
        .map(|entries| entries.iter().filter_map(map_option).collect())
        .unwrap_or_default();

    if !mapped.is_empty() {
        return mapped;
    }

    if *question_type == QuestionType::TrueFalse {
        return vec![
            AnswerOption::new("True", "true"),
            AnswerOption::new("False", "false"),
        ];
    }

    Vec::new()
}

//
// ─── EXPECTED ANSWER ───────────────────────────────────────────────────────────
//

fn boolean_correct(payload: &Value) -> Option<bool> {
    let record = as_record(payload);
    BOOLEAN_KEYS
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_bool))
        .or_else(|| get_nested(payload, BOOLEAN_PATHS).and_then(Value::as_bool))
}

fn as_index(value: &Value) -> Option<usize> {
    if let Some(index) = value.as_u64() {
        return usize::try_from(index).ok();
    }
    let float = value.as_f64()?;
    if float.fract() == 0.0 && float >= 0.0 && float <= usize::MAX as f64 {
        // Integral and in range, checked above.
        Some(float as usize)
    } else {
        None
    }
}

fn indexed_option(payload: &Value, options: &[AnswerOption]) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let record = as_record(payload);
    let candidates = INDEX_KEYS
        .iter()
        .map(|key| record.get(*key))
        .chain(std::iter::once(get_nested(payload, INDEX_PATHS)));

    candidates
        .flatten()
        .filter_map(as_index)
        .filter_map(|index| options.get(index))
        .map(|option| option.value.as_str())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn explicit_value(payload: &Value) -> Option<String> {
    let record = as_record(payload);
    first_str(record, VALUE_KEYS)
        .or_else(|| nested_str(payload, VALUE_PATHS))
        .map(str::to_string)
}

fn is_flagged_correct(record: &Map<String, Value>) -> bool {
    ["correct", "isCorrect", "answer"]
        .iter()
        .any(|key| record.get(*key) == Some(&Value::Bool(true)))
}

fn flagged_option(payload: &Value) -> Option<String> {
    raw_options(payload)?
        .iter()
        .map(as_record)
        .filter(|record| is_flagged_correct(record))
        .filter_map(|record| first_raw_str(record, CORRECT_OPTION_VALUE_KEYS))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn generic_expected(payload: &Value) -> Option<String> {
    let record = as_record(payload);
    first_str(record, EXPECTED_KEYS)
        .or_else(|| nested_str(payload, EXPECTED_PATHS))
        .map(str::to_string)
}

/// Best-effort expected answer.
///
/// Tries, in order: the boolean flag of true/false questions, an index into
/// `options`, an explicit value field, an option flagged correct, then the
/// generic expected-answer fields. `None` when nothing matches.
#[must_use]
pub fn extract_expected_answer(
    payload: &Value,
    question_type: &QuestionType,
    options: &[AnswerOption],
) -> Option<String> {
    if *question_type == QuestionType::TrueFalse {
        if let Some(flag) = boolean_correct(payload) {
            return Some(flag.to_string());
        }
    }

    indexed_option(payload, options)
        .or_else(|| explicit_value(payload))
        .or_else(|| flagged_option(payload))
        .or_else(|| generic_expected(payload))
}

//
// ─── ANSWER RESULT ─────────────────────────────────────────────────────────────
//

/// What the API said about a submitted answer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerResult {
    pub status: Option<String>,
    pub message: Option<String>,
    pub expected: Option<String>,
}

/// Normalise an answer-submission response body.
#[must_use]
pub fn normalize_answer_result(response: &Value) -> AnswerResult {
    let record = as_record(response);
    AnswerResult {
        status: first_raw_str(record, &["status", "itemStatus"]).map(str::to_string),
        message: first_raw_str(record, &["message", "feedback"]).map(str::to_string),
        expected: first_raw_str(record, &["expected", "expectedAnswer", "correctAnswer"])
            .map(str::to_string),
    }
}
