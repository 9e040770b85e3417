//! Masked-term questions: `c_t` plus one typed character per `_`.

use serde_json::Value;
use thiserror::Error;

use super::lookup::{as_record, first_raw_str, get_nested};
use crate::model::QuestionType;

const MASK: char = '_';
const MASKED_KEYS: &[&str] = &["maskedTerm", "masked", "maskedWord"];
const MASKED_PATHS: &[&str] = &["question.maskedTerm", "data.maskedTerm"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FillMissingError {
    #[error("expected {expected} characters, got {actual}")]
    WrongSlotCount { expected: usize, actual: usize },
    #[error("fill in every missing character")]
    Incomplete,
}

/// Masked term and the character positions of its blanks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillMissingConfig {
    masked_term: String,
    missing_indexes: Vec<usize>,
}

impl FillMissingConfig {
    /// Build from a masked term; `None` when it is blank or has no `_`.
    #[must_use]
    pub fn from_masked(masked: &str) -> Option<Self> {
        let masked_term = masked.trim();
        let missing_indexes: Vec<usize> = masked_term
            .chars()
            .enumerate()
            .filter_map(|(index, ch)| (ch == MASK).then_some(index))
            .collect();

        if missing_indexes.is_empty() {
            return None;
        }

        Some(Self {
            masked_term: masked_term.to_string(),
            missing_indexes,
        })
    }

    #[must_use]
    pub fn masked_term(&self) -> &str {
        &self.masked_term
    }

    /// Character (not byte) indexes of the blanks, ascending.
    #[must_use]
    pub fn missing_indexes(&self) -> &[usize] {
        &self.missing_indexes
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.missing_indexes.len()
    }

    /// Whether character `index` of the masked term is a blank.
    #[must_use]
    pub fn is_missing(&self, index: usize) -> bool {
        self.missing_indexes.binary_search(&index).is_ok()
    }

    /// Slot number for a blank at character `index`.
    #[must_use]
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.missing_indexes.binary_search(&index).ok()
    }

    /// Substitute one character per slot into the masked term.
    ///
    /// # Errors
    ///
    /// Returns [`FillMissingError::WrongSlotCount`] when `filled` does not have
    /// one entry per blank, and [`FillMissingError::Incomplete`] when any entry
    /// is blank.
    pub fn reconstruct<S: AsRef<str>>(&self, filled: &[S]) -> Result<String, FillMissingError> {
        if filled.len() != self.slot_count() {
            return Err(FillMissingError::WrongSlotCount {
                expected: self.slot_count(),
                actual: filled.len(),
            });
        }

        let mut typed = filled.iter().map(|slot| normalize_slot(slot.as_ref()));
        let mut answer = String::with_capacity(self.masked_term.len());
        for ch in self.masked_term.chars() {
            if ch == MASK {
                match typed.next().flatten() {
                    Some(typed_ch) => answer.push(typed_ch),
                    None => return Err(FillMissingError::Incomplete),
                }
            } else {
                answer.push(ch);
            }
        }
        Ok(answer)
    }

    /// Recover the per-slot characters from a full answer.
    ///
    /// Yields blanks when the answer is empty or its length differs from the
    /// masked term.
    #[must_use]
    pub fn split_answer(&self, full_answer: &str) -> Vec<String> {
        let chars: Vec<char> = full_answer.trim().chars().collect();
        let masked_len = self.masked_term.chars().count();

        if chars.is_empty() || chars.len() != masked_len {
            return vec![String::new(); self.slot_count()];
        }

        self.missing_indexes
            .iter()
            .map(|&index| chars[index].to_string())
            .collect()
    }
}

/// Keep the last non-whitespace character typed into a slot.
#[must_use]
pub fn normalize_slot(raw: &str) -> Option<char> {
    raw.trim().chars().next_back()
}

/// Read the masked term of a `FILL_MISSING_CHARS` payload.
#[must_use]
pub fn fill_missing_config(
    payload: &Value,
    question_type: &QuestionType,
) -> Option<FillMissingConfig> {
    if *question_type != QuestionType::FillMissingChars {
        return None;
    }
    let masked = first_raw_str(as_record(payload), MASKED_KEYS)
        .or_else(|| get_nested(payload, MASKED_PATHS).and_then(Value::as_str))?;
    FillMissingConfig::from_masked(masked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FILL: QuestionType = QuestionType::FillMissingChars;

    #[test]
    fn reconstructs_masked_term() {
        let config = fill_missing_config(&json!({"maskedTerm": "c_t"}), &FILL).unwrap();
        assert_eq!(config.missing_indexes(), &[1]);
        assert_eq!(config.reconstruct(&["a"]).unwrap(), "cat");
    }

    #[test]
    fn rejects_blank_or_missing_slots() {
        let config = FillMissingConfig::from_masked("_pp_e").unwrap();
        assert_eq!(config.reconstruct(&["a", " "]), Err(FillMissingError::Incomplete));
        assert_eq!(
            config.reconstruct(&["a"]),
            Err(FillMissingError::WrongSlotCount {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(config.reconstruct(&["a", "xl"]).unwrap(), "apple");
    }

    #[test]
    fn config_needs_a_blank() {
        assert_eq!(fill_missing_config(&json!({"maskedTerm": "cat"}), &FILL), None);
        assert_eq!(fill_missing_config(&json!({"maskedTerm": "   "}), &FILL), None);
        assert_eq!(fill_missing_config(&json!("c_t"), &FILL), None);
        assert!(fill_missing_config(&json!({"data": {"maskedTerm": "d_g"}}), &FILL).is_some());
        assert_eq!(
            fill_missing_config(&json!({"maskedTerm": "c_t"}), &QuestionType::TrueFalse),
            None
        );
    }

    #[test]
    fn indexes_count_characters_not_bytes() {
        let config = FillMissingConfig::from_masked("ca_é_").unwrap();
        assert_eq!(config.missing_indexes(), &[2, 4]);
        assert_eq!(config.reconstruct(&["f", "s"]).unwrap(), "cafés");
    }

    #[test]
    fn split_answer_inverts_reconstruct() {
        let config = FillMissingConfig::from_masked("b__k").unwrap();
        assert_eq!(config.split_answer(" book "), vec!["o", "o"]);
        assert_eq!(config.split_answer("books"), vec!["", ""]);
        assert_eq!(config.split_answer(""), vec!["", ""]);
    }
}
