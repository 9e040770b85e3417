//! Score summary of a finished session.
//!
//! The API has reported counters under several names over time; all of them
//! are accepted, as numbers or numeric strings.

use std::fmt;

use serde_json::{Map, Value};

use crate::model::{ItemStatus, Session};

const SCORE_KEYS: &[&str] = &["score", "sessionScore", "totalScore", "point", "points"];
const CORRECT_KEYS: &[&str] = &["correct", "correctCount", "correctAnswers", "rightCount"];
const WRONG_KEYS: &[&str] = &["wrong", "wrongCount", "wrongAnswers"];
const TOTAL_KEYS: &[&str] = &["total", "totalCount", "totalQuestions", "questionCount"];
const ACCURACY_KEYS: &[&str] = &["accuracy", "accuracyRate", "accuracyPercent", "rate"];

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionScore {
    pub score: Option<f64>,
    pub correct: Option<f64>,
    pub wrong: Option<f64>,
    pub total: Option<f64>,
    pub accuracy_percent: Option<f64>,
}

fn to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                text.parse::<f64>().ok()
            }
        }
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn pick_number(record: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(to_number))
}

fn accuracy(raw: Option<f64>, correct: Option<f64>, total: Option<f64>) -> Option<f64> {
    match (raw, correct, total) {
        (Some(ratio), _, _) if ratio <= 1.0 => Some((ratio * 100.0).round()),
        (Some(percent), _, _) => Some(percent.round()),
        (None, Some(correct), Some(total)) if total > 0.0 => {
            Some((correct / total * 100.0).round())
        }
        _ => None,
    }
}

impl SessionScore {
    /// Read counters from a session-like record.
    ///
    /// `total` falls back to the length of an `items` array. `None` when
    /// nothing numeric was found.
    #[must_use]
    pub fn extract(input: &Value) -> Option<Self> {
        let record = input.as_object().filter(|record| !record.is_empty())?;
        let items_len = record
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.len() as f64);
        Some(Self::from_record(record, items_len)).filter(|score| !score.is_empty())
    }

    /// Score of a decoded session.
    ///
    /// Counters missing from the response are derived from item statuses.
    #[must_use]
    pub fn from_session(session: &Session) -> Option<Self> {
        let items = session.items();
        let items_len = (!items.is_empty()).then_some(items.len() as f64);
        let mut score = Self::from_record(&session.extra, items_len);

        if !items.is_empty() && score.correct.is_none() && score.wrong.is_none() {
            let count = |wanted: ItemStatus| {
                items.iter().filter(|item| item.status() == wanted).count() as f64
            };
            score.correct = Some(count(ItemStatus::Correct));
            score.wrong = Some(count(ItemStatus::Wrong));
            if score.accuracy_percent.is_none() {
                score.accuracy_percent = accuracy(None, score.correct, score.total);
            }
        }

        (!score.is_empty()).then_some(score)
    }

    fn from_record(record: &Map<String, Value>, items_len: Option<f64>) -> Self {
        let correct = pick_number(record, CORRECT_KEYS);
        let total = pick_number(record, TOTAL_KEYS).or(items_len);
        Self {
            score: pick_number(record, SCORE_KEYS),
            correct,
            wrong: pick_number(record, WRONG_KEYS),
            total,
            accuracy_percent: accuracy(pick_number(record, ACCURACY_KEYS), correct, total),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.score.is_none()
            && self.correct.is_none()
            && self.wrong.is_none()
            && self.total.is_none()
            && self.accuracy_percent.is_none()
    }
}

struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl fmt::Display for SessionScore {
    /// `Score: 8 • Correct: 8/10 • Wrong: 2 • Accuracy: 80%`, skipping missing parts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(score) = self.score {
            parts.push(format!("Score: {}", Num(score)));
        }
        match (self.correct, self.total) {
            (Some(correct), Some(total)) => {
                parts.push(format!("Correct: {}/{}", Num(correct), Num(total)));
            }
            (Some(correct), None) => parts.push(format!("Correct: {}", Num(correct))),
            _ => {}
        }
        if let Some(wrong) = self.wrong {
            parts.push(format!("Wrong: {}", Num(wrong)));
        }
        if let Some(accuracy) = self.accuracy_percent {
            parts.push(format!("Accuracy: {}%", Num(accuracy)));
        }
        f.write_str(&parts.join(" • "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, QuestionType};
    use serde_json::json;

    #[test]
    fn reads_alternate_keys_and_numeric_strings() {
        let score = SessionScore::extract(&json!({
            "totalScore": "8",
            "correctCount": 8,
            "wrongAnswers": "2",
            "totalQuestions": 10
        }))
        .unwrap();

        assert_eq!(score.score, Some(8.0));
        assert_eq!(score.wrong, Some(2.0));
        assert_eq!(score.accuracy_percent, Some(80.0));
        assert_eq!(
            score.to_string(),
            "Score: 8 • Correct: 8/10 • Wrong: 2 • Accuracy: 80%"
        );
    }

    #[test]
    fn accuracy_ratio_and_percent() {
        let ratio = SessionScore::extract(&json!({"accuracy": 0.756})).unwrap();
        assert_eq!(ratio.accuracy_percent, Some(76.0));

        let percent = SessionScore::extract(&json!({"accuracyRate": "42.4"})).unwrap();
        assert_eq!(percent.accuracy_percent, Some(42.0));
    }

    #[test]
    fn total_falls_back_to_items() {
        let score = SessionScore::extract(&json!({"correct": 1, "items": [{}, {}, {}, {}]})).unwrap();
        assert_eq!(score.total, Some(4.0));
        assert_eq!(score.accuracy_percent, Some(25.0));
    }

    #[test]
    fn nothing_numeric_is_none() {
        assert_eq!(SessionScore::extract(&json!({})), None);
        assert_eq!(SessionScore::extract(&json!({"score": "n/a"})), None);
        assert_eq!(SessionScore::extract(&json!("8")), None);
    }

    #[test]
    fn session_counts_item_statuses() {
        let session = Session::new(
            "s1",
            vec![
                Item::new("a", QuestionType::TrueFalse, json!({})).with_status("CORRECT"),
                Item::new("b", QuestionType::TrueFalse, json!({})).with_status("WRONG"),
                Item::new("c", QuestionType::TrueFalse, json!({})),
                Item::new("d", QuestionType::TrueFalse, json!({})).with_status("RIGHT"),
            ],
        );

        let score = SessionScore::from_session(&session).unwrap();
        assert_eq!(score.correct, Some(2.0));
        assert_eq!(score.wrong, Some(1.0));
        assert_eq!(score.to_string(), "Correct: 2/4 • Wrong: 1 • Accuracy: 50%");
    }
}
