use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ItemId, SessionId, first_text};

static EMPTY_PAYLOAD: Value = Value::Null;

//
// ─── STATUSES ──────────────────────────────────────────────────────────────────
//

loose_enum! {
    /// Lifecycle of a practice session; owned by the API.
    SessionStatus {
        Active => "ACTIVE",
        Completed => "COMPLETED",
        Abandoned => "ABANDONED",
    }
}

impl SessionStatus {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            SessionStatus::Active => "In progress",
            SessionStatus::Completed => "Completed",
            SessionStatus::Abandoned => "Abandoned",
            SessionStatus::Unknown(raw) => raw,
        }
    }
}

loose_enum! {
    /// Grading state of a single item.
    ///
    /// Older API builds report `RIGHT`/`INCORRECT`; both map onto the canonical variants.
    ItemStatus {
        Pending => "PENDING",
        Correct => "CORRECT" | "RIGHT",
        Wrong => "WRONG" | "INCORRECT",
        Skipped => "SKIPPED",
    }
}

impl ItemStatus {
    /// Normalise an optional wire status; missing or blank means pending.
    #[must_use]
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => ItemStatus::parse(raw),
            None => ItemStatus::Pending,
        }
    }

    /// Anything other than pending is terminal.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        *self != ItemStatus::Pending
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        *self == ItemStatus::Correct
    }

    #[must_use]
    pub fn is_wrong(&self) -> bool {
        *self == ItemStatus::Wrong
    }

    /// CSS modifier for status pills.
    #[must_use]
    pub fn tone(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Correct => "correct",
            ItemStatus::Wrong => "wrong",
            ItemStatus::Skipped | ItemStatus::Unknown(_) => "done",
        }
    }
}

loose_enum! {
    QuestionType {
        MultipleChoice => "MULTIPLE_CHOICE",
        TrueFalse => "TRUE_FALSE",
        FillMissingChars => "FILL_MISSING_CHARS",
    }
}

impl QuestionType {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            QuestionType::Unknown(raw) if raw.is_empty() => "UNKNOWN",
            other => other.as_str(),
        }
    }
}

//
// ─── ITEM ──────────────────────────────────────────────────────────────────────
//

/// A question inside a session, as returned by `GET /me/sessions/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub question_type: Option<QuestionType>,
    #[serde(default)]
    pub question_payload: Option<Value>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub expected_answer: Option<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(default)]
    pub time_ms: Option<i64>,
}

impl Item {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, question_type: QuestionType, payload: Value) -> Self {
        Self {
            id: id.into(),
            question_type: Some(question_type),
            question_payload: Some(payload),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    #[must_use]
    pub fn with_user_answer(mut self, answer: &str) -> Self {
        self.user_answer = Some(answer.to_string());
        self
    }

    #[must_use]
    pub fn status(&self) -> ItemStatus {
        ItemStatus::from_wire(self.status.as_deref())
    }

    /// Raw status string as sent, for display.
    #[must_use]
    pub fn raw_status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Missing type is an empty `Unknown`, rendered as free text.
    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
            .clone()
            .unwrap_or_else(|| QuestionType::Unknown(String::new()))
    }

    /// Question payload; `Null` when the API sent none.
    #[must_use]
    pub fn payload(&self) -> &Value {
        self.question_payload.as_ref().unwrap_or(&EMPTY_PAYLOAD)
    }

    /// Expected answer reported on the item itself, if any.
    #[must_use]
    pub fn expected_from_item(&self) -> Option<String> {
        first_text([
            self.expected.as_deref(),
            self.expected_answer.as_deref(),
            self.correct_answer.as_deref(),
        ])
    }

    #[must_use]
    pub fn user_answer(&self) -> Option<&str> {
        self.user_answer
            .as_deref()
            .map(str::trim)
            .filter(|answer| !answer.is_empty())
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A practice session with its ordered items.
///
/// Fields the front-end does not model (score counters and the like) are kept in
/// `extra` so the score extractor can read them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<SessionStatus>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub schedule_date: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<Item>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    #[must_use]
    pub fn new(id: impl Into<SessionId>, items: Vec<Item>) -> Self {
        Self {
            id: id.into(),
            status: Some(SessionStatus::Active),
            items: Some(items),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Missing status is treated as active.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status.clone().unwrap_or(SessionStatus::Active)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status() == SessionStatus::Active
    }

    #[must_use]
    pub fn title(&self) -> String {
        first_text([self.title.as_deref(), self.kind.as_deref()])
            .unwrap_or_else(|| "Practice session".to_string())
    }

    /// Number of items that left the pending state.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.items()
            .iter()
            .filter(|item| item.status().is_answered())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_status_aliases_and_blanks() {
        assert_eq!(ItemStatus::from_wire(None), ItemStatus::Pending);
        assert_eq!(ItemStatus::from_wire(Some("  ")), ItemStatus::Pending);
        assert_eq!(ItemStatus::from_wire(Some("right")), ItemStatus::Correct);
        assert_eq!(ItemStatus::from_wire(Some("INCORRECT")), ItemStatus::Wrong);
        assert!(ItemStatus::from_wire(Some("TIMEOUT")).is_answered());
    }

    #[test]
    fn session_keeps_unmodelled_fields() {
        let session: Session = serde_json::from_str(
            r#"{
                "id": "s1",
                "status": "COMPLETED",
                "score": 8,
                "items": [
                    {"id": "i1", "questionType": "TRUE_FALSE", "status": "CORRECT"},
                    {"id": "i2", "questionPayload": null, "status": null}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(session.extra.get("score"), Some(&Value::from(8)));
        assert_eq!(session.items().len(), 2);
        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.items()[1].payload(), &Value::Null);
        assert_eq!(session.items()[1].question_type().label(), "UNKNOWN");
    }

    #[test]
    fn expected_from_item_skips_blank_fields() {
        let item: Item = serde_json::from_str(
            r#"{"id":"i1","expected":" ","correctAnswer":" cat "}"#,
        )
        .unwrap();
        assert_eq!(item.expected_from_item().as_deref(), Some("cat"));
    }
}
