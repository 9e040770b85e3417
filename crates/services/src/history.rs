//! Recently opened practice sessions, kept in a browser cookie.

use serde_json::Value;
use vocab_core::model::SessionId;

pub const HISTORY_COOKIE: &str = "session_history";
pub const MAX_HISTORY: usize = 20;

/// Most-recent-first session ids without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionHistory {
    ids: Vec<SessionId>,
}

impl SessionHistory {
    /// Read a cookie value written by [`SessionHistory::encode`].
    ///
    /// Anything that is not a JSON array of strings yields an empty history;
    /// non-string entries are skipped.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(Value::Array(entries)) = raw.and_then(|raw| serde_json::from_str(raw).ok()) else {
            return Self::default();
        };

        entries
            .iter()
            .filter_map(Value::as_str)
            .rev()
            .fold(Self::default(), |mut history, id| {
                history.push(id);
                history
            })
    }

    /// Put `id` first; blank ids are ignored.
    pub fn push(&mut self, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            return;
        }
        self.ids.retain(|existing| existing.as_str() != id);
        self.ids.insert(0, SessionId::new(id));
        self.ids.truncate(MAX_HISTORY);
    }

    #[must_use]
    pub fn ids(&self) -> &[SessionId] {
        &self.ids
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// JSON array for the cookie; the caller percent-encodes it.
    #[must_use]
    pub fn encode(&self) -> String {
        Value::Array(
            self.ids
                .iter()
                .map(|id| Value::String(id.to_string()))
                .collect(),
        )
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(history: &SessionHistory) -> Vec<&str> {
        history.ids().iter().map(SessionId::as_str).collect()
    }

    #[test]
    fn push_moves_to_front_without_duplicates() {
        let mut history = SessionHistory::default();
        history.push("a");
        history.push("b");
        history.push("a");
        history.push("   ");
        assert_eq!(ids(&history), vec!["a", "b"]);
    }

    #[test]
    fn caps_at_twenty() {
        let mut history = SessionHistory::default();
        for n in 0..25 {
            history.push(&n.to_string());
        }
        assert_eq!(history.ids().len(), MAX_HISTORY);
        assert_eq!(history.ids()[0].as_str(), "24");
        assert_eq!(history.ids()[19].as_str(), "5");
    }

    #[test]
    fn parse_tolerates_garbage() {
        assert!(SessionHistory::parse(None).is_empty());
        assert!(SessionHistory::parse(Some("not json")).is_empty());
        assert!(SessionHistory::parse(Some(r#"{"a":1}"#)).is_empty());

        let history = SessionHistory::parse(Some(r#"["x", 3, "y", "x", ""]"#));
        assert_eq!(ids(&history), vec!["x", "y"]);
    }

    #[test]
    fn encode_round_trips() {
        let mut history = SessionHistory::default();
        history.push("s-1");
        history.push("s-2");
        assert_eq!(history.encode(), r#"["s-2","s-1"]"#);
        assert_eq!(SessionHistory::parse(Some(&history.encode())), history);
    }
}
