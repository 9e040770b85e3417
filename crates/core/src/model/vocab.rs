use serde::{Deserialize, Serialize};

use super::{TopicId, UserId, VocabId, first_text};

loose_enum! {
    /// Moderation state of a library entry.
    VocabStatus {
        Pending => "PENDING",
        Approved => "APPROVED",
        Rejected => "REJECTED",
    }
}

impl VocabStatus {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            VocabStatus::Pending => "Pending",
            VocabStatus::Approved => "Approved",
            VocabStatus::Rejected => "Rejected",
            VocabStatus::Unknown(raw) => raw,
        }
    }
}

loose_enum! {
    /// Learning state of a word in a learner's personal list.
    LearningStatus {
        New => "NEW",
        Learning => "LEARNING",
        Mastered => "MASTERED",
    }
}

impl LearningStatus {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            LearningStatus::New => "New",
            LearningStatus::Learning => "Learning",
            LearningStatus::Mastered => "Mastered",
            LearningStatus::Unknown(raw) => raw,
        }
    }
}

/// An example sentence; older API versions send bare strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VocabExample {
    Text(String),
    Entry {
        #[serde(default)]
        id: Option<String>,
        value: String,
    },
}

impl VocabExample {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            VocabExample::Text(text) => text,
            VocabExample::Entry { value, .. } => value,
        }
    }
}

/// Library vocabulary entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    pub id: VocabId,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub definition_vi: Option<String>,
    #[serde(default)]
    pub examples: Option<Vec<VocabExample>>,
    #[serde(default)]
    pub topic_ids: Option<Vec<TopicId>>,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub status: Option<VocabStatus>,
    #[serde(default)]
    pub in_my_vocab: Option<bool>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Vocabulary {
    #[must_use]
    pub fn term(&self) -> &str {
        self.term.as_deref().unwrap_or("—")
    }

    #[must_use]
    pub fn example_texts(&self) -> Vec<String> {
        self.examples
            .iter()
            .flatten()
            .map(|example| example.text().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }

    #[must_use]
    pub fn in_my_vocab(&self) -> bool {
        self.in_my_vocab.unwrap_or(false)
    }
}

/// Entry of the learner's "My Vocab" list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserVocabulary {
    pub id: VocabId,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub vocabulary_id: Option<VocabId>,
    #[serde(default)]
    pub status: Option<LearningStatus>,
    #[serde(default)]
    pub progress: Option<f64>,
    /// Legacy spelling of `progress`.
    #[serde(default)]
    pub process: Option<f64>,
    #[serde(default)]
    pub streak: Option<i64>,
    #[serde(default)]
    pub right_count: Option<i64>,
    #[serde(default)]
    pub wrong_count: Option<i64>,
    #[serde(default)]
    pub last_reviewed_at: Option<String>,
    #[serde(default)]
    pub next_due_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub vocabulary: Option<Vocabulary>,
}

impl UserVocabulary {
    /// Id used by the `/me/vocab/{id}` endpoints.
    #[must_use]
    pub fn vocabulary_id(&self) -> VocabId {
        self.vocabulary_id
            .clone()
            .or_else(|| self.vocabulary.as_ref().map(|vocab| vocab.id.clone()))
            .unwrap_or_else(|| self.id.clone())
    }

    #[must_use]
    pub fn term(&self) -> String {
        first_text([
            self.term.as_deref(),
            self.vocabulary.as_ref().and_then(|vocab| vocab.term.as_deref()),
        ])
        .unwrap_or_else(|| "—".to_string())
    }

    #[must_use]
    pub fn status(&self) -> LearningStatus {
        self.status.clone().unwrap_or(LearningStatus::New)
    }

    /// Progress percentage, clamped to `0..=100`.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        let raw = self.progress.or(self.process).unwrap_or(0.0);
        if raw.is_finite() {
            // Clamped above, so the cast cannot truncate.
            raw.round().clamp(0.0, 100.0) as u8
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn examples_accept_strings_and_objects() {
        let vocab: Vocabulary = serde_json::from_str(
            r#"{"id":"v1","term":"cat","examples":["A cat.",{"id":"e2","value":" Two cats. "},""]}"#,
        )
        .unwrap();

        assert_eq!(vocab.example_texts(), vec!["A cat.", "Two cats."]);
    }

    #[test]
    fn user_vocab_reads_legacy_progress_and_nested_term() {
        let entry: UserVocabulary = serde_json::from_str(
            r#"{"id":"uv1","process":140,"vocabulary":{"id":"v9","term":"dog"}}"#,
        )
        .unwrap();

        assert_eq!(entry.progress_percent(), 100);
        assert_eq!(entry.term(), "dog");
        assert_eq!(entry.vocabulary_id(), VocabId::new("v9"));
        assert_eq!(entry.status(), LearningStatus::New);
    }
}
