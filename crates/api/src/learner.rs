//! Learner-facing endpoints: profile, library, My Vocab and contributions.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use vocab_core::model::{
    Contribution, LearningStatus, ListQuery, Page, Topic, TopicId, UserProfile, UserVocabulary,
    VocabId, Vocabulary,
};

use crate::client::{AuthedApi, seg};
use crate::error::ApiError;

/// `PATCH /me`; `None` fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_goal: Option<i64>,
}

/// `PATCH /me/vocab/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MyVocabUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LearningStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

/// Vocabulary fields shared by contributions and admin edits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabDraft {
    pub term: String,
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_vi: Option<String>,
    pub examples: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    pub language: String,
    pub topic_ids: Vec<TopicId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToMyVocab<'a> {
    vocabulary_id: &'a VocabId,
}

impl AuthedApi {
    /// # Errors
    ///
    /// Returns [`ApiError`] when the update is refused or the API is unreachable.
    pub async fn update_me(&self, update: &ProfileUpdate) -> Result<Option<UserProfile>, ApiError> {
        self.send(
            Method::PATCH,
            "/me",
            Some(update),
            "Could not update your profile.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn topics(&self, query: &ListQuery) -> Result<Page<Topic>, ApiError> {
        self.get_json("/topics", &query.to_query(), "Could not load topics.")
            .await
    }

    /// Library search (`query`, `topicId`, `language`, `status` filters).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn vocab(&self, query: &ListQuery) -> Result<Page<Vocabulary>, ApiError> {
        self.get_json("/vocab", &query.to_query(), "Could not load vocabulary.")
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn my_vocab(&self, query: &ListQuery) -> Result<Page<UserVocabulary>, ApiError> {
        self.get_json("/me/vocab", &query.to_query(), "Could not load My Vocab.")
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the word cannot be added.
    pub async fn add_to_my_vocab(
        &self,
        vocabulary_id: &VocabId,
    ) -> Result<Option<UserVocabulary>, ApiError> {
        self.send(
            Method::POST,
            "/me/vocab",
            Some(&AddToMyVocab { vocabulary_id }),
            "Could not add the word to your list.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the entry cannot be updated.
    pub async fn update_my_vocab(
        &self,
        vocabulary_id: &VocabId,
        update: &MyVocabUpdate,
    ) -> Result<Option<UserVocabulary>, ApiError> {
        self.send(
            Method::PATCH,
            &format!("/me/vocab/{}", seg(vocabulary_id.as_str())),
            Some(update),
            "Could not update vocabulary progress.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the entry cannot be removed.
    pub async fn remove_from_my_vocab(&self, vocabulary_id: &VocabId) -> Result<(), ApiError> {
        self.send_empty::<Value>(
            Method::DELETE,
            &format!("/me/vocab/{}", seg(vocabulary_id.as_str())),
            "Could not remove the word from your list.",
        )
        .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport, status or decode failure.
    pub async fn my_contributions(&self, query: &ListQuery) -> Result<Page<Contribution>, ApiError> {
        self.get_json(
            "/me/vocab/contributions",
            &query.to_query(),
            "Could not load your contributions.",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the contribution is refused.
    pub async fn create_contribution(
        &self,
        draft: &VocabDraft,
    ) -> Result<Option<Contribution>, ApiError> {
        self.send(
            Method::POST,
            "/vocab/contributions",
            Some(draft),
            "Could not submit the word.",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_update_omits_missing_fields() {
        let update = ProfileUpdate {
            display_name: Some("Lan".into()),
            daily_goal: Some(5),
            ..ProfileUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"displayName": "Lan", "dailyGoal": 5})
        );
    }

    #[test]
    fn draft_serializes_camel_case() {
        let draft = VocabDraft {
            term: "cat".into(),
            definition: "a pet".into(),
            language: "en".into(),
            topic_ids: vec![TopicId::new("t1")],
            ..VocabDraft::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["topicIds"], json!(["t1"]));
        assert!(value.get("definitionVi").is_none());
        assert_eq!(value["examples"], json!([]));
    }
}
