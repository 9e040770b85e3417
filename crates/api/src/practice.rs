//! Practice-session endpoints behind the [`PracticeApi`] seam.

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use vocab_core::model::{ItemId, Session, SessionId};
use vocab_core::question::{AnswerResult, normalize_answer_result};

use crate::client::{AuthedApi, seg};
use crate::error::ApiError;

/// Body of `POST /me/sessions/{id}/items/{item}/answer`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub answer: String,
    pub time_ms: i64,
}

impl AnswerSubmission {
    /// Negative durations are sent as zero.
    #[must_use]
    pub fn new(answer: impl Into<String>, time_ms: i64) -> Self {
        Self {
            answer: answer.into(),
            time_ms: time_ms.max(0),
        }
    }
}

/// Session calls used by the practice runner.
#[async_trait]
pub trait PracticeApi: Send + Sync {
    /// Create (or resume) today's session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the session cannot be created.
    async fn start_daily_session(&self) -> Result<Option<Session>, ApiError>;

    /// # Errors
    ///
    /// Returns [`ApiError`] when the session cannot be loaded.
    async fn session(&self, id: &SessionId) -> Result<Session, ApiError>;

    /// # Errors
    ///
    /// Returns [`ApiError`] when the answer is refused.
    async fn submit_answer(
        &self,
        session: &SessionId,
        item: &ItemId,
        submission: &AnswerSubmission,
    ) -> Result<AnswerResult, ApiError>;

    /// # Errors
    ///
    /// Returns [`ApiError`] when the session cannot be completed.
    async fn complete_session(&self, id: &SessionId) -> Result<Option<Session>, ApiError>;

    /// # Errors
    ///
    /// Returns [`ApiError`] when the session cannot be abandoned.
    async fn abandon_session(&self, id: &SessionId) -> Result<Option<Session>, ApiError>;
}

fn session_path(id: &SessionId) -> String {
    format!("/me/sessions/{}", seg(id.as_str()))
}

#[async_trait]
impl PracticeApi for AuthedApi {
    async fn start_daily_session(&self) -> Result<Option<Session>, ApiError> {
        let session = self
            .send_empty(
                Method::POST,
                "/me/sessions/daily",
                "Could not create today's session.",
            )
            .await?;
        tracing::info!("daily session requested");
        Ok(session)
    }

    async fn session(&self, id: &SessionId) -> Result<Session, ApiError> {
        self.get_json(&session_path(id), &[], "Could not load the session.")
            .await
    }

    async fn submit_answer(
        &self,
        session: &SessionId,
        item: &ItemId,
        submission: &AnswerSubmission,
    ) -> Result<AnswerResult, ApiError> {
        let path = format!("{}/items/{}/answer", session_path(session), seg(item.as_str()));
        let response: Option<Value> = self
            .send(
                Method::POST,
                &path,
                Some(submission),
                "Could not submit the answer.",
            )
            .await?;
        Ok(normalize_answer_result(&response.unwrap_or(Value::Null)))
    }

    async fn complete_session(&self, id: &SessionId) -> Result<Option<Session>, ApiError> {
        self.send_empty(
            Method::POST,
            &format!("{}/complete", session_path(id)),
            "Could not complete the session.",
        )
        .await
    }

    async fn abandon_session(&self, id: &SessionId) -> Result<Option<Session>, ApiError> {
        self.send_empty(
            Method::POST,
            &format!("{}/abandon", session_path(id)),
            "Could not abandon the session.",
        )
        .await
    }
}
