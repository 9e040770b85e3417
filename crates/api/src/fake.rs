//! In-memory [`PracticeApi`] for tests and local prototyping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use vocab_core::model::{ItemId, ItemStatus, Session, SessionId, SessionStatus};
use vocab_core::question::{AnswerResult, QuestionView};

use crate::error::ApiError;
use crate::practice::{AnswerSubmission, PracticeApi};

/// A submission the fake received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedAnswer {
    pub session: SessionId,
    pub item: ItemId,
    pub submission: AnswerSubmission,
}

#[derive(Default)]
struct State {
    sessions: HashMap<SessionId, Session>,
    daily: Option<SessionId>,
    answers: Vec<RecordedAnswer>,
    fail_next: Option<String>,
}

/// Grades answers against the expected answer of each item.
#[derive(Clone, Default)]
pub struct InMemoryPracticeApi {
    state: Arc<Mutex<State>>,
}

fn status_error(status: StatusCode, message: &str) -> ApiError {
    ApiError::Status {
        status,
        message: message.to_string(),
    }
}

impl InMemoryPracticeApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session; it is also what `start_daily_session` returns.
    #[must_use]
    pub fn with_session(self, session: Session) -> Self {
        {
            let mut state = self.lock();
            state.daily = Some(session.id.clone());
            state.sessions.insert(session.id.clone(), session);
        }
        self
    }

    /// Make the next call fail with a 500 carrying `message`.
    pub fn fail_next(&self, message: &str) {
        self.lock().fail_next = Some(message.to_string());
    }

    #[must_use]
    pub fn answers(&self) -> Vec<RecordedAnswer> {
        self.lock().answers.clone()
    }

    #[must_use]
    pub fn stored(&self, id: &SessionId) -> Option<Session> {
        self.lock().sessions.get(id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn take_failure(state: &mut State) -> Result<(), ApiError> {
        match state.fail_next.take() {
            Some(message) => Err(status_error(StatusCode::INTERNAL_SERVER_ERROR, &message)),
            None => Ok(()),
        }
    }

    fn transition(&self, id: &SessionId, to: SessionStatus) -> Result<Option<Session>, ApiError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        let session = state
            .sessions
            .get_mut(id)
            .ok_or_else(|| status_error(StatusCode::NOT_FOUND, "Session not found."))?;
        if !session.is_active() {
            return Err(status_error(StatusCode::CONFLICT, "Session is not active."));
        }
        session.status = Some(to);
        Ok(Some(session.clone()))
    }
}

#[async_trait]
impl PracticeApi for InMemoryPracticeApi {
    async fn start_daily_session(&self) -> Result<Option<Session>, ApiError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        let daily = state.daily.clone();
        Ok(daily.and_then(|id| state.sessions.get(&id).cloned()))
    }

    async fn session(&self, id: &SessionId) -> Result<Session, ApiError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        state
            .sessions
            .get(id)
            .cloned()
            .ok_or_else(|| status_error(StatusCode::NOT_FOUND, "Session not found."))
    }

    async fn submit_answer(
        &self,
        session_id: &SessionId,
        item_id: &ItemId,
        submission: &AnswerSubmission,
    ) -> Result<AnswerResult, ApiError> {
        let mut state = self.lock();
        state.answers.push(RecordedAnswer {
            session: session_id.clone(),
            item: item_id.clone(),
            submission: submission.clone(),
        });
        Self::take_failure(&mut state)?;

        let session = state
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| status_error(StatusCode::NOT_FOUND, "Session not found."))?;
        let item = session
            .items
            .iter_mut()
            .flatten()
            .find(|item| item.id == *item_id)
            .ok_or_else(|| status_error(StatusCode::NOT_FOUND, "Item not found."))?;
        if item.status().is_answered() {
            return Err(status_error(StatusCode::CONFLICT, "Item already answered."));
        }

        let expected = QuestionView::build(item).expected;
        let correct = expected
            .as_deref()
            .is_some_and(|expected| expected.eq_ignore_ascii_case(submission.answer.trim()));
        let status = if correct {
            ItemStatus::Correct
        } else {
            ItemStatus::Wrong
        };

        *item = item
            .clone()
            .with_status(status.as_str())
            .with_user_answer(&submission.answer);
        item.time_ms = Some(submission.time_ms);

        Ok(AnswerResult {
            status: Some(status.as_str().to_string()),
            message: Some(if correct { "Correct!" } else { "Not quite." }.to_string()),
            expected,
        })
    }

    async fn complete_session(&self, id: &SessionId) -> Result<Option<Session>, ApiError> {
        self.transition(id, SessionStatus::Completed)
    }

    async fn abandon_session(&self, id: &SessionId) -> Result<Option<Session>, ApiError> {
        self.transition(id, SessionStatus::Abandoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vocab_core::model::{Item, QuestionType};

    fn session() -> Session {
        Session::new(
            "s1",
            vec![Item::new(
                "i1",
                QuestionType::FillMissingChars,
                json!({"maskedTerm": "c_t", "term": "cat"}),
            )],
        )
    }

    #[tokio::test]
    async fn grades_against_expected_answer() {
        let api = InMemoryPracticeApi::new().with_session(session());
        let result = api
            .submit_answer(&"s1".into(), &"i1".into(), &AnswerSubmission::new("CAT", 900))
            .await
            .unwrap();

        assert_eq!(result.status.as_deref(), Some("CORRECT"));
        let stored = api.stored(&"s1".into()).unwrap();
        assert_eq!(stored.items()[0].status(), ItemStatus::Correct);
        assert_eq!(stored.items()[0].time_ms, Some(900));
    }

    #[tokio::test]
    async fn second_answer_conflicts() {
        let api = InMemoryPracticeApi::new().with_session(session());
        let submission = AnswerSubmission::new("dog", 1);
        api.submit_answer(&"s1".into(), &"i1".into(), &submission)
            .await
            .unwrap();
        let err = api
            .submit_answer(&"s1".into(), &"i1".into(), &submission)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn completed_sessions_cannot_be_abandoned() {
        let api = InMemoryPracticeApi::new().with_session(session());
        api.complete_session(&"s1".into()).await.unwrap();
        assert!(api.abandon_session(&"s1".into()).await.is_err());
    }

    #[tokio::test]
    async fn fail_next_fails_once() {
        let api = InMemoryPracticeApi::new().with_session(session());
        api.fail_next("boom");
        assert_eq!(api.session(&"s1".into()).await.unwrap_err().message(), "boom");
        assert!(api.session(&"s1".into()).await.is_ok());
    }
}
