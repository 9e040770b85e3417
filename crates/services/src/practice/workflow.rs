use std::sync::Arc;

use api::{AnswerSubmission, PracticeApi};
use tracing::{debug, info, warn};
use vocab_core::Clock;
use vocab_core::model::{ItemId, Session, SessionId};

use super::runner::{AnswerInput, PracticeRunner, SubmitOutcome};
use super::store::RunnerStore;
use crate::error::PracticeError;

/// Where a submission left the runner.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    pub runner: PracticeRunner,
}

/// Drives practice sessions against the API, keeping runner state in a store.
#[derive(Clone, Debug, Default)]
pub struct PracticeLoopService {
    clock: Clock,
    store: Arc<RunnerStore>,
}

impl PracticeLoopService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            store: Arc::new(RunnerStore::new()),
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<RunnerStore>) -> Self {
        self.store = store;
        self
    }

    #[must_use]
    pub fn store(&self) -> &RunnerStore {
        &self.store
    }

    /// Fetch the session and merge it into the stored runner.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Api` when the session cannot be loaded.
    pub async fn load(
        &self,
        api: &dyn PracticeApi,
        id: &SessionId,
    ) -> Result<PracticeRunner, PracticeError> {
        let session = api.session(id).await?;
        debug!(session = %id, items = session.items().len(), "practice session loaded");
        Ok(self.sync(session))
    }

    /// Merge `session` into the store. Finished sessions are dropped from the
    /// store and returned unstored.
    fn sync(&self, session: Session) -> PracticeRunner {
        let id = session.id.clone();
        let clock = self.clock;
        if !session.is_active() {
            return match self.store.remove(&id) {
                Some(mut runner) => {
                    runner.sync(session);
                    runner
                }
                None => PracticeRunner::new(session, &clock),
            };
        }
        let fresh = session.clone();
        self.store.upsert(
            &id,
            move || PracticeRunner::new(fresh, &clock),
            move |runner| runner.sync(session),
        )
    }

    async fn runner(
        &self,
        api: &dyn PracticeApi,
        id: &SessionId,
    ) -> Result<PracticeRunner, PracticeError> {
        match self.store.snapshot(id) {
            Some(runner) => Ok(runner),
            None => self.load(api, id).await,
        }
    }

    /// Validate and submit an answer for `item`.
    ///
    /// Local validation failures never reach the API; they are returned and
    /// also kept on the runner for display. API refusals are recorded on the
    /// runner and reported as [`SubmitOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Returns `PracticeError` for validation failures, an inactive session,
    /// and authentication failures from the API.
    pub async fn submit(
        &self,
        api: &dyn PracticeApi,
        id: &SessionId,
        item: &ItemId,
        input: AnswerInput,
    ) -> Result<SubmitReport, PracticeError> {
        let runner = self.runner(api, id).await?;
        if !runner.session().is_active() {
            return Err(PracticeError::NotActive);
        }

        let pending = self
            .store
            .update(id, |runner| runner.begin_submit(item, input, &self.clock))
            .ok_or(PracticeError::MissingSession)??;

        let mut guard = InFlightGuard {
            store: &self.store,
            session: id,
            item: &pending.item_id,
            armed: true,
        };
        let submission = AnswerSubmission::new(pending.answer, pending.time_ms);
        let response = api.submit_answer(id, &pending.item_id, &submission).await;
        guard.armed = false;

        let (verdict, auth_failure) = match response {
            Ok(result) => (Ok(result), None),
            Err(err) => {
                warn!(session = %id, item = %pending.item_id, error = %err, "answer submission failed");
                let message = err.message();
                let auth = err.is_auth_failure().then_some(err);
                (Err(message), auth)
            }
        };

        let outcome = self
            .store
            .update(id, |runner| {
                runner.finish_submit(&pending.item_id, verdict, &self.clock)
            })
            .ok_or(PracticeError::MissingSession)?;
        if let Some(err) = auth_failure {
            return Err(err.into());
        }

        if outcome == SubmitOutcome::Finished {
            info!(session = %id, "last practice item answered");
            match self.load(api, id).await {
                Ok(runner) => return Ok(SubmitReport { outcome, runner }),
                Err(err) => {
                    warn!(session = %id, error = %err, "could not refresh finished session");
                }
            }
        }

        let runner = self
            .store
            .snapshot(id)
            .ok_or(PracticeError::MissingSession)?;
        Ok(SubmitReport { outcome, runner })
    }

    /// Move `runner` to `index`, through the store when it holds the session.
    #[must_use]
    pub fn go_to(&self, mut runner: PracticeRunner, index: usize) -> PracticeRunner {
        let stored = self.store.update(runner.session_id(), |stored| {
            stored.go_to(index, &self.clock);
            stored.clone()
        });
        stored.unwrap_or_else(|| {
            runner.go_to(index, &self.clock);
            runner
        })
    }

    /// Start (or resume) today's session and keep a runner for it.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::MissingSession` when the API answers without a
    /// session, or `PracticeError::Api` when the call fails.
    pub async fn start_daily(&self, api: &dyn PracticeApi) -> Result<Session, PracticeError> {
        let session = api
            .start_daily_session()
            .await?
            .ok_or(PracticeError::MissingSession)?;
        info!(session = %session.id, items = session.items().len(), "daily session started");
        self.sync(session.clone());
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `PracticeError::NotActive` unless the session is active, or
    /// `PracticeError::Api` when the call fails.
    pub async fn complete(
        &self,
        api: &dyn PracticeApi,
        id: &SessionId,
    ) -> Result<PracticeRunner, PracticeError> {
        self.ensure_active(api, id).await?;
        let returned = api.complete_session(id).await?;
        info!(session = %id, "practice session completed");
        self.refresh(api, id, returned).await
    }

    /// # Errors
    ///
    /// Returns `PracticeError::NotActive` unless the session is active, or
    /// `PracticeError::Api` when the call fails.
    pub async fn abandon(
        &self,
        api: &dyn PracticeApi,
        id: &SessionId,
    ) -> Result<PracticeRunner, PracticeError> {
        self.ensure_active(api, id).await?;
        let returned = api.abandon_session(id).await?;
        info!(session = %id, "practice session abandoned");
        self.refresh(api, id, returned).await
    }

    async fn ensure_active(
        &self,
        api: &dyn PracticeApi,
        id: &SessionId,
    ) -> Result<(), PracticeError> {
        let runner = self.load(api, id).await?;
        if runner.session().is_active() {
            Ok(())
        } else {
            Err(PracticeError::NotActive)
        }
    }

    /// Prefer the session the mutation returned; re-fetch on 204.
    async fn refresh(
        &self,
        api: &dyn PracticeApi,
        id: &SessionId,
        returned: Option<Session>,
    ) -> Result<PracticeRunner, PracticeError> {
        match returned.filter(|session| session.id == *id && !session.items().is_empty()) {
            Some(session) => Ok(self.sync(session)),
            None => self.load(api, id).await,
        }
    }
}

/// Releases the in-flight flag if a submission is dropped before the API
/// answered.
struct InFlightGuard<'a> {
    store: &'a RunnerStore,
    session: &'a SessionId,
    item: &'a ItemId,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!(session = %self.session, item = %self.item, "answer submission abandoned");
        self.store
            .update(self.session, |runner| runner.cancel_submit(self.item));
    }
}
