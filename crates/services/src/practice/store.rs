use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use vocab_core::model::SessionId;

use super::runner::PracticeRunner;

/// Runners kept before the stalest one is evicted.
pub const DEFAULT_RUNNER_CAPACITY: usize = 512;

/// Process-local runners keyed by session id.
///
/// The lock is only held for synchronous updates, never across an API call.
/// Holds at most `capacity` runners; inserting past that evicts the runner
/// whose question was shown longest ago.
#[derive(Debug)]
pub struct RunnerStore {
    runners: Mutex<HashMap<SessionId, PracticeRunner>>,
    capacity: usize,
}

impl Default for RunnerStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_RUNNER_CAPACITY)
    }
}

impl RunnerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runners: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, PracticeRunner>> {
        self.runners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the stored runner.
    #[must_use]
    pub fn snapshot(&self, id: &SessionId) -> Option<PracticeRunner> {
        self.lock().get(id).cloned()
    }

    pub fn insert(&self, runner: PracticeRunner) {
        let mut runners = self.lock();
        let id = runner.session_id().clone();
        if !runners.contains_key(&id) {
            self.make_room(&mut runners);
        }
        runners.insert(id, runner);
    }

    fn make_room(&self, runners: &mut HashMap<SessionId, PracticeRunner>) {
        while runners.len() >= self.capacity {
            let Some(stalest) = runners
                .iter()
                .min_by_key(|(_, runner)| runner.shown_at())
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            runners.remove(&stalest);
        }
    }

    /// Run `f` against the stored runner, if there is one.
    pub fn update<R>(&self, id: &SessionId, f: impl FnOnce(&mut PracticeRunner) -> R) -> Option<R> {
        self.lock().get_mut(id).map(f)
    }

    /// Update the stored runner or insert the one built by `create`.
    pub fn upsert(
        &self,
        id: &SessionId,
        create: impl FnOnce() -> PracticeRunner,
        update: impl FnOnce(&mut PracticeRunner),
    ) -> PracticeRunner {
        let mut runners = self.lock();
        match runners.get_mut(id) {
            Some(runner) => {
                update(runner);
                runner.clone()
            }
            None => {
                let runner = create();
                self.make_room(&mut runners);
                runners.insert(id.clone(), runner.clone());
                runner
            }
        }
    }

    pub fn remove(&self, id: &SessionId) -> Option<PracticeRunner> {
        self.lock().remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
