use chrono::{DateTime, Utc};
use vocab_core::Clock;
use vocab_core::model::{Item, ItemId, ItemStatus, Session, SessionId};
use vocab_core::question::{AnswerInput as InputKind, AnswerResult, QuestionView, normalize_slot};

use crate::error::PracticeError;

/// Status recorded when the API accepted an answer but reported no status.
const ANSWERED: &str = "ANSWERED";

//
// ─── INPUT ─────────────────────────────────────────────────────────────────────
//

/// What the learner submitted for the current item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerInput {
    /// Free text or the value of a chosen option.
    Text(String),
    /// One entry per blank of a masked term.
    Slots(Vec<String>),
}

//
// ─── ITEM STATE ────────────────────────────────────────────────────────────────
//

/// One item plus what happened to it locally.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemState {
    item: Item,
    view: QuestionView,
    result: Option<AnswerResult>,
    draft: Option<AnswerInput>,
}

impl ItemState {
    fn new(item: Item) -> Self {
        Self {
            view: QuestionView::build(&item),
            item,
            result: None,
            draft: None,
        }
    }

    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    #[must_use]
    pub fn view(&self) -> &QuestionView {
        &self.view
    }

    #[must_use]
    pub fn result(&self) -> Option<&AnswerResult> {
        self.result.as_ref()
    }

    /// Local grading wins until the server reports its own.
    #[must_use]
    pub fn status(&self) -> ItemStatus {
        let server = self.item.status();
        if server.is_answered() {
            return server;
        }
        match &self.result {
            Some(result) => match result.status.as_deref() {
                Some(status) if !status.trim().is_empty() => ItemStatus::from_wire(Some(status)),
                _ => ItemStatus::Unknown(ANSWERED.to_string()),
            },
            None => server,
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.status().is_answered()
    }

    /// Text answer to pre-fill: the last rejected draft, else the recorded answer.
    #[must_use]
    pub fn answer_text(&self) -> String {
        match &self.draft {
            Some(AnswerInput::Text(text)) => text.clone(),
            _ => self.item.user_answer().unwrap_or_default().to_string(),
        }
    }

    /// Per-slot characters to pre-fill for masked terms.
    #[must_use]
    pub fn fill_values(&self) -> Vec<String> {
        let Some(config) = &self.view.fill_missing else {
            return Vec::new();
        };
        match &self.draft {
            Some(AnswerInput::Slots(slots)) if slots.len() == config.slot_count() => slots.clone(),
            _ => config.split_answer(self.item.user_answer().unwrap_or_default()),
        }
    }

    /// Expected answer, only once the item was graded wrong.
    #[must_use]
    pub fn expected_display(&self) -> Option<String> {
        if !self.status().is_wrong() {
            return None;
        }
        let reported = self.result.as_ref().and_then(|result| result.expected.as_deref());
        self.view.expected_display(reported)
    }

    /// Feedback message returned with the grading.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.result.as_ref().and_then(|result| result.message.as_deref())
    }

    /// Turn the submitted input into the answer string sent to the API.
    fn answer_from(&self, input: &AnswerInput) -> Result<String, PracticeError> {
        match (self.view.input(), &self.view.fill_missing, input) {
            (InputKind::FillMissing, Some(config), AnswerInput::Slots(slots)) => {
                Ok(config.reconstruct(slots)?)
            }
            (InputKind::FillMissing, Some(config), AnswerInput::Text(text)) => {
                Ok(config.reconstruct(&config.split_answer(text))?)
            }
            (_, _, AnswerInput::Text(text)) => {
                let answer = text.trim();
                if answer.is_empty() {
                    Err(PracticeError::EmptyAnswer)
                } else {
                    Ok(answer.to_string())
                }
            }
            (_, _, AnswerInput::Slots(slots)) => {
                let joined: String = slots.iter().filter_map(|slot| normalize_slot(slot)).collect();
                if joined.is_empty() {
                    Err(PracticeError::EmptyAnswer)
                } else {
                    Ok(joined)
                }
            }
        }
    }
}

//
// ─── RUNNER ────────────────────────────────────────────────────────────────────
//

/// A submission that passed local validation and is now in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSubmission {
    pub item_id: ItemId,
    pub answer: String,
    pub time_ms: i64,
}

/// Where the runner went after a submission resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Moved on to the item at this index.
    Advanced(usize),
    /// The last item was answered; the session should be re-fetched.
    Finished,
    /// The API refused; the item stays pending with this message.
    Failed(String),
}

/// Answering state of one practice session.
///
/// Items move from pending to a terminal status exactly once. Only one
/// submission may be in flight at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct PracticeRunner {
    session: Session,
    items: Vec<ItemState>,
    current: usize,
    shown_at: DateTime<Utc>,
    loading: Option<ItemId>,
    error: Option<String>,
}

impl PracticeRunner {
    #[must_use]
    pub fn new(session: Session, clock: &Clock) -> Self {
        let items = session.items().iter().cloned().map(ItemState::new).collect();
        let mut runner = Self {
            session,
            items,
            current: 0,
            shown_at: clock.now(),
            loading: None,
            error: None,
        };
        runner.current = runner.first_pending().unwrap_or(0);
        runner
    }

    /// Take the authoritative session from the API, keeping local results
    /// only for items the server still reports as pending.
    pub fn sync(&mut self, session: Session) {
        let mut previous: Vec<ItemState> = std::mem::take(&mut self.items);
        self.items = session
            .items()
            .iter()
            .cloned()
            .map(|item| {
                let mut state = ItemState::new(item);
                if let Some(index) = previous.iter().position(|old| old.item.id == state.item.id) {
                    let old = previous.swap_remove(index);
                    if !state.item.status().is_answered() {
                        state.result = old.result;
                        state.draft = old.draft;
                    }
                }
                state
            })
            .collect();
        self.session = session;
        self.current = self.current.min(self.items.len().saturating_sub(1));
        // A submission whose item is gone or already graded upstream can no
        // longer finish here.
        let stale = self.loading.as_ref().is_some_and(|loading| {
            !self
                .items
                .iter()
                .any(|state| state.item.id == *loading && !state.item.status().is_answered())
        });
        if stale {
            self.loading = None;
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session.id
    }

    #[must_use]
    pub fn items(&self) -> &[ItemState] {
        &self.items
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> Option<&ItemState> {
        self.items.get(self.current)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// When the current question was put in front of the learner.
    #[must_use]
    pub fn shown_at(&self) -> DateTime<Utc> {
        self.shown_at
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.items.iter().filter(|state| state.is_answered()).count()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.items.len()
    }

    fn first_pending(&self) -> Option<usize> {
        self.items.iter().position(|state| !state.is_answered())
    }

    /// Jump to `index`, clamped into range; clears the inline error.
    pub fn go_to(&mut self, index: usize, clock: &Clock) {
        let target = index.min(self.items.len().saturating_sub(1));
        if target != self.current {
            self.shown_at = clock.now();
        }
        self.current = target;
        self.error = None;
    }

    /// Validate the current item's answer and mark it in flight.
    ///
    /// # Errors
    ///
    /// Fails without touching the network when the session has no items,
    /// a submission is already in flight, the item left pending, or the
    /// answer is empty or incomplete. The error is also kept for display.
    pub fn begin_submit(
        &mut self,
        item_id: &ItemId,
        input: AnswerInput,
        clock: &Clock,
    ) -> Result<PendingSubmission, PracticeError> {
        let result = self.prepare(item_id, &input, clock);
        match &result {
            Ok(pending) => {
                self.loading = Some(pending.item_id.clone());
                self.error = None;
            }
            Err(PracticeError::InFlight) => {}
            Err(err) => {
                self.error = Some(err.to_string());
                if let Some(state) = self.items.iter_mut().find(|state| state.item.id == *item_id) {
                    state.draft = Some(input);
                }
            }
        }
        result
    }

    /// Release the in-flight flag for `item_id` without recording a verdict.
    ///
    /// Used when a submission is abandoned before the API answered.
    pub fn cancel_submit(&mut self, item_id: &ItemId) {
        if self.loading.as_ref() == Some(item_id) {
            self.loading = None;
        }
    }

    fn prepare(
        &mut self,
        item_id: &ItemId,
        input: &AnswerInput,
        clock: &Clock,
    ) -> Result<PendingSubmission, PracticeError> {
        if self.items.is_empty() {
            return Err(PracticeError::NoItems);
        }
        if self.loading.is_some() {
            return Err(PracticeError::InFlight);
        }
        let index = self
            .items
            .iter()
            .position(|state| state.item.id == *item_id)
            .ok_or_else(|| PracticeError::UnknownItem(item_id.to_string()))?;
        if index != self.current {
            self.go_to(index, clock);
        }

        let state = &self.items[index];
        if state.is_answered() {
            return Err(PracticeError::AlreadyAnswered);
        }
        let answer = state.answer_from(input)?;

        Ok(PendingSubmission {
            item_id: item_id.clone(),
            answer,
            time_ms: clock.elapsed_ms(self.shown_at),
        })
    }

    /// Record the API's verdict for the in-flight submission and advance.
    pub fn finish_submit(
        &mut self,
        item_id: &ItemId,
        outcome: Result<AnswerResult, String>,
        clock: &Clock,
    ) -> SubmitOutcome {
        self.loading = None;
        let Some(index) = self.items.iter().position(|state| state.item.id == *item_id) else {
            return SubmitOutcome::Failed(format!("question {item_id} is not part of this session"));
        };

        match outcome {
            Err(message) => {
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
            Ok(result) => {
                let state = &mut self.items[index];
                state.result = Some(result);
                state.draft = None;
                self.error = None;
                if index + 1 < self.items.len() {
                    self.go_to(index + 1, clock);
                    SubmitOutcome::Advanced(self.current)
                } else {
                    SubmitOutcome::Finished
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;
    use vocab_core::model::QuestionType;
    use vocab_core::time::fixed_clock;

    fn session() -> Session {
        Session::new(
            "s1",
            vec![
                Item::new(
                    "i1",
                    QuestionType::MultipleChoice,
                    json!({"question": "Pick", "options": ["cat", "dog"], "expected": "cat"}),
                ),
                Item::new(
                    "i2",
                    QuestionType::FillMissingChars,
                    json!({"maskedTerm": "c_t", "term": "cat"}),
                ),
            ],
        )
    }

    #[test]
    fn submission_carries_elapsed_time() {
        let mut clock = fixed_clock();
        let mut runner = PracticeRunner::new(session(), &clock);
        clock.advance(Duration::milliseconds(1_500));

        let pending = runner
            .begin_submit(&"i1".into(), AnswerInput::Text("cat".into()), &clock)
            .unwrap();
        assert_eq!(pending.answer, "cat");
        assert_eq!(pending.time_ms, 1_500);
        assert!(runner.is_loading());
    }

    #[test]
    fn second_submit_while_loading_is_rejected() {
        let clock = fixed_clock();
        let mut runner = PracticeRunner::new(session(), &clock);
        runner
            .begin_submit(&"i1".into(), AnswerInput::Text("cat".into()), &clock)
            .unwrap();
        let err = runner
            .begin_submit(&"i1".into(), AnswerInput::Text("cat".into()), &clock)
            .unwrap_err();
        assert!(matches!(err, PracticeError::InFlight));
    }

    #[test]
    fn success_advances_then_finishes() {
        let clock = fixed_clock();
        let mut runner = PracticeRunner::new(session(), &clock);

        runner
            .begin_submit(&"i1".into(), AnswerInput::Text("dog".into()), &clock)
            .unwrap();
        let outcome = runner.finish_submit(
            &"i1".into(),
            Ok(AnswerResult {
                status: Some("WRONG".into()),
                message: None,
                expected: None,
            }),
            &clock,
        );
        assert_eq!(outcome, SubmitOutcome::Advanced(1));
        assert_eq!(runner.items()[0].status(), ItemStatus::Wrong);
        assert_eq!(runner.items()[0].expected_display().as_deref(), Some("cat"));

        let pending = runner
            .begin_submit(
                &"i2".into(),
                AnswerInput::Slots(vec!["a".into()]),
                &clock,
            )
            .unwrap();
        assert_eq!(pending.answer, "cat");
        let outcome = runner.finish_submit(&"i2".into(), Ok(AnswerResult::default()), &clock);
        assert_eq!(outcome, SubmitOutcome::Finished);
        assert!(runner.items()[1].is_answered());
    }

    #[test]
    fn answered_items_are_rejected_locally() {
        let clock = fixed_clock();
        let mut answered = session();
        if let Some(items) = answered.items.as_mut() {
            items[0] = items[0].clone().with_status("CORRECT");
        }
        let mut runner = PracticeRunner::new(answered, &clock);
        assert_eq!(runner.current_index(), 1);

        let err = runner
            .begin_submit(&"i1".into(), AnswerInput::Text("cat".into()), &clock)
            .unwrap_err();
        assert!(matches!(err, PracticeError::AlreadyAnswered));
        assert!(!runner.is_loading());
        assert!(runner.error().is_some());
    }

    #[test]
    fn empty_and_incomplete_answers_stay_pending() {
        let clock = fixed_clock();
        let mut runner = PracticeRunner::new(session(), &clock);

        let err = runner
            .begin_submit(&"i1".into(), AnswerInput::Text("   ".into()), &clock)
            .unwrap_err();
        assert!(matches!(err, PracticeError::EmptyAnswer));

        let err = runner
            .begin_submit(&"i2".into(), AnswerInput::Slots(vec![" ".into()]), &clock)
            .unwrap_err();
        assert!(matches!(err, PracticeError::IncompleteFill(_)));
        assert_eq!(runner.items()[1].fill_values(), vec![" ".to_string()]);
    }

    #[test]
    fn failure_keeps_item_pending_with_message() {
        let clock = fixed_clock();
        let mut runner = PracticeRunner::new(session(), &clock);
        runner
            .begin_submit(&"i1".into(), AnswerInput::Text("cat".into()), &clock)
            .unwrap();
        let outcome = runner.finish_submit(&"i1".into(), Err("Server down".into()), &clock);

        assert_eq!(outcome, SubmitOutcome::Failed("Server down".into()));
        assert_eq!(runner.error(), Some("Server down"));
        assert!(!runner.items()[0].is_answered());
        assert!(!runner.is_loading());
    }

    #[test]
    fn go_to_clamps_and_clears_error() {
        let clock = fixed_clock();
        let mut runner = PracticeRunner::new(session(), &clock);
        let _ = runner.begin_submit(&"i1".into(), AnswerInput::Text(String::new()), &clock);
        assert!(runner.error().is_some());

        runner.go_to(99, &clock);
        assert_eq!(runner.current_index(), 1);
        assert_eq!(runner.error(), None);
    }

    #[test]
    fn unknown_item_keeps_drafts_off_other_questions() {
        let clock = fixed_clock();
        let mut runner = PracticeRunner::new(session(), &clock);

        let err = runner
            .begin_submit(&"nope".into(), AnswerInput::Text("stale".into()), &clock)
            .unwrap_err();
        assert!(matches!(err, PracticeError::UnknownItem(_)));
        assert_eq!(runner.items()[0].answer_text(), "");
        assert!(runner.error().is_some());
    }

    #[test]
    fn cancelled_submission_can_be_retried() {
        let clock = fixed_clock();
        let mut runner = PracticeRunner::new(session(), &clock);
        runner
            .begin_submit(&"i1".into(), AnswerInput::Text("cat".into()), &clock)
            .unwrap();

        runner.cancel_submit(&"i2".into());
        assert!(runner.is_loading());
        runner.cancel_submit(&"i1".into());
        assert!(!runner.is_loading());
        assert!(!runner.items()[0].is_answered());

        runner
            .begin_submit(&"i1".into(), AnswerInput::Text("cat".into()), &clock)
            .unwrap();
    }

    #[test]
    fn sync_drops_submission_graded_upstream() {
        let clock = fixed_clock();
        let mut runner = PracticeRunner::new(session(), &clock);
        runner
            .begin_submit(&"i1".into(), AnswerInput::Text("cat".into()), &clock)
            .unwrap();

        runner.sync(session());
        assert!(runner.is_loading());

        let mut graded = session();
        if let Some(items) = graded.items.as_mut() {
            items[0] = items[0].clone().with_status("CORRECT");
        }
        runner.sync(graded);
        assert!(!runner.is_loading());
    }

    #[test]
    fn sync_lets_server_status_win() {
        let clock = fixed_clock();
        let mut runner = PracticeRunner::new(session(), &clock);
        runner
            .begin_submit(&"i1".into(), AnswerInput::Text("cat".into()), &clock)
            .unwrap();
        runner.finish_submit(
            &"i1".into(),
            Ok(AnswerResult {
                status: Some("WRONG".into()),
                ..AnswerResult::default()
            }),
            &clock,
        );

        let mut fresh = session();
        if let Some(items) = fresh.items.as_mut() {
            items[0] = items[0].clone().with_status("CORRECT");
        }
        runner.sync(fresh);
        assert_eq!(runner.items()[0].status(), ItemStatus::Correct);
        assert!(runner.items()[0].result().is_none());
    }
}
