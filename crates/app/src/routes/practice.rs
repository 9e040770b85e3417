//! Practice sessions: the recent list, the question runner and its actions.

use std::collections::{BTreeMap, HashMap};

use api::PracticeApi;
use axum::extract::{Form, Path, Query, State};
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;
use services::{AnswerInput, PracticeError, SubmitOutcome};
use tracing::{debug, warn};
use ui::render_page;
use ui::views::{
    ANSWER_FIELD, ITEM_FIELD, PracticeListPage, PracticeListPageProps, PracticeSessionPage,
    PracticeSessionPageProps, SLOT_FIELD_PREFIX, ViewError, ViewState,
};
use ui::vm::{map_practice, map_recent_session};
use vocab_core::model::{ItemId, SessionId};

use crate::auth::{Learner, remember_session, session_history};
use crate::error::AppError;
use crate::flash::{flash_from, with_error, with_notice};
use crate::state::AppState;

const PRACTICE_PATH: &str = "/dashboard/practice";
const RECENT_LIMIT: usize = 10;
/// More blanks than any masked term carries.
const MAX_SLOTS: usize = 64;

type Params = Query<HashMap<String, String>>;

fn session_path(id: &str) -> String {
    format!("{PRACTICE_PATH}/{}", urlencoding::encode(id))
}

/// Message shown for a failed practice call; sign-in failures abort instead.
fn failure_message(err: PracticeError) -> Result<String, AppError> {
    if err.is_auth_failure() {
        return Err(err.into());
    }
    Ok(match err {
        PracticeError::Api(api) => api.message(),
        other => other.to_string(),
    })
}

fn redirect_failure(err: PracticeError, path: &str) -> Result<Redirect, AppError> {
    warn!(error = %err, path, "practice action failed");
    let message = failure_message(err)?;
    Ok(Redirect::to(&with_error(path, &message)))
}

pub async fn list(
    learner: Learner,
    jar: CookieJar,
    Query(params): Params,
) -> Result<Html<String>, AppError> {
    let mut recent = Vec::new();
    for id in session_history(&jar).ids().iter().take(RECENT_LIMIT) {
        match learner.api.session(id).await {
            Ok(session) => recent.push(ViewState::Ready(map_recent_session(&session))),
            Err(err) if err.is_auth_failure() => return Err(err.into()),
            Err(err) => {
                warn!(session = %id, error = %err, "recent session unavailable");
                recent.push(ViewState::Error(ViewError::new(format!(
                    "Session {id}: {}",
                    err.message()
                ))));
            }
        }
    }

    Ok(Html(render_page(
        PracticeListPage,
        PracticeListPageProps {
            viewer: learner.viewer,
            flash: flash_from(&params),
            recent,
        },
    )))
}

pub async fn start(
    State(state): State<AppState>,
    learner: Learner,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    match state.practice.start_daily(&learner.api).await {
        Ok(session) => {
            let id = session.id.to_string();
            let jar = remember_session(jar, &id, state.secure_cookies);
            Ok((jar, Redirect::to(&session_path(&id))))
        }
        Err(err) => Ok((jar, redirect_failure(err, PRACTICE_PATH)?)),
    }
}

/// `?id=` from the "open a session" form.
pub async fn open(Query(params): Params) -> Redirect {
    match params.get("id").map(|id| id.trim()).filter(|id| !id.is_empty()) {
        Some(id) => Redirect::to(&session_path(id)),
        None => Redirect::to(&with_error(PRACTICE_PATH, "Enter a session id.")),
    }
}

pub async fn session(
    State(state): State<AppState>,
    learner: Learner,
    jar: CookieJar,
    Path(id): Path<String>,
    Query(params): Params,
) -> Result<(CookieJar, Html<String>), AppError> {
    let session_id = SessionId::new(id.as_str());
    let practice = match state.practice.load(&learner.api, &session_id).await {
        Ok(loaded) => {
            let item = params.get("item").and_then(|raw| raw.trim().parse::<usize>().ok());
            let runner = match item {
                Some(index) => state.practice.go_to(loaded, index),
                None => loaded,
            };
            debug!(session = %session_id, item = runner.current_index(), "practice question shown");
            ViewState::Ready(map_practice(&runner))
        }
        Err(err) => {
            warn!(session = %session_id, error = %err, "practice session could not be loaded");
            ViewState::Error(ViewError::new(failure_message(err)?))
        }
    };

    let jar = remember_session(jar, &id, state.secure_cookies);
    let page = render_page(
        PracticeSessionPage,
        PracticeSessionPageProps {
            viewer: learner.viewer,
            flash: flash_from(&params),
            practice,
        },
    );
    Ok((jar, Html(page)))
}

/// Read the submitted answer: `slot-N` fields for masked terms, else `answer`.
///
/// Slot indexes at or past [`MAX_SLOTS`] are ignored.
fn answer_input(fields: &HashMap<String, String>) -> AnswerInput {
    let slots: BTreeMap<usize, &str> = fields
        .iter()
        .filter_map(|(key, value)| {
            let index = key.strip_prefix(SLOT_FIELD_PREFIX)?.parse::<usize>().ok()?;
            (index < MAX_SLOTS).then_some((index, value.as_str()))
        })
        .collect();

    if slots.is_empty() {
        return AnswerInput::Text(fields.get(ANSWER_FIELD).cloned().unwrap_or_default());
    }
    let len = slots.keys().next_back().map_or(0, |last| last + 1);
    let mut values = vec![String::new(); len];
    for (index, value) in slots {
        values[index] = value.to_string();
    }
    AnswerInput::Slots(values)
}

pub async fn answer(
    State(state): State<AppState>,
    learner: Learner,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let path = session_path(&id);
    let session_id = SessionId::new(id);
    let Some(item) = fields
        .get(ITEM_FIELD)
        .map(|raw| raw.trim())
        .filter(|raw| !raw.is_empty())
    else {
        return Ok(Redirect::to(&with_error(&path, "No question was selected.")));
    };

    let result = state
        .practice
        .submit(&learner.api, &session_id, &ItemId::new(item), answer_input(&fields))
        .await;
    match result {
        Ok(report) => match report.outcome {
            SubmitOutcome::Finished => Ok(Redirect::to(&with_notice(
                &path,
                "All questions answered. Complete the session to see your score.",
            ))),
            SubmitOutcome::Advanced(_) | SubmitOutcome::Failed(_) => Ok(Redirect::to(&path)),
        },
        // Kept on the runner and shown next to the question.
        Err(
            PracticeError::AlreadyAnswered
            | PracticeError::EmptyAnswer
            | PracticeError::IncompleteFill(_)
            | PracticeError::NoItems
            | PracticeError::UnknownItem(_),
        ) => Ok(Redirect::to(&path)),
        Err(err) => redirect_failure(err, &path),
    }
}

pub async fn complete(
    State(state): State<AppState>,
    learner: Learner,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let path = session_path(&id);
    match state.practice.complete(&learner.api, &SessionId::new(id)).await {
        Ok(_) => Ok(Redirect::to(&with_notice(&path, "Session completed."))),
        Err(err) => redirect_failure(err, &path),
    }
}

pub async fn abandon(
    State(state): State<AppState>,
    learner: Learner,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let path = session_path(&id);
    match state.practice.abandon(&learner.api, &SessionId::new(id)).await {
        Ok(_) => Ok(Redirect::to(&with_notice(&path, "Session abandoned."))),
        Err(err) => redirect_failure(err, &path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn slots_are_ordered_by_index() {
        let input = answer_input(&fields(&[("itemId", "i1"), ("slot-1", "b"), ("slot-0", "a")]));
        assert_eq!(input, AnswerInput::Slots(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn missing_slots_stay_blank() {
        let input = answer_input(&fields(&[("slot-2", "c")]));
        assert_eq!(input, AnswerInput::Slots(vec![String::new(), String::new(), "c".into()]));
    }

    #[test]
    fn out_of_range_slots_are_ignored() {
        let input = answer_input(&fields(&[
            ("slot-0", "a"),
            ("slot-18446744073709551615", "x"),
            ("slot-2305843009213693951", "y"),
            ("slot-2000000000", "z"),
        ]));
        assert_eq!(input, AnswerInput::Slots(vec!["a".into()]));

        let input = answer_input(&fields(&[("answer", "cat"), ("slot-64", "x")]));
        assert_eq!(input, AnswerInput::Text("cat".into()));

        let input = answer_input(&fields(&[("slot-63", "z")]));
        assert!(matches!(input, AnswerInput::Slots(values) if values.len() == 64));
    }

    #[test]
    fn plain_answers_use_the_answer_field() {
        assert_eq!(
            answer_input(&fields(&[("answer", "cat")])),
            AnswerInput::Text("cat".into())
        );
        assert_eq!(answer_input(&fields(&[])), AnswerInput::Text(String::new()));
    }
}
