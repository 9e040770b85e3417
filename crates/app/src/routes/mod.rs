//! Request handlers, one module per area of the site.

pub mod admin;
pub mod auth;
pub mod learner;
pub mod practice;

use api::ApiError;
use axum::response::Redirect;
use tracing::warn;
use ui::views::{ViewState, view_state_from_result};
use vocab_core::model::{ListQuery, Page, PageRequest, Topic};

use crate::error::AppError;
use crate::flash::{with_error, with_notice};

/// A page section: sign-in failures abort the page, anything else renders inline.
pub(crate) fn section<T>(result: Result<T, ApiError>) -> Result<ViewState<T>, AppError> {
    match result {
        Err(err) if err.is_auth_failure() => Err(err.into()),
        Err(err) => {
            warn!(error = %err, "page section could not be loaded");
            Ok(view_state_from_result(Err(err)))
        }
        ok => Ok(view_state_from_result(ok)),
    }
}

/// Back to `path` with a notice on success or the API's message on failure.
pub(crate) fn after_mutation<T>(
    result: Result<T, ApiError>,
    path: &str,
    notice: &str,
) -> Result<Redirect, AppError> {
    match result {
        Ok(_) => Ok(Redirect::to(&with_notice(path, notice))),
        Err(err) if err.is_auth_failure() => Err(err.into()),
        Err(err) => {
            warn!(error = %err, path, "mutation refused");
            Ok(Redirect::to(&with_error(path, &err.message())))
        }
    }
}

/// Every topic on one page, for filter and form pickers.
pub(crate) fn all_topics_query() -> ListQuery {
    ListQuery::new(PageRequest::new(0, PageRequest::MAX_SIZE).with_sort("name,asc"))
}

/// Picker entries; an unavailable topic list leaves the picker empty.
pub(crate) fn topic_choices(
    result: Result<Page<Topic>, ApiError>,
) -> Result<Vec<Topic>, AppError> {
    Ok(match section(result)? {
        ViewState::Ready(page) => page.content,
        ViewState::Error(_) => Vec::new(),
    })
}
