use api::ApiError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use services::{FormError, PracticeError};
use thiserror::Error;
use ui::render_page;
use ui::views::{ErrorPage, ErrorPageProps};

use crate::flash::with_error;

/// Failures a handler cannot turn into a page section or a flash message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    BadRequest(String),

    #[error("Page not found.")]
    NotFound,
}

impl From<PracticeError> for AppError {
    fn from(err: PracticeError) -> Self {
        match err {
            PracticeError::Api(err) => AppError::Api(err),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl AppError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AppError::Api(err) if err.is_auth_failure())
    }
}

fn error_page(status: StatusCode, title: &str, message: String) -> Response {
    let html = render_page(
        ErrorPage,
        ErrorPageProps {
            title: title.to_string(),
            message,
        },
    );
    (status, Html(html)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Api(err) if err.is_auth_failure() => {
                Redirect::to(&with_error("/login", &err.message())).into_response()
            }
            AppError::Api(err) => {
                tracing::warn!(error = %err, "upstream request failed");
                error_page(StatusCode::BAD_GATEWAY, "Service unavailable", err.message())
            }
            AppError::BadRequest(message) => {
                error_page(StatusCode::BAD_REQUEST, "Invalid request", message)
            }
            AppError::NotFound => {
                error_page(StatusCode::NOT_FOUND, "Not found", AppError::NotFound.to_string())
            }
        }
    }
}
