use api::ApiError;

/// Why a page section could not be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError {
    message: String,
}

impl ViewError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&ApiError> for ViewError {
    fn from(err: &ApiError) -> Self {
        Self::new(err.message())
    }
}

/// Data fetched for a page section, or the reason it is missing.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            ViewState::Error(_) => None,
        }
    }
}

/// Turn an API read into a view state.
#[must_use]
pub fn view_state_from_result<T>(result: Result<T, ApiError>) -> ViewState<T> {
    match result {
        Ok(data) => ViewState::Ready(data),
        Err(err) => ViewState::Error(ViewError::from(&err)),
    }
}
