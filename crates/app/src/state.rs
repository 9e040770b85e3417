use api::{ApiClient, ApiConfig, ApiError};
use services::{Clock, PracticeLoopService};

use crate::config::AppConfig;

/// Shared by every handler. Cheap to clone.
#[derive(Clone, Debug)]
pub struct AppState {
    pub api: ApiClient,
    pub practice: PracticeLoopService,
    pub secure_cookies: bool,
}

impl AppState {
    /// # Errors
    ///
    /// Returns [`ApiError`] when the API base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let api_config = ApiConfig::new(&config.api_base_url)?.with_timeout(config.api_timeout);
        Ok(Self {
            api: ApiClient::new(&api_config)?,
            practice: PracticeLoopService::new(Clock::System),
            secure_cookies: config.secure_cookies,
        })
    }
}
