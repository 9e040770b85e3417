use serde::{Deserialize, Serialize};
use vocab_core::model::UserProfile;

use crate::client::{ApiClient, AuthedApi, Credentials};
use crate::error::ApiError;

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Body of a successful `POST /auth/login`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl AuthResponse {
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::new(self.access_token.as_deref()?, self.token_type.as_deref())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError`] when the API rejects the credentials or cannot be reached.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response: Option<AuthResponse> = self
            .send_public("/auth/login", request, "Sign-in failed. Please try again.")
            .await?;
        Ok(response.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] when the API refuses the registration or cannot be reached.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.send_public::<_, serde_json::Value>(
            "/auth/register",
            request,
            "Registration failed. Please try again.",
        )
        .await?;
        Ok(())
    }
}

impl AuthedApi {
    /// Current user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when signed out, rejected or unreachable.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/me", &[], "Could not load your profile.").await
    }
}
