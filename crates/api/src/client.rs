use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::http::{check_response, read_json, read_optional};

/// Percent-encode one path segment.
pub(crate) fn seg(raw: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(raw)
}

/// Where the remote API lives and how long to wait for it.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// # Errors
    ///
    /// Returns [`ApiError::Url`] when `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: Url::parse(base_url.trim())?,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Access token as stored in the browser cookies.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    token_type: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub const DEFAULT_TOKEN_TYPE: &'static str = "Bearer";

    /// `None` for a blank token; a blank type becomes `Bearer`.
    #[must_use]
    pub fn new(token: &str, token_type: Option<&str>) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let token_type = token_type
            .map(str::trim)
            .filter(|kind| !kind.is_empty())
            .unwrap_or(Self::DEFAULT_TOKEN_TYPE);
        Some(Self {
            token: token.to_string(),
            token_type: token_type.to_string(),
        })
    }

    /// Build from percent-encoded cookie values.
    #[must_use]
    pub fn from_cookies(access_token: Option<&str>, token_type: Option<&str>) -> Option<Self> {
        let decode = |raw: &str| {
            urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        };
        let token = decode(access_token?);
        let token_type = token_type.map(decode);
        Self::new(&token, token_type.as_deref())
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}

/// Shared HTTP client for the remote API. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("vocab-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self {
            http,
            base: config.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Bind credentials for the calls of one request.
    #[must_use]
    pub fn authed(&self, credentials: Option<Credentials>) -> AuthedApi {
        AuthedApi {
            client: self.clone(),
            credentials,
        }
    }

    pub(crate) fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}{}", self.base, path))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Unauthenticated JSON call (login and registration).
    pub(crate) async fn send_public<B: Serialize + Sync + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Option<T>, ApiError> {
        let url = self.url(path, &[])?;
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        read_optional(check_response(response, fallback).await?).await
    }
}

/// An [`ApiClient`] bound to the caller's credentials.
#[derive(Clone, Debug)]
pub struct AuthedApi {
    client: ApiClient,
    credentials: Option<Credentials>,
}

impl AuthedApi {
    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.credentials.is_some()
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
    ) -> Result<RequestBuilder, ApiError> {
        let credentials = self.credentials.as_ref().ok_or(ApiError::Unauthorized)?;
        let url = self.client.url(path, query)?;
        tracing::debug!(%method, %url, "API request");
        Ok(self
            .client
            .http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, credentials.authorization()))
    }

    /// Authenticated read.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path, query)?.send().await?;
        read_json(check_response(response, fallback).await?).await
    }

    /// Authenticated mutation with an optional JSON body.
    pub(crate) async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> Result<Option<T>, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.request(method, path, &[])?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        read_optional(check_response(response, fallback).await?).await
    }

    /// Mutation without a body.
    pub(crate) async fn send_empty<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        fallback: &str,
    ) -> Result<Option<T>, ApiError> {
        self.send::<(), T>(method, path, None, fallback).await
    }

    /// Multipart upload.
    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        fallback: &str,
    ) -> Result<Option<T>, ApiError> {
        let response = self
            .request(Method::POST, path, &[])?
            .multipart(form)
            .send()
            .await?;
        read_optional(check_response(response, fallback).await?).await
    }

    /// Raw download with its response headers.
    pub(crate) async fn get_bytes(
        &self,
        path: &str,
        query: &[(String, String)],
        fallback: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self.request(Method::GET, path, query)?.send().await?;
        check_response(response, fallback).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_default_to_bearer_and_decode_cookies() {
        let creds = Credentials::from_cookies(Some("abc%2Bdef"), None).unwrap();
        assert_eq!(creds.authorization(), "Bearer abc+def");

        let creds = Credentials::from_cookies(Some("t"), Some("Token")).unwrap();
        assert_eq!(creds.authorization(), "Token t");

        assert!(Credentials::from_cookies(Some("  "), None).is_none());
        assert!(Credentials::from_cookies(None, Some("Bearer")).is_none());
    }

    #[test]
    fn credentials_debug_hides_token() {
        let creds = Credentials::new("secret", None).unwrap();
        assert!(!format!("{creds:?}").contains("secret"));
    }

    #[test]
    fn urls_keep_base_path_and_encode_query() {
        let config = ApiConfig::new("http://localhost:8080/api/").unwrap();
        let client = ApiClient::new(&config).unwrap();
        let url = client
            .url("/vocab", &[("query".into(), "a b&c".into())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/vocab?query=a+b%26c");
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_any_request() {
        let config = ApiConfig::new("http://127.0.0.1:9").unwrap();
        let api = ApiClient::new(&config).unwrap().authed(None);
        let err = api
            .get_json::<serde_json::Value>("/me", &[], "x")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
