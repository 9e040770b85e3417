//! Cookie-held credentials and the signed-in extractors.

use api::{AuthedApi, Credentials};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use services::{HISTORY_COOKIE, SessionHistory};
use vocab_core::model::UserProfile;

use crate::error::AppError;
use crate::state::AppState;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const TOKEN_TYPE_COOKIE: &str = "tokenType";

fn base_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(secure)
        .build()
}

/// Store the credentials, percent-encoded.
#[must_use]
pub fn sign_in(jar: CookieJar, credentials: &Credentials, secure: bool) -> CookieJar {
    let token = urlencoding::encode(credentials.token()).into_owned();
    let token_type = urlencoding::encode(credentials.token_type()).into_owned();
    jar.add(base_cookie(ACCESS_TOKEN_COOKIE, token, secure))
        .add(base_cookie(TOKEN_TYPE_COOKIE, token_type, secure))
}

#[must_use]
pub fn sign_out(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"))
        .remove(Cookie::build(TOKEN_TYPE_COOKIE).path("/"))
}

#[must_use]
pub fn credentials(jar: &CookieJar) -> Option<Credentials> {
    Credentials::from_cookies(
        jar.get(ACCESS_TOKEN_COOKIE).map(Cookie::value),
        jar.get(TOKEN_TYPE_COOKIE).map(Cookie::value),
    )
}

/// Recently opened practice sessions, newest first.
#[must_use]
pub fn session_history(jar: &CookieJar) -> SessionHistory {
    let raw = jar
        .get(HISTORY_COOKIE)
        .and_then(|cookie| urlencoding::decode(cookie.value()).ok())
        .map(|decoded| decoded.into_owned());
    SessionHistory::parse(raw.as_deref())
}

#[must_use]
pub fn remember_session(jar: CookieJar, session_id: &str, secure: bool) -> CookieJar {
    let mut history = session_history(&jar);
    history.push(session_id);
    let value = urlencoding::encode(&history.encode()).into_owned();
    let cookie = Cookie::build((HISTORY_COOKIE, value))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(secure)
        .permanent()
        .build();
    jar.add(cookie)
}

/// A signed-in user and an API client bound to their token.
#[derive(Clone, Debug)]
pub struct Learner {
    pub api: AuthedApi,
    pub viewer: UserProfile,
}

impl FromRequestParts<AppState> for Learner {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(credentials) = credentials(&jar) else {
            return Err(Redirect::to("/login").into_response());
        };
        let api = state.api.authed(Some(credentials));
        match api.me().await {
            Ok(viewer) => Ok(Self { api, viewer }),
            Err(err) => Err(AppError::from(err).into_response()),
        }
    }
}

/// A signed-in administrator; everyone else is sent to the learner dashboard.
#[derive(Clone, Debug)]
pub struct Admin(pub Learner);

impl FromRequestParts<AppState> for Admin {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let learner = Learner::from_request_parts(parts, state).await?;
        if learner.viewer.is_admin() {
            Ok(Self(learner))
        } else {
            tracing::debug!(user = %learner.viewer.id, "non-admin sent back to the dashboard");
            Err(Redirect::to("/dashboard").into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::*;

    #[test]
    fn credentials_round_trip_through_cookies() {
        let creds = Credentials::new("a+b/c", Some("Bearer")).unwrap();
        let jar = sign_in(CookieJar::new(), &creds, true);
        let cookie = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
        assert_eq!(cookie.value(), "a%2Bb%2Fc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(credentials(&jar), Some(creds));
    }

    #[test]
    fn history_cookie_tolerates_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_history=%%%"));
        let jar = CookieJar::from_headers(&headers);
        assert!(session_history(&jar).is_empty());

        let jar = remember_session(jar, "s1", false);
        let jar = remember_session(jar, "s2", false);
        let ids: Vec<String> = session_history(&jar)
            .ids()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, ["s2", "s1"]);
    }
}
