use std::collections::HashMap;

use api::{LoginRequest, RegisterRequest};
use axum::extract::{Form, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{info, warn};
use ui::render_page;
use ui::views::{LoginPage, LoginPageProps, RegisterPage, RegisterPageProps};

use crate::auth::{credentials, sign_in, sign_out};
use crate::flash::{flash_from, with_error, with_notice};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    email: String,
    password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterForm {
    email: String,
    password: String,
    display_name: String,
}

fn back_to(path: &str, email: &str, message: &str) -> Redirect {
    let path = if email.is_empty() {
        path.to_string()
    } else {
        format!("{path}?email={}", urlencoding::encode(email))
    };
    Redirect::to(&with_error(&path, message))
}

pub async fn home(jar: CookieJar) -> Redirect {
    if credentials(&jar).is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

pub async fn login_page(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    Html(render_page(
        LoginPage,
        LoginPageProps {
            flash: flash_from(&params),
            email: params.get("email").cloned().unwrap_or_default(),
        },
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = form.email.trim().to_string();
    if email.is_empty() || form.password.is_empty() {
        return back_to("/login", &email, "Enter your email and password.").into_response();
    }

    let request = LoginRequest {
        email: email.clone(),
        password: form.password,
    };
    let response = match state.api.login(&request).await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "sign-in failed");
            return back_to("/login", &email, &err.message()).into_response();
        }
    };
    let Some(creds) = response.credentials() else {
        return back_to("/login", &email, "The server did not return an access token.")
            .into_response();
    };

    info!(admin = response.is_admin(), "user signed in");
    let target = if response.is_admin() { "/admin" } else { "/dashboard" };
    (sign_in(jar, &creds, state.secure_cookies), Redirect::to(target)).into_response()
}

pub async fn register_page(Query(params): Query<HashMap<String, String>>) -> Html<String> {
    Html(render_page(
        RegisterPage,
        RegisterPageProps {
            flash: flash_from(&params),
            email: params.get("email").cloned().unwrap_or_default(),
            display_name: params.get("displayName").cloned().unwrap_or_default(),
        },
    ))
}

pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Redirect {
    let request = RegisterRequest {
        email: form.email.trim().to_string(),
        password: form.password,
        display_name: form.display_name.trim().to_string(),
    };
    if request.email.is_empty() || request.password.is_empty() || request.display_name.is_empty() {
        return back_to("/register", &request.email, "Fill in every field.");
    }

    match state.api.register(&request).await {
        Ok(()) => {
            info!("account registered");
            Redirect::to(&with_notice("/login", "Account created. Sign in to continue."))
        }
        Err(err) => back_to("/register", &request.email, &err.message()),
    }
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        sign_out(jar),
        Redirect::to(&with_notice("/login", "You have been signed out.")),
    )
}
