#![forbid(unsafe_code)]

//! Server-rendered learner dashboard and admin console over the vocabulary API.

pub mod auth;
pub mod config;
pub mod error;
pub mod flash;
pub mod routes;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use state::AppState;

use routes::{admin, auth as auth_routes, learner, practice};

/// Upper bound for CSV uploads.
pub const IMPORT_BODY_LIMIT: usize = 10 * 1024 * 1024;

async fn healthz() -> &'static str {
    "ok"
}

async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        ui::STYLESHEET,
    )
}

fn learner_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(learner::dashboard))
        .route("/dashboard/library", get(learner::library))
        .route("/dashboard/library/{id}/add", post(learner::add_to_my_vocab))
        .route("/dashboard/topics", get(learner::topics))
        .route("/dashboard/vocab", get(learner::my_vocab))
        .route(
            "/dashboard/vocab/new",
            get(learner::contribute_form).post(learner::contribute),
        )
        .route("/dashboard/vocab/{id}/update", post(learner::update_my_vocab))
        .route("/dashboard/vocab/{id}/remove", post(learner::remove_from_my_vocab))
        .route(
            "/dashboard/settings",
            get(learner::settings).post(learner::update_settings),
        )
        .route("/dashboard/practice", get(practice::list))
        .route("/dashboard/practice/start", post(practice::start))
        .route("/dashboard/practice/open", get(practice::open))
        .route("/dashboard/practice/{id}", get(practice::session))
        .route("/dashboard/practice/{id}/answer", post(practice::answer))
        .route("/dashboard/practice/{id}/complete", post(practice::complete))
        .route("/dashboard/practice/{id}/abandon", post(practice::abandon))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::overview))
        .route("/admin/users", get(admin::users).post(admin::create_user))
        .route("/admin/users/{id}/update", post(admin::update_user))
        .route("/admin/users/{id}/reset-password", post(admin::reset_password))
        .route("/admin/users/{id}/delete", post(admin::delete_user))
        .route("/admin/users/{id}/restore", post(admin::restore_user))
        .route("/admin/users/{id}/activity-logs", get(admin::user_activity))
        .route("/admin/topics", get(admin::topics).post(admin::create_topic))
        .route("/admin/topics/export", get(admin::export_topics))
        .route("/admin/topics/{id}/update", post(admin::update_topic))
        .route("/admin/topics/{id}/delete", post(admin::delete_topic))
        .route("/admin/vocab", get(admin::vocab).post(admin::create_vocab))
        .route(
            "/admin/vocab/import",
            get(admin::import_form)
                .post(admin::import_csv)
                .layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        .route("/admin/vocab/{id}/update", post(admin::update_vocab))
        .route("/admin/vocab/{id}/approve", post(admin::approve_vocab))
        .route("/admin/vocab/{id}/reject", post(admin::reject_vocab))
        .route("/admin/vocab/{id}/delete", post(admin::delete_vocab))
        .route("/admin/reviews", get(admin::reviews))
        .route("/admin/reviews/{id}", post(admin::review))
        .route("/admin/activity-logs", get(admin::activity))
}

/// Every page, action and asset of the site.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(auth_routes::home))
        .route("/healthz", get(healthz))
        .route(ui::views::STYLESHEET_PATH, get(stylesheet))
        .route(
            "/login",
            get(auth_routes::login_page).post(auth_routes::login),
        )
        .route(
            "/register",
            get(auth_routes::register_page).post(auth_routes::register),
        )
        .route("/logout", post(auth_routes::logout))
        .merge(learner_routes())
        .merge(admin_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
