//! Browser routes driven through `oneshot` against a fake upstream API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use app::{AppConfig, AppState, create_router};
use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

type Answers = Arc<Mutex<Vec<Value>>>;

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    match body["password"].as_str() {
        Some("admin-pass") => (
            StatusCode::OK,
            Json(json!({"accessToken": "admin", "tokenType": "Bearer", "user": {"id": 1, "role": "ADMIN"}})),
        ),
        Some("learner-pass") => (
            StatusCode::OK,
            Json(json!({"accessToken": "learner", "user": {"id": 2, "role": "USER"}})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        ),
    }
}

async fn me(headers: HeaderMap) -> impl IntoResponse {
    match bearer(&headers).as_deref() {
        Some("admin") => (
            StatusCode::OK,
            Json(json!({"id": 1, "displayName": "Ada", "role": "ADMIN"})),
        ),
        Some("learner") => (
            StatusCode::OK,
            Json(json!({"id": 2, "displayName": "Lin", "role": "USER"})),
        ),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"}))),
    }
}

async fn session(Path(id): Path<String>) -> Json<Value> {
    Json(json!({
        "id": id,
        "status": "ACTIVE",
        "items": [
            {
                "id": "i1",
                "questionType": "MULTIPLE_CHOICE",
                "questionPayload": {"question": "Which one purrs?", "options": ["cat", "dog"]},
                "status": "PENDING"
            },
            {
                "id": "i2",
                "questionType": "TRUE_FALSE",
                "questionPayload": {"question": "Dogs bark."},
                "status": "PENDING"
            }
        ]
    }))
}

async fn answer(
    State(answers): State<Answers>,
    Path((_, item)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    answers
        .lock()
        .unwrap()
        .push(json!({"item": item, "answer": body["answer"]}));
    Json(json!({"itemStatus": "CORRECT"}))
}

async fn empty_page() -> Json<Value> {
    Json(json!({"content": [], "totalElements": 0, "totalPages": 0, "number": 0, "size": 20}))
}

async fn upstream(answers: Answers) -> String {
    let router = Router::new()
        .route("/auth/login", post(login))
        .route("/me", get(me))
        .route("/me/vocab", get(empty_page))
        .route("/me/sessions/{id}", get(session))
        .route("/me/sessions/{id}/items/{item}/answer", post(answer))
        .with_state(answers);
    spawn(router).await
}

fn app(base_url: &str) -> Router {
    let config = AppConfig {
        api_base_url: base_url.to_string(),
        bind: "127.0.0.1:0".parse().unwrap(),
        secure_cookies: false,
        api_timeout: Duration::from_secs(5),
    };
    create_router(AppState::new(&config).unwrap())
}

fn get_as(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut request = Request::get(uri);
    if let Some(token) = token {
        request = request.header(header::COOKIE, format!("accessToken={token}; tokenType=Bearer"));
    }
    request.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut request = Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        request = request.header(header::COOKIE, format!("accessToken={token}; tokenType=Bearer"));
    }
    request.body(Body::from(body.to_string())).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn healthz_and_stylesheet_need_no_upstream() {
    let app = app("http://127.0.0.1:9");

    let response = app.clone().oneshot(get_as("/healthz", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");

    let response = app.oneshot(get_as("/assets/app.css", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );
}

#[tokio::test]
async fn anonymous_visitors_are_sent_to_login() {
    let app = app("http://127.0.0.1:9");

    for path in ["/", "/dashboard", "/admin/users"] {
        let response = app.clone().oneshot(get_as(path, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), "/login", "{path}");
    }

    let response = app.oneshot(get_as("/login", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("action=\"/login\""));
}

#[tokio::test]
async fn login_stores_the_token_and_routes_by_role() {
    let base = upstream(Answers::default()).await;
    let app = app(&base);

    let response = app
        .clone()
        .oneshot(post_form("/login", None, "email=ada%40example.com&password=admin-pass"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");
    let cookies: Vec<&str> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    assert!(cookies.iter().any(|cookie| cookie.starts_with("accessToken=admin")
        && cookie.contains("HttpOnly")));

    let response = app
        .clone()
        .oneshot(post_form("/login", None, "email=lin%40example.com&password=learner-pass"))
        .await
        .unwrap();
    assert_eq!(location(&response), "/dashboard");

    let response = app
        .oneshot(post_form("/login", None, "email=lin%40example.com&password=nope"))
        .await
        .unwrap();
    assert_eq!(
        location(&response),
        "/login?email=lin%40example.com&error=Invalid%20credentials"
    );
}

#[tokio::test]
async fn admin_pages_are_guarded_by_role() {
    let base = upstream(Answers::default()).await;
    let app = app(&base);

    let response = app
        .clone()
        .oneshot(get_as("/admin", Some("learner")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let response = app
        .oneshot(get_as("/dashboard", Some("expired")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login?error="));
}

#[tokio::test]
async fn admin_overview_renders_sections_that_failed_inline() {
    // Only /me is served; every count request fails with 404.
    let base = upstream(Answers::default()).await;
    let response = app(&base)
        .oneshot(get_as("/admin", Some("admin")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("stat-value--error"));
    assert!(html.contains("Could not load activity logs."));
}

#[tokio::test]
async fn practice_answers_are_sent_and_the_runner_advances() {
    let answers = Answers::default();
    let base = upstream(Arc::clone(&answers)).await;
    let app = app(&base);

    let response = app
        .clone()
        .oneshot(get_as("/dashboard/practice/s1", Some("learner")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let remembered = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|cookie| cookie.starts_with("session_history="));
    assert!(remembered);
    assert!(body_text(response).await.contains("Which one purrs?"));

    let response = app
        .clone()
        .oneshot(post_form(
            "/dashboard/practice/s1/answer",
            Some("learner"),
            "itemId=i1&answer=cat",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard/practice/s1");
    assert_eq!(
        answers.lock().unwrap().clone(),
        vec![json!({"item": "i1", "answer": "cat"})]
    );

    let response = app
        .oneshot(get_as("/dashboard/practice/s1", Some("learner")))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("Dogs bark."));
}

#[tokio::test]
async fn empty_answers_never_reach_the_api() {
    let answers = Answers::default();
    let base = upstream(Arc::clone(&answers)).await;
    let app = app(&base);

    let response = app
        .clone()
        .oneshot(post_form(
            "/dashboard/practice/s2/answer",
            Some("learner"),
            "itemId=i1&answer=",
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/dashboard/practice/s2");
    assert!(answers.lock().unwrap().is_empty());

    let response = app
        .oneshot(get_as("/dashboard/practice/s2", Some("learner")))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("Enter or choose an answer first."));
}
