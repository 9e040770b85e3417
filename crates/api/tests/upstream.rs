//! Client behaviour against a fake upstream API served on an ephemeral port.

use api::{
    AnswerSubmission, ApiClient, ApiConfig, ApiError, AuthedApi, Credentials, LoginRequest,
    NETWORK_ERROR_MESSAGE, PracticeApi, Verdict,
};
use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use serde_json::{Value, json};
use std::collections::HashMap;
use vocab_core::model::{ListQuery, PageRequest};

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some("Bearer tok")
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({"accessToken": "tok", "user": {"id": 7, "role": "ADMIN"}})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
    }
}

async fn me(headers: HeaderMap) -> impl IntoResponse {
    if authorized(&headers) {
        (StatusCode::OK, Json(json!({"id": "u1", "email": "a@b.c"})))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"})))
    }
}

async fn vocab(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "content": [{"id": "v1", "term": params.get("query"), "language": params.get("size")}],
        "totalElements": 1,
        "totalPages": 1,
        "number": 0,
        "size": 20
    }))
}

async fn answer() -> Json<Value> {
    Json(json!({"itemStatus": "WRONG", "feedback": "Nope", "correctAnswer": "cat"}))
}

async fn export() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"topics-export.csv\"",
            ),
        ],
        "name,slug\nAnimals,animals\n",
    )
}

async fn import(headers: HeaderMap) -> impl IntoResponse {
    let multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));
    if !multipart {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "expected a file"})));
    }
    (
        StatusCode::OK,
        Json(json!({"totalRows": 2, "importedRows": 1, "failedRows": 1,
                    "errors": [{"row": 3, "message": "missing definition"}]})),
    )
}

fn upstream() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/me", get(me))
        .route("/vocab", get(vocab))
        .route("/me/sessions/{id}/items/{item}/answer", post(answer))
        .route(
            "/me/sessions/{id}/complete",
            post(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/admin/topics/{id}",
            delete(|| async { (StatusCode::CONFLICT, Json(json!({"error": "Topic in use"}))) }),
        )
        .route(
            "/admin/vocab/{id}/{verdict}",
            patch(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
        )
        .route("/admin/topics/export", get(export))
        .route("/admin/vocab/import", post(import))
}

async fn client() -> ApiClient {
    let base = spawn(upstream()).await;
    ApiClient::new(&ApiConfig::new(&base).unwrap()).unwrap()
}

fn signed_in(client: &ApiClient) -> AuthedApi {
    client.authed(Credentials::new("tok", None))
}

#[tokio::test]
async fn login_returns_credentials_and_role() {
    let client = client().await;
    let response = client
        .login(&LoginRequest {
            email: "a@b.c".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(response.credentials().unwrap().authorization(), "Bearer tok");
    assert!(response.is_admin());

    let err = client
        .login(&LoginRequest {
            email: "a@b.c".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Invalid credentials");
}

#[tokio::test]
async fn reads_send_the_bearer_token() {
    let client = client().await;
    let me = signed_in(&client).me().await.unwrap();
    assert_eq!(me.email.as_deref(), Some("a@b.c"));

    let err = client
        .authed(Credentials::new("other", None))
        .me()
        .await
        .unwrap_err();
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn list_queries_are_encoded() {
    let client = client().await;
    let query = ListQuery::new(PageRequest::new(0, 20)).filter("query", Some("ice cream"));
    let page = signed_in(&client).vocab(&query).await.unwrap();
    assert_eq!(page.content[0].term(), "ice cream");
    assert_eq!(page.content[0].language.as_deref(), Some("20"));
}

#[tokio::test]
async fn answer_result_is_normalised() {
    let client = client().await;
    let result = signed_in(&client)
        .submit_answer(&"s1".into(), &"i1".into(), &AnswerSubmission::new("dog", -5))
        .await
        .unwrap();
    assert_eq!(result.status.as_deref(), Some("WRONG"));
    assert_eq!(result.message.as_deref(), Some("Nope"));
    assert_eq!(result.expected.as_deref(), Some("cat"));
}

#[tokio::test]
async fn no_content_resolves_to_none() {
    let client = client().await;
    let session = signed_in(&client)
        .complete_session(&"s1".into())
        .await
        .unwrap();
    assert!(session.is_none());
}

#[tokio::test]
async fn mutation_errors_prefer_server_text_then_fallback() {
    let client = client().await;
    let api = signed_in(&client);

    let err = api.delete_topic(&"t1".into()).await.unwrap_err();
    assert_eq!(err.message(), "Topic in use");

    let err = api
        .moderate_vocab(&"v1".into(), Verdict::Approve)
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Could not update the word.");
}

#[tokio::test]
async fn export_keeps_file_name() {
    let client = client().await;
    let file = signed_in(&client)
        .export_topics(&ListQuery::default())
        .await
        .unwrap();
    assert_eq!(file.file_name, "topics-export.csv");
    assert!(String::from_utf8(file.bytes).unwrap().contains("Animals"));
}

#[tokio::test]
async fn import_uploads_multipart() {
    let client = client().await;
    let result = signed_in(&client)
        .import_vocab_csv("words.csv", b"term,definition,language\ncat,pet,en\n".to_vec())
        .await
        .unwrap();
    assert_eq!(result.imported_rows, 1);
    assert_eq!(result.errors[0].message.as_deref(), Some("missing definition"));
}

#[tokio::test]
async fn unreachable_api_reports_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&ApiConfig::new(&format!("http://{addr}")).unwrap()).unwrap();
    let err = signed_in(&client).me().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
}
