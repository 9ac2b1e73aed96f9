//! Integration tests for the Zoom OAuth and REST client.
//!
//! Each test runs a local axum server standing in for zoom.us and
//! api.zoom.us, so the real reqwest code paths are exercised.

use axum::{
    body::{to_bytes, Body},
    extract::{Path, Query, State},
    http::{HeaderMap, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use canvas_zoom::api::{self, AppState};
use canvas_zoom::config::AccessConfig;
use canvas_zoom::recordings::RecordingService;
use canvas_zoom::zoom::{ProviderCredentials, TokenProvider, ZoomApi, ZoomClient, ZoomError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

const VTT: &str = "WEBVTT\r\n\r\n1\r\n00:00:00.000 --> 00:00:02.000\r\nHello world";

struct MockZoom {
    token_requests: AtomicUsize,
    expires_in: u64,
    token_status: StatusCode,
}

impl MockZoom {
    fn new(expires_in: u64) -> Arc<Self> {
        Self::with_token_status(expires_in, StatusCode::OK)
    }

    fn with_token_status(expires_in: u64, token_status: StatusCode) -> Arc<Self> {
        Arc::new(Self {
            token_requests: AtomicUsize::new(0),
            expires_in,
            token_status,
        })
    }

    fn token_requests(&self) -> usize {
        self.token_requests.load(Ordering::SeqCst)
    }
}

async fn token(
    State(mock): State<Arc<MockZoom>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let n = mock.token_requests.fetch_add(1, Ordering::SeqCst) + 1;

    if form.get("grant_type").map(String::as_str) != Some("account_credentials") {
        return (StatusCode::UNPROCESSABLE_ENTITY, "unsupported grant").into_response();
    }

    if mock.token_status != StatusCode::OK {
        let body = r#"{"reason":"Invalid client_id or client_secret","error":"invalid_client"}"#;
        return (mock.token_status, body).into_response();
    }

    Json(json!({
        "access_token": format!("tok-{}", n),
        "token_type": "bearer",
        "expires_in": mock.expires_in,
        "scope": "recording:read:admin"
    }))
    .into_response()
}

async fn user_recordings(
    Path(user): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if user == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": 1001, "message": "User does not exist: missing" })),
        )
            .into_response();
    }

    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    Json(json!({
        "auth": auth,
        "content_type": content_type,
        "from": query.get("from"),
        "page_size": query.get("page_size"),
        "meetings": [{ "id": 1, "uuid": "u1", "topic": "Lecture" }]
    }))
    .into_response()
}

async fn transcript_file(headers: HeaderMap) -> Response {
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(auth) if auth.starts_with("Bearer tok-") => VTT.into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

/// Anything outside the routes above echoes the raw request target.
async fn echo_target(uri: Uri) -> Json<Value> {
    Json(json!({ "path": uri.path(), "query": uri.query() }))
}

async fn spawn(mock: Arc<MockZoom>) -> String {
    let router = Router::new()
        .route("/oauth/token", post(token))
        .route("/v2/users/:id/recordings", get(user_recordings))
        .route("/files/transcript.vtt", get(transcript_file))
        .fallback(echo_target)
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn credentials() -> ProviderCredentials {
    ProviderCredentials {
        account_id: "acct".to_string(),
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
    }
}

fn tokens(base: &str) -> Arc<TokenProvider> {
    Arc::new(TokenProvider::new(
        reqwest::Client::new(),
        format!("{}/oauth/token", base),
        Some(credentials()),
    ))
}

fn client(base: &str) -> ZoomClient {
    ZoomClient::new(reqwest::Client::new(), &format!("{}/v2/", base), tokens(base))
}

#[tokio::test]
async fn test_token_is_cached_while_valid() {
    let mock = MockZoom::new(3600);
    let base = spawn(mock.clone()).await;
    let provider = tokens(&base);

    let first = provider.access_token().await.unwrap();
    let second = provider.access_token().await.unwrap();

    assert_eq!(first, "tok-1");
    assert_eq!(second, "tok-1");
    assert_eq!(mock.token_requests(), 1);
}

#[tokio::test]
async fn test_expired_token_is_refreshed() {
    let mock = MockZoom::new(0);
    let base = spawn(mock.clone()).await;
    let provider = tokens(&base);

    assert_eq!(provider.access_token().await.unwrap(), "tok-1");
    assert_eq!(provider.access_token().await.unwrap(), "tok-2");
    assert_eq!(mock.token_requests(), 2);
}

#[tokio::test]
async fn test_oversized_expiry_does_not_overflow() {
    let mock = MockZoom::new(u64::MAX);
    let base = spawn(mock.clone()).await;
    let provider = tokens(&base);

    assert_eq!(provider.access_token().await.unwrap(), "tok-1");
    assert_eq!(provider.access_token().await.unwrap(), "tok-1");
    assert_eq!(mock.token_requests(), 1);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_exchange() {
    let mock = MockZoom::new(3600);
    let base = spawn(mock.clone()).await;
    let provider = tokens(&base);

    let (a, b, c) = tokio::join!(
        provider.access_token(),
        provider.access_token(),
        provider.access_token()
    );

    assert_eq!(a.unwrap(), "tok-1");
    assert_eq!(b.unwrap(), "tok-1");
    assert_eq!(c.unwrap(), "tok-1");
    assert_eq!(mock.token_requests(), 1);
}

#[tokio::test]
async fn test_bad_request_message_is_sanitized() {
    let mock = MockZoom::with_token_status(3600, StatusCode::BAD_REQUEST);
    let base = spawn(mock).await;

    let err = tokens(&base).access_token().await.unwrap_err();

    let ZoomError::Auth { status, message } = err else {
        panic!("expected auth error");
    };
    assert_eq!(status, 400);
    assert!(message.contains("check your Zoom credentials"));
    assert!(!message.contains("invalid_client"));
}

#[tokio::test]
async fn test_other_client_errors_are_auth_errors() {
    let mock = MockZoom::with_token_status(3600, StatusCode::UNAUTHORIZED);
    let base = spawn(mock).await;

    let err = tokens(&base).access_token().await.unwrap_err();
    assert!(matches!(err, ZoomError::Auth { status: 401, .. }));
}

#[tokio::test]
async fn test_server_errors_propagate_as_http() {
    let mock = MockZoom::with_token_status(3600, StatusCode::SERVICE_UNAVAILABLE);
    let base = spawn(mock).await;

    let err = tokens(&base).access_token().await.unwrap_err();
    assert!(matches!(err, ZoomError::Http { status: 503, .. }));
}

#[tokio::test]
async fn test_request_sends_bearer_and_query() {
    let mock = MockZoom::new(3600);
    let base = spawn(mock.clone()).await;
    let client = client(&base);

    let query = [
        ("page_size", "300".to_string()),
        ("from", "2024-01-01".to_string()),
    ];
    let value: Value = client
        .get("users/prof@example.edu/recordings", &query)
        .await
        .unwrap();

    assert_eq!(value["auth"], "Bearer tok-1");
    assert_eq!(value["content_type"], "application/json");
    assert_eq!(value["page_size"], "300");
    assert_eq!(value["from"], "2024-01-01");

    client.get("users/other/recordings", &[]).await.unwrap();
    assert_eq!(mock.token_requests(), 1);
}

#[tokio::test]
async fn test_http_errors_carry_status_and_body() {
    let mock = MockZoom::new(3600);
    let base = spawn(mock).await;

    let err = client(&base)
        .get("users/missing/recordings", &[])
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.provider_code(), Some(1001));
}

#[tokio::test]
async fn test_download_text_uses_bearer_token() {
    let mock = MockZoom::new(3600);
    let base = spawn(mock).await;

    let text = client(&base)
        .download_text(&format!("{}/files/transcript.vtt", base))
        .await
        .unwrap();

    assert_eq!(text, VTT);
    assert_eq!(canvas_zoom::vtt::parse(&text)[0].text, "Hello world");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let provider = Arc::new(TokenProvider::new(
        reqwest::Client::new(),
        "http://127.0.0.1:1/oauth/token",
        Some(credentials()),
    ));

    let err = provider.access_token().await.unwrap_err();
    assert!(matches!(err, ZoomError::Transport(_)));
}

#[tokio::test]
async fn test_ids_cannot_escape_their_path_segment() {
    let mock = MockZoom::new(3600);
    let base = spawn(mock).await;
    let state = AppState {
        service: RecordingService::new(Arc::new(client(&base))),
        shutdown: CancellationToken::new(),
    };
    let app = api::router(state, AccessConfig::default());

    let request = Request::builder()
        .uri("/meetings/..%2Fusers%2Fme%2Fsettings%3Fx%3D/recordings")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let upstream: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        upstream["path"],
        "/v2/meetings/..%2Fusers%2Fme%2Fsettings%3Fx%3D/recordings"
    );
    assert_eq!(upstream["query"], Value::Null);
}

#[tokio::test]
async fn test_meeting_uuid_with_slashes_is_double_encoded() {
    let mock = MockZoom::new(3600);
    let base = spawn(mock).await;
    let service = RecordingService::new(Arc::new(client(&base)));

    let upstream = service.get_meeting_recordings("/aB//c+d==").await.unwrap();
    assert_eq!(
        upstream["path"],
        "/v2/meetings/%252FaB%252F%252Fc%252Bd%253D%253D/recordings"
    );
}
