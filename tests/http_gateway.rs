mod common;

use std::time::Duration;

use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use serde_json::{Value, json};
use url_shortener_client::domain::ports::ShortenerGateway;
use url_shortener_client::error::GatewayError;
use url_shortener_client::infrastructure::HttpGateway;

fn backend() -> Router {
    Router::new()
        .route(
            "/shorten",
            post(|Json(body): Json<Value>| async move {
                match body["url"].as_str() {
                    Some("bad") => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({ "detail": "Invalid URL" })),
                    ),
                    Some(_) => (StatusCode::OK, Json(json!("abc123"))),
                    None => (StatusCode::BAD_REQUEST, Json(json!({}))),
                }
            }),
        )
        .route(
            "/get-qr-code/{url}",
            get(|Path(url): Path<String>| async move {
                if url == "https://a.com/x?y=1" {
                    (
                        StatusCode::OK,
                        Json(json!({ "image_base64": "data:image/png;base64,YQ==" })),
                    )
                } else {
                    (StatusCode::OK, Json(json!({})))
                }
            }),
        )
        .route(
            "/stats",
            get(|| async {
                Json(json!([
                    { "short_code": "abc123", "original_url": "https://a.com", "click_count": 4, "created_at": "2024-01-15T10:30:00" },
                    { "shortCode": "def456", "originalUrl": "https://b.com", "clickCount": 1, "createdAt": "2024-01-16" }
                ]))
            }),
        )
        .route(
            "/stats/{code}",
            get(|Path(code): Path<String>| async move {
                Json(json!({
                    "short_code": code,
                    "original_url": "https://a.com",
                    "click_count": 2,
                    "recent_clicks": ["2024-01-15T10:30:00", "2024-01-15T11:00:00"]
                }))
            }),
        )
        .route(
            "/{code}",
            get(|Path(code): Path<String>| async move {
                match code.as_str() {
                    "abc123" => (StatusCode::OK, "\"a.com/landing\"".to_string()),
                    "empty" => (StatusCode::OK, "[]".to_string()),
                    _ => (StatusCode::NOT_FOUND, "Short URL not found".to_string()),
                }
            }),
        )
}

async fn gateway() -> HttpGateway {
    let base = common::spawn_backend(backend()).await;
    HttpGateway::new(&base, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_shorten_returns_code() {
    let gw = gateway().await;
    assert_eq!(gw.shorten("https://example.com").await.unwrap(), "abc123");
}

#[tokio::test]
async fn test_shorten_error_detail_is_extracted() {
    let gw = gateway().await;

    let err = gw.shorten("bad").await.unwrap_err();

    assert_eq!(
        err,
        GatewayError::Status {
            status: 422,
            detail: Some("Invalid URL".to_string())
        }
    );
    assert_eq!(err.user_message(), "Invalid URL");
}

#[tokio::test]
async fn test_resolve_shapes() {
    let gw = gateway().await;

    assert_eq!(gw.resolve("abc123").await.unwrap(), "a.com/landing");
    assert_eq!(gw.resolve("empty").await.unwrap(), "");

    let err = gw.resolve("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.detail(), Some("Short URL not found"));
}

#[tokio::test]
async fn test_qr_code_path_parameter_is_one_segment() {
    let gw = gateway().await;

    let payload = gw.qr_code("https://a.com/x?y=1").await.unwrap();
    assert_eq!(payload, "data:image/png;base64,YQ==");

    let err = gw.qr_code("https://other.com").await.unwrap_err();
    assert!(matches!(err, GatewayError::EmptyResult(_)));
}

#[tokio::test]
async fn test_stats_endpoints() {
    let gw = gateway().await;

    gw.stats_probe().await.unwrap();

    let stats = gw.stats_list().await.unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[1].short_code, "def456");
    assert_eq!(stats[1].click_count, 1);

    let detail = gw.stats_detail("abc123").await.unwrap();
    assert_eq!(detail.short_code, "abc123");
    assert_eq!(detail.recent_clicks.len(), 2);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gw = HttpGateway::new(&format!("http://{addr}"), Duration::from_secs(1)).unwrap();
    let err = gw.stats_probe().await.unwrap_err();

    assert!(matches!(err, GatewayError::Transport(_)));
}
