//! In-process stand-in for the news search API, shared by the async tests.

use axum::Router;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use serde_json::json;
use std::collections::HashMap;
use tokio::task::JoinHandle;

use crate::api::API_KEY_HEADER;

pub const TEST_TOKEN: &str = "test-token";

pub struct TestServer {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn ok(body: serde_json::Value) -> (StatusCode, String) {
    (StatusCode::OK, body.to_string())
}

async fn echo(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> (StatusCode, String) {
    let key = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
    if key != Some(TEST_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            json!({"status": "error", "code": "apiKeyInvalid"}).to_string(),
        );
    }
    let (Some(q), Some(from)) = (params.get("q"), params.get("from")) else {
        return (StatusCode::BAD_REQUEST, "missing q or from".to_string());
    };
    ok(json!({
        "status": "ok",
        "articles": [{
            "author": "Echo",
            "title": format!("{q} since {from}"),
            "description": "echoed",
            "url": "https://news.example/echo"
        }]
    }))
}

async fn two() -> (StatusCode, String) {
    ok(json!({
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "author": "Zed",
                "title": "Zebra",
                "description": "Stripes spotted",
                "url": "https://news.example/zebra"
            },
            {
                "author": null,
                "title": "Apple",
                "description": null,
                "url": "https://news.example/apple"
            }
        ]
    }))
}

async fn malformed() -> (StatusCode, String) {
    ok(json!({
        "articles": [
            {"author": "A", "title": "Fine", "description": "ok", "url": "https://news.example/fine"},
            {"author": "B", "description": "no title", "url": "https://news.example/broken"}
        ]
    }))
}

async fn fail() -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded".to_string())
}

async fn empty() -> (StatusCode, String) {
    ok(json!({"status": "ok", "totalResults": 0, "articles": []}))
}

async fn no_articles() -> (StatusCode, String) {
    ok(json!({"status": "ok"}))
}

async fn garbage() -> (StatusCode, String) {
    (StatusCode::OK, "<html>definitely not json</html>".to_string())
}

/// Bind on an ephemeral port and serve the fixture routes until dropped.
pub async fn spawn_news_api() -> TestServer {
    let app = Router::new()
        .route("/echo", get(echo))
        .route("/two", get(two))
        .route("/malformed", get(malformed))
        .route("/fail", get(fail))
        .route("/empty", get(empty))
        .route("/no-articles", get(no_articles))
        .route("/garbage", get(garbage));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let address = listener.local_addr().expect("local addr should exist");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        handle,
    }
}
