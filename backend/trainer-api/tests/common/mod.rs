#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use fireground_trainer::{config::Config, create_router, services::AppState};
use std::sync::Arc;
use tower::ServiceExt;

pub const METRICS_CREDENTIALS: &str = "metrics:test-password";

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        session_secret: "integration-test-secret".to_string(),
        cookie_secure: false,
        metrics_auth: METRICS_CREDENTIALS.to_string(),
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
        otlp_endpoint: None,
    }
}

pub fn create_test_app() -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let app_state =
        Arc::new(AppState::new(test_config()).expect("Failed to initialize test app state"));

    create_router(app_state)
}

/// Sends a request, attaching `cookie` when given.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    form: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// `name=value` pair of the session cookie set by `response`, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("fg_session="))
        .and_then(|v| v.split(';').next())
        .map(|pair| pair.to_string())
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Reads the 0-based scenario index out of the "Scenario N of M" banner.
pub fn scenario_index(page: &str) -> usize {
    let marker = r#"class="scenario-position">Scenario "#;
    let start = page.find(marker).expect("missing position banner") + marker.len();
    let rest = &page[start..];
    let end = rest.find(' ').unwrap();
    rest[..end].parse::<usize>().unwrap() - 1
}
