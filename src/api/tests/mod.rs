use super::*;
use crate::test_helpers::FakeSource;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;


/// Router over a fake source holding `records` artworks
fn test_app(records: u64) -> (Router, Arc<ArtworkTable>, Arc<FakeSource>) {
    test_app_with(Config::default(), FakeSource::with_records(records))
}

fn test_app_with(config: Config, source: FakeSource) -> (Router, Arc<ArtworkTable>, Arc<FakeSource>) {
    let source = Arc::new(source);
    let table = Arc::new(ArtworkTable::with_source(config, source.clone()).unwrap());
    let config = table.config().clone();
    (create_router(table.clone(), config), table, source)
}

/// Send a request with an optional JSON body and decode the JSON response
async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Post an urlencoded form, the way the browser page does
async fn post_form(app: &Router, uri: &str, form: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn get_html(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect has a location")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_api_server_spawns_and_shuts_down() {
    let mut config = Config::default();
    // Port 0 = OS assigns a free port
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let table = Arc::new(
        ArtworkTable::with_source(config, Arc::new(FakeSource::with_records(5))).unwrap(),
    );
    let config = table.config().clone();
    let shutdown = CancellationToken::new();

    let handle = tokio::spawn(serve_until_cancelled(table, config, shutdown.clone()));
    tokio::time::sleep(Duration::from_millis(100)).await;
    shutdown.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server stops after cancellation")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = Config::default();
    config.server.api.bind_address = listener.local_addr().unwrap();
    let table = Arc::new(
        ArtworkTable::with_source(config, Arc::new(FakeSource::with_records(5))).unwrap(),
    );
    let config = table.config().clone();

    let result = start_api_server(table, config).await;
    assert!(matches!(result, Err(crate::Error::Io(_))));
}

#[tokio::test]
async fn test_spawn_api_server_method() {
    let mut config = Config::default();
    config.server.api.bind_address = "127.0.0.1:0".parse().unwrap();
    let table = ArtworkTable::with_source(config, Arc::new(FakeSource::with_records(5))).unwrap();

    let handle = table.spawn_api_server();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!handle.is_finished(), "server keeps running");
    handle.abort();
}

#[tokio::test]
async fn test_cors_enabled() {
    let (app, _table, _source) = test_app(5);

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let mut config = Config::default();
    config.server.api.cors_enabled = false;
    let (app, _table, _source) = test_app_with(config, FakeSource::with_records(5));

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_cors_specific_origin() {
    let mut config = Config::default();
    config.server.api.cors_origins = vec!["http://allowed.example".into()];
    let (app, _table, _source) = test_app_with(config, FakeSource::with_records(5));

    let request = Request::builder()
        .uri("/api/v1/health")
        .header("Origin", "http://allowed.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://allowed.example"
    );
}

#[tokio::test]
async fn test_swagger_ui_toggle() {
    let (app, _table, _source) = test_app(5);
    let (status, _) = get_html(&app, "/swagger-ui/").await;
    assert_ne!(status, StatusCode::NOT_FOUND);
    let (status, _) = get_html(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);

    let mut config = Config::default();
    config.server.api.swagger_ui = false;
    let (app, _table, _source) = test_app_with(config, FakeSource::with_records(5));
    let (status, _) = get_html(&app, "/swagger-ui/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
