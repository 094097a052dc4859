//! Integration tests for the ChromaEuclid Web API.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use std::time::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;

use chromaeuclid::config::Config;
use chromaeuclid::web::{create_router, AppState};

const UNSET_KEY_VAR: &str = "CHROMAEUCLID_TEST_UNSET_KEY_VAR";

/// Config with AI disabled regardless of the environment.
fn disabled_config() -> Config {
    let mut config = Config::new();
    config.ai.api_key = None;
    config.ai.api_key_env = UNSET_KEY_VAR.to_string();
    config
}

/// Config with AI pointed at a mock server.
fn enabled_config(endpoint: &str) -> Config {
    let mut config = disabled_config();
    config.ai.api_key = Some("test-key".to_string());
    config.ai.endpoint = endpoint.to_string();
    config
}

fn create_app(config: Config) -> (AppState, axum::Router) {
    let state = AppState::new(config).expect("Failed to create app state");
    let app = create_router(state.clone());
    (state, app)
}

/// Helper to send a request and get the status and raw body.
async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>, Option<String>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec(), content_type)
}

/// Helper to make a GET request and get the response body as JSON.
async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let (status, body, _) = send(app, "GET", uri, None).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

/// Helper to make a request with a JSON body.
async fn send_json(app: &axum::Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, body, _) = send(app, method, uri, Some(body)).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn gemini_body(suggestion: &Value) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": suggestion.to_string() }] }
        }]
    })
    .to_string()
}

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

// ============================================================================
// Health and Harmonies
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (_, app) = create_app(disabled_config());
    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_list_harmonies() {
    let (_, app) = create_app(disabled_config());
    let (status, json) = get_json(&app, "/api/harmonies").await;
    assert_eq!(status, StatusCode::OK);

    let rules = json.as_array().unwrap();
    assert_eq!(rules.len(), 8);
    let hexagonal = rules.iter().find(|r| r["id"] == "hexagonal").unwrap();
    assert_eq!(hexagonal["colors"], 6);
    assert!(rules.iter().any(|r| r["name"] == "Split Complementary"));
}

// ============================================================================
// Palette and Convert
// ============================================================================

#[tokio::test]
async fn test_palette_defaults_from_config() {
    let (_, app) = create_app(disabled_config());
    let (status, json) = get_json(&app, "/api/palette").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["harmony"], "complementary");
    assert_eq!(json["colors"].as_array().unwrap().len(), 5);
    assert_eq!(json["colors"][0]["hex"], "#2680d9");
    assert_eq!(json["colors"][1]["hex"], "#d98026");
}

#[tokio::test]
async fn test_palette_from_hex_and_rule() {
    let (_, app) = create_app(disabled_config());
    let (status, json) = get_json(&app, "/api/palette?hex=%23ff0000&harmony=hexagonal").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["colors"].as_array().unwrap().len(), 6);
    assert_eq!(json["colors"][0]["hex"], "#ff0000");
}

#[tokio::test]
async fn test_palette_from_hsl() {
    let (_, app) = create_app(disabled_config());
    let (status, json) = get_json(&app, "/api/palette?h=30&s=70&l=50&harmony=monochromatic").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["colors"][0]["hex"], "#d98026");
}

#[tokio::test]
async fn test_palette_unknown_rule_degrades() {
    let (_, app) = create_app(disabled_config());
    let (status, json) = get_json(&app, "/api/palette?harmony=pentagonal").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["harmony"].is_null());
    assert_eq!(json["colors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_palette_rejects_bad_color() {
    let (_, app) = create_app(disabled_config());

    let (status, json) = get_json(&app, "/api/palette?hex=%23ff00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());

    let (status, _) = get_json(&app, "/api/palette?h=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&app, "/api/palette?h=10&s=200&l=50").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_both_directions() {
    let (_, app) = create_app(disabled_config());

    let (status, json) = get_json(&app, "/api/convert?hex=%23ff0000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hsl"], json!({ "h": 0.0, "s": 100.0, "l": 50.0 }));
    assert_eq!(json["rgb"], json!({ "r": 255, "g": 0, "b": 0 }));

    let (status, json) = get_json(&app, "/api/convert?h=210&s=70&l=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hex"], "#2680d9");

    let (status, _) = get_json(&app, "/api/convert").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&app, "/api/convert?hex=blue").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Tiles and Canvas
// ============================================================================

#[tokio::test]
async fn test_tiles_seeded_and_partitioned() {
    let (_, app) = create_app(disabled_config());
    let (status, first) = get_json(&app, "/api/tiles?colors=3&seed=42").await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = get_json(&app, "/api/tiles?colors=3&seed=42").await;
    assert_eq!(first, second);

    assert_eq!(first["seed"], 42);
    assert_eq!(first["depth"], 5);
    let tiles = first["tiles"].as_array().unwrap();
    let area: f64 = tiles
        .iter()
        .map(|t| t["width"].as_f64().unwrap() * t["height"].as_f64().unwrap())
        .sum();
    assert!((area - 10_000.0).abs() < 1e-6);
    assert!(tiles.iter().all(|t| t["colorIndex"].as_u64().unwrap() < 3));
}

#[tokio::test]
async fn test_tiles_zero_colors_is_empty() {
    let (_, app) = create_app(disabled_config());
    let (status, json) = get_json(&app, "/api/tiles?colors=0&seed=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["tiles"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_tiles_rejects_bad_depth() {
    let (_, app) = create_app(disabled_config());
    let (status, _) = get_json(&app, "/api/tiles?depth=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get_json(&app, "/api/tiles?depth=13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_canvas_svg_matches_canvas_json() {
    let (_, app) = create_app(disabled_config());
    let (status, canvas) = get_json(&app, "/api/canvas?harmony=square&seed=9").await;
    assert_eq!(status, StatusCode::OK);
    let tile_count = canvas["tiles"].as_array().unwrap().len();
    assert_eq!(canvas["palette"]["colors"].as_array().unwrap().len(), 5);

    let (status, body, content_type) =
        send(&app, "GET", "/api/canvas.svg?harmony=square&seed=9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    let svg = String::from_utf8(body).unwrap();
    assert!(svg.contains(r#"viewBox="0 0 100 100""#));
    assert_eq!(svg.matches("<rect").count(), tile_count);
}

// ============================================================================
// Explorer
// ============================================================================

#[tokio::test]
async fn test_explorer_initial_state_and_notice() {
    let (_, app) = create_app(disabled_config());

    let (status, json) = get_json(&app, "/api/explorer").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["baseHex"], "#2680d9");
    assert_eq!(json["harmony"], "complementary");
    assert_eq!(json["seed"], 0);
    assert_eq!(json["aiEnabled"], false);
    assert_eq!(json["status"], "5 colors distributed proportionally");
    assert!(json["notice"].is_string());

    // The notice is only delivered once
    let (_, json) = get_json(&app, "/api/explorer").await;
    assert!(json.get("notice").is_none());
}

#[tokio::test]
async fn test_explorer_update() {
    let (_, app) = create_app(disabled_config());

    let (status, json) =
        send_json(&app, "PUT", "/api/explorer", json!({ "harmony": "hexagonal" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["colors"].as_array().unwrap().len(), 6);
    assert_eq!(json["status"], "6 colors distributed proportionally");

    let (status, json) =
        send_json(&app, "PUT", "/api/explorer", json!({ "base": { "h": 0, "s": 100, "l": 50 } })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["baseHex"], "#ff0000");
    assert_eq!(json["harmony"], "hexagonal");

    let (status, json) =
        send_json(&app, "PUT", "/api/explorer", json!({ "baseHex": "#00ff00", "seed": 5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["baseHex"], "#00ff00");
    assert_eq!(json["seed"], 5);
}

#[tokio::test]
async fn test_explorer_update_rejects_bad_input_atomically() {
    let (_, app) = create_app(disabled_config());

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/explorer",
        json!({ "baseHex": "#123456", "harmony": "pentagonal" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send_json(&app, "PUT", "/api/explorer", json!({ "base": { "h": 400, "s": 1, "l": 1 } })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) =
        send_json(&app, "PUT", "/api/explorer", json!({ "baseHex": "#+f+f+f" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = get_json(&app, "/api/explorer").await;
    assert_eq!(json["baseHex"], "#2680d9");
    assert_eq!(json["harmony"], "complementary");
}

#[tokio::test]
async fn test_explorer_shuffle() {
    let (_, app) = create_app(disabled_config());
    let (_, before) = get_json(&app, "/api/explorer").await;

    let (status, after) = send_json(&app, "POST", "/api/explorer/shuffle", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["seed"], 1);
    assert_eq!(before["colors"], after["colors"]);
}

// ============================================================================
// AI Suggestions
// ============================================================================

#[tokio::test]
async fn test_suggest_without_key_is_unavailable() {
    let (_, app) = create_app(disabled_config());
    let (status, json) =
        send_json(&app, "POST", "/api/explorer/suggest", json!({ "mood": "calm sea" })).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_suggest_rejects_empty_mood() {
    let (_, app) = create_app(enabled_config("http://127.0.0.1:9"));
    let (status, _) =
        send_json(&app, "POST", "/api/explorer/suggest", json!({ "mood": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = get_json(&app, "/api/explorer").await;
    assert_eq!(json["loading"], false);
}

#[tokio::test]
async fn test_suggest_rejects_while_in_flight() {
    let (state, app) = create_app(enabled_config("http://127.0.0.1:9"));
    state.explorer().begin_suggestion("first").unwrap();

    let (status, _) =
        send_json(&app, "POST", "/api/explorer/suggest", json!({ "mood": "second" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, json) = get_json(&app, "/api/explorer").await;
    assert_eq!(json["loading"], true);
    assert_eq!(json["status"], "Consulting the AI…");
}

#[tokio::test]
async fn test_suggest_applies_palette() {
    let mut server = mockito::Server::new_async().await;
    let suggestion = json!({
        "baseHex": "#ff0000",
        "harmony": "triadic",
        "description": "Bold and warm"
    });
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body(&suggestion))
        .create_async()
        .await;

    let (_, app) = create_app(enabled_config(&server.url()));
    let (status, json) =
        send_json(&app, "POST", "/api/explorer/suggest", json!({ "mood": "fire" })).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["baseHex"], "#ff0000");
    assert_eq!(json["harmony"], "triadic");
    assert_eq!(json["message"], "Bold and warm");
    assert_eq!(json["status"], "Bold and warm");
    assert_eq!(json["loading"], false);
}

#[tokio::test]
async fn test_suggest_upstream_failure_keeps_palette() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(500)
        .with_body(r#"{"error":{"code":500,"message":"backend exploded"}}"#)
        .create_async()
        .await;

    let (_, app) = create_app(enabled_config(&server.url()));
    let (status, json) =
        send_json(&app, "POST", "/api/explorer/suggest", json!({ "mood": "storm" })).await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        json["error"],
        "Could not generate a palette. Try another description."
    );
    assert!(json["details"].as_str().unwrap().contains("backend exploded"));

    let (_, json) = get_json(&app, "/api/explorer").await;
    assert_eq!(json["baseHex"], "#2680d9");
    assert_eq!(json["harmony"], "complementary");
    assert_eq!(json["loading"], false);
    assert_eq!(
        json["status"],
        "Could not generate a palette. Try another description."
    );
}

#[tokio::test]
async fn test_suggest_malformed_reply_is_bad_gateway() {
    let mut server = mockito::Server::new_async().await;
    let suggestion = json!({
        "baseHex": "#ff0000",
        "harmony": "pentagonal",
        "description": "Nope"
    });
    let _mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_body(gemini_body(&suggestion))
        .create_async()
        .await;

    let (_, app) = create_app(enabled_config(&server.url()));
    let (status, _) =
        send_json(&app, "POST", "/api/explorer/suggest", json!({ "mood": "odd" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_dropped_suggest_request_releases_lock() {
    // Upstream that accepts connections and never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    let stalled = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let (state, app) = create_app(enabled_config(&endpoint));

    let first = tokio::time::timeout(
        Duration::from_millis(200),
        send_json(&app, "POST", "/api/explorer/suggest", json!({ "mood": "dusk" })),
    )
    .await;
    assert!(first.is_err(), "request should still be waiting on upstream");

    let (_, json) = get_json(&app, "/api/explorer").await;
    assert_eq!(json["loading"], false);
    assert_eq!(json["baseHex"], "#2680d9");

    // A new request is accepted rather than rejected as in flight
    let second = tokio::time::timeout(
        Duration::from_millis(200),
        send_json(&app, "POST", "/api/explorer/suggest", json!({ "mood": "dawn" })),
    )
    .await;
    assert!(second.is_err(), "second request should reach upstream, got {second:?}");
    assert!(!state.explorer().is_loading());

    stalled.abort();
}

// ============================================================================
// Static Files
// ============================================================================

#[tokio::test]
async fn test_index_served_at_root() {
    let (_, app) = create_app(disabled_config());
    let (status, body, content_type) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(String::from_utf8(body).unwrap().contains("ChromaEuclid"));
}

#[tokio::test]
async fn test_unknown_api_route_is_not_found() {
    let (_, app) = create_app(disabled_config());
    let (status, _, _) = send(&app, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, "GET", "/missing.png", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
