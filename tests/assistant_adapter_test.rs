//! The assistant adapter: prompt assembly over a read-only snapshot, the
//! Gemini-style wire call, and the fixed busy fallback.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zenith_wms::config::AssistantConfig;
use zenith_wms::seed;
use zenith_wms::services::{AssistantService, GeminiClient, FALLBACK_MESSAGE};

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(AssistantConfig {
        endpoint: server.uri(),
        model: "gemini-3-flash-preview".into(),
        api_key: "test-key".into(),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn returns_model_text_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Ergonomic Chair 快沒了，只剩 8 件。" }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = seed::demo_store().await;
    let assistant = AssistantService::new(store, Arc::new(client_for(&server)));

    let reply = assistant.inventory_insights("哪些東西快沒了？").await;
    assert_eq!(reply, "Ergonomic Chair 快沒了，只剩 8 件。");
}

#[tokio::test]
async fn server_error_collapses_to_the_busy_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = seed::demo_store().await;
    let items_before = store.items().await;
    let assistant = AssistantService::new(store.clone(), Arc::new(client_for(&server)));

    let reply = assistant.inventory_insights("分析一下").await;
    assert_eq!(reply, FALLBACK_MESSAGE);
    // The adapter never mutates core state.
    assert_eq!(store.items().await, items_before);
}

#[tokio::test]
async fn malformed_payload_collapses_to_the_busy_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let store = seed::demo_store().await;
    let assistant = AssistantService::new(store, Arc::new(client_for(&server)));

    let reply = assistant.inventory_insights("你好").await;
    assert_eq!(reply, FALLBACK_MESSAGE);
}
