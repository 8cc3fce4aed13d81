//! Shared wiremock fixtures: one mock server plays both the signing service
//! and the vendor API.

#![allow(dead_code)]

use dramabox_scraper::config::AppConfig;
use dramabox_scraper::services::dramabox_service::DramaboxService;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "tok-1";
pub const DEVICE_ID: &str = "dev-1";
pub const ANDROID_ID: &str = "and-1";
pub const SIGNATURE: &str = "sig-abc";

pub fn mock_config(server: &MockServer) -> AppConfig {
    AppConfig {
        signer_base_url: server.uri(),
        vendor_base_url: server.uri(),
        request_timeout: Duration::from_secs(2),
        ..Default::default()
    }
}

pub fn token_envelope() -> Value {
    json!({
        "status": true,
        "data": { "sn": TOKEN, "device_id": DEVICE_ID, "android_id": ANDROID_ID }
    })
}

pub async fn mount_token(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/generate-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_sign(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/sign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn signature_envelope() -> Value {
    json!({ "status": true, "data": { "sn": SIGNATURE } })
}

/// A service with a live session whose every payload signs successfully.
pub async fn connected_service(server: &MockServer) -> DramaboxService {
    mount_token(server, token_envelope()).await;
    mount_sign(server, signature_envelope()).await;
    DramaboxService::connect(&mock_config(server)).await.unwrap()
}

/// `count` minimal book records with ids `1..=count`.
pub fn books(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| json!({ "bookId": i.to_string(), "bookName": format!("Drama {i}"), "tags": ["Romansa"] }))
        .collect()
}

pub fn chapters(first: usize, count: usize) -> Vec<Value> {
    (first..first + count)
        .map(|i| json!({ "chapterId": format!("c{i}"), "chapterIndex": i - 1, "chapterName": format!("EP {i}") }))
        .collect()
}
