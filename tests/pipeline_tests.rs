mod common;

use common::*;
use dramabox_scraper::services::dramabox_service::{
    DramaboxService, RequestError, CLASSIFY_PATH, RANK_PATH, RESERVE_BOOK_PATH,
    SEARCH_SUGGEST_PATH, THEATER_PATH,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_vendor(server: &MockServer, vendor_path: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(vendor_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ── Signing comes first ─────────────────────────────────────────

#[tokio::test]
async fn signature_failure_means_zero_vendor_calls() {
    let server = MockServer::start().await;
    mount_token(&server, token_envelope()).await;
    mount_sign(&server, json!({ "status": false })).await;
    Mock::given(method("POST"))
        .and(path(SEARCH_SUGGEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "suggestList": [] } })))
        .expect(0)
        .mount(&server)
        .await;

    let service = DramaboxService::connect(&mock_config(&server)).await.unwrap();
    let result = service.call(SEARCH_SUGGEST_PATH, &json!({ "keyword": "x" })).await;

    let err = result.unwrap_err();
    assert!(matches!(err, RequestError::SignatureFailed(_)));
    assert_eq!(err.to_string(), "Signature Failed");
}

#[tokio::test]
async fn sign_request_precedes_the_vendor_request() {
    let server = MockServer::start().await;
    let service = connected_service(&server).await;
    mount_vendor(&server, RANK_PATH, json!({ "data": { "rankList": [], "rankTypeVoList": [] } })).await;

    service.call(RANK_PATH, &json!({ "rankType": 2 })).await.unwrap();

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(paths, vec!["/generate-token", "/sign", RANK_PATH]);
}

// ── Vendor headers ──────────────────────────────────────────────

#[tokio::test]
async fn vendor_call_carries_identity_session_and_signature() {
    let server = MockServer::start().await;
    let service = connected_service(&server).await;

    Mock::given(method("POST"))
        .and(path(RESERVE_BOOK_PATH))
        .and(header("tn", "Bearer tok-1"))
        .and(header("sn", SIGNATURE))
        .and(header("device-id", DEVICE_ID))
        .and(header("android-id", ANDROID_ID))
        .and(header("package-name", "com.storymatrix.drama"))
        .and(header("user-agent", "okhttp/4.10.0"))
        .and(header("time-zone", "+0700"))
        .and(header_regex(
            "local-time",
            r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3} \+0700$",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "reserveBookList": books(2) }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let books = service.coming_soon().await.unwrap();
    assert_eq!(books.len(), 2);
}

// ── Empty data never becomes Ok ─────────────────────────────────

#[tokio::test]
async fn http_success_without_data_is_empty_data() {
    for body in [json!({}), json!({ "data": null }), json!({ "data": {} }), json!({ "data": [] })] {
        let server = MockServer::start().await;
        let service = connected_service(&server).await;
        mount_vendor(&server, THEATER_PATH, body).await;

        let result = service.call(THEATER_PATH, &json!({ "pageNo": 1 })).await;
        assert!(matches!(result, Err(RequestError::EmptyData)));
    }
}

#[tokio::test]
async fn non_empty_data_is_returned_as_is() {
    let server = MockServer::start().await;
    let service = connected_service(&server).await;
    mount_vendor(&server, SEARCH_SUGGEST_PATH, json!({ "data": { "suggestList": books(1) } })).await;

    let data = service
        .call(SEARCH_SUGGEST_PATH, &json!({ "keyword": "ceo" }))
        .await
        .unwrap();
    assert_eq!(data["suggestList"][0]["bookId"], "1");
}

// ── Transport and shape failures ────────────────────────────────

#[tokio::test]
async fn slow_vendor_times_out_as_transport_error() {
    let server = MockServer::start().await;
    mount_token(&server, token_envelope()).await;
    mount_sign(&server, signature_envelope()).await;
    Mock::given(method("POST"))
        .and(path(CLASSIFY_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "classifyBookList": { "records": books(1) } } }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = mock_config(&server);
    config.request_timeout = Duration::from_millis(300);
    let service = DramaboxService::connect(&config).await.unwrap();

    let result = service.classify_page(1).await;
    assert!(matches!(result, Err(RequestError::Transport(_))));
}

#[tokio::test]
async fn unexpected_payload_shape_is_an_error() {
    let server = MockServer::start().await;
    let service = connected_service(&server).await;
    mount_vendor(&server, SEARCH_SUGGEST_PATH, json!({ "data": { "suggestList": "oops" } })).await;

    let result = service.search("ceo").await;
    assert!(matches!(result, Err(RequestError::Shape(_))));
}

// ── Typed endpoints ─────────────────────────────────────────────

#[tokio::test]
async fn rank_board_resolves_its_title() {
    let server = MockServer::start().await;
    let service = connected_service(&server).await;
    Mock::given(method("POST"))
        .and(path(RANK_PATH))
        .and(body_partial_json(json!({ "rankType": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "rankList": [{ "bookId": "9", "bookName": "Top", "rankVo": { "hotCode": "98.1K" } }],
                "rankTypeVoList": [{ "rankType": 1, "rankName": "Sedang Tren" }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let board = service.rank(1).await.unwrap();
    assert_eq!(board.title_for(1), "Sedang Tren");
    assert_eq!(
        board.rank_list[0].rank_vo.as_ref().unwrap().hot_code.as_ref().unwrap().as_str(),
        "98.1K"
    );
}

#[tokio::test]
async fn home_columns_use_their_own_bodies() {
    let server = MockServer::start().await;
    let service = connected_service(&server).await;
    Mock::given(method("POST"))
        .and(path(THEATER_PATH))
        .and(body_partial_json(json!({ "channelId": 205, "index": 4 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "columnVoList": [{ "title": "VIP", "bookList": books(3) }] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(THEATER_PATH))
        .and(body_partial_json(json!({ "isNeedNewChannel": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "columnVoList": [{ "title": "Untukmu", "bookList": null }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let vip = service.vip().await.unwrap();
    let for_you = service.for_you().await.unwrap();

    assert_eq!(vip[0].book_list.len(), 3);
    assert_eq!(for_you[0].title.as_deref(), Some("Untukmu"));
    assert!(for_you[0].book_list.is_empty());
}
