//! Integration tests for the Telegram notifier

use super::test_utils::mock_telegram_ok;
use dipwatch::services::notifier::{Notifier, NotifyError, TelegramNotifier};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn sends_message_to_configured_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_json(serde_json::json!({
            "chat_id": "42",
            "text": "Coin: BTCUSDC\nSignal fired: 16.10.2026 14:05\nPrice: 98.20"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(server.uri(), "123:abc", "42", Duration::from_secs(5))
        .expect("build client");
    notifier
        .notify("Coin: BTCUSDC\nSignal fired: 16.10.2026 14:05\nPrice: 98.20")
        .await
        .expect("delivery succeeds");
}

#[tokio::test]
async fn api_error_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botbad/sendMessage"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"ok\":false,\"error_code\":401}"))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(server.uri(), "bad", "42", Duration::from_secs(5))
        .expect("build client");
    match notifier.notify("hello").await {
        Err(NotifyError::Api { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("error_code"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = MockServer::start().await;
    mock_telegram_ok(&server, "t0k").await;

    let notifier = TelegramNotifier::new(format!("{}/", server.uri()), "t0k", "1", Duration::from_secs(5))
        .expect("build client");
    assert!(notifier.notify("ping").await.is_ok());
}

#[tokio::test]
async fn timeout_error_does_not_expose_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/botSECRET123:TOKEN/sendMessage"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": true}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(
        server.uri(),
        "SECRET123:TOKEN",
        "42",
        Duration::from_millis(100),
    )
    .expect("build client");

    let err = notifier.notify("hello").await.unwrap_err();
    match &err {
        NotifyError::Request(e) => assert!(e.is_timeout()),
        other => panic!("expected request error, got {:?}", other),
    }
    assert!(!err.to_string().contains("SECRET123"));
    assert!(!format!("{:?}", err).contains("SECRET123"));
}
