//! End-to-end tests for the callback receiver over real sockets.

#![cfg(feature = "callbacks")]

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::timeout;
use zenvia_sms::callbacks::{CallbackServer, CallbackServerConfig, CallbackServerHandle};
use zenvia_sms::{CallbackPayload, SmsStatusCode};

fn local_server() -> CallbackServer {
    let config = CallbackServerConfig::builder()
        .addr(SocketAddr::from(([127, 0, 0, 1], 0)))
        .build();
    CallbackServer::new(config)
}

async fn started(server: CallbackServer) -> (CallbackServerHandle, String) {
    let handle = server.start().await.unwrap();
    let url = format!("http://{}/", handle.local_addr());
    (handle, url)
}

#[tokio::test]
async fn test_delivery_status_callback_is_published() {
    let server = local_server();
    let mut events = server.subscribe();
    let (handle, url) = started(server).await;

    let body = json!({
        "callbackMtRequest": {
            "status": "03",
            "statusMessage": "Delivered",
            "statusDetail": "120",
            "statusDetailMessage": "Message received by mobile",
            "id": "hs765939216",
            "received": "2014-08-26T12:55:48.593-03:00",
            "mobileOperatorName": "Claro"
        }
    });

    let resp = reqwest::Client::new()
        .post(&url)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert!(resp.text().await.unwrap().is_empty());

    let event = timeout(Duration::from_secs(5), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.body, body);

    match event.payload() {
        CallbackPayload::DeliveryStatus(status) => {
            assert_eq!(status.id.as_str(), "hs765939216");
            assert_eq!(status.status, SmsStatusCode::Delivered);
        }
        other => panic!("Expected DeliveryStatus, got {:?}", other),
    }

    // Exactly one event per request
    assert!(events.try_recv().is_err());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_every_subscriber_receives_each_event() {
    let server = local_server();
    let mut first = server.subscribe();
    let mut second = server.subscribe();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let listener = server.on_event(move |event| {
        let _ = tx.send(event);
    });

    let (handle, url) = started(server).await;

    let body = json!({
        "callbackMoRequest": {
            "id": "20690090",
            "mobile": "5551999999999",
            "shortCode": "40001",
            "account": "zenvia.envio",
            "body": "Message content",
            "received": "2014-08-26T12:27:08.488-03:00",
            "correlatedMessageSmsId": "hs765939061"
        }
    });

    reqwest::Client::new()
        .post(&url)
        .json(&body)
        .send()
        .await
        .unwrap();

    for received in [
        timeout(Duration::from_secs(5), first.recv()).await.unwrap().unwrap(),
        timeout(Duration::from_secs(5), second.recv()).await.unwrap().unwrap(),
        timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap(),
    ] {
        assert_eq!(received.body, body);
        assert!(matches!(
            received.payload(),
            CallbackPayload::ReceivedMessage(sms) if sms.mobile == "5551999999999"
        ));
    }

    handle.shutdown().await.unwrap();
    // The on_event task ends once the hub closes
    timeout(Duration::from_secs(5), listener).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_get_callback_is_acknowledged() {
    let server = local_server();
    let mut events = server.subscribe();
    let (handle, url) = started(server).await;

    let resp = reqwest::get(format!("{}?id=1&status=03", url)).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");

    let event = timeout(Duration::from_secs(5), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.method, axum::http::Method::GET);
    assert_eq!(event.body, json!({"id": "1", "status": "03"}));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_callbacks_without_subscribers_are_acknowledged() {
    let server = local_server();
    let (handle, url) = started(server).await;

    let resp = reqwest::Client::new()
        .post(&url)
        .json(&json!({"callbackMtRequest": {"id": "1", "status": "02"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_stops_listening() {
    let server = local_server();
    let (handle, url) = started(server).await;
    assert!(handle.is_listening());

    handle.shutdown().await.unwrap();

    let result = reqwest::Client::new()
        .post(&url)
        .timeout(Duration::from_secs(2))
        .json(&json!({}))
        .send()
        .await;
    assert!(result.is_err());
}
