//! Integration tests against a mocked Zenvia gateway.

use serde_json::json;
use url::Url;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zenvia_sms::api::{
    ApiResponse, ReceivedEnvelope, SendSmsEnvelope, SendSmsMultiEnvelope, SmsStatusEnvelope,
};
use zenvia_sms::{
    CallbackOption, RetryableError, ResponseBody, SendSms, SmsBatch, SmsId, SmsMessage,
    SmsStatusCode, ZenviaClient, ZenviaError,
};

fn client_for(server: &MockServer, account: &str, secret: &str) -> ZenviaClient {
    ZenviaClient::builder(account, secret)
        .host(Url::parse(&server.uri()).unwrap())
        .build()
        .unwrap()
}

fn single_payload(id: &str) -> SendSms {
    SendSms::from(
        SmsMessage::new("5551999999999", "Hello from Zenvia API from Rust!!!")
            .with_from("Zenvia API")
            .with_id(id)
            .with_aggregate_id("777")
            .with_callback_option(CallbackOption::None),
    )
}

/// Mount a catch-all 401 like the gateway does for unknown credentials.
async fn mount_unauthorized(server: &MockServer) {
    Mock::given(wiremock::matchers::any())
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"exception": {"message": "Unauthorized"}})),
        )
        .mount(server)
        .await;
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_single_payload_routes_to_send_sms() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/send-sms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sendSmsResponse": {
                "statusCode": "00",
                "statusDescription": "Ok",
                "detailCode": "000",
                "detailDescription": "Message Sent"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/services/send-sms-multiple"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "account", "secret");
    let response = client.send_sms(&single_payload("1")).await.unwrap();

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "statusCode": 200,
            "body": {
                "sendSmsResponse": {
                    "statusCode": "00",
                    "statusDescription": "Ok",
                    "detailCode": "000",
                    "detailDescription": "Message Sent"
                }
            }
        })
    );

    let envelope: SendSmsEnvelope = response.decode().unwrap();
    assert_eq!(envelope.send_sms_response.status_code, SmsStatusCode::Ok);
}

#[tokio::test]
async fn test_multi_payload_routes_to_send_sms_multiple() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/send-sms-multiple"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sendSmsMultiResponse": {
                "sendSmsResponseList": [
                    {
                        "statusCode": "10",
                        "statusDescription": "Error",
                        "detailCode": "080",
                        "detailDescription": "Message with same ID already sent"
                    },
                    {
                        "statusCode": "00",
                        "statusDescription": "Ok",
                        "detailCode": "000",
                        "detailDescription": "Message Sent"
                    }
                ]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/services/send-sms"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let payload = SendSms::from(
        SmsBatch::new([
            SmsMessage::new("5551999999999", "one").with_id("001"),
            SmsMessage::new("5551982193388", "two").with_id("002"),
        ])
        .with_aggregate_id("1750"),
    );

    let client = client_for(&mock_server, "account", "secret");
    let response = client.send_sms(&payload).await.unwrap();

    // Per-message failures still come back as a transport-level success
    let envelope: SendSmsMultiEnvelope = response.decode().unwrap();
    assert_eq!(envelope.failures().count(), 1);
}

// =============================================================================
// Status, received and cancel
// =============================================================================

#[tokio::test]
async fn test_get_sms_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/get-sms-status/hs765939216"))
        .and(basic_auth("account", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "getSmsStatusResp": {
                "id": "hs765939216",
                "received": "2014-08-26T12:55:48.593-03:00",
                "shortcode": "40001",
                "mobileOperatorName": "Claro",
                "statusCode": "03",
                "statusDescription": "Delivered",
                "detailCode": "120",
                "detailDescription": "Message received by mobile"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "account", "secret");
    let response = client
        .get_sms_status(&SmsId::from("hs765939216"))
        .await
        .unwrap();

    let envelope: SmsStatusEnvelope = response.decode().unwrap();
    let status = envelope.get_sms_status_resp;
    assert_eq!(status.id, Some(SmsId::from("hs765939216")));
    assert_eq!(status.status.status_code, SmsStatusCode::Delivered);
}

#[tokio::test]
async fn test_received_list_and_search() {
    let mock_server = MockServer::start().await;

    let body = json!({
        "receivedResponse": {
            "statusCode": "00",
            "statusDescription": "Ok",
            "detailCode": "300",
            "detailDescription": "Received messages found",
            "receivedMessages": [{
                "id": "20690090",
                "dateReceived": "2014-08-26T12:27:08.488-03:00",
                "mobile": "5551999999999",
                "body": "Message content",
                "shortcode": "40001",
                "mobileOperatorName": "Claro",
                "smsOriginId": "hs765939061"
            }]
        }
    });

    Mock::given(method("POST"))
        .and(path("/services/received/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(
            "/services/received/search/2014-08-22T00:00:00/2014-08-23T00:00:00",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "account", "secret");

    let listed: ReceivedEnvelope = client.get_received_list().await.unwrap().decode().unwrap();
    assert_eq!(listed.received_response.received_messages.len(), 1);

    let searched: ReceivedEnvelope = client
        .get_received_list_search("2014-08-22T00:00:00", "2014-08-23T00:00:00")
        .await
        .unwrap()
        .decode()
        .unwrap();
    assert_eq!(searched, listed);
}

#[tokio::test]
async fn test_cancel_previously_scheduled_sms() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/send-sms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sendSmsResponse": {
                "statusCode": "00",
                "statusDescription": "Ok",
                "detailCode": "000",
                "detailDescription": "Message Sent"
            }
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/services/cancel-sms/9001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cancelSmsResp": {
                "statusCode": "09",
                "statusDescription": "Blocked",
                "detailCode": "002",
                "detailDescription": "Message successfully canceled"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "account", "secret");

    let scheduled = SendSms::from(
        SmsMessage::new("5551999999999", "later")
            .with_id("9001")
            .with_schedule("2030-01-01T09:00:00"),
    );
    client.send_sms(&scheduled).await.unwrap();

    let response = client
        .cancel_scheduled_sms(&SmsId::from("9001"))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.body.as_json().unwrap()["cancelSmsResp"]["statusCode"],
        "09"
    );
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_every_operation_reports_bad_credentials() {
    let mock_server = MockServer::start().await;
    mount_unauthorized(&mock_server).await;

    let client = client_for(&mock_server, "abc", "123");
    let id = SmsId::from("0");

    let results = vec![
        client.send_sms(&single_payload("0")).await,
        client.get_sms_status(&id).await,
        client.get_received_list().await,
        client.get_received_list_search("0", "0").await,
        client.cancel_scheduled_sms(&id).await,
    ];

    for result in results {
        let err = result.unwrap_err();
        assert!(matches!(err, ZenviaError::BadCredentials));

        let response = err.response().unwrap();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"statusCode": 401, "body": "Bad credentials"})
        );
    }
}

#[tokio::test]
async fn test_upstream_error_passes_body_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/get-sms-status/0"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "exception": {"message": "Cannot consume content type"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "account", "secret");
    let err = client.get_sms_status(&SmsId::from("0")).await.unwrap_err();

    match &err {
        ZenviaError::Upstream(ApiResponse { status_code, body }) => {
            assert_eq!(*status_code, 400);
            assert_eq!(
                *body,
                ResponseBody::Json(json!({
                    "exception": {"message": "Cannot consume content type"}
                }))
            );
        }
        other => panic!("Expected Upstream error, got {:?}", other),
    }
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_non_200_success_codes_are_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/received/list"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "account", "secret");
    let err = client.get_received_list().await.unwrap_err();
    assert_eq!(err.status_code(), Some(204));
}

#[tokio::test]
async fn test_server_error_is_retryable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/cancel-sms/1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server, "account", "secret");
    let err = client
        .cancel_scheduled_sms(&SmsId::from("1"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert_eq!(
        err.response().unwrap().body,
        ResponseBody::Text("Service Unavailable".to_string())
    );
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ZenviaClient::builder("account", "secret")
        .host(Url::parse(&format!("http://{}", addr)).unwrap())
        .build()
        .unwrap();

    let err = client.get_received_list().await.unwrap_err();
    assert!(err.is_transport());
    assert!(err.response().is_none());
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_set_credentials_applies_to_next_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/get-sms-status/7"))
        .and(basic_auth("good", "creds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "getSmsStatusResp": {"statusCode": "02", "statusDescription": "Sent"}
        })))
        .mount(&mock_server)
        .await;
    mount_unauthorized(&mock_server).await;

    let mut client = client_for(&mock_server, "bad", "creds");
    let id = SmsId::from("7");

    assert!(matches!(
        client.get_sms_status(&id).await,
        Err(ZenviaError::BadCredentials)
    ));

    client.set_credentials("good", "creds");
    let response = client.get_sms_status(&id).await.unwrap();
    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn test_set_host_name_redirects_calls() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/received/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&second)
        .await;

    let mut client = client_for(&first, "account", "secret");
    client.set_host_name(Url::parse(&second.uri()).unwrap());

    client.get_received_list().await.unwrap();
}
