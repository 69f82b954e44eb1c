//! Protocol tests for the scheduling API client
//!
//! Runs the HTTP client against a mock API server and checks the request
//! shapes and the envelope decode rules for all three endpoints.

use std::collections::HashMap;

use relay_client::{ClientError, SchedulerApi, SchedulerClient};
use relay_core::domain::task::Task;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ping_task(id: i64) -> Task {
    let mut request = HashMap::new();
    request.insert("x".to_string(), json!(1.5));
    Task {
        id,
        generator: 1,
        method: "ping".to_string(),
        request,
        created: "2020-01-01 10:00:00".to_string(),
    }
}

#[tokio::test]
async fn fetch_next_returns_pending_task() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shedule/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": {
                "id": 7,
                "generator": 1,
                "method": "ping",
                "request": {"x": 1.5},
                "created": "t"
            }
        })))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let task = client.fetch_next().await.unwrap().unwrap();

    assert_eq!(task.id, 7);
    assert_eq!(task.method, "ping");
}

#[tokio::test]
async fn fetch_next_empty_queue_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shedule/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 204})))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    assert!(client.fetch_next().await.unwrap().is_none());
}

#[tokio::test]
async fn fetch_next_application_error_is_not_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shedule/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 500,
            "errorMessage": "generator offline"
        })))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let err = client.fetch_next().await.unwrap_err();

    assert!(!err.is_transient());
    match err {
        ClientError::Api { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "generator offline");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_next_bad_status_is_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shedule/get"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let err = client.fetch_next().await.unwrap_err();

    assert!(err.is_transient());
    assert_eq!(err.to_string(), "http err: 503 - Service Unavailable");
}

#[tokio::test]
async fn fetch_next_garbage_body_is_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shedule/get"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let err = client.fetch_next().await.unwrap_err();

    assert!(err.is_transient());
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn fetch_next_rejects_malformed_task_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shedule/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": "not a task"
        })))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let err = client.fetch_next().await.unwrap_err();

    assert!(!err.is_transient());
    assert!(matches!(err, ClientError::Payload(_)));
}

#[tokio::test]
async fn run_method_sends_normalized_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(query_param("x", "1.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": "pong"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let outcome = client.run_method(&ping_task(7)).await.unwrap();

    assert_eq!(outcome.code, 0);
    assert_eq!(outcome.response, "pong");
}

#[tokio::test]
async fn run_method_canonicalizes_structured_payloads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "{\"code\": 0, \"data\": {\n  \"status\" : \"up\",  \"latency\" : 3.0\n}}",
        ))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let outcome = client.run_method(&ping_task(7)).await.unwrap();

    assert_eq!(outcome.response, r#"{"latency":3.0,"status":"up"}"#);
}

#[tokio::test]
async fn run_method_surfaces_application_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 17,
            "errorMessage": "unknown device"
        })))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let err = client.run_method(&ping_task(7)).await.unwrap_err();

    assert_eq!(err.outcome_code(), 17);
    assert_eq!(err.to_string(), "unknown device");
}

#[tokio::test]
async fn run_method_maps_bad_status_to_code_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let err = client.run_method(&ping_task(7)).await.unwrap_err();

    assert_eq!(err.outcome_code(), 0);
    assert_eq!(err.to_string(), "http err: 404 - Not Found");
}

#[tokio::test]
async fn run_method_maps_garbage_body_to_code_minus_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let err = client.run_method(&ping_task(7)).await.unwrap_err();

    assert_eq!(err.outcome_code(), -1);
}

#[tokio::test]
async fn report_outcome_sends_json_quoted_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shedule/update"))
        .and(query_param("id", "7"))
        .and(query_param("code", "0"))
        .and(query_param("response", "\"pong\""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    client.report_outcome(7, 0, "pong").await.unwrap();
}

#[tokio::test]
async fn report_outcome_fails_on_bad_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shedule/update"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = SchedulerClient::new(server.uri());
    let err = client.report_outcome(7, 0, "pong").await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
}
