use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::router::booking_routes;
use shared_utils::test_utils::{JwtTestUtils, MockStoreResponses, RecordingNotifier, TestConfig};

fn booking_body() -> Value {
    json!({
        "patient": "a@x.com",
        "patientName": "Ada",
        "treatment": "Cleaning",
        "date": "01-01-2024",
        "slot": "9am"
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn post_booking(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/booking")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_bookings(patient: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("GET")
        .uri(format!("/booking?patient={}", patient));
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_new_booking_is_created_and_confirmed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("on_conflict", "treatment,date,patient"))
        .and(|req: &wiremock::Request| {
            req.headers.get("Prefer").and_then(|v| v.to_str().ok())
                == Some("return=representation,resolution=ignore-duplicates")
        })
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::booking_row(11, "a@x.com", "Cleaning", "01-01-2024", "9am")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let state = TestConfig::with_store(&mock_server.uri()).to_state(notifier.clone());

    let (status, body) = send(booking_routes(state), post_booking(&booking_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["result"]["insertedId"], 11);

    let sent = notifier.wait_for(1, Duration::from_secs(1)).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].patient, "a@x.com");
    assert_eq!(sent[0].slot, "9am");
}

#[tokio::test]
async fn test_duplicate_booking_echoes_existing_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("treatment", "eq.Cleaning"))
        .and(query_param("date", "eq.01-01-2024"))
        .and(query_param("patient", "eq.a@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::booking_row(11, "a@x.com", "Cleaning", "01-01-2024", "10am")
        ])))
        .mount(&mock_server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let state = TestConfig::with_store(&mock_server.uri()).to_state(notifier.clone());

    let (status, body) = send(booking_routes(state), post_booking(&booking_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["booking"]["id"], 11);
    assert_eq!(body["booking"]["slot"], "10am");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_email_failure_does_not_fail_booking() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/bookings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockStoreResponses::booking_row(12, "a@x.com", "Cleaning", "01-01-2024", "9am")
        ])))
        .mount(&mock_server)
        .await;

    let notifier = Arc::new(RecordingNotifier::failing());
    let state = TestConfig::with_store(&mock_server.uri()).to_state(notifier.clone());

    let (status, body) = send(booking_routes(state), post_booking(&booking_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(notifier.wait_for(1, Duration::from_secs(1)).await.len(), 1);
}

#[tokio::test]
async fn test_list_own_bookings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/bookings"))
        .and(query_param("patient", "eq.a@x.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::booking_row(1, "a@x.com", "Cleaning", "01-01-2024", "9am"),
            MockStoreResponses::booking_row(2, "a@x.com", "Whitening", "03-01-2024", "11am")
        ])))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store(&mock_server.uri());
    let token = JwtTestUtils::create_test_token("a@x.com", &config.jwt_secret, None);

    let (status, body) = send(booking_routes(config.to_state_silent()), get_bookings("a@x.com", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert!(bookings.iter().all(|b| b["patient"] == "a@x.com"));
}

#[tokio::test]
async fn test_listing_someone_elses_bookings_is_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_store(&mock_server.uri());
    let token = JwtTestUtils::create_test_token("b@x.com", &config.jwt_secret, None);

    let (status, _) = send(booking_routes(config.to_state_silent()), get_bookings("a@x.com", Some(&token))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_listing_requires_token() {
    let (status, _) = send(
        booking_routes(TestConfig::default().to_state_silent()),
        get_bookings("a@x.com", None),
    ).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_booking_body_is_400_with_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let state = TestConfig::with_store(&mock_server.uri()).to_state_silent();

    let request = Request::builder()
        .method("POST")
        .uri("/booking")
        .header("content-type", "application/json")
        .body(Body::from("{\"patient\": \"a@x.com\","))
        .unwrap();
    let (status, body) = send(booking_routes(state.clone()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    // Well-formed JSON missing a required field.
    let (status, body) = send(booking_routes(state), post_booking(&json!({ "patient": "a@x.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("missing field"));
}
