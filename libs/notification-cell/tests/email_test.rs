use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use serde_json::json;

use notification_cell::{dispatch_confirmation, EmailNotifier};
use shared_config::AppConfig;
use shared_models::notification::{BookingConfirmation, NotificationError, Notifier};
use shared_utils::test_utils::{RecordingNotifier, TestConfig};

fn mail_config(api_url: &str) -> AppConfig {
    AppConfig {
        email_api_url: api_url.to_string(),
        email_sender_key: "mail-key".to_string(),
        email_sender: "clinic@example.com".to_string(),
        ..TestConfig::default().to_app_config()
    }
}

fn confirmation() -> BookingConfirmation {
    BookingConfirmation {
        patient: "a@x.com".to_string(),
        patient_name: "Ada".to_string(),
        treatment: "Cleaning".to_string(),
        date: "01-01-2024".to_string(),
        slot: "9am".to_string(),
    }
}

#[tokio::test]
async fn test_confirmation_is_posted_to_mail_api() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/mail/send"))
        .and(header("authorization", "Bearer mail-key"))
        .and(body_partial_json(json!({
            "from": { "email": "clinic@example.com" },
            "personalizations": [{ "to": [{ "email": "a@x.com", "name": "Ada" }] }],
            "subject": "Your Appointment for Cleaning is on 01-01-2024 at 9am is confirmed"
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&mock_server)
        .await;

    let notifier = EmailNotifier::new(&mail_config(&format!("{}/v3/mail/send", mock_server.uri()))).unwrap();

    notifier.send_booking_confirmation(&confirmation()).await.unwrap();
}

#[tokio::test]
async fn test_provider_rejection_is_reported() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let notifier = EmailNotifier::new(&mail_config(&mock_server.uri())).unwrap();
    let result = notifier.send_booking_confirmation(&confirmation()).await;

    assert_matches!(result, Err(NotificationError::Rejected { status: 401, .. }));
}

#[tokio::test]
async fn test_unconfigured_notifier_refuses() {
    let notifier = EmailNotifier::new(&TestConfig::default().to_app_config()).unwrap();

    let result = notifier.send_booking_confirmation(&confirmation()).await;

    assert_matches!(result, Err(NotificationError::NotConfigured));
}

#[tokio::test]
async fn test_request_carries_text_and_html_parts() {
    let notifier = EmailNotifier::new(&mail_config("http://localhost")).unwrap();
    let request = notifier.build_request(&confirmation());

    let types: Vec<&str> = request.content.iter().map(|c| c.content_type.as_str()).collect();
    assert_eq!(types, vec!["text/plain", "text/html"]);
    assert!(request.content[1].value.contains("Hello, Ada"));
}

#[tokio::test]
async fn test_dispatch_swallows_failures() {
    let notifier = Arc::new(RecordingNotifier::failing());

    let handle = dispatch_confirmation(notifier.clone(), confirmation());
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("dispatch finished")
        .expect("task did not panic");

    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_stalled_mail_api_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let config = AppConfig {
        store_timeout_secs: 1,
        ..mail_config(&mock_server.uri())
    };
    let notifier = EmailNotifier::new(&config).unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(4),
        notifier.send_booking_confirmation(&confirmation()),
    )
    .await
    .expect("request gave up before the mail API answered");

    assert_matches!(result, Err(NotificationError::Delivery(_)));
}
