use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use shared_config::AppConfig;
use shared_database::SupabaseClient;
use shared_models::auth::JwtClaims;
use shared_models::notification::{BookingConfirmation, NotificationError, Notifier};

use crate::jwt::sign_claims;
use crate::state::AppState;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_service_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    /// Config pointing the store at `supabase_url`, typically a `wiremock` server.
    pub fn with_store(supabase_url: &str) -> Self {
        Self {
            supabase_url: supabase_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            access_token_secret: self.jwt_secret.clone(),
            email_api_url: String::new(),
            email_sender_key: String::new(),
            email_sender: String::new(),
            port: 0,
            store_timeout_secs: 5,
        }
    }

    pub fn to_state(&self, notifier: Arc<dyn Notifier>) -> Arc<AppState> {
        let config = self.to_app_config();
        let db = SupabaseClient::new(&config).expect("test store client");
        Arc::new(AppState::new(config, db, notifier))
    }

    pub fn to_state_silent(&self) -> Arc<AppState> {
        self.to_state(Arc::new(RecordingNotifier::default()))
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(email: &str, secret: &str, exp_hours: Option<i64>) -> String {
        let now = Utc::now().timestamp();
        let exp = now + exp_hours.unwrap_or(1) * 3600;

        let claims = JwtClaims {
            email: email.to_string(),
            iat: Some(now as u64),
            exp: Some(exp.max(0) as u64),
        };

        sign_claims(&claims, secret).expect("test token")
    }

    pub fn create_expired_token(email: &str, secret: &str) -> String {
        Self::create_test_token(email, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(email: &str) -> String {
        Self::create_test_token(email, "wrong-secret", Some(1))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Notifier that remembers every confirmation it was asked to send.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<BookingConfirmation>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self { sent: Mutex::new(Vec::new()), fail: true }
    }

    pub fn sent(&self) -> Vec<BookingConfirmation> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Polls until at least `count` confirmations were attempted or the timeout elapses.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<BookingConfirmation> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let sent = self.sent();
            if sent.len() >= count || tokio::time::Instant::now() >= deadline {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> Result<(), NotificationError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(confirmation.clone());
        }

        if self.fail {
            return Err(NotificationError::Delivery("simulated outage".to_string()));
        }
        Ok(())
    }
}

pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn service_row(id: i64, name: &str, slots: &[&str]) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "slots": slots
        })
    }

    pub fn booking_row(id: i64, patient: &str, treatment: &str, date: &str, slot: &str) -> serde_json::Value {
        json!({
            "id": id,
            "patient": patient,
            "patientName": "Test Patient",
            "treatment": treatment,
            "date": date,
            "slot": slot,
            "phone": null
        })
    }

    pub fn user_row(id: i64, email: &str, role: Option<&str>) -> serde_json::Value {
        json!({
            "id": id,
            "email": email,
            "role": role,
            "name": "Test User"
        })
    }

    pub fn doctor_row(id: i64, email: &str, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "email": email,
            "name": name,
            "specialty": "Teeth Orthodontics",
            "img": null
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
