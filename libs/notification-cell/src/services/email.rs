use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::notification::{BookingConfirmation, NotificationError, Notifier};

use crate::models::{MailAddress, MailContent, MailRequest, Personalization};
use crate::services::template::render_booking_confirmation;

/// Delivers confirmations through an HTTP mail API authenticated with a bearer key.
pub struct EmailNotifier {
    client: Client,
    api_url: String,
    api_key: String,
    sender: String,
}

impl EmailNotifier {
    /// Mail requests use the same timeout as store requests.
    pub fn new(config: &AppConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(config.store_timeout())
            .build()?;

        Ok(Self {
            client,
            api_url: config.email_api_url.clone(),
            api_key: config.email_sender_key.clone(),
            sender: config.email_sender.clone(),
        })
    }

    fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty() && !self.sender.is_empty()
    }

    pub fn build_request(&self, booking: &BookingConfirmation) -> MailRequest {
        let email = render_booking_confirmation(booking);

        MailRequest {
            personalizations: vec![Personalization {
                to: vec![MailAddress {
                    email: booking.patient.clone(),
                    name: Some(booking.patient_name.clone()),
                }],
            }],
            from: MailAddress {
                email: self.sender.clone(),
                name: None,
            },
            subject: email.subject,
            content: vec![
                MailContent { content_type: "text/plain".to_string(), value: email.text },
                MailContent { content_type: "text/html".to_string(), value: email.html },
            ],
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> Result<(), NotificationError> {
        if !self.is_configured() {
            return Err(NotificationError::NotConfigured);
        }

        let request = self.build_request(confirmation);
        debug!("Sending booking confirmation to {}", confirmation.patient);

        let response = self.client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected { status: status.as_u16(), body });
        }

        Ok(())
    }
}
