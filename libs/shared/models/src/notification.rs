use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Details of a confirmed booking, as needed to tell the patient about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub patient: String,
    pub patient_name: String,
    pub treatment: String,
    pub date: String,
    pub slot: String,
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notifications are not configured")]
    NotConfigured,

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Outbound channel for patient notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> Result<(), NotificationError>;
}
