use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use shared_models::notification::{BookingConfirmation, Notifier};

/// Sends the confirmation on a detached task. The outcome is only logged; the
/// returned handle exists for callers that want to await it (tests).
pub fn dispatch_confirmation(
    notifier: Arc<dyn Notifier>,
    confirmation: BookingConfirmation,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.send_booking_confirmation(&confirmation).await {
            Ok(()) => info!(
                "Booking confirmation sent to {} for {} on {}",
                confirmation.patient, confirmation.treatment, confirmation.date
            ),
            Err(e) => error!(
                "Failed to send booking confirmation to {}: {}",
                confirmation.patient, e
            ),
        }
    })
}
