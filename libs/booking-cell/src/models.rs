use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::notification::BookingConfirmation;

/// An appointment. `date` is an opaque day label chosen by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub patient: String,
    pub patient_name: String,
    pub treatment: String,
    pub date: String,
    pub slot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Booking {
    pub fn confirmation(&self) -> BookingConfirmation {
        BookingConfirmation {
            patient: self.patient.clone(),
            patient_name: self.patient_name.clone(),
            treatment: self.treatment.clone(),
            date: self.date.clone(),
            slot: self.slot.clone(),
        }
    }
}

/// Result of a booking attempt. `created == false` means an earlier booking for
/// the same treatment, date and patient already exists and is returned instead.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingOutcome {
    pub created: bool,
    pub record: Booking,
}

#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub patient: Option<String>,
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Patients may only list their own bookings")]
    NotOwner,

    #[error("Conflicting booking for {0} could not be read back")]
    MissingConflict(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
