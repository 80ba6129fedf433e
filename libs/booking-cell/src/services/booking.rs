use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_database::supabase::{encode, prefer, SupabaseClient};

use crate::models::{Booking, BookingError, BookingOutcome};

const BOOKINGS: &str = "/rest/v1/bookings";

/// Insert that skips rows colliding with the unique (treatment, date, patient) index.
const INSERT_IGNORING_DUPLICATES: &str = "return=representation,resolution=ignore-duplicates";

pub struct BookingService {
    supabase: SupabaseClient,
}

impl BookingService {
    pub fn new(supabase: &SupabaseClient) -> Self {
        Self {
            supabase: supabase.clone(),
        }
    }

    /// Records a booking unless one exists for the same treatment, date and patient.
    ///
    /// The insert and the duplicate check are a single store statement backed by
    /// a unique index, so concurrent identical requests yield exactly one row.
    pub async fn create_booking(&self, mut booking: Booking) -> Result<BookingOutcome, BookingError> {
        debug!("Booking {} on {} at {} for {}", booking.treatment, booking.date, booking.slot, booking.patient);

        booking.id = None;

        let path = format!("{}?on_conflict=treatment,date,patient", BOOKINGS);
        let mut inserted: Vec<Booking> = self.supabase.request_with_headers(
            Method::POST,
            &path,
            Some(json!(booking)),
            Some(prefer(INSERT_IGNORING_DUPLICATES)),
        ).await?;

        if !inserted.is_empty() {
            let record = inserted.swap_remove(0);
            info!("Booking created for {} ({} on {})", record.patient, record.treatment, record.date);
            return Ok(BookingOutcome { created: true, record });
        }

        debug!("Booking already exists for {} ({} on {})", booking.patient, booking.treatment, booking.date);

        let existing = self.find_existing(&booking).await?
            .ok_or_else(|| BookingError::MissingConflict(booking.patient.clone()))?;

        Ok(BookingOutcome { created: false, record: existing })
    }

    pub async fn find_existing(&self, booking: &Booking) -> Result<Option<Booking>, BookingError> {
        let path = format!(
            "{}?treatment=eq.{}&date=eq.{}&patient=eq.{}&limit=1",
            BOOKINGS,
            encode(&booking.treatment),
            encode(&booking.date),
            encode(&booking.patient),
        );

        let mut found: Vec<Booking> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(if found.is_empty() { None } else { Some(found.swap_remove(0)) })
    }

    /// Bookings of `patient`, visible only to that same patient.
    pub async fn list_for_patient(&self, caller_email: &str, patient: &str) -> Result<Vec<Booking>, BookingError> {
        if caller_email != patient {
            return Err(BookingError::NotOwner);
        }

        debug!("Listing bookings for {}", patient);
        let path = format!("{}?patient=eq.{}&order=id.asc", BOOKINGS, encode(patient));

        Ok(self.supabase.request(Method::GET, &path, None).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_utils::test_utils::TestConfig;

    #[tokio::test]
    async fn test_other_patients_bookings_are_refused_before_any_store_call() {
        // Unroutable store: any request would fail with a store error instead.
        let state = TestConfig::with_store("http://127.0.0.1:9").to_state_silent();
        let service = BookingService::new(&state.db);

        let result = service.list_for_patient("b@x.com", "a@x.com").await;

        assert_matches!(result, Err(BookingError::NotOwner));
    }
}
