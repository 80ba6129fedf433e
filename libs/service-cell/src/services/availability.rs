use anyhow::Result;
use reqwest::Method;
use tracing::debug;

use shared_database::supabase::{encode, SupabaseClient};

use crate::models::{BookedSlot, Service, ServiceSummary};

pub struct AvailabilityService {
    supabase: SupabaseClient,
}

impl AvailabilityService {
    pub fn new(supabase: &SupabaseClient) -> Self {
        Self {
            supabase: supabase.clone(),
        }
    }

    /// Lists services as `{id, name}`, in seeding order.
    pub async fn list_services(&self) -> Result<Vec<ServiceSummary>> {
        debug!("Listing services");

        self.supabase.request(
            Method::GET,
            "/rest/v1/services?select=id,name&order=id.asc",
            None,
        ).await
    }

    /// Every service with its slots narrowed to those still free on `date`.
    pub async fn available_on(&self, date: &str) -> Result<Vec<Service>> {
        debug!("Computing availability for {}", date);

        let services: Vec<Service> = self.supabase.request(
            Method::GET,
            "/rest/v1/services?select=*&order=id.asc",
            None,
        ).await?;

        let path = format!("/rest/v1/bookings?select=treatment,slot&date=eq.{}", encode(date));
        let booked: Vec<BookedSlot> = self.supabase.request(Method::GET, &path, None).await?;

        debug!("{} services, {} bookings on {}", services.len(), booked.len(), date);
        Ok(compute_availability(services, &booked))
    }
}

/// Removes from each service the slots already booked for that treatment.
///
/// Service order and slot order within a service are preserved. `booked` must
/// already be restricted to a single date.
pub fn compute_availability(services: Vec<Service>, booked: &[BookedSlot]) -> Vec<Service> {
    services
        .into_iter()
        .map(|mut service| {
            let taken: Vec<&str> = booked
                .iter()
                .filter(|b| b.treatment == service.name)
                .map(|b| b.slot.as_str())
                .collect();

            service.slots.retain(|slot| !taken.contains(&slot.as_str()));
            service
        })
        .collect()
}
