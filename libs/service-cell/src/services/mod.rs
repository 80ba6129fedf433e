pub mod availability;

pub use availability::{compute_availability, AvailabilityService};
