use anyhow::{Result, anyhow};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_database::supabase::{encode, prefer, SupabaseClient, RETURN_REPRESENTATION};
use shared_models::store::{DeleteResult, InsertResult};

use crate::models::Doctor;

const DOCTORS: &str = "/rest/v1/doctors";

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(supabase: &SupabaseClient) -> Self {
        Self {
            supabase: supabase.clone(),
        }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>> {
        debug!("Listing doctors");

        let path = format!("{}?order=id.asc", DOCTORS);
        self.supabase.request(Method::GET, &path, None).await
    }

    /// Adds a doctor. Duplicate emails are not checked.
    pub async fn add_doctor(&self, mut doctor: Doctor) -> Result<InsertResult> {
        debug!("Adding doctor: {}", doctor.email);

        doctor.id = None;

        let inserted: Vec<Doctor> = self.supabase.request_with_headers(
            Method::POST,
            DOCTORS,
            Some(json!(doctor)),
            Some(prefer(RETURN_REPRESENTATION)),
        ).await?;

        let created = inserted.first()
            .ok_or_else(|| anyhow!("Failed to add doctor {}", doctor.email))?;

        info!("Doctor {} added", created.email);
        Ok(InsertResult::new(created.id))
    }

    /// Removes one doctor by email. An unknown email yields `deletedCount: 0`.
    pub async fn remove_doctor(&self, email: &str) -> Result<DeleteResult> {
        debug!("Removing doctor: {}", email);

        // Emails are not unique here, so pick a single row by id before deleting.
        let lookup = format!("{}?select=id&email=eq.{}&order=id.asc&limit=1", DOCTORS, encode(email));
        let rows: Vec<serde_json::Value> = self.supabase.request(Method::GET, &lookup, None).await?;

        let Some(id) = rows.first().and_then(|row| row["id"].as_i64()) else {
            debug!("No doctor with email {}", email);
            return Ok(DeleteResult::new(0));
        };

        let path = format!("{}?id=eq.{}", DOCTORS, id);
        let deleted: Vec<Doctor> = self.supabase.request_with_headers(
            Method::DELETE,
            &path,
            None,
            Some(prefer(RETURN_REPRESENTATION)),
        ).await?;

        info!("Removed {} doctor record(s) for {}", deleted.len(), email);
        Ok(DeleteResult::new(deleted.len() as u64))
    }
}
