use anyhow::Result;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_database::supabase::{encode, prefer, SupabaseClient, RETURN_REPRESENTATION};
use shared_models::auth::{User, ADMIN_ROLE};
use shared_models::store::UpdateResult;

use crate::models::SignInProfile;

const USERS: &str = "/rest/v1/users";

const UPSERT_MERGE: &str = "return=representation,resolution=merge-duplicates";

pub struct UserService {
    supabase: SupabaseClient,
}

impl UserService {
    pub fn new(supabase: &SupabaseClient) -> Self {
        Self {
            supabase: supabase.clone(),
        }
    }

    /// Creates the user or overwrites the profile fields present in `profile`.
    /// Columns not present in `profile` (including `role`) are left untouched.
    ///
    /// The created-or-matched report comes from a lookup made before the upsert,
    /// so two concurrent first sign-ins for one email may both report
    /// `upsertedCount: 1`. The stored row is the same either way.
    pub async fn upsert_user(&self, email: &str, profile: SignInProfile) -> Result<UpdateResult> {
        debug!("Upserting user {}", email);

        let existed = self.supabase.find_user(email).await?.is_some();

        let mut row = match json!(profile) {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        row.insert("email".to_string(), json!(email));

        let path = format!("{}?on_conflict=email", USERS);
        let written: Vec<User> = self.supabase.request_with_headers(
            Method::POST,
            &path,
            Some(Value::Object(row)),
            Some(prefer(UPSERT_MERGE)),
        ).await?;

        let result = if existed {
            UpdateResult::matched(written.len() as u64)
        } else {
            info!("Created user {}", email);
            UpdateResult::upserted(written.first().and_then(|user| user.id))
        };

        Ok(result)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        debug!("Listing users");

        let path = format!("{}?order=id.asc", USERS);
        self.supabase.request(Method::GET, &path, None).await
    }

    /// Sets `role = admin` on the user with `email`. Matches nothing if the user is unknown.
    pub async fn promote_to_admin(&self, email: &str) -> Result<UpdateResult> {
        debug!("Promoting {} to admin", email);

        let path = format!("{}?email=eq.{}", USERS, encode(email));
        let updated: Vec<User> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            Some(json!({ "role": ADMIN_ROLE })),
            Some(prefer(RETURN_REPRESENTATION)),
        ).await?;

        if !updated.is_empty() {
            info!("{} is now an admin", email);
        }

        Ok(UpdateResult::matched(updated.len() as u64))
    }

    /// `false` for unknown users.
    pub async fn is_admin(&self, email: &str) -> Result<bool> {
        let user = self.supabase.find_user(email).await?;
        Ok(user.map(|user| user.is_admin()).unwrap_or(false))
    }
}
