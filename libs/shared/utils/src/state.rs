use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::SupabaseClient;
use shared_models::notification::Notifier;

/// Process-wide state handed to every router. Built once before serving traffic.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: SupabaseClient,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(config: AppConfig, db: SupabaseClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(config),
            db,
            notifier,
        }
    }
}
