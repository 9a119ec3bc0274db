use std::sync::Arc;

use bookrack_auth::CredentialVerifier;
use sqlx::SqlitePool;

use crate::settings::Settings;

/// Shared application state handed to every route handler.
///
/// Built once at startup; there are no ambient globals. Handlers take
/// per-request repository handles off the pool.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: SqlitePool,
    pub credentials: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(
        settings: Arc<Settings>,
        db: SqlitePool,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            settings,
            db,
            credentials,
        }
    }
}
