//! Application state management

use database::postgres::DatabaseConnection;
use tracing::{info, warn};

/// Resources owned by the process for its whole lifetime
pub struct AppState {
    /// Present when products live in Postgres
    pub db: Option<DatabaseConnection>,
}

impl AppState {
    /// Release external resources during shutdown.
    pub async fn close(self) {
        let Some(db) = self.db else {
            return;
        };
        info!("Shutting down: closing PostgreSQL connections");
        match db.close().await {
            Ok(()) => info!("PostgreSQL connection closed"),
            Err(e) => warn!("Failed to close PostgreSQL connection: {}", e),
        }
    }
}
