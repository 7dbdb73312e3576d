//! Catalog API - versioned product catalog over REST

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::common::RetryConfig;
use domain_products::{FixtureProductStore, InMemoryProductStore, PgProductStore};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StoreKind};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(store = %config.store, "Starting {} v{}", config.app.name, config.app.version);

    let mut state = AppState { db: None };

    let routes = match config.store {
        StoreKind::Postgres => {
            let pg = config
                .postgres
                .as_ref()
                .ok_or_else(|| eyre::eyre!("PostgreSQL configuration missing"))?;

            let db = database::postgres::connect_with_retry(pg, RetryConfig::default()).await?;
            database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

            state.db = Some(db.clone());
            api::routes(PgProductStore::new(db, config.store_timeout))
        }
        StoreKind::Memory => api::routes(InMemoryProductStore::seeded()),
        StoreKind::Fixture => api::routes(FixtureProductStore::new()),
    };

    let router = create_router::<openapi::ApiDoc>(routes.api, &config.router_options());
    let app = router
        .merge(health_router(config.app))
        .merge(routes.probes);

    info!("Starting Catalog API on {}", config.server.address());

    create_production_app(app, &config.server, state.close())
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
