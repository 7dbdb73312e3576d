//! Configuration for Catalog API

use std::time::Duration;

use axum_helpers::{CorsOrigins, ErrorStrategy, FailureTranslator, RouterOptions};
use core_config::{AppInfo, FromEnv, app_info, env_millis, env_parse, env_secs, server::ServerConfig};
use database::postgres::PostgresConfig;
use strum::{Display, EnumString};

pub use core_config::Environment;

/// Backing store for products, selected with `PRODUCT_STORE`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreKind {
    #[default]
    Postgres,
    Memory,
    Fixture,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub store: StoreKind,
    /// Only loaded when `store` is [`StoreKind::Postgres`]
    pub postgres: Option<PostgresConfig>,
    pub store_timeout: Duration,
    pub dns_lookup_timeout: Duration,
    pub request_timeout: Duration,
    pub error_strategy: ErrorStrategy,
    /// Audit logs take the client address from proxy headers
    pub trust_forwarded_headers: bool,
    pub docs_enabled: bool,
    pub cors_origins: CorsOrigins,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let store: StoreKind = env_parse("PRODUCT_STORE", StoreKind::default())?;
        let postgres = match store {
            StoreKind::Postgres => Some(PostgresConfig::from_env()?),
            StoreKind::Memory | StoreKind::Fixture => None,
        };

        Ok(Self {
            app: app_info!(),
            server,
            store,
            postgres,
            store_timeout: env_millis("STORE_TIMEOUT_MS", 5_000)?,
            dns_lookup_timeout: env_millis("DNS_LOOKUP_TIMEOUT_MS", 500)?,
            request_timeout: env_secs("REQUEST_TIMEOUT_SECS", 30)?,
            error_strategy: env_parse("ERROR_STRATEGY", ErrorStrategy::default())?,
            trust_forwarded_headers: env_parse("TRUST_FORWARDED_HEADERS", false)?,
            docs_enabled: env_parse("API_DOCS_ENABLED", environment.is_development())?,
            cors_origins: env_parse("CORS_ALLOWED_ORIGIN", CorsOrigins::Any)?,
            environment,
        })
    }

    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            docs_enabled: self.docs_enabled,
            cors_origins: self.cors_origins.clone(),
            request_timeout: self.request_timeout,
            failures: FailureTranslator::new(self.error_strategy, self.dns_lookup_timeout)
                .with_trusted_forwarded_headers(self.trust_forwarded_headers),
        }
    }
}
