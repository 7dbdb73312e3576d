//! Audit logging of failed requests.
//!
//! Events are emitted on the `audit` tracing target so a subscriber can route
//! them separately from application logs.
//!
//! # Example
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome};
//!
//! AuditEvent::new("request.failure", Some("/api/v1/products".to_string()), AuditOutcome::Failure)
//!     .with_ip(Some("10.0.0.7".to_string()))
//!     .with_host(Some("build-agent.local".to_string()))
//!     .log();
//! ```

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
}

#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Action performed (e.g., "request.failure")
    pub action: String,
    /// Resource affected, usually the request path
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    /// Reverse-DNS name of `ip_address`
    pub host_name: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<String>, resource: Option<String>, outcome: AuditOutcome) -> Self {
        Self {
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            host_name: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    pub fn with_ip(mut self, ip: Option<String>) -> Self {
        self.ip_address = ip;
        self
    }

    pub fn with_host(mut self, host: Option<String>) -> Self {
        self.host_name = host;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    /// Emit the event on the `audit` target.
    pub fn log(self) {
        tracing::info!(
            target: "audit",
            action = %self.action,
            resource = self.resource,
            outcome = ?self.outcome,
            ip = self.ip_address,
            host = self.host_name,
            user_agent = self.user_agent,
            timestamp = %self.timestamp,
            details = ?self.details,
            "{}",
            serde_json::to_string(&self).unwrap_or_else(|_| "Failed to serialize audit event".to_string())
        );
    }
}

/// First address of `X-Forwarded-For`, falling back to `X-Real-IP`.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
        })
}

pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Client address of a request.
///
/// The socket peer is authoritative. `X-Forwarded-For` / `X-Real-IP` are only
/// consulted when `trust_forwarded` is set, i.e. when every request reaches
/// the service through a proxy that overwrites those headers.
///
/// IPv4-mapped IPv6 addresses are reported as plain IPv4.
pub fn client_ip(headers: &HeaderMap, socket: Option<SocketAddr>, trust_forwarded: bool) -> Option<IpAddr> {
    let forwarded = trust_forwarded
        .then(|| extract_ip_from_headers(headers))
        .flatten()
        .and_then(|s| s.parse::<IpAddr>().ok());

    forwarded
        .or_else(|| socket.map(|addr| addr.ip()))
        .map(|ip| ip.to_canonical())
}

/// Reverse-DNS resolver bounded in time and in concurrent lookups.
///
/// The resolver call blocks, so it runs on the blocking pool. A timed-out
/// lookup keeps its permit until the resolver returns; once every permit is
/// taken further lookups are skipped.
#[derive(Debug, Clone)]
pub struct HostResolver {
    limit: Duration,
    permits: Arc<Semaphore>,
}

impl HostResolver {
    pub const DEFAULT_CONCURRENCY: usize = 16;

    pub fn new(limit: Duration, concurrency: usize) -> Self {
        Self {
            limit,
            permits: Arc::new(Semaphore::new(concurrency)),
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Host name of `ip`; any failure, timeout or saturation yields `None`.
    pub async fn resolve(&self, ip: IpAddr) -> Option<String> {
        self.resolve_with(ip, dns_lookup::lookup_addr).await
    }

    async fn resolve_with<F, E>(&self, ip: IpAddr, lookup: F) -> Option<String>
    where
        F: FnOnce(&IpAddr) -> Result<String, E> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let Ok(permit) = Arc::clone(&self.permits).try_acquire_owned() else {
            debug!(%ip, "Reverse DNS lookups saturated, skipping");
            return None;
        };

        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            lookup(&ip).map_err(|e| e.to_string())
        });

        match tokio::time::timeout(self.limit, task).await {
            Ok(Ok(Ok(host))) => Some(host),
            Ok(Ok(Err(e))) => {
                debug!(%ip, "Reverse DNS lookup failed: {}", e);
                None
            }
            Ok(Err(e)) => {
                warn!(%ip, "Reverse DNS task failed: {}", e);
                None
            }
            Err(_) => {
                debug!(%ip, limit = ?self.limit, "Reverse DNS lookup timed out");
                None
            }
        }
    }
}

impl Default for HostResolver {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Self::DEFAULT_CONCURRENCY)
    }
}
