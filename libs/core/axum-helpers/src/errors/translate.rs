//! Rendering of uncaught failures.
//!
//! Two strategies exist:
//!
//! - [`ErrorStrategy::Problem`]: the failure becomes a problem document
//!   (400 for invalid arguments, 503 otherwise) and the client's address and
//!   reverse-DNS host are written to the audit log.
//! - [`ErrorStrategy::Middleware`]: the failure is logged and the client gets
//!   a fixed 500 body.
//!
//! Responses without a [`Failure`] extension pass through untouched.

use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::any::Any;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use strum::{Display, EnumString};
use tracing::{error, info};

use super::Failure;
use crate::audit::{AuditEvent, AuditOutcome, HostResolver, client_ip, extract_user_agent};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ErrorStrategy {
    #[default]
    Problem,
    Middleware,
}

/// State of the [`translate_failures`] middleware.
#[derive(Debug, Clone)]
pub struct FailureTranslator {
    pub strategy: ErrorStrategy,
    pub resolver: HostResolver,
    /// Take the client address from `X-Forwarded-For` / `X-Real-IP`
    pub trust_forwarded: bool,
}

impl FailureTranslator {
    pub fn new(strategy: ErrorStrategy, dns_timeout: Duration) -> Self {
        Self {
            strategy,
            resolver: HostResolver::new(dns_timeout, HostResolver::DEFAULT_CONCURRENCY),
            trust_forwarded: false,
        }
    }

    pub fn with_trusted_forwarded_headers(mut self, trust: bool) -> Self {
        self.trust_forwarded = trust;
        self
    }
}

impl Default for FailureTranslator {
    fn default() -> Self {
        Self::new(ErrorStrategy::default(), Duration::from_millis(500))
    }
}

/// Fixed body of the middleware strategy.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub status_code: u16,
    pub message: &'static str,
}

impl Default for ErrorDetails {
    fn default() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            message: "Internal Server Error.",
        }
    }
}

pub async fn translate_failures(
    State(translator): State<FailureTranslator>,
    request: Request,
    next: Next,
) -> Response {
    let socket = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(request.headers(), socket, translator.trust_forwarded);
    let user_agent = extract_user_agent(request.headers());
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let Some(failure) = response.extensions().get::<Failure>().cloned() else {
        return response;
    };

    match translator.strategy {
        ErrorStrategy::Problem => {
            let host = match ip {
                Some(ip) => translator.resolver.resolve(ip).await,
                None => None,
            };
            render_problem(failure, ip, host, user_agent, path)
        }
        ErrorStrategy::Middleware => {
            error!(
                ip = ip.map(|ip| ip.to_string()),
                path = %path,
                "An exception was caught: {}",
                failure.message
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorDetails::default())).into_response()
        }
    }
}

fn render_problem(
    failure: Failure,
    ip: Option<IpAddr>,
    host: Option<String>,
    user_agent: Option<String>,
    path: String,
) -> Response {
    let status = failure.kind.status();

    info!(
        ip = ip.map(|ip| ip.to_string()),
        host = host.as_deref(),
        "Client '{}' with ip '{}'",
        host.as_deref().unwrap_or("unknown"),
        ip.map(|ip| ip.to_string()).unwrap_or_else(|| "unknown".to_string())
    );
    error!(
        status = status.as_u16(),
        "An exception was caught with code '{}' and message '{}'",
        status,
        failure.message
    );

    AuditEvent::new("request.failure", Some(path), AuditOutcome::Failure)
        .with_ip(ip.map(|ip| ip.to_string()))
        .with_host(host)
        .with_user_agent(user_agent)
        .with_details(serde_json::json!({ "status": status.as_u16(), "message": &failure.message }))
        .log();

    failure.problem().into_response()
}

/// Panic handler for `CatchPanicLayer::custom`; turns the panic into an
/// unavailable [`Failure`].
pub fn panic_failure(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };

    Failure::unavailable(message).into_response()
}
