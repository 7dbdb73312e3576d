use axum::http::{HeaderName, HeaderValue, Method, header};
use std::str::FromStr;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Allowed CORS origins, parsed from a comma-separated list.
///
/// An empty list or `*` allows any origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    #[default]
    Any,
    List(Vec<HeaderValue>),
}

impl FromStr for CorsOrigins {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
        if parts.is_empty() || parts.contains(&"*") {
            return Ok(Self::Any);
        }

        parts
            .into_iter()
            .map(|p| HeaderValue::from_str(p).map_err(|e| format!("invalid origin '{}': {}", p, e)))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::List)
    }
}

/// CORS layer for the API.
///
/// - Methods: GET, POST, PUT, DELETE, PATCH, OPTIONS
/// - Headers: Content-Type, Accept, api-version
/// - Exposed: Location, api-supported-versions
/// - Max age: 1 hour
pub fn create_cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("api-version"),
        ])
        .expose_headers([
            header::LOCATION,
            HeaderName::from_static("api-supported-versions"),
        ])
        .max_age(Duration::from_secs(3600));

    match origins {
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::List(list) => layer.allow_origin(AllowOrigin::list(list.clone())),
    }
}
