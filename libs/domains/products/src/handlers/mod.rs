//! HTTP routing for both API versions.
//!
//! Versioned routes live at `/v1/products` and `/v2/products`. The
//! unversioned `/products` alias picks the version from the `api-version`
//! query parameter or header (query wins, default 1.0) and forwards the
//! request to the matching versioned route.

pub mod v1;
pub mod v2;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{ConnectInfo, OriginalUri, Query, Request, State},
    http::{HeaderName, HeaderValue, Uri, uri::InvalidUri},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::any,
};
use axum_helpers::AppError;
use serde::Deserialize;
use tower::ServiceExt;
use tracing::debug;

use crate::contract::ApiVersion;
use crate::repository::ProductStore;
use crate::service::ProductService;

pub const API_VERSION_HEADER: &str = "api-version";
pub const SUPPORTED_VERSIONS_HEADER: &str = "api-supported-versions";

/// Router for every products route, meant to be nested under `/api`.
pub fn router<S: ProductStore>(service: Arc<ProductService<S>>) -> Router {
    let versioned = Router::new()
        .nest("/v1/products", v1::router(Arc::clone(&service)))
        .nest("/v2/products", v2::router(service));

    Router::new()
        .route("/products", any(forward_unversioned))
        .route("/products/{id}", any(forward_unversioned))
        .with_state(versioned.clone())
        .merge(versioned)
        .layer(map_response(report_api_versions))
}

#[derive(Debug, Deserialize)]
struct VersionQuery {
    #[serde(rename = "api-version")]
    api_version: Option<String>,
}

/// Version requested by the client, or the default when none is given.
pub fn requested_version(req: &Request) -> Result<ApiVersion, AppError> {
    let from_query = Query::<VersionQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(query)| query.api_version);
    let requested = from_query.or_else(|| {
        req.headers()
            .get(API_VERSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    });

    match requested {
        None => Ok(ApiVersion::default()),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::UnsupportedApiVersion(raw)),
    }
}

async fn forward_unversioned(State(versioned): State<Router>, req: Request) -> Response {
    let version = match requested_version(&req) {
        Ok(version) => version,
        Err(e) => return e.into_response(),
    };

    let original = req
        .extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.clone())
        .unwrap_or_else(|| req.uri().clone());

    let (local, external) = match versioned_uris(&original, req.uri(), version) {
        Ok(uris) => uris,
        Err(e) => return AppError::InvalidArgument(e.to_string()).into_response(),
    };
    debug!(from = %original, to = %external, "Forwarding unversioned request");

    versioned.oneshot(rerouted(req, local, external)).await.into_response()
}

/// A fresh request for `uri` carrying the method, headers and body of `req`.
///
/// Extensions are dropped apart from the client address: path parameters
/// captured by the alias route would otherwise be added to the ones the
/// versioned route captures.
fn rerouted(req: Request, uri: Uri, external: Uri) -> Request {
    let (parts, body) = req.into_parts();
    let mut forwarded = Request::new(body);
    *forwarded.method_mut() = parts.method;
    *forwarded.uri_mut() = uri;
    *forwarded.version_mut() = parts.version;
    *forwarded.headers_mut() = parts.headers;

    if let Some(connect_info) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
        forwarded.extensions_mut().insert(connect_info.clone());
    }
    forwarded.extensions_mut().insert(OriginalUri(external));
    forwarded
}

/// Rewrites `/products...` into `/v{n}/products...`, both for the local
/// router and for the externally visible URI (prefix kept).
fn versioned_uris(original: &Uri, local: &Uri, version: ApiVersion) -> Result<(Uri, Uri), InvalidUri> {
    let path = local.path();
    let prefix = original.path().strip_suffix(path).unwrap_or_default();
    let query = local.query().map(|q| format!("?{}", q)).unwrap_or_default();

    let local = format!("/{}{}{}", version.segment(), path, query).parse()?;
    let external = format!("{}/{}{}{}", prefix, version.segment(), path, query).parse()?;
    Ok((local, external))
}

async fn report_api_versions(mut response: Response) -> Response {
    response.headers_mut().insert(
        HeaderName::from_static(SUPPORTED_VERSIONS_HEADER),
        HeaderValue::from_static(ApiVersion::SUPPORTED),
    );
    response
}
