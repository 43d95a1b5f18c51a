use axum::{
    extract::Path,
    http::{header, HeaderValue},
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use utoipa::{OpenApi, ToSchema};

use super::openapi::ApiDoc;
use crate::errors::{self, render_hal, Failure, CATALOGUE};
use crate::hal::{HalDocument, HAL_JSON};
use crate::server::ServiceInfo;

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

/// Client-server API versions this scaffold advertises
pub const SUPPORTED_VERSIONS: &[&str] = &["r0.6.0", "r0.6.1"];

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub instance_id: String,
    pub uptime_seconds: u64,
}

/// `GET /_matrix/client/versions` response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VersionsResponse {
    pub versions: Vec<String>,
}

fn health_body(status: &str, info: &ServiceInfo) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        service: info.service.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        instance_id: info.instance_id.clone(),
        uptime_seconds: START_TIME.elapsed().as_secs(),
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(Extension(info): Extension<ServiceInfo>) -> Json<HealthResponse> {
    Json(health_body("healthy", &info))
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse)
    )
)]
pub async fn health_live(Extension(info): Extension<ServiceInfo>) -> Json<HealthResponse> {
    Json(health_body("alive", &info))
}

/// Supported client-server API versions
#[utoipa::path(
    get,
    path = "/_matrix/client/versions",
    tag = "client",
    responses(
        (status = 200, description = "Supported client-server API versions", body = VersionsResponse)
    )
)]
pub async fn versions() -> Json<VersionsResponse> {
    Json(VersionsResponse {
        versions: SUPPORTED_VERSIONS.iter().map(|v| v.to_string()).collect(),
    })
}

/// Every error in the catalogue as one HAL document
#[utoipa::path(
    get,
    path = "/_matrix/errors",
    tag = "errors",
    responses(
        (status = 200, description = "The error catalogue", content_type = "application/hal+json")
    )
)]
pub async fn list_errors() -> Response {
    let items = CATALOGUE
        .entries()
        .map(|(status, descriptor)| render_hal(descriptor).property("status", status))
        .collect();

    let doc = HalDocument::new("/_matrix/errors", Some("errors".to_string()))
        .property("count", CATALOGUE.len())
        .embed("errors", items);

    hal_response(doc)
}

/// A single error document, the target of each error's `self` link
#[utoipa::path(
    get,
    path = "/_matrix/errors/{code}",
    tag = "errors",
    params(
        ("code" = String, Path, description = "Error code, e.g. m_not_found (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Error document", content_type = "application/hal+json"),
        (status = 404, description = "Unknown error code", body = crate::errors::ErrorBody)
    )
)]
pub async fn get_error(Path(code): Path<String>) -> Result<Response, Failure> {
    let descriptor = errors::find(&code).ok_or_else(|| Failure::WithExtra {
        status: axum::http::StatusCode::NOT_FOUND,
        extra: json!({ "errcode": code }),
    })?;

    let doc = render_hal(descriptor).property("status", descriptor.code.status_code());
    Ok(hal_response(doc))
}

/// OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn hal_response(doc: HalDocument) -> Response {
    let mut response = Json(doc).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(HAL_JSON));
    response
}
