use utoipa::OpenApi;

use crate::api::handlers::{HealthResponse, VersionsResponse};
use crate::errors::{ErrorBody, ErrorCode};
use crate::hal::HalLink;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Matrix Scaffold",
        version = "0.1.0",
        description = "A scaffold for Matrix-style HTTP APIs. Every failure is answered with a Matrix errcode body, either flat JSON or a HAL document linking to /_matrix/errors/{code}.",
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::health_live,
        crate::api::handlers::versions,
        crate::api::handlers::list_errors,
        crate::api::handlers::get_error,
    ),
    components(
        schemas(
            ErrorBody,
            ErrorCode,
            HalLink,
            HealthResponse,
            VersionsResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "client", description = "Client-server API endpoints"),
        (name = "errors", description = "Error catalogue documents"),
    )
)]
pub struct ApiDoc;
