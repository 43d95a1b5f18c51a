use super::handlers::{get_error, health, health_live, list_errors, openapi_json, versions};
use crate::metrics;
use crate::server::{Route, RouteGroup, Server, ServerError};

/// `/health` checks
pub struct HealthRoutes;

impl RouteGroup for HealthRoutes {
    fn routes(&self) -> Vec<Route> {
        vec![
            Route::get("/", "health", health),
            Route::get("/live", "health_live", health_live),
        ]
    }
}

/// `/_matrix/client` endpoints
pub struct ClientRoutes;

impl RouteGroup for ClientRoutes {
    fn routes(&self) -> Vec<Route> {
        vec![Route::get("/versions", "versions", versions)]
    }
}

/// `/_matrix/errors` documents
pub struct ErrorRoutes;

impl RouteGroup for ErrorRoutes {
    fn routes(&self) -> Vec<Route> {
        vec![
            Route::get("/", "list_errors", list_errors),
            Route::get("/:code", "get_error", get_error),
        ]
    }
}

/// OpenAPI and Prometheus endpoints
pub struct OpsRoutes;

impl RouteGroup for OpsRoutes {
    fn routes(&self) -> Vec<Route> {
        vec![
            Route::get("/api-docs/openapi.json", "openapi", openapi_json),
            Route::get("/metrics", "metrics", metrics::metrics_handler),
        ]
    }
}

/// Mount every built-in route group
pub fn mount_builtin(server: &mut Server) -> Result<(), ServerError> {
    server.mount("/health", &HealthRoutes)?;
    server.mount("/_matrix/client", &ClientRoutes)?;
    server.mount("/_matrix/errors", &ErrorRoutes)?;
    server.mount("/", &OpsRoutes)?;
    Ok(())
}
