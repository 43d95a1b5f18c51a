//! Server bootstrap over axum: modules, the error hook and the serve loop

pub mod error;
pub mod module;
pub mod route;

pub use error::ServerError;
pub use module::Module;
pub use route::{Route, RouteGroup, RouteMeta};

use axum::{
    extract::Request,
    http::{header, Method},
    middleware,
    response::IntoResponse,
    routing::{MethodRouter, Route as AxumRoute},
    Extension, Router,
};
use std::collections::{BTreeMap, HashSet};
use std::convert::Infallible;
use tokio::signal;
use tower::{Layer, Service};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::api::middleware::logging_middleware;
use crate::config::Config;
use crate::errors::{self, handle_errors, handle_panic, not_found};
use crate::metrics;

/// Service identity exposed to handlers as a request extension
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub instance_id: String,
}

type ApplyLayer = Box<dyn FnOnce(Router) -> Router + Send>;

/// Server is the core process
pub struct Server {
    config: Config,
    modules: Vec<Module>,
    endpoints: BTreeMap<String, MethodRouter>,
    declared: HashSet<(Method, String)>,
    layers: Vec<ApplyLayer>,
}

impl Server {
    /// Create a server from configuration; builds the error catalogue up front
    pub fn new(config: Config) -> Self {
        errors::catalogue::init();
        metrics::registry::init_metrics();

        Self {
            config,
            modules: Vec::new(),
            endpoints: BTreeMap::new(),
            declared: HashSet::new(),
            layers: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a [`Module`] mounting `group` under `prefix`
    pub fn new_module(
        &self,
        prefix: impl Into<String>,
        group: &dyn RouteGroup,
    ) -> Result<Module, ServerError> {
        Module::new(prefix, group)
    }

    /// Add a module to the set of exposed routes
    pub fn load(&mut self, mut module: Module) -> Result<(), ServerError> {
        let full_routes = module.full_routes();
        for meta in &full_routes {
            if self.declared.contains(&(meta.method.clone(), meta.path.clone())) {
                return Err(ServerError::DuplicateRoute {
                    method: meta.method.clone(),
                    path: meta.path.clone(),
                });
            }
        }
        let endpoints = module.take_endpoints();
        for path in endpoints.keys() {
            module::check_conflicts(path, self.endpoints.keys())?;
        }
        self.declared
            .extend(full_routes.into_iter().map(|meta| (meta.method, meta.path)));

        for (path, handler) in endpoints {
            let merged = match self.endpoints.remove(&path) {
                Some(existing) => existing.merge(handler),
                None => handler,
            };
            self.endpoints.insert(path, merged);
        }

        info!(
            prefix = %module.prefix(),
            routes = module.routes().len(),
            "Module loaded"
        );
        self.modules.push(module);
        Ok(())
    }

    /// Build `group` under `prefix` and load it
    pub fn mount(
        &mut self,
        prefix: impl Into<String>,
        group: &dyn RouteGroup,
    ) -> Result<(), ServerError> {
        let module = self.new_module(prefix, group)?;
        self.load(module)
    }

    /// Apply a tower layer to every route, inside the error hook
    pub fn layer<L>(&mut self, layer: L)
    where
        L: Layer<AxumRoute> + Clone + Send + 'static,
        L::Service: Service<Request> + Clone + Send + 'static,
        <L::Service as Service<Request>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request>>::Error: Into<Infallible> + 'static,
        <L::Service as Service<Request>>::Future: Send + 'static,
    {
        self.layers
            .push(Box::new(move |router: Router| router.layer(layer)));
    }

    /// Metadata of every loaded route, with full paths
    pub fn routes(&self) -> Vec<RouteMeta> {
        self.modules.iter().flat_map(Module::full_routes).collect()
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Assemble the axum router with the fallback and all middleware
    pub fn into_router(self) -> Router {
        let info = ServiceInfo {
            service: env!("CARGO_PKG_NAME"),
            instance_id: self.config.server.instance_id.clone(),
        };

        let mut router = self
            .endpoints
            .into_iter()
            .fold(Router::new(), |router, (path, handler)| {
                router.route(&path, handler)
            })
            .fallback(not_found);

        for apply in self.layers {
            router = apply(router);
        }

        // Headers the client-server API requires on every response
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::HeaderName::from_static("x-requested-with"),
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
            ]);

        // Order matters: panics are caught inside the error hook so they get a catalogue body
        router
            .layer(Extension(info))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(middleware::from_fn_with_state(
                self.config.errors.format,
                handle_errors,
            ))
            .layer(middleware::from_fn(logging_middleware))
            .layer(middleware::from_fn(metrics::middleware::track_metrics))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Begin serving traffic until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<(), ServerError> {
        let addr = self.config.server_address();
        let hide_banner = self.config.server.hide_banner;
        let hide_port = self.config.server.hide_port;

        if !hide_banner {
            info!(
                "Starting {} v{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            );
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        if !hide_port {
            info!("Server listening on {}", addr);
        }

        let app = self.into_router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)?;

        info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Starting graceful shutdown...");
}
