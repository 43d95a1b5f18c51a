use axum::http::Method;
use thiserror::Error;

/// Failures while assembling or starting the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid module prefix '{0}': must start with '/'")]
    InvalidPrefix(String),

    #[error("invalid route path '{0}': must start with '/'")]
    InvalidPath(String),

    #[error("route {method} {path} declared more than once")]
    DuplicateRoute { method: Method, path: String },

    #[error("route {path} conflicts with {existing}")]
    ConflictingRoute { path: String, existing: String },

    #[error("unsupported route method {0}")]
    UnsupportedMethod(Method),

    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Serve(#[source] std::io::Error),
}
