use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

use super::catalogue::{lookup, ErrorDescriptor};
use super::response::{render_response, ErrorFormat, ErrorReport};

/// Failures a handler can return; each one maps onto the catalogue by status
#[derive(Debug, Error)]
pub enum Failure {
    /// Known HTTP failure
    #[error("{0}")]
    Status(StatusCode),

    /// Known HTTP failure with diagnostic context for the client
    #[error("{status}: {extra}")]
    WithExtra { status: StatusCode, extra: Value },

    /// Anything else; reported as an internal server error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Failure {
    pub fn bad_request(extra: Value) -> Self {
        Self::WithExtra {
            status: StatusCode::BAD_REQUEST,
            extra,
        }
    }

    pub fn not_found() -> Self {
        Self::Status(StatusCode::NOT_FOUND)
    }

    pub fn forbidden() -> Self {
        Self::Status(StatusCode::FORBIDDEN)
    }

    /// Status this failure is reported with (500 when it carries none)
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Status(status) | Self::WithExtra { status, .. } => *status,
            Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Catalogue descriptor for this failure, with `extra` attached if any
    pub fn descriptor(&self) -> ErrorDescriptor {
        let base = lookup(self.status().as_u16());
        match self {
            Self::WithExtra { extra, .. } => base.with_extra(extra.clone()),
            _ => base.clone(),
        }
    }
}

impl From<StatusCode> for Failure {
    fn from(status: StatusCode) -> Self {
        Self::Status(status)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let status = self.status();
        let descriptor = self.descriptor();
        let cause = match &self {
            Self::Other(err) => Some(format!("{:#}", err)),
            _ => None,
        };

        let mut response = render_response(ErrorFormat::Flat, status, &descriptor);
        response
            .extensions_mut()
            .insert(ErrorReport { descriptor, cause });
        response
    }
}
