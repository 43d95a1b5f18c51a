use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use tracing::{error, warn};

use super::catalogue::{lookup, ErrorDescriptor};
use super::failure::Failure;
use super::response::{render_response, ErrorFormat, ErrorReport};
use crate::metrics::ERROR_RESPONSES_TOTAL;

/// Global error hook: every 4xx/5xx response leaves with a catalogue body
///
/// Responses produced by [`Failure`] are re-rendered in the configured shape.
/// Framework-generated errors (unmatched methods, extractor rejections, caught
/// panics) have their status looked up in the catalogue. Other JSON bodies pass
/// through untouched.
pub async fn handle_errors(
    State(format): State<ErrorFormat>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let report = response.extensions_mut().remove::<ErrorReport>();
    let (descriptor, cause) = match report {
        Some(report) => (report.descriptor, report.cause),
        None if is_json(response.headers()) => return response,
        None => (lookup(status.as_u16()).clone(), None),
    };

    log_failure(status, &descriptor, cause.as_deref(), method.as_str(), &path);
    ERROR_RESPONSES_TOTAL
        .with_label_values(&[descriptor.code.as_str()])
        .inc();

    let mut rendered = render_response(format, status, &descriptor);
    for (name, value) in response.headers() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rendered.headers_mut().append(name.clone(), value.clone());
        }
    }
    rendered
}

/// Router fallback for unmatched paths
pub async fn not_found() -> Failure {
    Failure::not_found()
}

/// Converts a caught handler panic into an internal server error
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    Failure::Other(anyhow::anyhow!("handler panicked: {}", message)).into_response()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("json"))
        .unwrap_or(false)
}

fn log_failure(
    status: StatusCode,
    descriptor: &ErrorDescriptor,
    cause: Option<&str>,
    method: &str,
    path: &str,
) {
    let cause = cause.unwrap_or("");
    if status.is_server_error() {
        error!(
            status = %status.as_u16(),
            errcode = %descriptor.code,
            method = %method,
            path = %path,
            cause = %cause,
            "Request failed"
        );
    } else {
        warn!(
            status = %status.as_u16(),
            errcode = %descriptor.code,
            method = %method,
            path = %path,
            "Request rejected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_json() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json(&headers));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(is_json(&headers));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/hal+json"));
        assert!(is_json(&headers));
    }

    #[test]
    fn test_handle_panic_is_internal_error() {
        let response = handle_panic(Box::new("kaboom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let report = response.extensions().get::<ErrorReport>().unwrap();
        assert_eq!(report.cause.as_deref(), Some("handler panicked: kaboom"));
    }
}
