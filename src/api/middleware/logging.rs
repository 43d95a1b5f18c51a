use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Query parameters whose values never reach the logs
const SENSITIVE_PARAMS: &[&str] = &["access_token", "token", "password", "secret"];

/// Middleware to log all HTTP requests and responses with structured data
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or("").to_string();
    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = %sanitize_query(&query),
        user_agent = %user_agent,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if completes_at_info(status) {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    } else {
        debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            duration_ms = %duration.as_millis(),
            "Request completed"
        );
    }

    response
}

/// Error responses are logged once, with their errcode, by the error hook
fn completes_at_info(status: StatusCode) -> bool {
    !(status.is_client_error() || status.is_server_error())
}

/// Mask the values of sensitive query parameters
fn sanitize_query(query: &str) -> String {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if SENSITIVE_PARAMS.contains(&key) => format!("{}=***", key),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_stay_below_info() {
        assert!(completes_at_info(StatusCode::OK));
        assert!(completes_at_info(StatusCode::NO_CONTENT));
        assert!(!completes_at_info(StatusCode::NOT_FOUND));
        assert!(!completes_at_info(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_sanitize_query() {
        assert_eq!(sanitize_query(""), "");
        assert_eq!(sanitize_query("since=s72594_4483_1934"), "since=s72594_4483_1934");
        assert_eq!(sanitize_query("access_token=syt_abc"), "access_token=***");
        assert_eq!(
            sanitize_query("filter=0&access_token=syt_abc&timeout=30000"),
            "filter=0&access_token=***&timeout=30000"
        );
        assert_eq!(
            sanitize_query("token=a&password=b"),
            "token=***&password=***"
        );
    }
}
