use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::catalogue::ErrorDescriptor;
use super::codes::ErrorCode;
use crate::hal::{HalDocument, HAL_JSON};

/// Flat Matrix error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Error code for programmatic handling
    pub errcode: ErrorCode,
    /// Human-readable error message
    pub error: String,
    /// Additional context (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
}

impl From<&ErrorDescriptor> for ErrorBody {
    fn from(descriptor: &ErrorDescriptor) -> Self {
        Self {
            errcode: descriptor.code,
            error: descriptor.message.to_string(),
            extra: descriptor.extra.clone(),
        }
    }
}

/// Which shape error bodies are written in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorFormat {
    /// `{"errcode", "error", "extra"?}`
    #[default]
    Flat,
    /// HAL document with a `self` link to the error's page
    Hal,
}

impl FromStr for ErrorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "json" => Ok(Self::Flat),
            "hal" => Ok(Self::Hal),
            other => Err(format!("unknown error format '{}' (expected flat or hal)", other)),
        }
    }
}

impl fmt::Display for ErrorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Hal => write!(f, "hal"),
        }
    }
}

/// Flat rendering of a descriptor
pub fn render_flat(descriptor: &ErrorDescriptor) -> ErrorBody {
    ErrorBody::from(descriptor)
}

/// HAL rendering of a descriptor
pub fn render_hal(descriptor: &ErrorDescriptor) -> HalDocument {
    let code = descriptor.code.as_str();
    let doc = HalDocument::new(descriptor.href(), Some(code.to_string()))
        .property("errcode", code)
        .property("error", descriptor.message);

    match &descriptor.extra {
        Some(extra) => doc.property("extra", extra.clone()),
        None => doc,
    }
}

/// Write `descriptor` as a response with `status`, in the given shape
pub fn render_response(
    format: ErrorFormat,
    status: StatusCode,
    descriptor: &ErrorDescriptor,
) -> Response {
    match format {
        ErrorFormat::Flat => (status, Json(render_flat(descriptor))).into_response(),
        ErrorFormat::Hal => {
            let mut response = (status, Json(render_hal(descriptor))).into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(HAL_JSON));
            response
        }
    }
}

/// Attached to error responses so the error hook can re-render them
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub descriptor: ErrorDescriptor,
    /// Internal cause, logged but never sent to clients
    pub cause: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::catalogue::lookup;
    use serde_json::json;

    #[test]
    fn test_flat_round_trip_has_no_extra() {
        let json = serde_json::to_value(render_flat(lookup(404))).unwrap();
        assert_eq!(json, json!({"errcode": "M_NOT_FOUND", "error": "Not Found"}));

        let body: ErrorBody = serde_json::from_value(json).unwrap();
        assert_eq!(body.errcode, ErrorCode::NotFound);
        assert_eq!(body.error, "Not Found");
        assert!(body.extra.is_none());
    }

    #[test]
    fn test_flat_with_extra() {
        let descriptor = lookup(400).with_extra(json!({"field": "username"}));
        let json = serde_json::to_value(render_flat(&descriptor)).unwrap();
        assert_eq!(json["errcode"], "M_BAD_REQUEST");
        assert_eq!(json["extra"]["field"], "username");
    }

    #[test]
    fn test_hal_self_link() {
        let doc = render_hal(lookup(404));
        let link = doc.self_link().unwrap();
        assert_eq!(link.href, "/_matrix/errors/m_not_found");
        assert_eq!(link.title.as_deref(), Some("M_NOT_FOUND"));

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["errcode"], "M_NOT_FOUND");
        assert_eq!(json["error"], "Not Found");
        assert!(json.get("extra").is_none());
    }

    #[test]
    fn test_error_format_parse() {
        assert_eq!("flat".parse::<ErrorFormat>(), Ok(ErrorFormat::Flat));
        assert_eq!(" HAL ".parse::<ErrorFormat>(), Ok(ErrorFormat::Hal));
        assert!("xml".parse::<ErrorFormat>().is_err());
    }

    #[test]
    fn test_render_response_status_and_content_type() {
        let response = render_response(ErrorFormat::Hal, StatusCode::GONE, lookup(410));
        assert_eq!(response.status(), StatusCode::GONE);
        assert_eq!(response.headers()[header::CONTENT_TYPE], HAL_JSON);

        let response = render_response(ErrorFormat::Flat, StatusCode::GONE, lookup(410));
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }
}
