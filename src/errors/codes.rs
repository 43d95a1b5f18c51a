use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Matrix-style `errcode` values, one per standard HTTP failure status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ErrorCode {
    /// 400 Bad Request
    #[serde(rename = "M_BAD_REQUEST")]
    BadRequest,
    /// 401 Unauthorized
    #[serde(rename = "M_UNAUTHORIZED")]
    Unauthorized,
    /// 402 Payment Required
    #[serde(rename = "M_PAYMENT_REQUIRED")]
    PaymentRequired,
    /// 403 Forbidden
    #[serde(rename = "M_FORBIDDEN")]
    Forbidden,
    /// 404 Not Found
    #[serde(rename = "M_NOT_FOUND")]
    NotFound,
    /// 405 Method Not Allowed
    #[serde(rename = "M_METHOD_NOT_ALLOWED")]
    MethodNotAllowed,
    /// 406 Not Acceptable
    #[serde(rename = "M_NOT_ACCEPTABLE")]
    NotAcceptable,
    /// 407 Proxy Auth Required
    #[serde(rename = "M_PROXY_AUTH_REQUIRED")]
    ProxyAuthRequired,
    /// 408 Request Timeout
    #[serde(rename = "M_REQUEST_TIMEOUT")]
    RequestTimeout,
    /// 409 Conflict
    #[serde(rename = "M_CONFLICT")]
    Conflict,
    /// 410 Gone
    #[serde(rename = "M_GONE")]
    Gone,
    /// 411 Length Required
    #[serde(rename = "M_LENGTH_REQUIRED")]
    LengthRequired,
    /// 412 Precondition Failed
    #[serde(rename = "M_PRECONDITION_FAILED")]
    PreconditionFailed,
    /// 413 Request Entity Too Large
    #[serde(rename = "M_REQUEST_ENTITY_TOO_LARGE")]
    RequestEntityTooLarge,
    /// 414 Request URI Too Long
    #[serde(rename = "M_REQUEST_URI_TOO_LONG")]
    RequestUriTooLong,
    /// 415 Unsupported Media Type
    #[serde(rename = "M_UNSUPPORTED_MEDIA_TYPE")]
    UnsupportedMediaType,
    /// 416 Requested Range Not Satisfiable
    #[serde(rename = "M_REQUESTED_RANGE_NOT_SATISFIABLE")]
    RequestedRangeNotSatisfiable,
    /// 417 Expectation Failed
    #[serde(rename = "M_EXPECTATION_FAILED")]
    ExpectationFailed,
    /// 418 Teapot
    #[serde(rename = "M_TEAPOT")]
    Teapot,
    /// 421 Misdirected Request
    #[serde(rename = "M_MISDIRECTED_REQUEST")]
    MisdirectedRequest,
    /// 422 Unprocessable Entity
    #[serde(rename = "M_UNPROCESSABLE_ENTITY")]
    UnprocessableEntity,
    /// 423 Locked
    #[serde(rename = "M_LOCKED")]
    Locked,
    /// 424 Failed Dependency
    #[serde(rename = "M_FAILED_DEPENDENCY")]
    FailedDependency,
    /// 425 Too Early
    #[serde(rename = "M_TOO_EARLY")]
    TooEarly,
    /// 426 Upgrade Required
    #[serde(rename = "M_UPGRADE_REQUIRED")]
    UpgradeRequired,
    /// 428 Precondition Required
    #[serde(rename = "M_PRECONDITION_REQUIRED")]
    PreconditionRequired,
    /// 429 Too Many Requests
    #[serde(rename = "M_TOO_MANY_REQUESTS")]
    TooManyRequests,
    /// 431 Request Header Fields Too Large
    #[serde(rename = "M_REQUEST_HEADER_FIELDS_TOO_LARGE")]
    RequestHeaderFieldsTooLarge,
    /// 451 Unavailable For Legal Reasons
    #[serde(rename = "M_UNAVAILABLE_FOR_LEGAL_REASONS")]
    UnavailableForLegalReasons,

    /// 500 Internal Server Error
    #[serde(rename = "M_INTERNAL_SERVER_ERROR")]
    InternalServerError,
    /// 501 Not Implemented
    #[serde(rename = "M_NOT_IMPLEMENTED")]
    NotImplemented,
    /// 502 Bad Gateway
    #[serde(rename = "M_BAD_GATEWAY")]
    BadGateway,
    /// 503 Service Unavailable
    #[serde(rename = "M_SERVICE_UNAVAILABLE")]
    ServiceUnavailable,
    /// 504 Gateway Timeout
    #[serde(rename = "M_GATEWAY_TIMEOUT")]
    GatewayTimeout,
    /// 505 HTTP Version Not Supported
    #[serde(rename = "M_HTTP_VERSION_NOT_SUPPORTED")]
    HttpVersionNotSupported,
    /// 506 Variant Also Negotiates
    #[serde(rename = "M_VARIANT_ALSO_NEGOTIATES")]
    VariantAlsoNegotiates,
    /// 507 Insufficient Storage
    #[serde(rename = "M_INSUFFICIENT_STORAGE")]
    InsufficientStorage,
    /// 508 Loop Detected
    #[serde(rename = "M_LOOP_DETECTED")]
    LoopDetected,
    /// 510 Not Extended
    #[serde(rename = "M_NOT_EXTENDED")]
    NotExtended,
    /// 511 Network Authentication Required
    #[serde(rename = "M_NETWORK_AUTHENTICATION_REQUIRED")]
    NetworkAuthenticationRequired,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorCode {
    /// Every code, ordered by HTTP status
    pub const ALL: [ErrorCode; 40] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::PaymentRequired,
        Self::Forbidden,
        Self::NotFound,
        Self::MethodNotAllowed,
        Self::NotAcceptable,
        Self::ProxyAuthRequired,
        Self::RequestTimeout,
        Self::Conflict,
        Self::Gone,
        Self::LengthRequired,
        Self::PreconditionFailed,
        Self::RequestEntityTooLarge,
        Self::RequestUriTooLong,
        Self::UnsupportedMediaType,
        Self::RequestedRangeNotSatisfiable,
        Self::ExpectationFailed,
        Self::Teapot,
        Self::MisdirectedRequest,
        Self::UnprocessableEntity,
        Self::Locked,
        Self::FailedDependency,
        Self::TooEarly,
        Self::UpgradeRequired,
        Self::PreconditionRequired,
        Self::TooManyRequests,
        Self::RequestHeaderFieldsTooLarge,
        Self::UnavailableForLegalReasons,
        Self::InternalServerError,
        Self::NotImplemented,
        Self::BadGateway,
        Self::ServiceUnavailable,
        Self::GatewayTimeout,
        Self::HttpVersionNotSupported,
        Self::VariantAlsoNegotiates,
        Self::InsufficientStorage,
        Self::LoopDetected,
        Self::NotExtended,
        Self::NetworkAuthenticationRequired,
    ];

    /// The wire form of this code, e.g. `M_NOT_FOUND`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "M_BAD_REQUEST",
            Self::Unauthorized => "M_UNAUTHORIZED",
            Self::PaymentRequired => "M_PAYMENT_REQUIRED",
            Self::Forbidden => "M_FORBIDDEN",
            Self::NotFound => "M_NOT_FOUND",
            Self::MethodNotAllowed => "M_METHOD_NOT_ALLOWED",
            Self::NotAcceptable => "M_NOT_ACCEPTABLE",
            Self::ProxyAuthRequired => "M_PROXY_AUTH_REQUIRED",
            Self::RequestTimeout => "M_REQUEST_TIMEOUT",
            Self::Conflict => "M_CONFLICT",
            Self::Gone => "M_GONE",
            Self::LengthRequired => "M_LENGTH_REQUIRED",
            Self::PreconditionFailed => "M_PRECONDITION_FAILED",
            Self::RequestEntityTooLarge => "M_REQUEST_ENTITY_TOO_LARGE",
            Self::RequestUriTooLong => "M_REQUEST_URI_TOO_LONG",
            Self::UnsupportedMediaType => "M_UNSUPPORTED_MEDIA_TYPE",
            Self::RequestedRangeNotSatisfiable => "M_REQUESTED_RANGE_NOT_SATISFIABLE",
            Self::ExpectationFailed => "M_EXPECTATION_FAILED",
            Self::Teapot => "M_TEAPOT",
            Self::MisdirectedRequest => "M_MISDIRECTED_REQUEST",
            Self::UnprocessableEntity => "M_UNPROCESSABLE_ENTITY",
            Self::Locked => "M_LOCKED",
            Self::FailedDependency => "M_FAILED_DEPENDENCY",
            Self::TooEarly => "M_TOO_EARLY",
            Self::UpgradeRequired => "M_UPGRADE_REQUIRED",
            Self::PreconditionRequired => "M_PRECONDITION_REQUIRED",
            Self::TooManyRequests => "M_TOO_MANY_REQUESTS",
            Self::RequestHeaderFieldsTooLarge => "M_REQUEST_HEADER_FIELDS_TOO_LARGE",
            Self::UnavailableForLegalReasons => "M_UNAVAILABLE_FOR_LEGAL_REASONS",
            Self::InternalServerError => "M_INTERNAL_SERVER_ERROR",
            Self::NotImplemented => "M_NOT_IMPLEMENTED",
            Self::BadGateway => "M_BAD_GATEWAY",
            Self::ServiceUnavailable => "M_SERVICE_UNAVAILABLE",
            Self::GatewayTimeout => "M_GATEWAY_TIMEOUT",
            Self::HttpVersionNotSupported => "M_HTTP_VERSION_NOT_SUPPORTED",
            Self::VariantAlsoNegotiates => "M_VARIANT_ALSO_NEGOTIATES",
            Self::InsufficientStorage => "M_INSUFFICIENT_STORAGE",
            Self::LoopDetected => "M_LOOP_DETECTED",
            Self::NotExtended => "M_NOT_EXTENDED",
            Self::NetworkAuthenticationRequired => "M_NETWORK_AUTHENTICATION_REQUIRED",
        }
    }

    /// Canonical human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::PaymentRequired => "Payment Required",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::NotAcceptable => "Not Acceptable",
            Self::ProxyAuthRequired => "Proxy Auth Required",
            Self::RequestTimeout => "Request Timeout",
            Self::Conflict => "Conflict",
            Self::Gone => "Gone",
            Self::LengthRequired => "Length Required",
            Self::PreconditionFailed => "Precondition Failed",
            Self::RequestEntityTooLarge => "Request Entity Too Large",
            Self::RequestUriTooLong => "Request URI Too Long",
            Self::UnsupportedMediaType => "Unsupported Media Type",
            Self::RequestedRangeNotSatisfiable => "Requested Range Not Satisfiable",
            Self::ExpectationFailed => "Expectation Failed",
            Self::Teapot => "Teapot",
            Self::MisdirectedRequest => "Misdirected Request",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::Locked => "Locked",
            Self::FailedDependency => "Failed Dependency",
            Self::TooEarly => "Too Early",
            Self::UpgradeRequired => "Upgrade Required",
            Self::PreconditionRequired => "Precondition Required",
            Self::TooManyRequests => "Too Many Requests",
            Self::RequestHeaderFieldsTooLarge => "Request Header Fields Too Large",
            Self::UnavailableForLegalReasons => "Unavailable For Legal Reasons",
            Self::InternalServerError => "Internal Server Error",
            Self::NotImplemented => "Not Implemented",
            Self::BadGateway => "Bad Gateway",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::GatewayTimeout => "Gateway Timeout",
            Self::HttpVersionNotSupported => "HTTP Version Not Supported",
            Self::VariantAlsoNegotiates => "Variant Also Negotiates",
            Self::InsufficientStorage => "Insufficient Storage",
            Self::LoopDetected => "Loop Detected",
            Self::NotExtended => "Not Extended",
            Self::NetworkAuthenticationRequired => "Network Authentication Required",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::PaymentRequired => 402,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::NotAcceptable => 406,
            Self::ProxyAuthRequired => 407,
            Self::RequestTimeout => 408,
            Self::Conflict => 409,
            Self::Gone => 410,
            Self::LengthRequired => 411,
            Self::PreconditionFailed => 412,
            Self::RequestEntityTooLarge => 413,
            Self::RequestUriTooLong => 414,
            Self::UnsupportedMediaType => 415,
            Self::RequestedRangeNotSatisfiable => 416,
            Self::ExpectationFailed => 417,
            Self::Teapot => 418,
            Self::MisdirectedRequest => 421,
            Self::UnprocessableEntity => 422,
            Self::Locked => 423,
            Self::FailedDependency => 424,
            Self::TooEarly => 425,
            Self::UpgradeRequired => 426,
            Self::PreconditionRequired => 428,
            Self::TooManyRequests => 429,
            Self::RequestHeaderFieldsTooLarge => 431,
            Self::UnavailableForLegalReasons => 451,
            Self::InternalServerError => 500,
            Self::NotImplemented => 501,
            Self::BadGateway => 502,
            Self::ServiceUnavailable => 503,
            Self::GatewayTimeout => 504,
            Self::HttpVersionNotSupported => 505,
            Self::VariantAlsoNegotiates => 506,
            Self::InsufficientStorage => 507,
            Self::LoopDetected => 508,
            Self::NotExtended => 510,
            Self::NetworkAuthenticationRequired => 511,
        }
    }

    /// Reverse of [`ErrorCode::status_code`]; `None` for statuses without a code
    pub fn from_status(status: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.status_code() == status)
    }

    /// Case-insensitive parse of the wire form (`m_not_found` works too)
    pub fn parse(errcode: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(errcode))
    }
}
