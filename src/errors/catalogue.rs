//! Status-code → error descriptor table

use lazy_static::lazy_static;
use serde_json::Value;
use std::collections::BTreeMap;

use super::codes::ErrorCode;

/// A canonical error: machine-readable code, message and optional diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDescriptor {
    pub code: ErrorCode,
    pub message: &'static str,
    pub extra: Option<Value>,
}

impl ErrorDescriptor {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.message(),
            extra: None,
        }
    }

    /// Copy of this descriptor carrying diagnostic context
    pub fn with_extra(&self, extra: Value) -> Self {
        Self {
            extra: Some(extra),
            ..self.clone()
        }
    }

    /// Path of the error document the HAL `self` link points at
    pub fn href(&self) -> String {
        format!("/_matrix/errors/{}", self.code.as_str().to_lowercase())
    }
}

/// Immutable mapping from HTTP status code to [`ErrorDescriptor`]
#[derive(Debug)]
pub struct Catalogue {
    entries: BTreeMap<u16, ErrorDescriptor>,
    fallback: ErrorDescriptor,
}

impl Catalogue {
    /// Table covering every standard 4xx/5xx status
    pub fn standard() -> Self {
        let entries = ErrorCode::ALL
            .into_iter()
            .map(|code| (code.status_code(), ErrorDescriptor::new(code)))
            .collect();

        Self {
            entries,
            fallback: ErrorDescriptor::new(ErrorCode::InternalServerError),
        }
    }

    /// Descriptor for `status`, or the internal-server-error one when unmapped
    pub fn lookup(&self, status: u16) -> &ErrorDescriptor {
        self.entries.get(&status).unwrap_or(&self.fallback)
    }

    /// Reverse lookup by errcode, ignoring case
    pub fn find(&self, errcode: &str) -> Option<&ErrorDescriptor> {
        let code = ErrorCode::parse(errcode)?;
        self.entries.get(&code.status_code())
    }

    /// All `(status, descriptor)` pairs in status order
    pub fn entries(&self) -> impl Iterator<Item = (u16, &ErrorDescriptor)> {
        self.entries.iter().map(|(status, d)| (*status, d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

lazy_static! {
    /// Process-wide catalogue, read-only once built
    pub static ref CATALOGUE: Catalogue = Catalogue::standard();
}

/// Force construction of [`CATALOGUE`] before serving traffic
pub fn init() {
    lazy_static::initialize(&CATALOGUE);
}

/// Descriptor for an HTTP status code; never fails
pub fn lookup(status: u16) -> &'static ErrorDescriptor {
    CATALOGUE.lookup(status)
}

/// Descriptor for an errcode such as `M_NOT_FOUND` (case-insensitive)
pub fn find(errcode: &str) -> Option<&'static ErrorDescriptor> {
    CATALOGUE.find(errcode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    const STANDARD_STATUSES: [u16; 40] = [
        400, 401, 402, 403, 404, 405, 406, 407, 408, 409, 410, 411, 412, 413, 414, 415, 416,
        417, 418, 421, 422, 423, 424, 425, 426, 428, 429, 431, 451, 500, 501, 502, 503, 504, 505,
        506, 507, 508, 510, 511,
    ];

    #[test]
    fn test_every_standard_status_is_mapped() {
        for status in STANDARD_STATUSES {
            let descriptor = lookup(status);
            let code = descriptor.code.as_str();
            assert!(!code.is_empty());
            assert!(code.starts_with("M_"), "{status} -> {code}");
            assert_eq!(code, code.to_uppercase());
            assert_eq!(descriptor.code.status_code(), status);
        }
        assert_eq!(CATALOGUE.len(), STANDARD_STATUSES.len());
    }

    #[test]
    fn test_unmapped_status_falls_back_to_internal_error() {
        for status in [499, 200, 302, 599, 0] {
            assert_eq!(lookup(status).code, ErrorCode::InternalServerError);
            assert_eq!(lookup(status).message, "Internal Server Error");
        }
    }

    #[test]
    fn test_errcodes_are_unique() {
        let mut seen = HashSet::new();
        for (_, descriptor) in CATALOGUE.entries() {
            assert!(seen.insert(descriptor.code.as_str()), "{}", descriptor.code);
        }
    }

    #[test]
    fn test_lookup_is_idempotent() {
        for status in STANDARD_STATUSES {
            assert_eq!(lookup(status), lookup(status));
        }
    }

    #[test]
    fn test_descriptors_carry_no_extra_by_default() {
        assert!(CATALOGUE.entries().all(|(_, d)| d.extra.is_none()));
    }

    #[test]
    fn test_with_extra_leaves_catalogue_untouched() {
        let detailed = lookup(404).with_extra(json!({"path": "/nope"}));
        assert_eq!(detailed.code, ErrorCode::NotFound);
        assert!(detailed.extra.is_some());
        assert!(lookup(404).extra.is_none());
    }

    #[test]
    fn test_href() {
        assert_eq!(lookup(404).href(), "/_matrix/errors/m_not_found");
    }

    #[test]
    fn test_find() {
        assert_eq!(find("m_teapot").map(|d| d.code), Some(ErrorCode::Teapot));
        assert!(find("M_UNKNOWN").is_none());
    }
}
