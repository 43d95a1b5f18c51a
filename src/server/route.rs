use axum::{
    handler::Handler,
    http::Method,
    routing::{on, MethodFilter, MethodRouter},
};
use serde::{Serialize, Serializer};

use super::error::ServerError;

/// Descriptive data about a route
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMeta {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub path: String,
    pub name: String,
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}

/// A handler plus its metadata
pub struct Route {
    pub meta: RouteMeta,
    pub handler: MethodRouter,
}

impl Route {
    /// Route for any method axum can dispatch on
    pub fn new<H, T>(
        method: Method,
        path: impl Into<String>,
        name: impl Into<String>,
        handler: H,
    ) -> Result<Self, ServerError>
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        let filter = MethodFilter::try_from(method.clone())
            .map_err(|_| ServerError::UnsupportedMethod(method.clone()))?;
        Ok(Self::with_filter(method, filter, path, name, handler))
    }

    pub fn get<H, T>(path: impl Into<String>, name: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::with_filter(Method::GET, MethodFilter::GET, path, name, handler)
    }

    pub fn post<H, T>(path: impl Into<String>, name: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::with_filter(Method::POST, MethodFilter::POST, path, name, handler)
    }

    pub fn put<H, T>(path: impl Into<String>, name: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::with_filter(Method::PUT, MethodFilter::PUT, path, name, handler)
    }

    pub fn delete<H, T>(path: impl Into<String>, name: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self::with_filter(Method::DELETE, MethodFilter::DELETE, path, name, handler)
    }

    fn with_filter<H, T>(
        method: Method,
        filter: MethodFilter,
        path: impl Into<String>,
        name: impl Into<String>,
        handler: H,
    ) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self {
            meta: RouteMeta {
                method,
                path: path.into(),
                name: name.into(),
            },
            handler: on(filter, handler),
        }
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route").field("meta", &self.meta).finish()
    }
}

/// A group of routes to expose and serve through the server
pub trait RouteGroup {
    fn routes(&self) -> Vec<Route>;
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn noop() {}

    #[test]
    fn test_shortcuts_set_method() {
        assert_eq!(Route::get("/a", "a", noop).meta.method, Method::GET);
        assert_eq!(Route::post("/a", "a", noop).meta.method, Method::POST);
        assert_eq!(Route::put("/a", "a", noop).meta.method, Method::PUT);
        assert_eq!(Route::delete("/a", "a", noop).meta.method, Method::DELETE);
    }

    #[test]
    fn test_new_accepts_standard_methods() {
        let route = Route::new(Method::PATCH, "/a", "patch_a", noop).unwrap();
        assert_eq!(route.meta.path, "/a");
        assert_eq!(route.meta.name, "patch_a");
    }

    #[test]
    fn test_new_rejects_extension_methods() {
        let method = Method::from_bytes(b"PURGE").unwrap();
        let err = Route::new(method, "/a", "purge", noop).unwrap_err();
        assert!(matches!(err, ServerError::UnsupportedMethod(_)));
    }

    #[test]
    fn test_meta_serializes_method_as_string() {
        let meta = Route::get("/versions", "versions", noop).meta;
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["method"], "GET");
        assert_eq!(json["path"], "/versions");
    }
}
