use axum::{http::Method, routing::MethodRouter};
use std::collections::{BTreeMap, HashSet};
use tracing::info;

use super::error::ServerError;
use super::route::{Route, RouteGroup, RouteMeta};

/// A route group mounted under a path prefix
pub struct Module {
    prefix: String,
    routes: Vec<RouteMeta>,
    endpoints: BTreeMap<String, MethodRouter>,
}

impl Module {
    /// Collect the group's routes under `prefix`, each `(method, path)` once
    pub fn new(prefix: impl Into<String>, group: &dyn RouteGroup) -> Result<Self, ServerError> {
        let prefix = prefix.into();
        if !prefix.starts_with('/') {
            return Err(ServerError::InvalidPrefix(prefix));
        }

        let mut seen: HashSet<(Method, String)> = HashSet::new();
        let mut endpoints: BTreeMap<String, MethodRouter> = BTreeMap::new();
        let mut routes = Vec::new();

        for Route { meta, handler } in group.routes() {
            if !meta.path.starts_with('/') {
                return Err(ServerError::InvalidPath(meta.path));
            }
            if !seen.insert((meta.method.clone(), meta.path.clone())) {
                return Err(ServerError::DuplicateRoute {
                    method: meta.method,
                    path: join(&prefix, &meta.path),
                });
            }

            info!(
                prefix = %prefix,
                method = %meta.method,
                path = %meta.path,
                name = %meta.name,
                "Adding route"
            );

            let full_path = join(&prefix, &meta.path);
            check_conflicts(&full_path, endpoints.keys())?;
            let merged = match endpoints.remove(&full_path) {
                Some(existing) => existing.merge(handler),
                None => handler,
            };
            endpoints.insert(full_path, merged);
            routes.push(meta);
        }

        Ok(Self {
            prefix,
            routes,
            endpoints,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Route metadata, paths relative to the prefix
    pub fn routes(&self) -> &[RouteMeta] {
        &self.routes
    }

    /// Route metadata with the prefix applied
    pub fn full_routes(&self) -> Vec<RouteMeta> {
        self.routes
            .iter()
            .map(|meta| RouteMeta {
                path: join(&self.prefix, &meta.path),
                ..meta.clone()
            })
            .collect()
    }

    /// Hand the handlers over to the server; metadata stays behind
    pub(crate) fn take_endpoints(&mut self) -> BTreeMap<String, MethodRouter> {
        std::mem::take(&mut self.endpoints)
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Module")
            .field("prefix", &self.prefix)
            .field("routes", &self.routes)
            .finish()
    }
}

/// Reject `path` if axum's matcher could not hold it next to `existing`
pub(crate) fn check_conflicts<'a>(
    path: &str,
    existing: impl IntoIterator<Item = &'a String>,
) -> Result<(), ServerError> {
    match existing.into_iter().find(|other| conflicts(path, other)) {
        Some(other) => Err(ServerError::ConflictingRoute {
            path: path.to_string(),
            existing: other.clone(),
        }),
        None => Ok(()),
    }
}

#[derive(PartialEq)]
enum Segment<'a> {
    Static(&'a str),
    Param(&'a str),
    CatchAll(&'a str),
}

impl<'a> Segment<'a> {
    fn parse(segment: &'a str) -> Self {
        if let Some(name) = segment.strip_prefix(':') {
            Segment::Param(name)
        } else if let Some(name) = segment.strip_prefix('*') {
            Segment::CatchAll(name)
        } else {
            Segment::Static(segment)
        }
    }
}

/// Two distinct paths clash when, at the first segment where they differ,
/// parameters disagree on name or a catch-all shares the position
fn conflicts(a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }

    for (sa, sb) in a.split('/').map(Segment::parse).zip(b.split('/').map(Segment::parse)) {
        if sa == sb {
            continue;
        }
        return match (sa, sb) {
            (Segment::Static(_), Segment::Static(_)) => false,
            (Segment::Static(_), Segment::Param(_)) | (Segment::Param(_), Segment::Static(_)) => {
                false
            }
            _ => true,
        };
    }
    false
}

/// Join a module prefix and a route path without doubling slashes
pub(crate) fn join(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    match (prefix.is_empty(), path) {
        (true, _) => path.to_string(),
        (false, "/") => prefix.to_string(),
        (false, _) => format!("{}{}", prefix, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn noop() {}

    struct Group(Vec<(Method, &'static str)>);

    impl RouteGroup for Group {
        fn routes(&self) -> Vec<Route> {
            self.0
                .iter()
                .map(|(method, path)| Route::new(method.clone(), *path, *path, noop).unwrap())
                .collect()
        }
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/_matrix/client", "/versions"), "/_matrix/client/versions");
        assert_eq!(join("/health", "/"), "/health");
        assert_eq!(join("/", "/metrics"), "/metrics");
        assert_eq!(join("/", "/"), "/");
        assert_eq!(join("/a/", "/b"), "/a/b");
    }

    #[test]
    fn test_same_path_different_methods_is_allowed() {
        let group = Group(vec![(Method::GET, "/room"), (Method::PUT, "/room")]);
        let mut module = Module::new("/v1", &group).unwrap();
        assert_eq!(module.routes().len(), 2);
        assert_eq!(module.take_endpoints().len(), 1);
    }

    #[test]
    fn test_duplicate_route_is_rejected() {
        let group = Group(vec![(Method::GET, "/room"), (Method::GET, "/room")]);
        let err = Module::new("/v1", &group).unwrap_err();
        match err {
            ServerError::DuplicateRoute { method, path } => {
                assert_eq!(method, Method::GET);
                assert_eq!(path, "/v1/room");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_differently_named_params_are_rejected() {
        let group = Group(vec![(Method::GET, "/rooms/:id"), (Method::PUT, "/rooms/:room_id")]);
        let err = Module::new("/v1", &group).unwrap_err();
        match err {
            ServerError::ConflictingRoute { path, existing } => {
                assert_eq!(path, "/v1/rooms/:room_id");
                assert_eq!(existing, "/v1/rooms/:id");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_catch_all_beside_param_is_rejected() {
        let group = Group(vec![(Method::GET, "/files/*rest"), (Method::GET, "/files/:id")]);
        assert!(matches!(
            Module::new("/media", &group),
            Err(ServerError::ConflictingRoute { .. })
        ));
    }

    #[test]
    fn test_conflicts() {
        assert!(conflicts("/rooms/:id/members", "/rooms/:room_id/state"));
        assert!(conflicts("/files/*rest", "/files/about"));
        assert!(!conflicts("/rooms/:id", "/rooms/:id"));
        assert!(!conflicts("/rooms/:id/members", "/rooms/:id/state"));
        assert!(!conflicts("/users/me", "/users/:id"));
        assert!(!conflicts("/rooms", "/rooms/:id"));
        assert!(!conflicts("/health", "/metrics"));
    }

    #[test]
    fn test_invalid_prefix_and_path() {
        let group = Group(vec![(Method::GET, "/room")]);
        assert!(matches!(
            Module::new("v1", &group),
            Err(ServerError::InvalidPrefix(_))
        ));

        let group = Group(vec![(Method::GET, "room")]);
        assert!(matches!(
            Module::new("/v1", &group),
            Err(ServerError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_full_routes_apply_prefix() {
        let group = Group(vec![(Method::GET, "/versions")]);
        let module = Module::new("/_matrix/client", &group).unwrap();
        assert_eq!(module.full_routes()[0].path, "/_matrix/client/versions");
        assert_eq!(module.routes()[0].path, "/versions");
    }
}
