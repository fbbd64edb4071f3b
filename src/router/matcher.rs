//! Route matching.
//!
//! Built once from the registered route list, read-only afterwards. Lookup
//! precedence: among routes whose method and pattern match, the pattern with
//! the fewest dynamic (parameter/wildcard) segments wins, so an exact route
//! always beats a parameterized one; ties go to the earliest registration.

use hyper::Method;

use super::route::{Route, RouteKind};

#[derive(Debug)]
pub struct RouteMatcher {
    routes: Vec<Route>,
    before: Vec<Route>,
    after: Vec<Route>,
}

impl RouteMatcher {
    /// Partition registered routes by kind, preserving registration order
    /// within each kind.
    pub fn new(all: Vec<Route>) -> Self {
        let mut routes = Vec::new();
        let mut before = Vec::new();
        let mut after = Vec::new();
        for route in all {
            match route.kind() {
                RouteKind::Route => routes.push(route),
                RouteKind::Before => before.push(route),
                RouteKind::After => after.push(route),
            }
        }
        Self {
            routes,
            before,
            after,
        }
    }

    /// Best-matching route for `(method, path)`, or `None`.
    pub fn find_route(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes
            .iter()
            .filter(|route| {
                route.method().is_none_or(|m| m == method) && route.pattern().matches(path)
            })
            .min_by_key(|route| route.pattern().dynamic_count())
    }

    /// Before-interceptors applicable to `path`, in registration order.
    /// Empty when none apply.
    pub fn before_interceptors(&self, path: &str) -> Vec<&Route> {
        Self::applicable(&self.before, path)
    }

    /// After-interceptors applicable to `path`, in registration order.
    /// Empty when none apply.
    pub fn after_interceptors(&self, path: &str) -> Vec<&Route> {
        Self::applicable(&self.after, path)
    }

    fn applicable<'a>(interceptors: &'a [Route], path: &str) -> Vec<&'a Route> {
        interceptors
            .iter()
            .filter(|route| route.pattern().matches(path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use crate::router::route::Target;
    use std::sync::Arc;

    fn noop_target() -> Target {
        Target::Handler(Arc::new(
            |_: &mut crate::context::Request,
             _: &mut crate::context::Response|
             -> Result<(), DispatchError> { Ok(()) },
        ))
    }

    fn route(method: Method, pattern: &str) -> Route {
        Route::new(Some(method), pattern, noop_target(), RouteKind::Route)
    }

    fn interceptor(pattern: &str, kind: RouteKind) -> Route {
        Route::new(None, pattern, noop_target(), kind)
    }

    #[test]
    fn test_find_route_by_method_and_path() {
        let matcher = RouteMatcher::new(vec![
            route(Method::GET, "/user/list"),
            route(Method::POST, "/user/save"),
        ]);
        let found = matcher.find_route(&Method::GET, "/user/list").unwrap();
        assert_eq!(found.pattern().raw(), "/user/list");
        assert!(matcher.find_route(&Method::POST, "/user/list").is_none());
        assert!(matcher.find_route(&Method::GET, "/user/save").is_none());
    }

    #[test]
    fn test_exact_beats_parameterized() {
        let matcher = RouteMatcher::new(vec![
            route(Method::GET, "/user/:id"),
            route(Method::GET, "/user/new"),
        ]);
        let found = matcher.find_route(&Method::GET, "/user/new").unwrap();
        assert_eq!(found.pattern().raw(), "/user/new");
        let found = matcher.find_route(&Method::GET, "/user/42").unwrap();
        assert_eq!(found.pattern().raw(), "/user/:id");
    }

    #[test]
    fn test_tie_breaks_by_registration_order() {
        let matcher = RouteMatcher::new(vec![
            route(Method::GET, "/a/:x"),
            route(Method::GET, "/:y/b"),
        ]);
        let found = matcher.find_route(&Method::GET, "/a/b").unwrap();
        assert_eq!(found.pattern().raw(), "/a/:x");
    }

    #[test]
    fn test_methodless_route_matches_any_method() {
        let matcher = RouteMatcher::new(vec![Route::new(
            None,
            "/health",
            noop_target(),
            RouteKind::Route,
        )]);
        assert!(matcher.find_route(&Method::GET, "/health").is_some());
        assert!(matcher.find_route(&Method::DELETE, "/health").is_some());
    }

    #[test]
    fn test_interceptors_in_registration_order() {
        let matcher = RouteMatcher::new(vec![
            interceptor("/admin/*", RouteKind::Before),
            interceptor("/*", RouteKind::Before),
            interceptor("/admin/*", RouteKind::After),
        ]);
        let before = matcher.before_interceptors("/admin/users");
        assert_eq!(before.len(), 2);
        assert_eq!(before[0].pattern().raw(), "/admin/*");
        assert_eq!(before[1].pattern().raw(), "/*");

        assert_eq!(matcher.after_interceptors("/admin/users").len(), 1);
        assert!(matcher.after_interceptors("/public").is_empty());
    }

    #[test]
    fn test_no_interceptors_is_empty_not_error() {
        let matcher = RouteMatcher::new(vec![route(Method::GET, "/")]);
        assert!(matcher.before_interceptors("/anything").is_empty());
        assert!(matcher.after_interceptors("/anything").is_empty());
    }
}
