//! Application builder: the registration surface the dispatcher consumes.
//!
//! Routes, interceptors, static prefixes and the optional 404 view are
//! collected here and frozen into a read-only [`Dispatcher`] by
//! [`App::build`]; registration completes before concurrent dispatch begins.

use std::sync::Arc;

use hyper::Method;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::render::{TemplateRenderer, ViewRenderer};
use crate::router::matcher::RouteMatcher;
use crate::router::route::{Handler, MethodTarget, Route, RouteKind, Target};

pub struct App {
    config: Config,
    routes: Vec<Route>,
    static_prefixes: Vec<String>,
    view_404: Option<String>,
    renderer: Option<Arc<dyn ViewRenderer>>,
}

impl App {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            routes: Vec::new(),
            static_prefixes: Vec::new(),
            view_404: None,
            renderer: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.route(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.route(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.route(Method::PUT, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.route(Method::DELETE, path, handler)
    }

    /// Register a handler for a specific method.
    pub fn route(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes.push(Route::new(
            Some(method),
            path,
            Target::Handler(Arc::new(handler)),
            RouteKind::Route,
        ));
        self
    }

    /// Register a handler matching every HTTP method.
    pub fn any(mut self, path: &str, handler: impl Handler) -> Self {
        self.routes.push(Route::new(
            None,
            path,
            Target::Handler(Arc::new(handler)),
            RouteKind::Route,
        ));
        self
    }

    /// Register a bound-method target (see [`MethodTarget`]).
    pub fn action(mut self, method: Method, path: &str, target: MethodTarget) -> Self {
        self.routes.push(Route::new(
            Some(method),
            path,
            Target::Method(Arc::new(target)),
            RouteKind::Route,
        ));
        self
    }

    /// Register a before-interceptor for every request whose path matches.
    pub fn before(mut self, path: &str, handler: impl Handler) -> Self {
        self.routes.push(Route::new(
            None,
            path,
            Target::Handler(Arc::new(handler)),
            RouteKind::Before,
        ));
        self
    }

    /// Register an after-interceptor for every request whose path matches.
    pub fn after(mut self, path: &str, handler: impl Handler) -> Self {
        self.routes.push(Route::new(
            None,
            path,
            Target::Handler(Arc::new(handler)),
            RouteKind::After,
        ));
        self
    }

    /// Paths under this prefix are left to the transport's static handler;
    /// the dispatcher declines them before any routing.
    pub fn static_prefix(mut self, prefix: &str) -> Self {
        let prefix = if prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{prefix}")
        };
        self.static_prefixes.push(prefix);
        self
    }

    /// Name of the view rendered for unmatched requests instead of the
    /// fixed not-found page.
    pub fn view_404(mut self, view: &str) -> Self {
        self.view_404 = Some(view.to_string());
        self
    }

    /// Replace the default template renderer.
    pub fn renderer(mut self, renderer: impl ViewRenderer) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Freeze the registered routes into the read-only dispatcher.
    pub fn build(self) -> Dispatcher {
        let renderer = self
            .renderer
            .unwrap_or_else(|| Arc::new(TemplateRenderer::new(&self.config.resources.template_dir)));
        Dispatcher::new(
            RouteMatcher::new(self.routes),
            self.static_prefixes,
            self.view_404,
            renderer,
            self.config.logging.access_log,
        )
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Request, Response};
    use crate::error::DispatchError;

    #[test]
    fn test_static_prefix_normalized() {
        let dispatcher = App::new().static_prefix("assets").build();
        let mut req = Request::new(Method::GET, "/assets/app.js");
        let mut resp = Response::new();
        assert!(!dispatcher.handle(&mut req, &mut resp));
    }

    #[test]
    fn test_any_route_matches_all_methods() {
        let dispatcher = App::new()
            .any(
                "/ping",
                |_req: &mut Request, resp: &mut Response| -> Result<(), DispatchError> {
                    resp.text("pong");
                    Ok(())
                },
            )
            .build();

        for method in [Method::GET, Method::POST, Method::DELETE] {
            let mut req = Request::new(method, "/ping");
            let mut resp = Response::new();
            assert!(dispatcher.handle(&mut req, &mut resp));
            assert_eq!(resp.body(), b"pong");
        }
    }
}
