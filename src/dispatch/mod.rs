//! Request dispatch module
//!
//! The orchestrator of one request: static-prefix short-circuit, route
//! lookup, before/after interceptor chains, target invocation, and the
//! single failure boundary that turns every error into a 404 or 500 page.
//! Exactly one outcome is produced per request and nothing — including a
//! panic in a handler — escapes to the transport layer.

pub mod args;

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::context::{DispatchContext, Request, Response};
use crate::error::DispatchError;
use crate::logger;
use crate::render::ViewRenderer;
use crate::router::matcher::RouteMatcher;
use crate::router::route::{Route, Target};
use crate::VERSION;

fn not_found_page(uri: &str) -> String {
    format!(
        "<html><head><title>404 Not Found</title></head><body bgcolor=\"white\">\
         <center><h1>[ {uri} ] Not Found</h1></center><hr><center>mica {VERSION}</center>\
         </body></html>"
    )
}

fn internal_error_page() -> String {
    format!(
        "<html><head><title>500 Internal Error</title></head><body bgcolor=\"white\">\
         <center><h1>500 Internal Error</h1></center><hr><center>mica {VERSION}</center>\
         </body></html>"
    )
}

/// The dispatch core. Stateless per request: everything it holds is
/// immutable after [`crate::app::App::build`], shared read-only across all
/// concurrent requests, and it takes no locks.
pub struct Dispatcher {
    matcher: RouteMatcher,
    static_prefixes: Vec<String>,
    view_404: Option<String>,
    renderer: Arc<dyn ViewRenderer>,
    access_log: bool,
}

impl Dispatcher {
    pub(crate) fn new(
        matcher: RouteMatcher,
        static_prefixes: Vec<String>,
        view_404: Option<String>,
        renderer: Arc<dyn ViewRenderer>,
        access_log: bool,
    ) -> Self {
        Self {
            matcher,
            static_prefixes,
            view_404,
            renderer,
            access_log,
        }
    }

    /// Handle one request end-to-end.
    ///
    /// Returns `true` when the request was fully handled (including the
    /// synthesized 404/500 pages) and `false` when the caller should serve
    /// it instead: static-asset paths, and the case where an error was
    /// caught after the response had already been committed.
    pub fn handle(&self, request: &mut Request, response: &mut Response) -> bool {
        // Static assets short-circuit before any routing.
        if self.is_static_path(request.path()) {
            return false;
        }

        if self.access_log {
            logger::log_request(request.method(), request.uri());
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut ctx = DispatchContext::new(request, response);
            self.dispatch(&mut ctx)
        }));
        let result = match outcome {
            Ok(result) => result,
            Err(payload) => Err(DispatchError::Panic(panic_message(&payload))),
        };

        match result {
            Ok(()) => true,
            Err(err) => {
                logger::log_dispatch_error(&err);
                response.status(500);
                if response.is_committed() {
                    // No further bytes can reach the client; swallow after
                    // logging and report the request as not handled here.
                    false
                } else {
                    response.html(internal_error_page());
                    true
                }
            }
        }
    }

    fn dispatch(&self, ctx: &mut DispatchContext<'_>) -> Result<(), DispatchError> {
        let path = ctx.request.path().to_owned();
        let Some(route) = self.matcher.find_route(ctx.request.method(), &path) else {
            let uri = ctx.request.uri().to_owned();
            return self.render_not_found(ctx.response, &uri);
        };

        self.run_chain(&self.matcher.before_interceptors(&path), ctx)?;
        self.invoke(route, ctx)?;
        self.run_chain(&self.matcher.after_interceptors(&path), ctx)
    }

    /// Interceptor chain runner: same invocation path as a normal route,
    /// strictly in order. The first failure aborts the rest of the phase
    /// and propagates to the boundary in `handle`.
    fn run_chain(
        &self,
        interceptors: &[&Route],
        ctx: &mut DispatchContext<'_>,
    ) -> Result<(), DispatchError> {
        for route in interceptors {
            self.invoke(route, ctx)?;
        }
        Ok(())
    }

    /// Invoke one target. Path parameters are repopulated from the route's
    /// own pattern right before the call, so whichever target executes next
    /// sees its own bindings.
    fn invoke(&self, route: &Route, ctx: &mut DispatchContext<'_>) -> Result<(), DispatchError> {
        ctx.request.populate_path_params(route.pattern());
        match route.target() {
            Target::Handler(handler) => handler.handle(ctx.request, ctx.response),
            Target::Method(target) => {
                let resolved = args::resolve(target.params(), ctx.request, ctx.response);
                target.invoke(resolved)
            }
        }
    }

    fn render_not_found(&self, response: &mut Response, uri: &str) -> Result<(), DispatchError> {
        response.status(404);
        if let Some(view) = &self.view_404 {
            let mut vars = HashMap::new();
            vars.insert("viewName".to_string(), uri.to_string());
            self.renderer.render(view, &vars, response)
        } else {
            response.html(not_found_page(uri));
            Ok(())
        }
    }

    fn is_static_path(&self, path: &str) -> bool {
        self.static_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
