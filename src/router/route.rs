//! Route records and invokable targets.
//!
//! A [`Route`] is an immutable registration-time record; the target it
//! dispatches to is a tagged union: either a generic [`Handler`] or a
//! [`MethodTarget`] — a bound method with its parameter spec resolved to a
//! closed [`ParamKind`] list at registration time, so no type inspection
//! happens per call.

use std::fmt;
use std::sync::Arc;

use hyper::Method;

use super::pattern::PathPattern;
use crate::context::{Request, Response};
use crate::dispatch::args::{Arg, ParamKind};
use crate::error::DispatchError;

/// What a route is registered as: a normal route or an interceptor phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Route,
    Before,
    After,
}

/// A generic route target: one `handle` capability over the current
/// request/response contexts.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, request: &mut Request, response: &mut Response) -> Result<(), DispatchError>;
}

impl<F> Handler for F
where
    F: Fn(&mut Request, &mut Response) -> Result<(), DispatchError> + Send + Sync + 'static,
{
    fn handle(&self, request: &mut Request, response: &mut Response) -> Result<(), DispatchError> {
        self(request, response)
    }
}

type MethodFn = Box<dyn for<'a> Fn(Vec<Arg<'a>>) -> Result<(), DispatchError> + Send + Sync>;

/// A method bound to an owning instance, plus the declared parameter spec.
///
/// The spec is fixed when the target is built; at invocation time the
/// argument resolver turns it into a positional argument list and the bound
/// call consumes the list. Return values are unused: methods write to the
/// response context.
pub struct MethodTarget {
    params: Vec<ParamKind>,
    call: MethodFn,
}

impl MethodTarget {
    pub fn new(
        params: Vec<ParamKind>,
        call: impl for<'a> Fn(Vec<Arg<'a>>) -> Result<(), DispatchError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            params,
            call: Box::new(call),
        }
    }

    /// Declared parameter spec, in positional order.
    pub fn params(&self) -> &[ParamKind] {
        &self.params
    }

    pub(crate) fn invoke(&self, args: Vec<Arg<'_>>) -> Result<(), DispatchError> {
        (self.call)(args)
    }

    /// Bind a method taking the request and response contexts.
    pub fn request_response<T, F>(owner: Arc<T>, method: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T, &mut Request, &mut Response) -> Result<(), DispatchError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(vec![ParamKind::Request, ParamKind::Response], move |mut args| {
            let mut slots = args.drain(..);
            match (slots.next(), slots.next()) {
                (Some(Arg::Request(request)), Some(Arg::Response(response))) => {
                    method(&owner, request, response)
                }
                _ => Err(DispatchError::app("argument resolution mismatch")),
            }
        })
    }

    /// Bind a method taking only the request context.
    pub fn request_only<T, F>(owner: Arc<T>, method: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T, &mut Request) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        Self::new(vec![ParamKind::Request], move |mut args| {
            match args.drain(..).next() {
                Some(Arg::Request(request)) => method(&owner, request),
                _ => Err(DispatchError::app("argument resolution mismatch")),
            }
        })
    }

    /// Bind a method taking no injectable parameters.
    pub fn no_args<T, F>(owner: Arc<T>, method: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        Self::new(Vec::new(), move |_args| method(&owner))
    }
}

impl fmt::Debug for MethodTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTarget")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// The invokable unit a route dispatches to.
#[derive(Clone)]
pub enum Target {
    Handler(Arc<dyn Handler>),
    Method(Arc<MethodTarget>),
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Target::Handler"),
            Self::Method(target) => write!(f, "Target::Method({:?})", target.params()),
        }
    }
}

/// An immutable registered route: method, path pattern, target and kind.
/// Interceptor routes carry no method (they apply to every method whose
/// path matches).
#[derive(Debug, Clone)]
pub struct Route {
    method: Option<Method>,
    pattern: PathPattern,
    target: Target,
    kind: RouteKind,
}

impl Route {
    pub fn new(method: Option<Method>, pattern: &str, target: Target, kind: RouteKind) -> Self {
        Self {
            method,
            pattern: PathPattern::parse(pattern),
            target,
            kind,
        }
    }

    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }
}
