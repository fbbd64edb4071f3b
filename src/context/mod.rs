//! Per-request context module
//!
//! Holds the mutable state of one in-flight request:
//! - [`Request`]: method, URI, headers, lazily populated path parameters
//! - [`Response`]: buffered status/body with a committed flag
//! - [`DispatchContext`]: the request/response pair threaded explicitly
//!   through every interceptor and handler invocation
//!
//! Each request owns its context pair exclusively for its whole lifetime.
//! There is no process-wide "current request" binding; concurrent requests
//! cannot observe each other's path parameters or response targets.

pub mod request;
pub mod response;

pub use request::Request;
pub use response::Response;

/// The dispatch context for one request, passed by parameter through the
/// whole invocation chain (before-interceptors, target, after-interceptors).
pub struct DispatchContext<'a> {
    pub request: &'a mut Request,
    pub response: &'a mut Response,
}

impl<'a> DispatchContext<'a> {
    pub fn new(request: &'a mut Request, response: &'a mut Response) -> Self {
        Self { request, response }
    }
}
