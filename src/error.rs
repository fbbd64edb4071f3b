//! Dispatch error taxonomy.
//!
//! Every failure raised during dispatch is carried up the call chain as a
//! [`DispatchError`] and translated into an HTTP status/body exactly once, at
//! the dispatcher boundary. A missing route is not an error: the matcher
//! returns `None` and the dispatcher renders the 404 page as a normal branch.

use thiserror::Error;

/// Boxed error used to wrap arbitrary failure causes from handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Deliberate application-level failure raised by a handler or
    /// interceptor to abort the current request.
    #[error("application error: {0}")]
    App(String),

    /// A view template could not be loaded or rendered.
    #[error("failed to render view '{view}': {source}")]
    Render {
        view: String,
        #[source]
        source: std::io::Error,
    },

    /// Any other failure surfaced while matching, resolving arguments or
    /// invoking a target.
    #[error("unexpected error: {0}")]
    Unexpected(BoxError),

    /// A handler or interceptor panicked; the panic is contained at the
    /// dispatcher boundary and never crosses into the transport layer.
    #[error("target panicked: {0}")]
    Panic(String),
}

impl DispatchError {
    /// Shorthand for raising an application error from a handler.
    pub fn app(message: impl Into<String>) -> Self {
        Self::App(message.into())
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        Self::Unexpected(err)
    }
}

impl From<std::io::Error> for DispatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Unexpected(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = DispatchError::app("user not found");
        assert_eq!(err.to_string(), "application error: user not found");
    }

    #[test]
    fn test_io_error_converts_to_unexpected() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: DispatchError = io.into();
        assert!(matches!(err, DispatchError::Unexpected(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_render_error_keeps_source() {
        let err = DispatchError::Render {
            view: "404".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no template"),
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
